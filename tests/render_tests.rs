use storefront_bot::catalog::CatalogItem;
use storefront_bot::config::StoreLinks;
use storefront_bot::relay::RelayKind;
use storefront_bot::render::{
    bold, format_item, format_summary, render_blogs, render_collection, render_offers,
    render_relay_ack, render_relay_failure, render_topic, topic_is_markdown, Topic,
    SUMMARY_MAX_CHARS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> StoreLinks {
        StoreLinks::new("https://maakaalicreations.in/")
    }

    fn product(n: usize) -> CatalogItem {
        CatalogItem::Product {
            title: format!("Saree {n}"),
            price: "799.00".to_string(),
            handle: format!("saree-{n}"),
        }
    }

    /// Test summaries at the limit are untouched
    #[test]
    fn test_summary_at_limit_unchanged() {
        let summary = "a".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(format_summary(&summary), summary);
    }

    /// Test summaries over the limit are cut to 97 characters plus an ellipsis
    #[test]
    fn test_summary_over_limit_truncated() {
        let summary = "b".repeat(SUMMARY_MAX_CHARS + 1);
        let formatted = format_summary(&summary);
        assert_eq!(formatted.chars().count(), 100);
        assert_eq!(formatted, format!("{}...", "b".repeat(97)));
    }

    /// Test product formatting includes title, price and product link
    #[test]
    fn test_format_product() {
        let text = format_item(&product(1), &links());
        assert!(text.contains("*Saree 1*"));
        assert!(text.contains("₹799.00"));
        assert!(text.contains("https://maakaalicreations.in/products/saree-1"));
    }

    /// Test article formatting uses the truncated summary and article link
    #[test]
    fn test_format_article() {
        let article = CatalogItem::Article {
            title: "Draping Guide".to_string(),
            summary: "x".repeat(150),
            handle: "draping-guide".to_string(),
        };
        let text = format_item(&article, &links());
        assert!(text.contains(&format!("{}...", "x".repeat(97))));
        assert!(!text.contains(&"x".repeat(98)));
        assert!(text.contains("https://maakaalicreations.in/blogs/news/draping-guide"));
    }

    /// Test listings are numbered from one
    #[test]
    fn test_collection_is_numbered() {
        let items: Vec<CatalogItem> = (1..=3).map(product).collect();
        let text = render_collection(&items, &links());
        assert!(text.contains("*1.* *Saree 1*"));
        assert!(text.contains("*3.* *Saree 3*"));
        assert!(text.contains("https://maakaalicreations.in/collections/all"));
    }

    /// Test empty listings fall back to curated content
    #[test]
    fn test_empty_listings_fall_back() {
        let links = links();
        assert!(render_collection(&[], &links).contains("Featured Products"));
        assert!(render_blogs(&[], &links).contains("The Art of Saree Draping"));

        let offers = render_offers(&[], &links);
        assert!(offers.contains("SAVE25"));
        assert_eq!(offers, render_topic(Topic::Offers, &links));
    }

    /// Test the order topic carries the discount code
    #[test]
    fn test_order_topic_has_discount_code() {
        assert!(render_topic(Topic::Order, &links()).contains("MKC15"));
    }

    /// Test contact and follow topics are plain text
    #[test]
    fn test_plain_topics() {
        assert!(!topic_is_markdown(Topic::Contact));
        assert!(!topic_is_markdown(Topic::Follow));
        assert!(topic_is_markdown(Topic::Welcome));
        assert!(render_topic(Topic::Follow, &links()).contains("instagram.com/maakaali_creations"));
    }

    /// Test relay acknowledgments and failures per submission kind
    #[test]
    fn test_relay_messages() {
        let links = links();
        assert!(render_relay_ack(RelayKind::Question, &links).contains("Question Received"));
        assert!(render_relay_ack(RelayKind::OrderNumber, &links).contains(&links.tracking_url));
        assert!(render_relay_failure(RelayKind::OrderNumber).contains("order number"));
    }

    /// Test titles with Markdown characters stay inside one clean bold entity
    #[test]
    fn test_title_with_markdown_characters() {
        let item = CatalogItem::Product {
            title: "Silk_Saree *New*".to_string(),
            price: "899.00".to_string(),
            handle: "silk-saree-new".to_string(),
        };
        assert_eq!(
            format_item(&item, &links()),
            "*Silk_Saree New*\n💰 Price: ₹899.00\n🔗 [View Product](https://maakaalicreations.in/products/silk-saree-new)\n"
        );

        let article = CatalogItem::Article {
            title: "Care_Guide".to_string(),
            summary: "Keep *dry*".to_string(),
            handle: "care-guide".to_string(),
        };
        let text = format_item(&article, &links());
        assert!(text.starts_with("*Care_Guide*\n📝 Keep \\*dry\\*\n"));
        assert!(!text.contains("Care\\_Guide"));
    }

    /// Test bold drops asterisks and leaves empty titles unformatted
    #[test]
    fn test_bold() {
        assert_eq!(bold("Red *Hot* Saree"), "*Red Hot Saree*");
        assert_eq!(bold("**"), "");
    }
}
