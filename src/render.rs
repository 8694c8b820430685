//! # Content Renderer Module
//!
//! Pure functions turning catalog items and static topics into Telegram
//! (legacy) Markdown text. Remote listings fall back to curated static content
//! when the catalog comes back empty.

use std::fmt::Write as _;

use crate::catalog::CatalogItem;
use crate::config::StoreLinks;
use crate::relay::RelayKind;

pub const BRAND_LOGO: &str = "🪔";
pub const STORE_NAME: &str = "Maa Kaali Creations";

/// Summaries longer than this are truncated
pub const SUMMARY_MAX_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// Contact channels shown on the contact and follow screens
pub struct ContactInfo {
    pub phone: &'static str,
    pub whatsapp: &'static str,
    pub email: &'static str,
    pub instagram: &'static str,
    pub youtube: &'static str,
    pub pinterest: &'static str,
    pub facebook: &'static str,
    pub threads: &'static str,
    pub twitter: &'static str,
}

pub const CONTACT_INFO: ContactInfo = ContactInfo {
    phone: "+91 9015132120, +91 6232133187",
    whatsapp: "+91 8826137550, +91 6232133187",
    email: "maakaalicreations@gmail.com",
    instagram: "https://www.instagram.com/maakaali_creations/",
    youtube: "https://www.youtube.com/@MaaKaali_Creations",
    pinterest: "https://in.pinterest.com/maakaalicreations/",
    facebook: "https://www.facebook.com/profile.php?id=61577363595465",
    threads: "https://www.threads.com/@maakaali_creations",
    twitter: "https://x.com/maakalicreation",
};

/// Static screens with fixed content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Welcome,
    MainMenu,
    Help,
    Offers,
    Order,
    Question,
    Track,
    Contact,
    Follow,
    Fallback,
}

/// Escape characters that would open an entity in legacy Markdown
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wrap text in a bold entity
///
/// Escapes are not honoured inside an entity, so `*` is dropped and
/// everything else is kept verbatim.
pub fn bold(text: &str) -> String {
    let inner: String = text.chars().filter(|c| *c != '*').collect();
    let inner = inner.trim();
    if inner.is_empty() {
        return String::new();
    }
    format!("*{inner}*")
}

/// Truncate a summary to [`SUMMARY_MAX_CHARS`] characters, ellipsis included
pub fn format_summary(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_MAX_CHARS {
        return summary.to_string();
    }
    let keep = SUMMARY_MAX_CHARS - ELLIPSIS.len();
    let mut truncated: String = summary.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Three-line block: title, price or summary, link
pub fn format_item(item: &CatalogItem, links: &StoreLinks) -> String {
    match item {
        CatalogItem::Product {
            title,
            price,
            handle,
        } => format!(
            "{}\n💰 Price: ₹{}\n🔗 [View Product]({})\n",
            bold(title),
            escape_markdown(price),
            links.product_url(handle)
        ),
        CatalogItem::Article {
            title,
            summary,
            handle,
        } => format!(
            "{}\n📝 {}\n🔗 [Read More]({})\n",
            bold(title),
            escape_markdown(&format_summary(summary)),
            links.article_url(handle)
        ),
    }
}

fn numbered(header: &str, items: &[CatalogItem], links: &StoreLinks) -> String {
    let mut message = format!("{BRAND_LOGO} *{header}*\n\n");
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(message, "*{}.* {}", i + 1, format_item(item, links));
    }
    message
}

/// Product listing for the browse screen, or the curated list when empty
pub fn render_collection(items: &[CatalogItem], links: &StoreLinks) -> String {
    if items.is_empty() {
        return fallback_collection(links);
    }
    let mut message = numbered("🛍 Our Saree Collection", items, links);
    let _ = write!(message, "\n*View all products:* {}", links.all_products_url);
    message
}

/// Offers listing, or the standing offers text when no offers collection exists
pub fn render_offers(items: &[CatalogItem], links: &StoreLinks) -> String {
    if items.is_empty() {
        return render_topic(Topic::Offers, links);
    }
    let mut message = numbered("💰 Current Offers", items, links);
    let _ = write!(message, "\n*Shop now:* {}", links.all_products_url);
    message
}

/// Latest blog articles, or the curated list when empty
pub fn render_blogs(items: &[CatalogItem], links: &StoreLinks) -> String {
    if items.is_empty() {
        return fallback_blogs(links);
    }
    let mut message = numbered("📰 Latest Blog Articles", items, links);
    let _ = write!(message, "\n*Visit our blog:* {}", links.blog_url);
    message
}

/// Interim text shown while a listing is fetched
pub fn render_progress(what: &str) -> String {
    format!("{BRAND_LOGO} *{what}*")
}

fn fallback_collection(links: &StoreLinks) -> String {
    const FEATURED: [(&str, &str, &str); 5] = [
        (
            "Aqua Blue Embroidered Twill Net Saree",
            "₹385 (Sale from ₹925)",
            "aqua-blue-embroidered-twill-net-saree-with-running-blouse",
        ),
        (
            "Beautiful Digital Printed Crepe Silk Saree",
            "₹405 (Sale from ₹1,005)",
            "beautiful-digital-printed-crepe-silk-saree",
        ),
        (
            "Crimson Bloom Net Saree with Embroidered Work",
            "₹345 (Sale from ₹1,025)",
            "crimson-bloom-net-saree-with-embroidered-work",
        ),
        (
            "Designer Kanjeevaram Silk Saree",
            "₹515",
            "designer-kanjeevaram-silk-saree-with-golden-zari-work",
        ),
        (
            "Designer Twill Net Saree with Sequin Work",
            "₹655 (Sale from ₹1,825)",
            "designer-twill-net-saree-with-shimmering-sequin-all-over",
        ),
    ];

    let mut message =
        format!("{BRAND_LOGO} *🛍 Our Saree Collection*\n\n{BRAND_LOGO} *Featured Products:*\n\n");
    for (i, (title, price, handle)) in FEATURED.iter().enumerate() {
        let _ = write!(
            message,
            "{BRAND_LOGO} *{}. {title}*\n💰 Price: {price}\n🔗 [View Product]({})\n\n",
            i + 1,
            links.product_url(handle)
        );
    }
    let _ = write!(message, "*View all products:* {}", links.all_products_url);
    message
}

fn fallback_blogs(links: &StoreLinks) -> String {
    const ARTICLES: [(&str, &str, &str, &str); 3] = [
        (
            "Why Fast Fashion's Impact on the Environment is a Big Deal",
            "July 9, 2025",
            "In recent years, the fashion industry has come under significant scrutiny for its role in environmental degradation...",
            "why-fast-fashions-impact-on-the-environment-is-a-big-deal",
        ),
        (
            "How to Identify Quality Fabrics for Your Wardrobe",
            "June 30, 2025",
            "Selecting the right fabrics for your wardrobe is not just an essential skill for fashion enthusiasts but also for anyone who desires durable and stylish clothing...",
            "how-to-identify-quality-fabrics-for-your-wardrobe",
        ),
        (
            "The Art of Saree Draping: Traditional Techniques",
            "June 15, 2025",
            "Discover the beautiful art of saree draping with traditional techniques that have been passed down through generations...",
            "the-art-of-saree-draping",
        ),
    ];

    let mut message = format!("{BRAND_LOGO} *📰 Latest Blog Articles*\n\n");
    for (i, (title, date, teaser, handle)) in ARTICLES.iter().enumerate() {
        let _ = write!(
            message,
            "{BRAND_LOGO} *{}. {title}*\n📅 {date}\n{teaser}\n🔗 [Read More]({})\n\n",
            i + 1,
            links.article_url(handle)
        );
    }
    let _ = write!(message, "*Visit our blog:* {}", links.blog_url);
    message
}

fn social_lines() -> String {
    let c = &CONTACT_INFO;
    format!(
        "• Instagram: {}\n• YouTube: {}\n• Facebook: {}\n• Twitter/X: {}\n• Pinterest: {}\n• Threads: {}\n",
        c.instagram, c.youtube, c.facebook, c.twitter, c.pinterest, c.threads
    )
}

/// Fixed content for a static topic
///
/// `Contact` and `Follow` are plain text (their URLs contain `_`); every other
/// topic is Markdown, see [`topic_is_markdown`].
pub fn render_topic(topic: Topic, links: &StoreLinks) -> String {
    match topic {
        Topic::Welcome => format!(
            "{BRAND_LOGO} *Welcome to {STORE_NAME}!* 🎉\n\n\
             🌟 *Discover the beauty of traditional Indian sarees*\n\n\
             ✨ We offer a stunning collection of:\n\
             • Designer Silk Sarees\n\
             • Embroidered Net Sarees\n\
             • Digital Printed Crepe Sarees\n\
             • Kanjeevaram Silk Sarees\n\
             • Twill Net Sarees with Sequin Work\n\n\
             🛍 *Shop with confidence:*\n\
             • Free shipping on all over India\n\
             • Easy returns and exchanges\n\
             • 24/7 customer support\n\
             • Secure payment options\n\n\
             🌐 {}",
            links.store_url
        ),
        Topic::MainMenu => format!(
            "{BRAND_LOGO} *{STORE_NAME}* 🎉\n\nChoose an option from the menu below:"
        ),
        Topic::Help => format!(
            "{BRAND_LOGO} *{STORE_NAME} Bot Help* 📚\n\n\
             *Available Commands:*\n\
             • /start - Show main menu\n\
             • /help - Show this help message\n\n\
             *Features:*\n\
             • Browse our saree collection\n\
             • View current offers and discounts\n\
             • Place orders online\n\
             • Track an order\n\
             • Ask questions\n\
             • Read our blog articles\n\
             • Contact us\n\
             • Follow us on social media\n\n\
             For any issues, contact our support team: {}",
            links.store_url
        ),
        Topic::Offers => format!(
            "{BRAND_LOGO} *💰 Special Offers*\n\n\
             🎁 *EXCLUSIVE DISCOUNTS FOR YOU!*\n\n\
             🔥 *Get Up To 5% OFF*\n\
             • On prepaid orders\n\
             • Minimum purchase of ₹300.00\n\
             • Automatic discount applied\n\n\
             🎯 *Up To 25% OFF*\n\
             • For first purchase only\n\
             • New customers exclusive\n\
             • One-time use per customer\n\
             • Use code: `SAVE25`\n\n\
             🚚 *FREE SHIPPING*\n\
             • Free shipping on all orders\n\
             • No minimum purchase required\n\
             • Fast and reliable delivery\n\n\
             💎 *Premium Silk Sarees* at affordable prices\n\
             ✨ *Limited time offers - Shop now!*\n\n\
             *Shop now:* {}",
            links.all_products_url
        ),
        Topic::Order => format!(
            "{BRAND_LOGO} *📝 Place an Order Online*\n\n\
             Ready to shop? Visit our online store to browse our complete collection!\n\n\
             🛒 *Features:*\n\
             • Secure payment options\n\
             • Free shipping on orders above ₹999\n\
             • Easy returns and exchanges\n\
             • 24/7 customer support\n\n\
             *🛍 Shop Now:* {}\n\n\
             💡 *Tip:* Use code `MKC15` for 15% off!\n\n\
             Already ordered? Tap *Track Your Order* below.",
            links.store_url
        ),
        Topic::Question => format!(
            "{BRAND_LOGO} *❓ Ask a Question*\n\n\
             Have a question about our products or services?\n\n\
             Simply type your question below and we'll get back to you soon!\n\n\
             📝 *You can ask about:*\n\
             • Product details and availability\n\
             • Sizing and measurements\n\
             • Shipping and delivery\n\
             • Returns and exchanges\n\
             • Payment options\n\
             • Any other queries\n\n\
             💡 *Just type your question in the chat below!*"
        ),
        Topic::Track => format!(
            "{BRAND_LOGO} *📦 Track Your Order*\n\n\
             Please type your order number below and our team will check its status for you.\n\n\
             You can also track your order directly: {}",
            links.tracking_url
        ),
        Topic::Contact => {
            let c = &CONTACT_INFO;
            format!(
                "{BRAND_LOGO} 📞 Contact Us\n\n\
                 Get in touch with us through any of these channels:\n\n\
                 📱 Call: {}\n\
                 💬 WhatsApp: {}\n\
                 📧 Email: {}\n\
                 🌐 Website: {}\n\n\
                 📱 Social Media:\n{}\n\
                 🕒 Business Hours:\n\
                 24/7 Available - You can reach out to us anytime!\n\n\
                 💝 We're here to help!",
                c.phone,
                c.whatsapp,
                c.email,
                links.store_url,
                social_lines()
            )
        }
        Topic::Follow => format!(
            "{BRAND_LOGO} 📱 Follow Us\n\n\
             Stay connected with us on social media for the latest updates, new arrivals, and exclusive offers!\n\n\
             🌟 Our Social Media:\n{}\n\
             🎯 Don't miss out on our latest updates!",
            social_lines()
        ),
        Topic::Fallback => format!(
            "{BRAND_LOGO} *🤖 {STORE_NAME} Bot*\n\n\
             Use the menu below to navigate or type /start to see all options."
        ),
    }
}

/// Whether a topic's text is sent with Markdown parsing
pub fn topic_is_markdown(topic: Topic) -> bool {
    !matches!(topic, Topic::Contact | Topic::Follow)
}

/// Acknowledgment shown to the user after a successful relay
pub fn render_relay_ack(kind: RelayKind, links: &StoreLinks) -> String {
    match kind {
        RelayKind::Question => format!(
            "{BRAND_LOGO} *✅ Question Received!*\n\n\
             Thank you for your question. We'll get back to you soon!\n\n\
             In the meantime, feel free to browse our collection."
        ),
        RelayKind::OrderNumber => format!(
            "{BRAND_LOGO} *✅ Order Number Received!*\n\n\
             We'll check your order status and get back to you soon!\n\n\
             You can also track your order directly: {}",
            links.tracking_url
        ),
    }
}

/// Notice shown when a relay could not be delivered
pub fn render_relay_failure(kind: RelayKind) -> String {
    let what = match kind {
        RelayKind::Question => "sending your question",
        RelayKind::OrderNumber => "processing your order number",
    };
    format!(
        "{BRAND_LOGO} *❌ Error*\n\n\
         Sorry, there was an error {what}. \
         Please try again later or contact us directly."
    )
}

/// Plain-text notice for failures outside the normal flow
pub fn render_unexpected_error() -> String {
    format!("{BRAND_LOGO} Sorry, something went wrong. Please choose an option from the menu.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a_b*c`d[e]"), "a\\_b\\*c\\`d\\[e]");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn test_format_summary_counts_characters_not_bytes() {
        let summary = "₹".repeat(120);
        let truncated = format_summary(&summary);
        assert_eq!(truncated.chars().count(), SUMMARY_MAX_CHARS);
        assert!(truncated.ends_with("..."));
    }
}
