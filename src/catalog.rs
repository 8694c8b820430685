//! Catalog entities and the Shopify JSON payloads they are parsed from.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

// Block-level tags separate words; inline tags do not
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(p|br|div|li|ul|ol|h[1-6]|blockquote)\b[^>]*>")
        .expect("Block tag pattern should be valid")
});
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Tag pattern should be valid"));

/// A renderable storefront entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogItem {
    Product {
        title: String,
        price: String,
        handle: String,
    },
    Article {
        title: String,
        summary: String,
        handle: String,
    },
}

/// Store collection, used to locate the offers collection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collection {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsEnvelope {
    #[serde(default)]
    pub collections: Vec<Collection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesEnvelope {
    #[serde(default)]
    pub articles: Vec<ArticleDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductDto {
    pub title: Option<String>,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub variants: Vec<VariantDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantDto {
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleDto {
    pub title: Option<String>,
    #[serde(alias = "summary_html")]
    pub summary: Option<String>,
    #[serde(default)]
    pub handle: String,
}

impl From<ProductDto> for CatalogItem {
    fn from(dto: ProductDto) -> Self {
        // Price of the first variant stands for the product
        let price = dto
            .variants
            .into_iter()
            .next()
            .and_then(|v| v.price)
            .unwrap_or_else(|| "0.00".to_string());
        CatalogItem::Product {
            title: dto.title.unwrap_or_else(|| "Unknown Product".to_string()),
            price,
            handle: dto.handle,
        }
    }
}

impl From<ArticleDto> for CatalogItem {
    fn from(dto: ArticleDto) -> Self {
        CatalogItem::Article {
            title: dto.title.unwrap_or_else(|| "Unknown Article".to_string()),
            summary: dto
                .summary
                .map(|s| strip_html(&s))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No summary available".to_string()),
            handle: dto.handle,
        }
    }
}

/// Plain text of an HTML fragment
///
/// Tags are removed, common entities decoded and whitespace collapsed.
pub fn strip_html(html: &str) -> String {
    let text = BLOCK_TAG.replace_all(html, " ");
    let text = ANY_TAG.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First collection whose title contains `needle`, ignoring case
pub fn match_collection_title(collections: &[Collection], needle: &str) -> Option<u64> {
    let needle = needle.to_lowercase();
    collections
        .iter()
        .find(|c| c.title.to_lowercase().contains(&needle))
        .map(|c| c.id)
}
