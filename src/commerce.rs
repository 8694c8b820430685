//! # Commerce Client Module
//!
//! Thin wrapper over the Shopify Admin REST API. Every call is a single
//! authenticated GET; failures are logged and surface as empty results so the
//! conversation can fall back to static content.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::catalog::{
    match_collection_title, ArticlesEnvelope, CatalogItem, Collection, CollectionsEnvelope,
    ProductsEnvelope,
};
use crate::circuit_breaker::CircuitBreaker;
use crate::config::CommerceConfig;
use crate::errors::CommerceError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Optional narrowing of a product listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    None,
    Collection(u64),
    Tag(String),
}

/// Source of catalog content for the dispatcher
///
/// Implementations never fail: an unavailable catalog is an empty one.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self, limit: u32, filter: ProductFilter) -> Vec<CatalogItem>;

    async fn fetch_collections(&self) -> Vec<Collection>;

    async fn fetch_articles(&self, blog_id: &str, limit: u32) -> Vec<CatalogItem>;

    /// Id of the first collection whose title contains `needle`, ignoring case
    async fn find_collection_id_by_title(&self, needle: &str) -> Option<u64> {
        match_collection_title(&self.fetch_collections().await, needle)
    }
}

/// HTTP client for the store's admin API
pub struct CommerceClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    access_token: String,
    breaker: CircuitBreaker,
}

impl CommerceClient {
    /// Create a client for `https://{store}.myshopify.com`
    pub fn new(config: &CommerceConfig) -> Result<Self, CommerceError> {
        Self::with_base_url(config, config.base_url())
    }

    /// Create a client against an explicit base URL (stub servers, proxies)
    pub fn with_base_url(
        config: &CommerceConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            access_token: config.access_token.clone(),
            breaker: CircuitBreaker::from_config(config),
        })
    }

    /// Full URL of an admin API resource
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/admin/api/{}/{}",
            self.base_url, self.api_version, resource
        )
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<T, CommerceError> {
        if self.breaker.is_open() {
            return Err(CommerceError::CircuitOpen);
        }

        let result = async {
            let response = self
                .http
                .get(self.endpoint(resource))
                .header(ACCESS_TOKEN_HEADER, &self.access_token)
                .query(query)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CommerceError::Status(status));
            }

            let body = response.bytes().await?;
            Ok(serde_json::from_slice::<T>(&body)?)
        }
        .await;

        match &result {
            Ok(_) => self.breaker.record_success(),
            Err(_) => self.breaker.record_failure(),
        }
        result
    }

    /// Log a failed call and substitute an empty result
    fn recover<T: Default>(resource: &str, result: Result<T, CommerceError>) -> T {
        match result {
            Ok(value) => value,
            Err(CommerceError::CircuitOpen) => {
                warn!(resource, "Commerce API circuit open, skipping request");
                T::default()
            }
            Err(e) => {
                error!(resource, error = %e, "Commerce API request failed");
                T::default()
            }
        }
    }
}

/// Resource path and query for a product listing
pub fn products_request(limit: u32, filter: &ProductFilter) -> (String, Vec<(&'static str, String)>) {
    match filter {
        ProductFilter::Collection(id) => (
            format!("collections/{id}/products.json"),
            vec![("limit", limit.to_string())],
        ),
        ProductFilter::Tag(tag) => (
            "products.json".to_string(),
            vec![
                ("limit", limit.to_string()),
                ("status", "active".to_string()),
                ("tag", tag.clone()),
            ],
        ),
        ProductFilter::None => (
            "products.json".to_string(),
            vec![
                ("limit", limit.to_string()),
                ("status", "active".to_string()),
            ],
        ),
    }
}

#[async_trait]
impl CatalogSource for CommerceClient {
    async fn fetch_products(&self, limit: u32, filter: ProductFilter) -> Vec<CatalogItem> {
        let (resource, query) = products_request(limit, &filter);
        let envelope: Option<ProductsEnvelope> =
            Self::recover(&resource, self.get_json(&resource, &query).await.map(Some));
        let products: Vec<CatalogItem> = envelope
            .map(|e| e.products.into_iter().map(CatalogItem::from).collect())
            .unwrap_or_default();
        debug!(resource = %resource, count = products.len(), "Fetched products");
        products
    }

    async fn fetch_collections(&self) -> Vec<Collection> {
        let resource = "collections.json";
        let envelope: Option<CollectionsEnvelope> =
            Self::recover(resource, self.get_json(resource, &[]).await.map(Some));
        envelope.map(|e| e.collections).unwrap_or_default()
    }

    async fn fetch_articles(&self, blog_id: &str, limit: u32) -> Vec<CatalogItem> {
        let resource = format!("blogs/{blog_id}/articles.json");
        let query = [("limit", limit.to_string())];
        let envelope: Option<ArticlesEnvelope> =
            Self::recover(&resource, self.get_json(&resource, &query).await.map(Some));
        let articles: Vec<CatalogItem> = envelope
            .map(|e| e.articles.into_iter().map(CatalogItem::from).collect())
            .unwrap_or_default();
        debug!(resource = %resource, count = articles.len(), "Fetched articles");
        articles
    }
}
