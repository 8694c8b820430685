//! # Configuration Module
//!
//! Builds the single [`BotConfig`] value at startup from environment variables.
//! Every component receives the pieces it needs by reference; nothing reads the
//! environment after this point.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

// Defaults for optional settings
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_VERSION: &str = "2023-04";
pub const DEFAULT_STORE_URL: &str = "https://maakaalicreations.in/";
pub const DEFAULT_BLOG_ID: &str = "1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PENDING_INPUT_TTL_SECS: u64 = 30 * 60;
pub const DEFAULT_LOGO_PATH: &str = "logo.png";

/// How updates reach the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryConfig {
    /// Long polling only
    PollingOnly,
    /// Long polling, switching to the webhook when polling keeps conflicting
    PollingWithWebhookFallback { webhook_url: Url },
}

/// Public storefront links used in rendered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLinks {
    /// Store home page, always ends with `/`
    pub store_url: String,
    pub all_products_url: String,
    pub tracking_url: String,
    pub blog_url: String,
}

impl StoreLinks {
    pub fn new(store_url: &str) -> Self {
        let store_url = if store_url.ends_with('/') {
            store_url.to_string()
        } else {
            format!("{store_url}/")
        };
        Self {
            all_products_url: format!("{store_url}collections/all"),
            tracking_url: format!("{store_url}apps/track123"),
            blog_url: format!("{store_url}blogs/news"),
            store_url,
        }
    }

    pub fn product_url(&self, handle: &str) -> String {
        format!("{}products/{}", self.store_url, handle)
    }

    pub fn article_url(&self, handle: &str) -> String {
        format!("{}/{}", self.blog_url, handle)
    }
}

impl Default for StoreLinks {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_URL)
    }
}

/// Commerce API connection and resilience settings
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    /// Store name without `.myshopify.com`
    pub store_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub blog_id: String,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
    /// Consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds before an open circuit lets a call through again
    pub circuit_breaker_reset_secs: u64,
}

impl CommerceConfig {
    /// Base URL of the admin API, e.g. `https://store.myshopify.com`
    pub fn base_url(&self) -> String {
        let domain = self
            .store_domain
            .trim_end_matches('/')
            .trim_end_matches(".myshopify.com");
        format!("https://{domain}.myshopify.com")
    }
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            store_domain: "maakaalicreations".to_string(),
            access_token: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            blog_id: DEFAULT_BLOG_ID.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Operator chat receiving relayed questions and order numbers
    pub admin_chat_id: i64,
    pub commerce: CommerceConfig,
    pub links: StoreLinks,
    pub port: u16,
    pub delivery: DeliveryConfig,
    /// Pending input older than this is discarded; `None` keeps it forever
    pub pending_input_ttl: Option<Duration>,
    pub logo_path: PathBuf,
}

impl BotConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, "BOT_TOKEN")?;
        let admin_chat_id = required(&lookup, "ADMIN_CHAT_ID")?;
        let admin_chat_id = admin_chat_id
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid {
                name: "ADMIN_CHAT_ID",
                reason: e.to_string(),
            })?;
        let store_domain = required(&lookup, "SHOPIFY_STORE_DOMAIN")?;
        let access_token = required(&lookup, "SHOPIFY_API_ACCESS_TOKEN")?;

        let port = parse_optional(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let request_timeout = parse_optional(&lookup, "HTTP_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let ttl_secs = parse_optional(&lookup, "PENDING_INPUT_TTL_SECS")?
            .unwrap_or(DEFAULT_PENDING_INPUT_TTL_SECS);

        let webhook_url = match optional(&lookup, "WEBHOOK_URL") {
            Some(raw) => Some(Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                name: "WEBHOOK_URL",
                reason: e.to_string(),
            })?),
            None => None,
        };
        let delivery = match (optional(&lookup, "DELIVERY_MODE").as_deref(), webhook_url) {
            (Some("polling"), _) | (None | Some("auto"), None) => DeliveryConfig::PollingOnly,
            (None | Some("auto"), Some(webhook_url)) => {
                DeliveryConfig::PollingWithWebhookFallback { webhook_url }
            }
            (Some(other), _) => {
                return Err(ConfigError::Invalid {
                    name: "DELIVERY_MODE",
                    reason: format!("expected `polling` or `auto`, got `{other}`"),
                })
            }
        };

        let commerce = CommerceConfig {
            store_domain,
            access_token,
            api_version: optional(&lookup, "SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            blog_id: optional(&lookup, "BLOG_ID").unwrap_or_else(|| DEFAULT_BLOG_ID.to_string()),
            request_timeout: Duration::from_secs(request_timeout),
            ..CommerceConfig::default()
        };

        Ok(Self {
            bot_token,
            admin_chat_id,
            commerce,
            links: StoreLinks::new(
                &optional(&lookup, "STORE_URL").unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
            ),
            port,
            delivery,
            pending_input_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            logo_path: optional(&lookup, "LOGO_PATH")
                .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string())
                .into(),
        })
    }

    /// Address the health probe and webhook listener bind to
    pub fn listen_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Placeholder values shipped in sample env files count as unset
fn is_placeholder(value: &str) -> bool {
    value.starts_with("YOUR_") && value.ends_with("_HERE")
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !is_placeholder(v))
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::Missing(name))
}

fn parse_optional<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional(lookup, name)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_links_normalise_trailing_slash() {
        let links = StoreLinks::new("https://shop.example");
        assert_eq!(links.store_url, "https://shop.example/");
        assert_eq!(links.all_products_url, "https://shop.example/collections/all");
        assert_eq!(
            links.article_url("hello"),
            "https://shop.example/blogs/news/hello"
        );
    }

    #[test]
    fn test_base_url_accepts_full_domain() {
        let config = CommerceConfig {
            store_domain: "demo.myshopify.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://demo.myshopify.com");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("YOUR_BOT_TOKEN_HERE"));
        assert!(!is_placeholder("123:abc"));
    }
}
