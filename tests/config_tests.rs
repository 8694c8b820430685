use std::collections::HashMap;
use std::time::Duration;
use storefront_bot::config::{BotConfig, DeliveryConfig, DEFAULT_PORT};
use storefront_bot::errors::ConfigError;

#[cfg(test)]
mod tests {
    use super::*;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("BOT_TOKEN", "123456:ABC-token".to_string()),
            ("ADMIN_CHAT_ID", "-1001234567890".to_string()),
            ("SHOPIFY_STORE_DOMAIN", "maakaalicreations".to_string()),
            ("SHOPIFY_API_ACCESS_TOKEN", "shpat_secret".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<BotConfig, ConfigError> {
        BotConfig::from_lookup(|key| env.get(key).cloned())
    }

    /// Test loading a minimal environment applies the defaults
    #[test]
    fn test_minimal_environment_uses_defaults() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.admin_chat_id, -1001234567890);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.delivery, DeliveryConfig::PollingOnly);
        assert_eq!(config.commerce.api_version, "2023-04");
        assert_eq!(config.commerce.blog_id, "1");
        assert_eq!(config.commerce.request_timeout, Duration::from_secs(10));
        assert_eq!(config.pending_input_ttl, Some(Duration::from_secs(1800)));
        assert_eq!(config.links.store_url, "https://maakaalicreations.in/");
        assert_eq!(config.listen_address().port(), DEFAULT_PORT);
    }

    /// Test each required variable is reported when missing
    #[test]
    fn test_missing_required_variable() {
        for name in [
            "BOT_TOKEN",
            "ADMIN_CHAT_ID",
            "SHOPIFY_STORE_DOMAIN",
            "SHOPIFY_API_ACCESS_TOKEN",
        ] {
            let mut env = base_env();
            env.remove(name);
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(name));
        }
    }

    /// Test placeholder values count as missing
    #[test]
    fn test_placeholder_counts_as_missing() {
        let mut env = base_env();
        env.insert("BOT_TOKEN", "YOUR_BOT_TOKEN_HERE".to_string());
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
    }

    /// Test a non-numeric operator chat id is rejected
    #[test]
    fn test_invalid_admin_chat_id() {
        let mut env = base_env();
        env.insert("ADMIN_CHAT_ID", "operators".to_string());
        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "ADMIN_CHAT_ID",
                ..
            }
        ));
        assert!(err.to_string().starts_with("ADMIN_CHAT_ID is invalid"));
    }

    /// Test a webhook URL enables the webhook fallback
    #[test]
    fn test_webhook_url_enables_fallback() {
        let mut env = base_env();
        env.insert("WEBHOOK_URL", "https://bot.example.com/telegram".to_string());
        env.insert("PORT", "9000".to_string());
        let config = load(&env).unwrap();

        match config.delivery {
            DeliveryConfig::PollingWithWebhookFallback { webhook_url } => {
                assert_eq!(webhook_url.path(), "/telegram");
            }
            other => panic!("unexpected delivery {other:?}"),
        }
        assert_eq!(config.port, 9000);
    }

    /// Test DELIVERY_MODE=polling ignores the webhook URL
    #[test]
    fn test_polling_mode_overrides_webhook() {
        let mut env = base_env();
        env.insert("WEBHOOK_URL", "https://bot.example.com/telegram".to_string());
        env.insert("DELIVERY_MODE", "polling".to_string());
        assert_eq!(load(&env).unwrap().delivery, DeliveryConfig::PollingOnly);
    }

    /// Test unknown delivery modes and malformed URLs are rejected
    #[test]
    fn test_invalid_delivery_settings() {
        let mut env = base_env();
        env.insert("DELIVERY_MODE", "carrier-pigeon".to_string());
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid {
                name: "DELIVERY_MODE",
                ..
            }
        ));

        let mut env = base_env();
        env.insert("WEBHOOK_URL", "not a url".to_string());
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid {
                name: "WEBHOOK_URL",
                ..
            }
        ));
    }

    /// Test a zero TTL disables pending input expiry
    #[test]
    fn test_zero_ttl_disables_expiry() {
        let mut env = base_env();
        env.insert("PENDING_INPUT_TTL_SECS", "0".to_string());
        assert_eq!(load(&env).unwrap().pending_input_ttl, None);
    }
}
