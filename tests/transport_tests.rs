use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use storefront_bot::config::DeliveryConfig;
use storefront_bot::transport::{choose_delivery, DeliveryMode, RetryPolicy};
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::ZERO,
        }
    }

    fn address() -> SocketAddr {
        "0.0.0.0:8080".parse().unwrap()
    }

    /// Test the default policy matches the startup behaviour
    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_secs(5));
    }

    /// Test retryable errors are retried until success
    #[tokio::test]
    async fn test_retry_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<u32, String> = instant_policy()
            .run(
                "test",
                move || async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err("conflict".to_string())
                    } else {
                        Ok(n)
                    }
                },
                |e: &String| e == "conflict",
            )
            .await;
        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    /// Test attempts are bounded and the last error is returned
    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), String> = instant_policy()
            .run(
                "test",
                move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("conflict".to_string())
                },
                |_: &String| true,
            )
            .await;
        assert_eq!(result, Err("conflict".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    /// Test non-retryable errors fail immediately
    #[tokio::test]
    async fn test_non_retryable_error_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), String> = instant_policy()
            .run(
                "test",
                move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("unauthorized".to_string())
                },
                |e: &String| e == "conflict",
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Test webhook is chosen only when configured and polling kept conflicting
    #[test]
    fn test_choose_delivery() {
        let url = Url::parse("https://bot.example.com/hook").unwrap();
        let fallback = DeliveryConfig::PollingWithWebhookFallback {
            webhook_url: url.clone(),
        };

        assert_eq!(
            choose_delivery(&fallback, true, address()),
            DeliveryMode::Webhook {
                url,
                address: address()
            }
        );
        assert_eq!(
            choose_delivery(&fallback, false, address()),
            DeliveryMode::Polling
        );
        assert_eq!(
            choose_delivery(&DeliveryConfig::PollingOnly, true, address()),
            DeliveryMode::Polling
        );
    }
}
