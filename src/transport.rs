//! # Transport Module
//!
//! Chooses how updates reach the bot and runs the dispatcher on it. Long
//! polling is the default; when another process keeps holding the polling
//! session and a webhook URL is configured, the bot switches to the webhook.

use std::fmt::Display;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::update_listeners::{polling_default, webhooks};
use teloxide::{ApiError, RequestError};
use tracing::{error, info, warn};
use url::Url;

use crate::bot::schema;
use crate::config::{BotConfig, DeliveryConfig};
use crate::dispatcher::ConversationDispatcher;
use crate::health;

/// Fixed-backoff retry for transient transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. The last error is returned.
    pub async fn run<T, E, F, Fut, R>(&self, label: &str, mut op: F, should_retry: R) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts && should_retry(&e) => {
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Retrying after backoff"
                    );
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Another process is long-polling with the same token
pub fn is_polling_conflict(error: &RequestError) -> bool {
    matches!(error, RequestError::Api(ApiError::TerminatedByOtherGetUpdates))
}

/// The callback query is too old to acknowledge
pub fn is_stale_interaction(error: &RequestError) -> bool {
    matches!(error, RequestError::Api(ApiError::InvalidQueryId))
}

/// Delivery mechanism selected at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    Polling,
    Webhook { url: Url, address: SocketAddr },
}

/// Pick the delivery mode after probing polling
pub fn choose_delivery(
    delivery: &DeliveryConfig,
    conflict_persisted: bool,
    address: SocketAddr,
) -> DeliveryMode {
    match delivery {
        DeliveryConfig::PollingWithWebhookFallback { webhook_url } if conflict_persisted => {
            DeliveryMode::Webhook {
                url: webhook_url.clone(),
                address,
            }
        }
        _ => DeliveryMode::Polling,
    }
}

/// Check that long polling is available, retrying on conflicts
///
/// Returns `true` when the conflict persisted through every attempt.
pub async fn probe_polling(bot: &Bot, policy: &RetryPolicy) -> bool {
    let result = policy
        .run(
            "polling probe",
            || async move {
                bot.get_updates().limit(1).timeout(0).await?;
                Ok::<(), RequestError>(())
            },
            is_polling_conflict,
        )
        .await;

    match result {
        Ok(()) => false,
        Err(e) if is_polling_conflict(&e) => {
            warn!(attempts = policy.max_attempts, "Polling conflict persisted");
            true
        }
        Err(e) => {
            // Webhook still registered or a network hiccup: polling setup handles both
            warn!(error = %e, "Polling probe failed");
            false
        }
    }
}

/// Run the bot until shutdown on the delivery mode the environment allows
pub async fn run(
    bot: Bot,
    conversation: Arc<ConversationDispatcher>,
    config: &BotConfig,
) -> anyhow::Result<()> {
    let policy = RetryPolicy::default();
    let conflict_persisted = probe_polling(&bot, &policy).await;
    let mode = choose_delivery(&config.delivery, conflict_persisted, config.listen_address());

    if conflict_persisted && mode == DeliveryMode::Polling {
        warn!("No webhook configured; starting polling despite the conflict");
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![conversation])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build();

    match mode {
        DeliveryMode::Polling => {
            let address = config.listen_address();
            tokio::spawn(async move {
                if let Err(e) = health::serve(address).await {
                    error!(%address, error = %e, "Health probe server stopped");
                }
            });

            info!("Starting long polling");
            let listener = polling_default(bot).await;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        DeliveryMode::Webhook { url, address } => {
            info!(%url, %address, "Starting webhook");
            let options = webhooks::Options::new(address, url);
            let (listener, stop_flag, router) = webhooks::axum_to_router(bot, options).await?;
            let app = router.merge(health::router());

            let tcp = tokio::net::TcpListener::bind(address).await?;
            tokio::spawn(async move {
                if let Err(e) = axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await {
                    error!(%address, error = %e, "Webhook server stopped");
                }
            });

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(is_polling_conflict(&RequestError::Api(
            ApiError::TerminatedByOtherGetUpdates
        )));
        assert!(!is_polling_conflict(&RequestError::Api(ApiError::InvalidQueryId)));
        assert!(is_stale_interaction(&RequestError::Api(ApiError::InvalidQueryId)));
        assert!(!is_stale_interaction(&RequestError::Api(
            ApiError::MessageNotModified
        )));
    }
}
