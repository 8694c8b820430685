//! # Relay Module
//!
//! Forwards captured free text (questions, order numbers) to the operator chat.
//! One attempt per submission; the caller decides what the user sees on failure.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{error, info};

use crate::errors::RelayError;
use crate::render::{escape_markdown, BRAND_LOGO};

/// What the captured text is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Question,
    OrderNumber,
}

impl RelayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayKind::Question => "question",
            RelayKind::OrderNumber => "order_number",
        }
    }
}

/// The chat user a submission came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub id: u64,
    pub first_name: String,
    pub username: Option<String>,
}

/// Destination for relayed submissions
#[async_trait]
pub trait OperatorRelay: Send + Sync {
    async fn relay(
        &self,
        kind: RelayKind,
        submitter: &Submitter,
        body: &str,
    ) -> Result<(), RelayError>;
}

/// Message the operator receives for a submission
pub fn format_operator_message(kind: RelayKind, submitter: &Submitter, body: &str) -> String {
    let (header, label) = match kind {
        RelayKind::Question => ("❓ New Question from User", "Question"),
        RelayKind::OrderNumber => ("📦 Order Tracking Request", "Order Number"),
    };
    let username = submitter
        .username
        .as_deref()
        .map(|u| format!("@{}", escape_markdown(u)))
        .unwrap_or_else(|| "no username".to_string());

    format!(
        "{BRAND_LOGO} *{header}*\n\n\
         *User:* {} ({username})\n\
         *User ID:* {}\n\
         *{label}:* {}",
        escape_markdown(&submitter.first_name),
        submitter.id,
        escape_markdown(body)
    )
}

/// Relay that posts to a fixed Telegram chat
pub struct TelegramRelay {
    bot: Bot,
    operator_chat: ChatId,
}

impl TelegramRelay {
    pub fn new(bot: Bot, operator_chat: ChatId) -> Self {
        Self { bot, operator_chat }
    }
}

#[async_trait]
impl OperatorRelay for TelegramRelay {
    async fn relay(
        &self,
        kind: RelayKind,
        submitter: &Submitter,
        body: &str,
    ) -> Result<(), RelayError> {
        let text = format_operator_message(kind, submitter, body);
        match self
            .bot
            .send_message(self.operator_chat, text)
            .parse_mode(ParseMode::Markdown)
            .await
        {
            Ok(_) => {
                info!(user_id = submitter.id, kind = kind.as_str(), "Relayed submission to operator");
                Ok(())
            }
            Err(e) => {
                error!(user_id = submitter.id, kind = kind.as_str(), error = %e, "Failed to relay submission to operator");
                Err(RelayError::new(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitter(username: Option<&str>) -> Submitter {
        Submitter {
            id: 42,
            first_name: "Asha".to_string(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_question_message_contains_user_and_body() {
        let text = format_operator_message(
            RelayKind::Question,
            &submitter(Some("asha_k")),
            "when will my order ship",
        );
        assert!(text.contains("New Question from User"));
        assert!(text.contains("@asha\\_k"));
        assert!(text.contains("*User ID:* 42"));
        assert!(text.contains("*Question:* when will my order ship"));
    }

    #[test]
    fn test_order_number_message_without_username() {
        let text = format_operator_message(RelayKind::OrderNumber, &submitter(None), "#1001");
        assert!(text.contains("Order Tracking Request"));
        assert!(text.contains("(no username)"));
        assert!(text.contains("*Order Number:* #1001"));
    }
}
