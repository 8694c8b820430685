//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::dispatcher::{ConversationDispatcher, Inbound, Update as ChatUpdate};

use super::reply_sender::deliver;
use super::submitter;

/// Handle text messages: commands and free text
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    conversation: Arc<ConversationDispatcher>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = %msg.chat.id, "Ignoring message without sender");
        return Ok(());
    };
    let Some(text) = msg.text() else {
        debug!(user_id = %user.id, "Ignoring non-text message");
        return Ok(());
    };

    let inbound = Inbound {
        user: submitter(user),
        update: ChatUpdate::from_text(text),
    };
    debug!(user_id = %user.id, update_kind = inbound.update.kind(), "Received message from user");

    let replies = conversation.handle(&inbound).await;
    deliver(
        &bot,
        msg.chat.id,
        None,
        &replies,
        inbound.update.kind(),
        inbound.user.id,
    )
    .await;
    Ok(())
}
