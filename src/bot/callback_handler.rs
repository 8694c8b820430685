//! Callback Handler module for processing inline keyboard callback queries

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, error, warn};

use crate::dispatcher::{ConversationDispatcher, Inbound, Update as ChatUpdate};
use crate::transport::is_stale_interaction;

use super::reply_sender::{deliver, send_reply};
use super::submitter;

/// Handle callback queries from inline keyboards
///
/// The query is acknowledged before any work is done. A query Telegram no
/// longer accepts is dropped without a reply.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    conversation: Arc<ConversationDispatcher>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        if is_stale_interaction(&e) {
            warn!(user_id = %q.from.id, "Ignoring expired callback query");
        } else {
            error!(user_id = %q.from.id, error = %e, "Failed to acknowledge callback query");
        }
        return Ok(());
    }

    let Some(action_id) = q.data.clone() else {
        debug!(user_id = %q.from.id, "Callback query without data");
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        debug!(user_id = %q.from.id, "Callback query without message");
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    let inbound = Inbound {
        user: submitter(&q.from),
        update: ChatUpdate::ButtonSelection { action_id },
    };

    if let Some(notice) = conversation.progress_notice(&inbound.update) {
        if let Err(e) = send_reply(&bot, chat_id, Some(message_id), &notice).await {
            warn!(user_id = %q.from.id, error = %e, "Failed to show progress message");
        }
    }

    let replies = conversation.handle(&inbound).await;
    deliver(
        &bot,
        chat_id,
        Some(message_id),
        &replies,
        inbound.update.kind(),
        inbound.user.id,
    )
    .await;
    Ok(())
}
