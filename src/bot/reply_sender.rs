//! Reply Sender module: turns dispatcher replies into Telegram requests

use teloxide::prelude::*;
use teloxide::types::{InputFile, LinkPreviewOptions, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};
use tracing::{debug, error, warn};

use crate::dispatcher::{Reply, ReplyMode, TextFormat};
use crate::menu::{self, ScreenName};
use crate::render;

use super::ui_builder::keyboard;

fn preview_options(reply: &Reply) -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: !reply.link_preview,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

async fn send_text(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<(), RequestError> {
    let mut request = bot
        .send_message(chat_id, &reply.text)
        .link_preview_options(preview_options(reply));
    if reply.format == TextFormat::Markdown {
        request = request.parse_mode(ParseMode::Markdown);
    }
    if let Some(screen) = &reply.screen {
        request = request.reply_markup(keyboard(screen));
    }
    request.await?;
    Ok(())
}

async fn edit_text(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    reply: &Reply,
) -> Result<(), RequestError> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, &reply.text)
        .link_preview_options(preview_options(reply));
    if reply.format == TextFormat::Markdown {
        request = request.parse_mode(ParseMode::Markdown);
    }
    if let Some(screen) = &reply.screen {
        request = request.reply_markup(keyboard(screen));
    }
    match request.await {
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e),
    }
}

async fn send_photo(
    bot: &Bot,
    chat_id: ChatId,
    path: &std::path::Path,
    reply: &Reply,
) -> Result<(), RequestError> {
    let mut request = bot
        .send_photo(chat_id, InputFile::file(path))
        .caption(&reply.text);
    if reply.format == TextFormat::Markdown {
        request = request.parse_mode(ParseMode::Markdown);
    }
    if let Some(screen) = &reply.screen {
        request = request.reply_markup(keyboard(screen));
    }
    request.await?;
    Ok(())
}

/// Send one reply
///
/// Edits fall back to a new message when there is nothing to edit or the edit
/// is rejected; photos fall back to text when the image is missing or rejected.
pub async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    edit_target: Option<MessageId>,
    reply: &Reply,
) -> Result<(), RequestError> {
    match (&reply.mode, edit_target) {
        (ReplyMode::Edit, Some(message_id)) => {
            match edit_text(bot, chat_id, message_id, reply).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!(chat_id = %chat_id, error = %e, "Failed to edit message, sending a new one");
                    send_text(bot, chat_id, reply).await
                }
            }
        }
        (ReplyMode::Photo { path }, _) if path.is_file() => {
            match send_photo(bot, chat_id, path, reply).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!(chat_id = %chat_id, error = %e, "Failed to send photo, sending text");
                    send_text(bot, chat_id, reply).await
                }
            }
        }
        (ReplyMode::Photo { path }, _) => {
            debug!(path = %path.display(), "Welcome image not found, sending text");
            send_text(bot, chat_id, reply).await
        }
        _ => send_text(bot, chat_id, reply).await,
    }
}

/// Send replies in order, stopping at the first failure
pub async fn send_replies(
    bot: &Bot,
    chat_id: ChatId,
    edit_target: Option<MessageId>,
    replies: &[Reply],
) -> Result<(), RequestError> {
    for reply in replies {
        send_reply(bot, chat_id, edit_target, reply).await?;
    }
    Ok(())
}

/// Deliver replies for one update, containing any failure
///
/// On failure the user gets a short notice with the main menu; the error never
/// propagates to the dispatcher loop.
pub async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    edit_target: Option<MessageId>,
    replies: &[Reply],
    update_kind: &str,
    user_id: u64,
) {
    let Err(e) = send_replies(bot, chat_id, edit_target, replies).await else {
        return;
    };
    error!(update_kind, user_id, error = %e, "Failed to handle update");

    let notice = bot
        .send_message(chat_id, render::render_unexpected_error())
        .reply_markup(keyboard(&menu::build(ScreenName::Main)))
        .await;
    if let Err(e) = notice {
        error!(update_kind, user_id, error = %e, "Failed to send error notice");
    }
}
