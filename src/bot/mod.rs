//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands and free text
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `reply_sender`: Sends dispatcher replies and contains delivery failures
//! - `ui_builder`: Creates inline keyboards from menu screens

pub mod callback_handler;
pub mod message_handler;
pub mod reply_sender;
pub mod ui_builder;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::User;

use crate::relay::Submitter;

pub use callback_handler::callback_handler;
pub use message_handler::message_handler;
pub use ui_builder::keyboard;

/// Update routing tree for the dispatcher
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}

pub(crate) fn submitter(user: &User) -> Submitter {
    Submitter {
        id: user.id.0,
        first_name: user.first_name.clone(),
        username: user.username.clone(),
    }
}
