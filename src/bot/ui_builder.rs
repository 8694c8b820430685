//! UI Builder module for turning menu screens into inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::menu::MenuScreen;

/// Inline keyboard with one button per action, rows preserved
pub fn keyboard(screen: &MenuScreen) -> InlineKeyboardMarkup {
    let rows = screen.rows.iter().map(|row| {
        row.iter()
            .map(|action| InlineKeyboardButton::callback(action.label, action.action_id.as_str()))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}
