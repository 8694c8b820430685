//! # Conversation Dispatcher Module
//!
//! Routes inbound updates to their handlers and produces the replies to send.
//! The dispatcher knows nothing about Telegram: the `bot` module converts
//! Telegram updates into [`Inbound`] values and [`Reply`] values back into
//! Telegram requests.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::commerce::{CatalogSource, ProductFilter};
use crate::config::{BotConfig, StoreLinks, DEFAULT_BLOG_ID};
use crate::menu::{self, ActionId, MenuScreen, ScreenName};
use crate::relay::{OperatorRelay, Submitter};
use crate::render::{self, Topic};
use crate::session::{PendingInput, SessionStore};

/// Products shown on the browse and offers screens
pub const PRODUCT_LIMIT: u32 = 5;
/// Articles shown on the blogs screen
pub const ARTICLE_LIMIT: u32 = 3;
/// Title fragment identifying the offers collection
pub const OFFERS_COLLECTION_TITLE: &str = "offers";

/// One inbound event from the chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Command { name: String },
    ButtonSelection { action_id: String },
    FreeText { body: String },
}

impl Update {
    /// Classify a text message: `/name[@bot] [args]` is a command
    pub fn from_text(text: &str) -> Self {
        match text.strip_prefix('/') {
            Some(rest) if !rest.trim().is_empty() => {
                let token = rest.split_whitespace().next().unwrap_or_default();
                let name = token.split('@').next().unwrap_or_default();
                Update::Command {
                    name: name.to_lowercase(),
                }
            }
            _ => Update::FreeText {
                body: text.to_string(),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Update::Command { .. } => "command",
            Update::ButtonSelection { .. } => "button_selection",
            Update::FreeText { .. } => "free_text",
        }
    }
}

/// An update together with the user who sent it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub user: Submitter,
    pub update: Update,
}

/// How a reply reaches the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMode {
    /// New message
    Send,
    /// Replace the message holding the tapped keyboard
    Edit,
    /// Photo with the text as caption
    Photo { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Markdown,
    Plain,
}

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub mode: ReplyMode,
    pub text: String,
    pub format: TextFormat,
    pub link_preview: bool,
    pub screen: Option<MenuScreen>,
}

impl Reply {
    fn new(mode: ReplyMode, text: String) -> Self {
        Self {
            mode,
            text,
            format: TextFormat::Markdown,
            link_preview: true,
            screen: None,
        }
    }

    pub fn send(text: String) -> Self {
        Self::new(ReplyMode::Send, text)
    }

    pub fn edit(text: String) -> Self {
        Self::new(ReplyMode::Edit, text)
    }

    pub fn photo(path: PathBuf, caption: String) -> Self {
        Self::new(ReplyMode::Photo { path }, caption)
    }

    pub fn with_screen(mut self, name: ScreenName) -> Self {
        self.screen = Some(menu::build(name));
        self
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.link_preview = false;
        self
    }
}

/// Dispatcher settings taken from the startup configuration
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub links: StoreLinks,
    pub blog_id: String,
    /// Welcome photo; `None` sends the welcome as text
    pub logo_path: Option<PathBuf>,
    pub pending_input_ttl: Option<std::time::Duration>,
}

impl DispatcherSettings {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            links: config.links.clone(),
            blog_id: config.commerce.blog_id.clone(),
            logo_path: Some(config.logo_path.clone()),
            pending_input_ttl: config.pending_input_ttl,
        }
    }
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            links: StoreLinks::default(),
            blog_id: DEFAULT_BLOG_ID.to_string(),
            logo_path: None,
            pending_input_ttl: None,
        }
    }
}

/// Routes updates to handlers; owns the per-user sessions
pub struct ConversationDispatcher {
    catalog: Arc<dyn CatalogSource>,
    relay: Arc<dyn OperatorRelay>,
    sessions: SessionStore,
    settings: DispatcherSettings,
}

impl ConversationDispatcher {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        relay: Arc<dyn OperatorRelay>,
        settings: DispatcherSettings,
    ) -> Self {
        Self {
            catalog,
            relay,
            sessions: SessionStore::new(settings.pending_input_ttl),
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn links(&self) -> &StoreLinks {
        &self.settings.links
    }

    /// Interim message for updates that wait on the commerce API
    pub fn progress_notice(&self, update: &Update) -> Option<Reply> {
        let Update::ButtonSelection { action_id } = update else {
            return None;
        };
        let what = match action_id.parse::<ActionId>() {
            Ok(ActionId::BrowseCollection) => "🛍 Fetching our saree collection...",
            Ok(ActionId::ViewBlogs) => "📰 Fetching latest blog articles...",
            _ => return None,
        };
        Some(Reply::edit(render::render_progress(what)))
    }

    /// Handle one update and return the replies, in order
    pub async fn handle(&self, inbound: &Inbound) -> Vec<Reply> {
        debug!(
            user_id = inbound.user.id,
            update_kind = inbound.update.kind(),
            "Dispatching update"
        );
        match &inbound.update {
            Update::Command { name } => self.handle_command(name),
            Update::ButtonSelection { action_id } => {
                self.handle_button(inbound.user.id, action_id).await
            }
            Update::FreeText { body } => self.handle_free_text(&inbound.user, body).await,
        }
    }

    fn handle_command(&self, name: &str) -> Vec<Reply> {
        match name {
            "start" => {
                let welcome = render::render_topic(Topic::Welcome, self.links());
                let welcome = match &self.settings.logo_path {
                    Some(path) => Reply::photo(path.clone(), welcome),
                    None => Reply::send(welcome),
                };
                vec![
                    welcome,
                    Reply::send("Select an option:".to_string()).with_screen(ScreenName::Main),
                ]
            }
            "help" => vec![
                Reply::send(render::render_topic(Topic::Help, self.links()))
                    .with_screen(ScreenName::Help),
            ],
            other => {
                debug!(command = other, "Unknown command");
                vec![self.fallback(ReplyMode::Send)]
            }
        }
    }

    async fn handle_button(&self, user_id: u64, action_id: &str) -> Vec<Reply> {
        let Ok(action) = action_id.parse::<ActionId>() else {
            warn!(user_id, action = action_id, "Unknown button action");
            self.sessions.set_pending(user_id, PendingInput::None).await;
            return vec![self.fallback(ReplyMode::Edit)];
        };

        let pending = match action {
            ActionId::AskQuestion => PendingInput::AwaitingQuestion,
            ActionId::TrackOrder => PendingInput::AwaitingOrderNumber,
            _ => PendingInput::None,
        };
        self.sessions.set_pending(user_id, pending).await;

        let links = self.links();
        let reply = match action {
            ActionId::BackToMenu => Reply::edit(render::render_topic(Topic::MainMenu, links)),
            ActionId::BrowseCollection => {
                let products = self
                    .catalog
                    .fetch_products(PRODUCT_LIMIT, ProductFilter::None)
                    .await;
                Reply::edit(render::render_collection(&products, links)).without_preview()
            }
            ActionId::ViewOffers => {
                let products = match self
                    .catalog
                    .find_collection_id_by_title(OFFERS_COLLECTION_TITLE)
                    .await
                {
                    Some(id) => {
                        self.catalog
                            .fetch_products(PRODUCT_LIMIT, ProductFilter::Collection(id))
                            .await
                    }
                    None => Vec::new(),
                };
                Reply::edit(render::render_offers(&products, links)).without_preview()
            }
            ActionId::ViewBlogs => {
                let articles = self
                    .catalog
                    .fetch_articles(&self.settings.blog_id, ARTICLE_LIMIT)
                    .await;
                Reply::edit(render::render_blogs(&articles, links)).without_preview()
            }
            ActionId::PlaceOrder => Reply::edit(render::render_topic(Topic::Order, links)),
            ActionId::AskQuestion => Reply::edit(render::render_topic(Topic::Question, links)),
            ActionId::TrackOrder => {
                Reply::edit(render::render_topic(Topic::Track, links)).without_preview()
            }
            ActionId::ContactUs => Self::topic_reply(Topic::Contact, links),
            ActionId::FollowUs => Self::topic_reply(Topic::Follow, links),
        };

        debug!(user_id, action = %action, "Handled button selection");
        vec![reply.with_screen(action.target())]
    }

    fn topic_reply(topic: Topic, links: &StoreLinks) -> Reply {
        let format = if render::topic_is_markdown(topic) {
            TextFormat::Markdown
        } else {
            TextFormat::Plain
        };
        Reply::edit(render::render_topic(topic, links))
            .with_format(format)
            .without_preview()
    }

    async fn handle_free_text(&self, user: &Submitter, body: &str) -> Vec<Reply> {
        let pending = self.sessions.take_pending(user.id).await;
        let Some(kind) = pending.relay_kind() else {
            return vec![self.fallback(ReplyMode::Send)];
        };

        // Back action only: the user lands on the screen that asked for input
        let screen = match pending {
            PendingInput::AwaitingOrderNumber => ScreenName::Track,
            _ => ScreenName::Question,
        };
        let text = match self.relay.relay(kind, user, body).await {
            Ok(()) => {
                info!(user_id = user.id, kind = kind.as_str(), "Submission relayed");
                render::render_relay_ack(kind, self.links())
            }
            Err(e) => {
                warn!(user_id = user.id, kind = kind.as_str(), error = %e, "Submission could not be relayed");
                render::render_relay_failure(kind)
            }
        };
        vec![Reply::send(text).with_screen(screen)]
    }

    fn fallback(&self, mode: ReplyMode) -> Reply {
        Reply::new(mode, render::render_topic(Topic::Fallback, self.links()))
            .with_screen(ScreenName::Main)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_text() {
        assert_eq!(
            Update::from_text("/start"),
            Update::Command {
                name: "start".to_string()
            }
        );
        assert_eq!(
            Update::from_text("/Help@StoreBot now"),
            Update::Command {
                name: "help".to_string()
            }
        );
        assert_eq!(
            Update::from_text("where is #1001"),
            Update::FreeText {
                body: "where is #1001".to_string()
            }
        );
        assert!(matches!(Update::from_text("/"), Update::FreeText { .. }));
    }
}
