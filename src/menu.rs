//! # Menu Builder Module
//!
//! Statically defined screens and their actions. Screens form a star around
//! `main`: every other screen offers exactly one way back to it.

use std::fmt;
use std::str::FromStr;

use crate::errors::MenuError;

/// Button identifiers carried in callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    BrowseCollection,
    ViewOffers,
    PlaceOrder,
    AskQuestion,
    TrackOrder,
    ViewBlogs,
    ContactUs,
    FollowUs,
    BackToMenu,
}

impl ActionId {
    pub const ALL: [ActionId; 9] = [
        ActionId::BrowseCollection,
        ActionId::ViewOffers,
        ActionId::PlaceOrder,
        ActionId::AskQuestion,
        ActionId::TrackOrder,
        ActionId::ViewBlogs,
        ActionId::ContactUs,
        ActionId::FollowUs,
        ActionId::BackToMenu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::BrowseCollection => "browse_collection",
            ActionId::ViewOffers => "view_offers",
            ActionId::PlaceOrder => "place_order",
            ActionId::AskQuestion => "ask_question",
            ActionId::TrackOrder => "track_order",
            ActionId::ViewBlogs => "view_blogs",
            ActionId::ContactUs => "contact_us",
            ActionId::FollowUs => "follow_us",
            ActionId::BackToMenu => "back_to_menu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionId::BrowseCollection => "🛍 Browse Saree Collection",
            ActionId::ViewOffers => "💰 View Offers",
            ActionId::PlaceOrder => "📝 Place an Order Online",
            ActionId::AskQuestion => "❓ Ask a Question",
            ActionId::TrackOrder => "📦 Track Your Order",
            ActionId::ViewBlogs => "📰 View Blogs",
            ActionId::ContactUs => "☎️ Contact Us",
            ActionId::FollowUs => "📱 Follow Us",
            ActionId::BackToMenu => "🔙 Back to Menu",
        }
    }

    /// Screen shown after this action is selected
    pub fn target(self) -> ScreenName {
        match self {
            ActionId::BrowseCollection => ScreenName::Browse,
            ActionId::ViewOffers => ScreenName::Offers,
            ActionId::PlaceOrder => ScreenName::Order,
            ActionId::AskQuestion => ScreenName::Question,
            ActionId::TrackOrder => ScreenName::Track,
            ActionId::ViewBlogs => ScreenName::Blogs,
            ActionId::ContactUs => ScreenName::Contact,
            ActionId::FollowUs => ScreenName::Follow,
            ActionId::BackToMenu => ScreenName::Main,
        }
    }
}

impl FromStr for ActionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub label: &'static str,
    pub action_id: ActionId,
}

impl From<ActionId> for Action {
    fn from(action_id: ActionId) -> Self {
        Self {
            label: action_id.label(),
            action_id,
        }
    }
}

/// Names of the fixed screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    Main,
    Help,
    Browse,
    Offers,
    Order,
    Question,
    Track,
    Blogs,
    Contact,
    Follow,
}

impl ScreenName {
    pub const ALL: [ScreenName; 10] = [
        ScreenName::Main,
        ScreenName::Help,
        ScreenName::Browse,
        ScreenName::Offers,
        ScreenName::Order,
        ScreenName::Question,
        ScreenName::Track,
        ScreenName::Blogs,
        ScreenName::Contact,
        ScreenName::Follow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenName::Main => "main",
            ScreenName::Help => "help",
            ScreenName::Browse => "browse",
            ScreenName::Offers => "offers",
            ScreenName::Order => "order",
            ScreenName::Question => "question",
            ScreenName::Track => "track",
            ScreenName::Blogs => "blogs",
            ScreenName::Contact => "contact",
            ScreenName::Follow => "follow",
        }
    }
}

impl FromStr for ScreenName {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| MenuError::UnknownScreen(s.to_string()))
    }
}

/// A screen's actions, laid out in keyboard rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScreen {
    pub name: ScreenName,
    pub rows: Vec<Vec<Action>>,
}

impl MenuScreen {
    /// All actions in display order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.rows.iter().flatten()
    }

    pub fn contains(&self, action_id: ActionId) -> bool {
        self.actions().any(|a| a.action_id == action_id)
    }
}

fn row(ids: &[ActionId]) -> Vec<Action> {
    ids.iter().copied().map(Action::from).collect()
}

/// Build a screen from its name
pub fn build(name: ScreenName) -> MenuScreen {
    use ActionId::*;

    let rows = match name {
        ScreenName::Main => vec![
            row(&[BrowseCollection, ViewOffers]),
            row(&[PlaceOrder]),
            row(&[AskQuestion, ViewBlogs]),
            row(&[ContactUs, FollowUs]),
        ],
        ScreenName::Order => vec![row(&[TrackOrder]), row(&[BackToMenu])],
        ScreenName::Help
        | ScreenName::Browse
        | ScreenName::Offers
        | ScreenName::Question
        | ScreenName::Track
        | ScreenName::Blogs
        | ScreenName::Contact
        | ScreenName::Follow => vec![row(&[BackToMenu])],
    };
    MenuScreen { name, rows }
}

/// Look up a screen by name
pub fn screen(name: &str) -> Result<MenuScreen, MenuError> {
    name.parse::<ScreenName>().map(build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_id_round_trips_through_callback_data() {
        for id in ActionId::ALL {
            assert_eq!(id.as_str().parse::<ActionId>(), Ok(id));
        }
        assert!("launch_rockets".parse::<ActionId>().is_err());
    }

    #[test]
    fn test_unknown_screen() {
        assert_eq!(
            screen("cart"),
            Err(MenuError::UnknownScreen("cart".to_string()))
        );
    }
}
