use storefront_bot::menu::{build, screen, ActionId, ScreenName};

#[cfg(test)]
mod tests {
    use super::*;

    /// Test every screen offers at least one action
    #[test]
    fn test_every_screen_has_actions() {
        for name in ScreenName::ALL {
            assert!(build(name).actions().count() > 0, "{} is empty", name.as_str());
        }
    }

    /// Test every non-main screen has exactly one way back to the main menu
    #[test]
    fn test_secondary_screens_have_one_back_action() {
        for name in ScreenName::ALL.into_iter().filter(|n| *n != ScreenName::Main) {
            let backs = build(name)
                .actions()
                .filter(|a| a.action_id == ActionId::BackToMenu)
                .count();
            assert_eq!(backs, 1, "{} back actions", name.as_str());
        }
    }

    /// Test the main menu lists every top-level action and no back action
    #[test]
    fn test_main_menu_layout() {
        let main = build(ScreenName::Main);
        let ids: Vec<ActionId> = main.actions().map(|a| a.action_id).collect();
        assert_eq!(
            ids,
            vec![
                ActionId::BrowseCollection,
                ActionId::ViewOffers,
                ActionId::PlaceOrder,
                ActionId::AskQuestion,
                ActionId::ViewBlogs,
                ActionId::ContactUs,
                ActionId::FollowUs,
            ]
        );
        assert!(!main.contains(ActionId::BackToMenu));
    }

    /// Test order tracking is reachable from the order screen
    #[test]
    fn test_order_screen_offers_tracking() {
        let order = build(ScreenName::Order);
        assert!(order.contains(ActionId::TrackOrder));
        assert_eq!(ActionId::TrackOrder.target(), ScreenName::Track);
    }

    /// Test every action leads to a defined screen reachable by name
    #[test]
    fn test_action_targets_resolve() {
        for id in ActionId::ALL {
            let target = id.target();
            assert_eq!(screen(target.as_str()).unwrap().name, target);
        }
    }
}
