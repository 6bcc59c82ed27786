//! Menu builder.
//!
//! `build_menu` is the single place that decides which actions a trigger
//! offers. Both backends call it, so the order and the preconditions are
//! identical everywhere:
//!
//! | Action     | Offered when                                  |
//! |------------|-----------------------------------------------|
//! | Copy       | enabled and selection non-empty               |
//! | Cut        | enabled and selection non-empty               |
//! | Paste      | enabled and the clipboard read succeeded      |
//! | Select All | enabled                                       |

use serde::Serialize;

use clipmenu_core::{ActionConfig, MenuAction, MenuContext, MenuId, Position};

/// Whether `action`'s precondition holds for `ctx`, ignoring configuration.
pub fn precondition_holds(action: MenuAction, ctx: &MenuContext) -> bool {
    if action.needs_selection() {
        return ctx.has_selection();
    }
    match action {
        MenuAction::Paste => ctx.clipboard_readable(),
        _ => true,
    }
}

/// Build the ordered list of actions to offer.
///
/// Evaluates Copy, Cut, Paste, Select All in that order and keeps an action
/// iff it is enabled and its precondition holds.
pub fn build_menu(config: &ActionConfig, ctx: &MenuContext) -> Vec<MenuAction> {
    MenuAction::ALL
        .into_iter()
        .filter(|&action| config.is_enabled(action) && precondition_holds(action, ctx))
        .collect()
}

/// One rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub action: MenuAction,
    pub title: &'static str,
    pub icon: &'static str,
}

impl From<MenuAction> for MenuItem {
    fn from(action: MenuAction) -> Self {
        Self {
            action,
            title: action.label(),
            icon: action.icon(),
        }
    }
}

/// A menu ready to present, together with the context it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub id: MenuId,
    pub context: MenuContext,
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    /// Build a menu for `ctx`. Returns `None` when no action applies, so an
    /// empty menu is never presented.
    pub fn build(config: &ActionConfig, ctx: MenuContext) -> Option<Self> {
        let actions = build_menu(config, &ctx);
        if actions.is_empty() {
            return None;
        }

        Some(Self {
            id: MenuId::new(),
            context: ctx,
            items: actions.into_iter().map(MenuItem::from).collect(),
        })
    }

    pub fn position(&self) -> Position {
        self.context.position
    }

    pub fn actions(&self) -> Vec<MenuAction> {
        self.items.iter().map(|i| i.action).collect()
    }

    pub fn offers(&self, action: MenuAction) -> bool {
        self.items.iter().any(|i| i.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipmenu_core::ContextMenuOptions;
    use MenuAction::*;

    fn ctx(selected: &str, clipboard: Option<&str>) -> MenuContext {
        MenuContext::new(Position::new(10.0, 20.0), selected, clipboard.map(String::from))
    }

    fn config(copy: bool, paste: bool, cut: bool, select_all: bool) -> ActionConfig {
        ActionConfig::from_options(Some(&ContextMenuOptions {
            enable_copy: Some(copy),
            enable_paste: Some(paste),
            enable_cut: Some(cut),
            enable_select_all: Some(select_all),
        }))
    }

    #[test]
    fn test_full_menu_order() {
        let actions = build_menu(&ActionConfig::default(), &ctx("hello", Some("x")));
        assert_eq!(actions, vec![Copy, Cut, Paste, SelectAll]);
    }

    #[test]
    fn test_empty_selection_hides_copy_and_cut() {
        let actions = build_menu(&ActionConfig::default(), &ctx("", Some("x")));
        assert_eq!(actions, vec![Paste, SelectAll]);
    }

    #[test]
    fn test_mixed_config() {
        let actions = build_menu(&config(false, true, true, false), &ctx("hello", Some("")));
        assert_eq!(actions, vec![Cut, Paste]);
    }

    #[test]
    fn test_unreadable_clipboard_never_offers_paste() {
        for paste in [true, false] {
            let actions = build_menu(&config(true, paste, true, true), &ctx("hello", None));
            assert!(!actions.contains(&Paste));
        }
    }

    #[test]
    fn test_empty_clipboard_text_still_offers_paste() {
        let actions = build_menu(&ActionConfig::default(), &ctx("", Some("")));
        assert!(actions.contains(&Paste));
    }

    #[test]
    fn test_no_applicable_actions_builds_no_menu() {
        let menu = ContextMenu::build(&config(true, true, true, false), ctx("", None));
        assert!(menu.is_none());
    }

    #[test]
    fn test_context_menu_items() {
        let menu = ContextMenu::build(&ActionConfig::default(), ctx("abc", None)).unwrap();
        assert_eq!(menu.actions(), vec![Copy, Cut, SelectAll]);
        assert_eq!(menu.items[0].title, "Copy");
        assert_eq!(menu.items[2].icon, "selection.pin.in.out");
        assert!(menu.offers(Cut));
        assert!(!menu.offers(Paste));
        assert_eq!(menu.position(), Position::new(10.0, 20.0));
    }
}
