//! The `clipboardMenuAction` event payload.

use serde::{Deserialize, Serialize};

use crate::action::MenuAction;

/// Name under which action events are published.
pub const CLIPBOARD_MENU_ACTION: &str = "clipboardMenuAction";

/// Payload emitted after a menu action ran.
///
/// `selected_text` is set for copy and cut, `text` for paste, neither for
/// select-all. Both backends produce this exact shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardMenuActionEvent {
    pub action: MenuAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ClipboardMenuActionEvent {
    pub fn copy(selected_text: impl Into<String>) -> Self {
        Self {
            action: MenuAction::Copy,
            selected_text: Some(selected_text.into()),
            text: None,
        }
    }

    pub fn cut(selected_text: impl Into<String>) -> Self {
        Self {
            action: MenuAction::Cut,
            selected_text: Some(selected_text.into()),
            text: None,
        }
    }

    pub fn paste(text: impl Into<String>) -> Self {
        Self {
            action: MenuAction::Paste,
            selected_text: None,
            text: Some(text.into()),
        }
    }

    pub fn select_all() -> Self {
        Self {
            action: MenuAction::SelectAll,
            selected_text: None,
            text: None,
        }
    }
}
