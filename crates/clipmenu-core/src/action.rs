//! Menu action variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry kind of the clipboard context menu.
///
/// The set is closed: every backend builds its menu from these four
/// variants, in the order given by [`MenuAction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    Copy,
    Cut,
    Paste,
    SelectAll,
}

impl MenuAction {
    /// Every action in menu order.
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Copy,
        MenuAction::Cut,
        MenuAction::Paste,
        MenuAction::SelectAll,
    ];

    /// Wire name, as used in event payloads and enable flags.
    pub fn as_str(self) -> &'static str {
        match self {
            MenuAction::Copy => "copy",
            MenuAction::Cut => "cut",
            MenuAction::Paste => "paste",
            MenuAction::SelectAll => "selectAll",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Menu item title.
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Copy => "Copy",
            MenuAction::Cut => "Cut",
            MenuAction::Paste => "Paste",
            MenuAction::SelectAll => "Select All",
        }
    }

    /// Icon hint for hosts that render icons (system symbol names).
    pub fn icon(self) -> &'static str {
        match self {
            MenuAction::Copy => "doc.on.doc",
            MenuAction::Cut => "scissors",
            MenuAction::Paste => "doc.on.clipboard",
            MenuAction::SelectAll => "selection.pin.in.out",
        }
    }

    /// Whether the action operates on the current selection.
    pub fn needs_selection(self) -> bool {
        matches!(self, MenuAction::Copy | MenuAction::Cut)
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
