//! Per-trigger menu context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen position of a trigger, in the host surface's coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Identifier of one presented menu.
///
/// Hosts echo it back on selection so a choice made on a menu that has
/// since been replaced can be recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuId(pub uuid::Uuid);

impl MenuId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu:{}", self.0)
    }
}

/// Everything the menu builder needs to know about one trigger.
///
/// Created when a trigger fires and discarded once the menu it produced
/// is dismissed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuContext {
    pub position: Position,

    /// Selected text at trigger time. Empty when nothing is selected.
    pub selected_text: String,

    /// Clipboard text at trigger time, `None` when the clipboard could not be read.
    pub clipboard_text: Option<String>,
}

impl MenuContext {
    pub fn new(
        position: Position,
        selected_text: impl Into<String>,
        clipboard_text: Option<String>,
    ) -> Self {
        Self {
            position,
            selected_text: selected_text.into(),
            clipboard_text,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_text.is_empty()
    }

    /// True when the clipboard read succeeded, even if it returned "".
    pub fn clipboard_readable(&self) -> bool {
        self.clipboard_text.is_some()
    }
}
