//! Action availability and `enableContextMenu` options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::MenuAction;

/// Options accepted by `enableContextMenu`.
///
/// Every field is optional; an omitted field means "enabled".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextMenuOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_copy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_paste: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_cut: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_select_all: Option<bool>,
}

impl ContextMenuOptions {
    /// Read options from an untyped call payload.
    ///
    /// Never fails: a payload that is not an object, or a field that is not
    /// a boolean, is treated as omitted.
    pub fn from_value(value: &Value) -> Self {
        let flag = |key: &str| value.get(key).and_then(Value::as_bool);
        Self {
            enable_copy: flag("enableCopy"),
            enable_paste: flag("enablePaste"),
            enable_cut: flag("enableCut"),
            enable_select_all: flag("enableSelectAll"),
        }
    }

    /// Options with a single action switched off.
    pub fn without(action: MenuAction) -> Self {
        let mut options = Self::default();
        match action {
            MenuAction::Copy => options.enable_copy = Some(false),
            MenuAction::Cut => options.enable_cut = Some(false),
            MenuAction::Paste => options.enable_paste = Some(false),
            MenuAction::SelectAll => options.enable_select_all = Some(false),
        }
        options
    }
}

/// Which of the four actions the menu may offer.
///
/// Built only by [`ActionConfig::from_options`], which overwrites every flag.
/// There is no partial update: an unspecified flag reverts to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub copy: bool,
    pub paste: bool,
    pub cut: bool,
    pub select_all: bool,
}

impl ActionConfig {
    /// Build a config from call options, defaulting omitted fields to `true`.
    pub fn from_options(options: Option<&ContextMenuOptions>) -> Self {
        let options = options.copied().unwrap_or_default();
        Self {
            copy: options.enable_copy.unwrap_or(true),
            paste: options.enable_paste.unwrap_or(true),
            cut: options.enable_cut.unwrap_or(true),
            select_all: options.enable_select_all.unwrap_or(true),
        }
    }

    /// Check a single action.
    pub fn is_enabled(&self, action: MenuAction) -> bool {
        match action {
            MenuAction::Copy => self.copy,
            MenuAction::Cut => self.cut,
            MenuAction::Paste => self.paste,
            MenuAction::SelectAll => self.select_all,
        }
    }

    /// Check an action by wire name. Unknown names report disabled.
    pub fn is_enabled_by_name(&self, name: &str) -> bool {
        MenuAction::from_name(name).is_some_and(|a| self.is_enabled(a))
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self::from_options(None)
    }
}
