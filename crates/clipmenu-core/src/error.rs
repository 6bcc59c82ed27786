//! Error types for the clipboard context-menu plugin.

use serde::Serialize;
use thiserror::Error;

use crate::action::MenuAction;

/// Clipboard access errors reported by the host clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The platform refused access (permissions, unsupported, no clipboard).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Reading failed or the clipboard holds no text.
    #[error("Clipboard read failed: {0}")]
    Read(String),

    /// Writing failed.
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Errors reported by host surfaces (web view, DOM).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Script evaluation inside the embedded web content failed.
    #[error("Script evaluation failed: {0}")]
    ScriptEvaluation(String),

    /// The trigger listener could not be installed.
    #[error("Listener error: {0}")]
    Listener(String),

    /// The menu could not be presented.
    #[error("Presentation failed: {0}")]
    Presentation(String),
}

/// Errors returned by plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The surface the operation needs (web view, document) is not available.
    #[error("{surface} not available")]
    NoHostSurface { surface: &'static str },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Host(#[from] HostError),

    /// `addListener` was called with an event name the plugin never emits.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// A selection arrived for a menu that is no longer open.
    #[error("Menu is not open")]
    MenuNotOpen,

    /// A selection named an action the open menu does not offer.
    #[error("Action '{0}' is not offered by the open menu")]
    ActionNotOffered(MenuAction),
}

impl PluginError {
    /// Stable identifier for structured rejections.
    pub fn kind(&self) -> &'static str {
        match self {
            PluginError::NoHostSurface { .. } => "NoHostSurface",
            PluginError::Clipboard(_) => "ClipboardError",
            PluginError::Host(_) => "HostError",
            PluginError::UnknownEvent(_) => "UnknownEvent",
            PluginError::MenuNotOpen => "MenuNotOpen",
            PluginError::ActionNotOffered(_) => "ActionNotOffered",
        }
    }
}

/// Serialize PluginError as `{ "kind", "message" }` for call rejections.
impl Serialize for PluginError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("PluginError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias using PluginError.
pub type PluginResult<T> = Result<T, PluginError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
