//! Core types for the clipboard context-menu plugin.
//!
//! This crate contains the data model shared by every backend:
//! - Menu actions and their display metadata
//! - Action availability configuration and call options
//! - The per-trigger menu context
//! - The `clipboardMenuAction` event payload
//! - File configuration
//! - Error types

mod action;
mod call;
mod config;
mod context;
mod error;
mod event;
mod options;

pub use action::MenuAction;
pub use call::{EchoOptions, EchoResult, ReadResult, WriteOptions};
pub use config::{
    config_dir, config_path, load_config, load_config_from, LongPressConfig, PluginConfig,
    PresentationConfig, DEFAULT_LONG_PRESS_MS,
};
pub use context::{MenuContext, MenuId, Position};
pub use error::{ClipboardError, ConfigError, HostError, PluginError, PluginResult};
pub use event::{ClipboardMenuActionEvent, CLIPBOARD_MENU_ACTION};
pub use options::{ActionConfig, ContextMenuOptions};
