//! Clipboard context-menu plugin.
//!
//! This crate provides the action-menu protocol shared by every backend:
//! - Menu building from action flags and the per-trigger context
//! - Trigger sessions that turn a long-press or `contextmenu` into a menu
//! - Action dispatch and the `clipboardMenuAction` event channel
//! - Host capability traits and in-memory hosts
//! - `NativeBackend` (embedded web view) and `WebBackend` (browser document)

pub mod backend;
pub mod dispatcher;
pub mod host;
pub mod listeners;
pub mod memory;
pub mod menu;
pub mod plugin;
pub mod presentation;
pub mod session;

// Re-export commonly used types
pub use backend::{Backend, NativeBackend, WebBackend};
pub use dispatcher::ActionDispatcher;
pub use host::{
    ClipboardHost, DocumentHost, MenuSurface, SurfaceSlot, TriggerListener, TriggerOptions,
    TriggerResponse, TriggerSource, TriggerToken, WebViewHost,
};
pub use listeners::{EventHandler, ListenerHandle, ListenerRegistry};
pub use memory::{MemoryClipboard, MemoryHost};
pub use menu::{build_menu, ContextMenu, MenuItem};
pub use plugin::ClipboardMenuPlugin;
pub use presentation::{select_native_strategy, PlatformVersion, PresentationStrategy};
pub use session::TriggerSession;

// Re-export clipmenu_core types for convenience
pub use clipmenu_core::{
    ActionConfig, ClipboardError, ClipboardMenuActionEvent, ContextMenuOptions, EchoOptions,
    EchoResult, HostError, MenuAction, MenuContext, MenuId, PluginConfig, PluginError,
    PluginResult, Position, ReadResult, WriteOptions, CLIPBOARD_MENU_ACTION,
};
