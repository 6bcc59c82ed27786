//! Platform backends.
//!
//! A backend knows how to reach its host surface: how to install the
//! trigger listener, read the selection, and carry out each action's
//! platform effect. Everything else (menu building, dispatch order, event
//! emission) is shared and lives outside this module.
//!
//! - `NativeBackend` - long-press on an embedded web view, selection read by
//!   script evaluation
//! - `WebBackend` - `contextmenu` on the document, selection read through the
//!   DOM Selection API

use std::sync::Arc;

use async_trait::async_trait;

use clipmenu_core::{ClipboardError, MenuId, PluginResult};

use crate::host::{ClipboardHost, TriggerListener, TriggerToken};
use crate::menu::ContextMenu;

mod native;
mod web;

pub use native::{NativeBackend, DELETE_SELECTION_SCRIPT, SELECTION_SCRIPT, SELECT_ALL_SCRIPT};
pub use web::WebBackend;

/// Operations every backend provides.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Fail with `NoHostSurface` when the surface is gone.
    fn ensure_surface(&self) -> PluginResult<()>;

    /// Install the trigger listener on the host surface.
    fn attach(&self, listener: Arc<dyn TriggerListener>) -> PluginResult<TriggerToken>;

    /// Remove a previously installed listener.
    fn detach(&self, token: TriggerToken) -> PluginResult<()>;

    /// The host clipboard.
    fn clipboard(&self) -> &Arc<dyn ClipboardHost>;

    /// Current selection text, "" when nothing is selected.
    async fn read_selection(&self) -> PluginResult<String>;

    /// Remove the selected range from the focused editable element.
    /// Returns false when the selection is outside an editable element.
    async fn delete_selection(&self) -> PluginResult<bool>;

    /// Select the focused editable element's text, or the whole document.
    async fn select_all(&self) -> PluginResult<()>;

    /// Text to report for a paste. `snapshot` is the clipboard text read
    /// when the menu was built.
    async fn paste_text(&self, snapshot: Option<&str>) -> PluginResult<String>;

    /// Put a built menu on screen.
    fn present(&self, menu: &ContextMenu) -> PluginResult<()>;

    /// Take a menu off screen.
    fn dismiss(&self, menu: MenuId);

    /// Read the clipboard, treating any failure as "unavailable".
    async fn read_clipboard(&self) -> Option<String> {
        match self.clipboard().read_text().await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("[{}] Clipboard unreadable, paste disabled: {}", self.name(), e);
                None
            }
        }
    }

    /// Write `text` to the clipboard.
    async fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard().write_text(text).await
    }
}
