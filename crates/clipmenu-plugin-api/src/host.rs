//! Host capability traits.
//!
//! The plugin never talks to a platform directly. Everything it needs from
//! the host is expressed here:
//! - `ClipboardHost` - system clipboard read/write
//! - `TriggerSource` - long-press gesture or `contextmenu` event source
//! - `MenuSurface` - where a built menu is presented
//! - `WebViewHost` - embedded web content (native backend)
//! - `DocumentHost` - DOM selection and editing (web backend)
//!
//! Menu interaction flows back into the plugin through [`TriggerListener`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::RwLock;

use clipmenu_core::{
    ClipboardError, HostError, MenuAction, MenuId, PluginResult, Position, DEFAULT_LONG_PRESS_MS,
};

use crate::menu::ContextMenu;
use crate::presentation::PresentationStrategy;

// =============================================================================
// Clipboard
// =============================================================================

/// The host's clipboard primitive.
///
/// Permission handling belongs to the host; the plugin only sees success or
/// failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardHost: Send + Sync {
    /// Read the clipboard as text.
    async fn read_text(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// =============================================================================
// Triggers
// =============================================================================

/// Identifies one installed trigger listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerToken(pub u64);

/// Parameters handed to the host when a listener is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Minimum press duration for long-press recognisers. Ignored by
    /// event-based sources.
    pub min_press_duration: Duration,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            min_press_duration: Duration::from_millis(DEFAULT_LONG_PRESS_MS),
        }
    }
}

/// What the host must do with its own default menu after a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerResponse {
    /// Consume the gesture / `preventDefault` the event.
    SuppressDefault,
    /// The listener is no longer active; let the platform menu show.
    PassThrough,
}

/// Callbacks the host invokes on the installed listener.
///
/// Futures are `'static` so hosts can drive them from their own executor.
pub trait TriggerListener: Send + Sync {
    /// A long-press or `contextmenu` fired at `position`.
    fn on_trigger(&self, position: Position) -> BoxFuture<'static, TriggerResponse>;

    /// The user picked `action` from the menu identified by `menu`.
    ///
    /// Errors are reported to the host; the menu is dismissed either way.
    fn on_select(&self, menu: MenuId, action: MenuAction) -> BoxFuture<'static, PluginResult<()>>;

    /// The user dismissed the menu without choosing.
    fn on_dismiss(&self, menu: MenuId);
}

/// A source of trigger signals.
///
/// At most one listener per plugin is attached at any time; the plugin
/// detaches before it attaches a replacement.
pub trait TriggerSource: Send + Sync {
    fn attach_trigger(
        &self,
        listener: Arc<dyn TriggerListener>,
        options: TriggerOptions,
    ) -> Result<TriggerToken, HostError>;

    fn detach_trigger(&self, token: TriggerToken);
}

/// Where built menus are shown.
pub trait MenuSurface: Send + Sync {
    fn show_menu(&self, menu: &ContextMenu, strategy: PresentationStrategy)
        -> Result<(), HostError>;

    fn hide_menu(&self, menu: MenuId);
}

// =============================================================================
// Surfaces
// =============================================================================

/// An embedded web view hosting the page (native backend).
#[async_trait]
pub trait WebViewHost: TriggerSource + MenuSurface {
    /// Evaluate a script in the page and return its JSON result.
    async fn evaluate_script(&self, script: &str) -> Result<serde_json::Value, HostError>;
}

/// The browser document (web backend).
pub trait DocumentHost: TriggerSource + MenuSurface {
    /// Selected text of the focused editable element, `None` when no
    /// editable element has focus.
    fn editable_selection(&self) -> Option<String>;

    /// `window.getSelection().toString()`.
    fn document_selection(&self) -> String;

    /// Remove the selected range from the focused editable element.
    /// Returns false when no editable element has focus.
    fn delete_editable_selection(&self) -> bool;

    /// Select everything in the focused editable element.
    /// Returns false when no editable element has focus.
    fn select_all_editable(&self) -> bool;

    /// Select all document content.
    fn select_all_document(&self);
}

/// Holds the current host surface, which may come and go with the page.
pub struct SurfaceSlot<S: ?Sized> {
    surface: RwLock<Option<Arc<S>>>,
}

impl<S: ?Sized> SurfaceSlot<S> {
    /// Create an empty slot.
    pub fn empty() -> Self {
        Self {
            surface: RwLock::new(None),
        }
    }

    /// Create a slot holding `surface`.
    pub fn with(surface: Arc<S>) -> Self {
        Self {
            surface: RwLock::new(Some(surface)),
        }
    }

    pub fn set(&self, surface: Arc<S>) {
        *self.surface.write() = Some(surface);
    }

    pub fn clear(&self) {
        *self.surface.write() = None;
    }

    pub fn get(&self) -> Option<Arc<S>> {
        self.surface.read().clone()
    }
}

impl<S: ?Sized> Default for SurfaceSlot<S> {
    fn default() -> Self {
        Self::empty()
    }
}
