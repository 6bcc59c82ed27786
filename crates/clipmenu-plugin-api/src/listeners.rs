//! Event listeners for `clipboardMenuAction`.
//!
//! This module provides:
//! - `ListenerRegistry` - storage for subscribed handlers
//! - `ListenerHandle` - returned by `add`, unsubscribes on `remove()`
//! - A broadcast channel for async consumers (e.g. a bridge forwarding
//!   events to a frontend)
//!
//! ## Error Isolation
//!
//! Handlers run in subscription order. A panicking handler is logged and
//! skipped; the remaining handlers still receive the event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use clipmenu_core::{ClipboardMenuActionEvent, PluginError, PluginResult, CLIPBOARD_MENU_ACTION};

/// Global counter for generating unique listener IDs.
static LISTENER_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique listener ID.
fn generate_listener_id() -> String {
    let id = LISTENER_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("listener:{}", id)
}

/// Callback invoked for every emitted event.
pub type EventHandler = Arc<dyn Fn(&ClipboardMenuActionEvent) + Send + Sync>;

struct ListenerEntry {
    id: String,
    handler: EventHandler,
}

/// Registry of `clipboardMenuAction` subscribers.
pub struct ListenerRegistry {
    listeners: RwLock<Vec<ListenerEntry>>,
    sender: broadcast::Sender<ClipboardMenuActionEvent>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            listeners: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Subscribe `handler` to `event_name`.
    ///
    /// Only `clipboardMenuAction` is emitted; any other name is rejected.
    pub fn add(
        self: &Arc<Self>,
        event_name: &str,
        handler: EventHandler,
    ) -> PluginResult<ListenerHandle> {
        if event_name != CLIPBOARD_MENU_ACTION {
            return Err(PluginError::UnknownEvent(event_name.to_string()));
        }

        let id = generate_listener_id();
        self.listeners.write().push(ListenerEntry {
            id: id.clone(),
            handler,
        });
        tracing::debug!("Added listener for '{}' (id: {})", event_name, id);

        Ok(ListenerHandle {
            id,
            registry: Arc::downgrade(self),
        })
    }

    /// Remove a listener by ID.
    ///
    /// Returns true if the listener was found and removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut listeners = self.listeners.write();
        if let Some(pos) = listeners.iter().position(|l| l.id == id) {
            listeners.remove(pos);
            tracing::debug!("Removed listener (id: {})", id);
            return true;
        }
        false
    }

    /// Remove every listener.
    pub fn clear(&self) {
        let mut listeners = self.listeners.write();
        tracing::debug!("Removing all {} listeners", listeners.len());
        listeners.clear();
    }

    /// Number of subscribed handlers.
    pub fn count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Subscribe to events as a stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ClipboardMenuActionEvent> {
        self.sender.subscribe()
    }

    /// Deliver `event` to every handler and broadcast subscriber.
    pub fn emit(&self, event: &ClipboardMenuActionEvent) {
        // Handlers may add or remove listeners; call them outside the lock.
        let handlers: Vec<(String, EventHandler)> = self
            .listeners
            .read()
            .iter()
            .map(|l| (l.id.clone(), l.handler.clone()))
            .collect();

        tracing::debug!(
            "Emitting '{}' ({}) to {} listeners",
            CLIPBOARD_MENU_ACTION,
            event.action,
            handlers.len()
        );

        for (id, handler) in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::error!("Listener {} panicked while handling {}", id, event.action);
            }
        }

        let _ = self.sender.send(event.clone());
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by `addListener`.
///
/// Dropping the handle does not unsubscribe; call [`ListenerHandle::remove`].
#[derive(Debug, Clone)]
pub struct ListenerHandle {
    id: String,
    registry: Weak<ListenerRegistry>,
}

impl ListenerHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Unsubscribe. Returns false if already removed.
    pub fn remove(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(&self.id))
    }
}
