//! Trigger session.
//!
//! A `TriggerSession` is the listener installed on the host while the menu
//! is enabled. It owns the flow from trigger to emitted event:
//!
//! ```text
//! trigger(position)
//!        │
//!        ▼
//! read selection ──► read clipboard        (both awaited)
//!        │
//!        ▼
//! newer trigger started? ── yes ──► discard
//!        │ no
//!        ▼
//! build menu ── empty ──► nothing shown
//!        │
//!        ▼
//! present, remember as open menu
//!        │
//!        ▼
//! select(menu, action) ──► dismiss ──► dispatch ──► emit
//! ```
//!
//! Each enable creates a fresh session, so a session's action config never
//! changes after construction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;

use clipmenu_core::{
    ActionConfig, MenuAction, MenuContext, MenuId, PluginError, PluginResult, Position,
};

use crate::backend::Backend;
use crate::dispatcher::ActionDispatcher;
use crate::host::{TriggerListener, TriggerResponse};
use crate::listeners::ListenerRegistry;
use crate::menu::ContextMenu;

/// The menu currently on screen.
struct OpenMenu {
    id: MenuId,
    actions: Vec<MenuAction>,
    context: MenuContext,
}

struct SessionInner {
    backend: Arc<dyn Backend>,
    dispatcher: ActionDispatcher,
    config: ActionConfig,

    /// Cleared when the session is replaced or the menu disabled.
    active: AtomicBool,

    /// Bumped on every trigger; reads that finish under an older
    /// generation are discarded.
    generation: Mutex<u64>,

    open_menu: Mutex<Option<OpenMenu>>,
}

/// Listener handed to the host's trigger source.
#[derive(Clone)]
pub struct TriggerSession {
    inner: Arc<SessionInner>,
}

impl TriggerSession {
    pub fn new(
        backend: Arc<dyn Backend>,
        listeners: Arc<ListenerRegistry>,
        config: ActionConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                dispatcher: ActionDispatcher::new(backend.clone(), listeners),
                backend,
                config,
                active: AtomicBool::new(true),
                generation: Mutex::new(0),
                open_menu: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> ActionConfig {
        self.inner.config
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Stop handling triggers and close any open menu.
    pub fn deactivate(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        self.inner.bump_generation();
        self.inner.close_open_menu();
    }

    /// Id of the menu currently presented by this session.
    pub fn open_menu(&self) -> Option<MenuId> {
        self.inner.open_menu.lock().as_ref().map(|m| m.id)
    }
}

impl SessionInner {
    fn bump_generation(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.active.load(Ordering::SeqCst) && *self.generation.lock() == generation
    }

    fn close_open_menu(&self) {
        let closed = self.open_menu.lock().take();
        if let Some(menu) = closed {
            self.backend.dismiss(menu.id);
        }
    }

    async fn handle_trigger(&self, position: Position) -> TriggerResponse {
        if !self.active.load(Ordering::SeqCst) {
            return TriggerResponse::PassThrough;
        }

        let generation = self.bump_generation();
        self.close_open_menu();

        let selected_text = match self.backend.read_selection().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[{}] Selection unavailable: {}", self.backend.name(), e);
                return TriggerResponse::SuppressDefault;
            }
        };
        let clipboard_text = self.backend.read_clipboard().await;

        if !self.is_current(generation) {
            tracing::debug!("Discarding stale trigger (generation {})", generation);
            return TriggerResponse::SuppressDefault;
        }

        let ctx = MenuContext::new(position, selected_text, clipboard_text);
        let Some(menu) = ContextMenu::build(&self.config, ctx) else {
            tracing::debug!("No applicable actions, menu not shown");
            return TriggerResponse::SuppressDefault;
        };

        if let Err(e) = self.backend.present(&menu) {
            tracing::error!("[{}] Failed to present menu: {}", self.backend.name(), e);
            return TriggerResponse::SuppressDefault;
        }

        let id = menu.id;
        let actions = menu.actions();
        {
            // A newer trigger may have closed menus while this one was shown.
            let mut slot = self.open_menu.lock();
            if self.is_current(generation) {
                tracing::debug!(
                    "Presented {} with {:?} at ({}, {})",
                    id,
                    actions,
                    position.x,
                    position.y
                );
                *slot = Some(OpenMenu {
                    id,
                    actions,
                    context: menu.context,
                });
                return TriggerResponse::SuppressDefault;
            }
        }

        tracing::debug!("Withdrawing {} superseded during presentation", id);
        self.backend.dismiss(id);
        TriggerResponse::SuppressDefault
    }

    async fn handle_select(&self, id: MenuId, action: MenuAction) -> PluginResult<()> {
        let open = {
            let mut slot = self.open_menu.lock();
            match slot.as_ref() {
                Some(menu) if menu.id == id => slot.take(),
                _ => None,
            }
        };
        let Some(open) = open else {
            return Err(PluginError::MenuNotOpen);
        };

        // Dismissed whatever the outcome of the action.
        self.backend.dismiss(id);

        if !open.actions.contains(&action) {
            return Err(PluginError::ActionNotOffered(action));
        }

        self.dispatcher.dispatch(action, &open.context).await?;
        Ok(())
    }

    fn handle_dismiss(&self, id: MenuId) {
        let mut slot = self.open_menu.lock();
        if slot.as_ref().is_some_and(|m| m.id == id) {
            slot.take();
            tracing::debug!("{} dismissed without action", id);
        }
    }
}

impl TriggerListener for TriggerSession {
    fn on_trigger(&self, position: Position) -> BoxFuture<'static, TriggerResponse> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.handle_trigger(position).await })
    }

    fn on_select(&self, menu: MenuId, action: MenuAction) -> BoxFuture<'static, PluginResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.handle_select(menu, action).await })
    }

    fn on_dismiss(&self, menu: MenuId) {
        self.inner.handle_dismiss(menu);
    }
}
