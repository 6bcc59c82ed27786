//! Plugin facade.
//!
//! `ClipboardMenuPlugin` is the call surface a bridging layer exposes:
//! `echo`, `enableContextMenu`, `disableContextMenu`, `read`, `write`, and
//! listener subscription. It owns the Disabled/Enabled state and guarantees at
//! most one trigger listener is attached to the host.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use clipmenu_core::{
    ActionConfig, ClipboardMenuActionEvent, ContextMenuOptions, EchoOptions, EchoResult,
    PluginResult, ReadResult, WriteOptions,
};

use crate::backend::Backend;
use crate::host::{TriggerListener, TriggerToken};
use crate::listeners::{EventHandler, ListenerHandle, ListenerRegistry};
use crate::session::TriggerSession;

/// The listener currently attached to the host.
struct ActiveMenu {
    token: TriggerToken,
    session: TriggerSession,
}

/// Context-menu plugin bound to one backend.
pub struct ClipboardMenuPlugin {
    backend: Arc<dyn Backend>,
    listeners: Arc<ListenerRegistry>,

    /// `None` while disabled.
    active: Mutex<Option<ActiveMenu>>,
}

impl ClipboardMenuPlugin {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            listeners: Arc::new(ListenerRegistry::new()),
            active: Mutex::new(None),
        }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Diagnostic passthrough.
    pub async fn echo(&self, options: EchoOptions) -> EchoResult {
        tracing::info!("echo: {}", options.value);
        EchoResult {
            value: options.value,
        }
    }

    /// Enable the context menu with `options`, replacing any active listener.
    ///
    /// Omitted flags default to enabled. The previous configuration is never
    /// merged in.
    pub async fn enable_context_menu(
        &self,
        options: Option<ContextMenuOptions>,
    ) -> PluginResult<()> {
        self.backend.ensure_surface()?;

        let config = ActionConfig::from_options(options.as_ref());
        let session = TriggerSession::new(self.backend.clone(), self.listeners.clone(), config);
        let listener: Arc<dyn TriggerListener> = Arc::new(session.clone());

        // Held across detach and attach so two enables cannot both attach.
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            previous.session.deactivate();
            self.backend.detach(previous.token)?;
        }

        let token = self.backend.attach(listener)?;
        *active = Some(ActiveMenu { token, session });

        tracing::info!("[{}] Context menu enabled: {:?}", self.backend.name(), config);
        Ok(())
    }

    /// Disable the context menu. Calling it while disabled does nothing.
    pub async fn disable_context_menu(&self) -> PluginResult<()> {
        self.backend.ensure_surface()?;

        let mut active = self.active.lock();
        let Some(previous) = active.take() else {
            tracing::debug!("[{}] Context menu already disabled", self.backend.name());
            return Ok(());
        };

        previous.session.deactivate();
        self.backend.detach(previous.token)?;
        tracing::info!("[{}] Context menu disabled", self.backend.name());
        Ok(())
    }

    /// Read the clipboard. Any failure reads as "".
    pub async fn read(&self) -> ReadResult {
        let value = self.backend.read_clipboard().await.unwrap_or_default();
        ReadResult { value }
    }

    /// Write `options.string` to the clipboard. Without a string this does
    /// nothing.
    pub async fn write(&self, options: WriteOptions) -> PluginResult<()> {
        let Some(text) = options.string else {
            tracing::debug!("write called without a string, ignoring");
            return Ok(());
        };

        if let Err(e) = self.backend.write_clipboard(&text).await {
            tracing::error!("[{}] Clipboard write failed: {}", self.backend.name(), e);
            return Err(e.into());
        }
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn is_enabled(&self) -> bool {
        self.active.lock().is_some()
    }

    /// The active flags, `None` while disabled.
    pub fn action_config(&self) -> Option<ActionConfig> {
        self.active.lock().as_ref().map(|a| a.session.config())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Subscribe `handler` to `event_name`. Only `clipboardMenuAction` is
    /// accepted.
    pub fn add_listener(
        &self,
        event_name: &str,
        handler: EventHandler,
    ) -> PluginResult<ListenerHandle> {
        self.listeners.add(event_name, handler)
    }

    pub fn remove_all_listeners(&self) {
        self.listeners.clear();
    }

    /// Stream of emitted events, for bridges that forward them elsewhere.
    pub fn subscribe(&self) -> broadcast::Receiver<ClipboardMenuActionEvent> {
        self.listeners.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }
}

impl Drop for ClipboardMenuPlugin {
    fn drop(&mut self) {
        if let Some(active) = self.active.get_mut().take() {
            active.session.deactivate();
            if let Err(e) = self.backend.detach(active.token) {
                tracing::debug!("Detach on drop skipped: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WebBackend;
    use crate::host::{ClipboardHost, DocumentHost, MockClipboardHost, SurfaceSlot};
    use crate::memory::{MemoryClipboard, MemoryHost};
    use clipmenu_core::{ClipboardError, MenuAction, PluginError, Position, CLIPBOARD_MENU_ACTION};

    fn plugin_with(clipboard: Arc<dyn ClipboardHost>) -> (ClipboardMenuPlugin, Arc<MemoryHost>) {
        let host = Arc::new(MemoryHost::new());
        let document: Arc<dyn DocumentHost> = host.clone();
        let backend = Arc::new(WebBackend::new(Arc::new(SurfaceSlot::with(document)), clipboard));
        (ClipboardMenuPlugin::new(backend), host)
    }

    fn plugin() -> (ClipboardMenuPlugin, Arc<MemoryHost>, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::with_text("clip"));
        let (plugin, host) = plugin_with(clipboard.clone());
        (plugin, host, clipboard)
    }

    #[tokio::test]
    async fn test_echo() {
        let (plugin, _, _) = plugin();
        let result = plugin
            .echo(EchoOptions {
                value: "ping".to_string(),
            })
            .await;
        assert_eq!(result.value, "ping");
    }

    #[tokio::test]
    async fn test_enable_overwrites_previous_config() {
        let (plugin, host, _) = plugin();
        assert!(!plugin.is_enabled());
        assert_eq!(plugin.action_config(), None);

        plugin
            .enable_context_menu(Some(ContextMenuOptions::without(MenuAction::Copy)))
            .await
            .unwrap();
        assert!(!plugin.action_config().unwrap().copy);

        plugin
            .enable_context_menu(Some(ContextMenuOptions {
                enable_paste: Some(false),
                ..Default::default()
            }))
            .await
            .unwrap();
        let config = plugin.action_config().unwrap();
        assert!(config.copy);
        assert!(!config.paste);
        assert_eq!(host.attached_triggers(), 1);
    }

    #[tokio::test]
    async fn test_disable_detaches() {
        let (plugin, host, _) = plugin();
        plugin.enable_context_menu(None).await.unwrap();
        plugin.disable_context_menu().await.unwrap();

        assert!(!plugin.is_enabled());
        assert_eq!(host.attached_triggers(), 0);
        assert_eq!(host.fire(Position::default()).await, Vec::new());
        assert_eq!(host.default_menus_shown(), 1);
    }

    #[tokio::test]
    async fn test_drop_detaches() {
        let (plugin, host, _) = plugin();
        plugin.enable_context_menu(None).await.unwrap();
        drop(plugin);
        assert_eq!(host.attached_triggers(), 0);
    }

    #[tokio::test]
    async fn test_read_is_tolerant() {
        let (plugin, _, clipboard) = plugin();
        assert_eq!(plugin.read().await.value, "clip");

        clipboard.deny_reads(true);
        assert_eq!(plugin.read().await.value, "");
    }

    #[tokio::test]
    async fn test_write() {
        let (plugin, _, clipboard) = plugin();
        plugin
            .write(WriteOptions {
                string: Some("new".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(clipboard.text().as_deref(), Some("new"));

        plugin.write(WriteOptions::default()).await.unwrap();
        assert_eq!(clipboard.text().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_write_failure_surfaces() {
        let mut clipboard = MockClipboardHost::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Err(ClipboardError::Write("denied".to_string())));
        let (plugin, _) = plugin_with(Arc::new(clipboard));

        let err = plugin
            .write(WriteOptions {
                string: Some("x".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ClipboardError");
    }

    #[tokio::test]
    async fn test_listener_management() {
        let (plugin, _, _) = plugin();
        let handle = plugin
            .add_listener(CLIPBOARD_MENU_ACTION, Arc::new(|_: &ClipboardMenuActionEvent| {}))
            .unwrap();
        plugin
            .add_listener(CLIPBOARD_MENU_ACTION, Arc::new(|_: &ClipboardMenuActionEvent| {}))
            .unwrap();
        assert_eq!(plugin.listener_count(), 2);

        assert!(handle.remove());
        plugin.remove_all_listeners();
        assert_eq!(plugin.listener_count(), 0);

        assert!(matches!(
            plugin.add_listener("other", Arc::new(|_: &ClipboardMenuActionEvent| {})),
            Err(PluginError::UnknownEvent(_))
        ));
    }
}
