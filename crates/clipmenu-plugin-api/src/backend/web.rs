//! Web backend: browser `contextmenu` on the document.

use std::sync::Arc;

use async_trait::async_trait;

use clipmenu_core::{MenuId, PluginError, PluginResult};

use super::Backend;
use crate::host::{
    ClipboardHost, DocumentHost, SurfaceSlot, TriggerListener, TriggerOptions, TriggerToken,
};
use crate::menu::ContextMenu;
use crate::presentation::PresentationStrategy;

const SURFACE: &str = "Document";

/// Backend for a plain browser document.
///
/// Paste re-reads the clipboard at click time, so the event carries what is
/// on the clipboard when the user chooses, not when the menu opened.
pub struct WebBackend {
    document: Arc<SurfaceSlot<dyn DocumentHost>>,
    clipboard: Arc<dyn ClipboardHost>,
}

impl WebBackend {
    pub fn new(
        document: Arc<SurfaceSlot<dyn DocumentHost>>,
        clipboard: Arc<dyn ClipboardHost>,
    ) -> Self {
        Self { document, clipboard }
    }

    fn document(&self) -> PluginResult<Arc<dyn DocumentHost>> {
        self.document
            .get()
            .ok_or(PluginError::NoHostSurface { surface: SURFACE })
    }
}

#[async_trait]
impl Backend for WebBackend {
    fn name(&self) -> &'static str {
        "web"
    }

    fn ensure_surface(&self) -> PluginResult<()> {
        self.document().map(|_| ())
    }

    fn attach(&self, listener: Arc<dyn TriggerListener>) -> PluginResult<TriggerToken> {
        let token = self
            .document()?
            .attach_trigger(listener, TriggerOptions::default())?;
        tracing::debug!("contextmenu listener attached ({:?})", token);
        Ok(token)
    }

    fn detach(&self, token: TriggerToken) -> PluginResult<()> {
        self.document()?.detach_trigger(token);
        tracing::debug!("contextmenu listener detached ({:?})", token);
        Ok(())
    }

    fn clipboard(&self) -> &Arc<dyn ClipboardHost> {
        &self.clipboard
    }

    async fn read_selection(&self) -> PluginResult<String> {
        let document = self.document()?;
        match document.editable_selection() {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Ok(document.document_selection()),
        }
    }

    async fn delete_selection(&self) -> PluginResult<bool> {
        Ok(self.document()?.delete_editable_selection())
    }

    async fn select_all(&self) -> PluginResult<()> {
        let document = self.document()?;
        if !document.select_all_editable() {
            document.select_all_document();
        }
        Ok(())
    }

    async fn paste_text(&self, _snapshot: Option<&str>) -> PluginResult<String> {
        Ok(self.clipboard.read_text().await?)
    }

    fn present(&self, menu: &ContextMenu) -> PluginResult<()> {
        self.document()?
            .show_menu(menu, PresentationStrategy::DomOverlay)?;
        Ok(())
    }

    fn dismiss(&self, menu: MenuId) {
        if let Some(document) = self.document.get() {
            document.hide_menu(menu);
        }
    }
}
