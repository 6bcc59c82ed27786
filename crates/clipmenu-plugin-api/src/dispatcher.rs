//! Action dispatcher.
//!
//! Runs the platform effect of a chosen action, then emits the
//! `clipboardMenuAction` event. The sequence is the same for every backend:
//!
//! | Action     | Effect                                             | Event            |
//! |------------|----------------------------------------------------|------------------|
//! | Copy       | write selection to clipboard                       | `selectedText`   |
//! | Cut        | write selection, then delete it if editable        | `selectedText`   |
//! | Paste      | none; backend supplies the text                    | `text`           |
//! | Select All | select editable content or the document            | no extra fields  |
//!
//! A failed clipboard write or paste read emits nothing: the error is logged
//! and returned to whoever triggered the action. Cut never deletes text that
//! did not reach the clipboard.

use std::sync::Arc;

use clipmenu_core::{ClipboardMenuActionEvent, MenuAction, MenuContext, PluginResult};

use crate::backend::Backend;
use crate::listeners::ListenerRegistry;

/// Executes chosen actions and publishes their events.
pub struct ActionDispatcher {
    backend: Arc<dyn Backend>,
    listeners: Arc<ListenerRegistry>,
}

impl ActionDispatcher {
    pub fn new(backend: Arc<dyn Backend>, listeners: Arc<ListenerRegistry>) -> Self {
        Self { backend, listeners }
    }

    /// Perform `action` against the context its menu was built from.
    ///
    /// Returns the emitted event.
    pub async fn dispatch(
        &self,
        action: MenuAction,
        ctx: &MenuContext,
    ) -> PluginResult<ClipboardMenuActionEvent> {
        let result = self.perform(action, ctx).await;

        match result {
            Ok(event) => {
                self.listeners.emit(&event);
                Ok(event)
            }
            Err(e) => {
                tracing::error!("[{}] {} failed: {}", self.backend.name(), action, e);
                Err(e)
            }
        }
    }

    async fn perform(
        &self,
        action: MenuAction,
        ctx: &MenuContext,
    ) -> PluginResult<ClipboardMenuActionEvent> {
        match action {
            MenuAction::Copy => {
                self.backend.write_clipboard(&ctx.selected_text).await?;
                Ok(ClipboardMenuActionEvent::copy(ctx.selected_text.clone()))
            }
            MenuAction::Cut => {
                self.backend.write_clipboard(&ctx.selected_text).await?;
                if !self.backend.delete_selection().await? {
                    tracing::debug!("Cut outside an editable element, nothing deleted");
                }
                Ok(ClipboardMenuActionEvent::cut(ctx.selected_text.clone()))
            }
            MenuAction::Paste => {
                let text = self
                    .backend
                    .paste_text(ctx.clipboard_text.as_deref())
                    .await?;
                Ok(ClipboardMenuActionEvent::paste(text))
            }
            MenuAction::SelectAll => {
                self.backend.select_all().await?;
                Ok(ClipboardMenuActionEvent::select_all())
            }
        }
    }
}
