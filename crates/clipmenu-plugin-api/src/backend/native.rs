//! Native backend: long-press on an embedded web view.
//!
//! The selection lives inside the web content, so it is read by evaluating
//! [`SELECTION_SCRIPT`] and awaiting the result before the menu is built.
//! Paste does not insert anything itself; it reports the clipboard text
//! captured when the menu was built and lets the host app decide.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use clipmenu_core::{MenuId, PluginConfig, PluginError, PluginResult};

use super::Backend;
use crate::host::{
    ClipboardHost, SurfaceSlot, TriggerListener, TriggerOptions, TriggerToken, WebViewHost,
};
use crate::menu::ContextMenu;
use crate::presentation::{select_native_strategy, PlatformVersion, PresentationStrategy};

/// Returns the selected text, preferring a focused input or textarea.
pub const SELECTION_SCRIPT: &str = r#"(function () {
  var el = document.activeElement;
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') && typeof el.selectionStart === 'number') {
    var text = el.value.substring(el.selectionStart, el.selectionEnd);
    if (text) return text;
  }
  var sel = window.getSelection();
  return sel ? sel.toString() : '';
})();"#;

/// Deletes the selection inside the focused editable element.
/// Evaluates to true when something editable was focused.
pub const DELETE_SELECTION_SCRIPT: &str = r#"(function () {
  var el = document.activeElement;
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') && typeof el.selectionStart === 'number') {
    el.setRangeText('', el.selectionStart, el.selectionEnd, 'start');
    el.dispatchEvent(new Event('input', { bubbles: true }));
    return true;
  }
  if (el && el.isContentEditable) {
    return document.execCommand('delete');
  }
  return false;
})();"#;

/// Selects the focused editable element's content, else the whole page.
pub const SELECT_ALL_SCRIPT: &str = r#"(function () {
  var el = document.activeElement;
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') && typeof el.select === 'function') {
    el.select();
    return true;
  }
  document.execCommand('selectAll');
  return false;
})();"#;

const SURFACE: &str = "WebView";

/// Backend for an embedded web view driven by native gestures.
pub struct NativeBackend {
    webview: Arc<SurfaceSlot<dyn WebViewHost>>,
    clipboard: Arc<dyn ClipboardHost>,
    strategy: PresentationStrategy,
    trigger_options: TriggerOptions,
}

impl NativeBackend {
    /// Create a backend for `platform` with default settings.
    pub fn new(
        webview: Arc<SurfaceSlot<dyn WebViewHost>>,
        clipboard: Arc<dyn ClipboardHost>,
        platform: PlatformVersion,
    ) -> Self {
        Self::with_config(webview, clipboard, platform, &PluginConfig::default())
    }

    /// Create a backend using file configuration for gesture timing and
    /// presentation preference.
    pub fn with_config(
        webview: Arc<SurfaceSlot<dyn WebViewHost>>,
        clipboard: Arc<dyn ClipboardHost>,
        platform: PlatformVersion,
        config: &PluginConfig,
    ) -> Self {
        let preferred = config
            .presentation
            .preferred
            .as_deref()
            .and_then(PresentationStrategy::from_name);
        let strategy = select_native_strategy(platform, preferred);
        tracing::debug!(
            "Native presentation: {} (platform {}.{})",
            strategy.name(),
            platform.major,
            platform.minor
        );

        Self {
            webview,
            clipboard,
            strategy,
            trigger_options: TriggerOptions {
                min_press_duration: Duration::from_millis(config.long_press.min_duration_ms),
            },
        }
    }

    /// The presentation strategy chosen at construction.
    pub fn strategy(&self) -> PresentationStrategy {
        self.strategy
    }

    fn webview(&self) -> PluginResult<Arc<dyn WebViewHost>> {
        self.webview
            .get()
            .ok_or(PluginError::NoHostSurface { surface: SURFACE })
    }

    async fn evaluate(&self, script: &str) -> PluginResult<Value> {
        let webview = self.webview()?;
        Ok(webview.evaluate_script(script).await?)
    }
}

#[async_trait]
impl Backend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn ensure_surface(&self) -> PluginResult<()> {
        self.webview().map(|_| ())
    }

    fn attach(&self, listener: Arc<dyn TriggerListener>) -> PluginResult<TriggerToken> {
        let token = self
            .webview()?
            .attach_trigger(listener, self.trigger_options)?;
        tracing::debug!(
            "Long-press recognizer attached ({:?}, min {:?})",
            token,
            self.trigger_options.min_press_duration
        );
        Ok(token)
    }

    fn detach(&self, token: TriggerToken) -> PluginResult<()> {
        self.webview()?.detach_trigger(token);
        tracing::debug!("Long-press recognizer detached ({:?})", token);
        Ok(())
    }

    fn clipboard(&self) -> &Arc<dyn ClipboardHost> {
        &self.clipboard
    }

    async fn read_selection(&self) -> PluginResult<String> {
        match self.evaluate(SELECTION_SCRIPT).await {
            Ok(Value::String(text)) => Ok(text),
            Ok(Value::Null) => Ok(String::new()),
            Ok(other) => {
                tracing::warn!("Selection script returned non-string: {}", other);
                Ok(String::new())
            }
            Err(e @ PluginError::NoHostSurface { .. }) => Err(e),
            Err(e) => {
                tracing::warn!("Selection script failed, assuming no selection: {}", e);
                Ok(String::new())
            }
        }
    }

    async fn delete_selection(&self) -> PluginResult<bool> {
        match self.evaluate(DELETE_SELECTION_SCRIPT).await {
            Ok(result) => Ok(result.as_bool().unwrap_or(false)),
            Err(e @ PluginError::NoHostSurface { .. }) => Err(e),
            Err(e) => {
                tracing::warn!("Delete script failed, nothing deleted: {}", e);
                Ok(false)
            }
        }
    }

    async fn select_all(&self) -> PluginResult<()> {
        match self.evaluate(SELECT_ALL_SCRIPT).await {
            Ok(_) => Ok(()),
            Err(e @ PluginError::NoHostSurface { .. }) => Err(e),
            Err(e) => {
                tracing::warn!("Select-all script failed: {}", e);
                Ok(())
            }
        }
    }

    async fn paste_text(&self, snapshot: Option<&str>) -> PluginResult<String> {
        match snapshot {
            Some(text) => Ok(text.to_string()),
            None => Ok(self.clipboard.read_text().await?),
        }
    }

    fn present(&self, menu: &ContextMenu) -> PluginResult<()> {
        self.webview()?.show_menu(menu, self.strategy)?;
        Ok(())
    }

    fn dismiss(&self, menu: MenuId) {
        if let Some(webview) = self.webview.get() {
            webview.hide_menu(menu);
        }
    }
}
