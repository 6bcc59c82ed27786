//! In-memory hosts.
//!
//! `MemoryHost` models a page with an optional focused text field and
//! implements both [`WebViewHost`] and [`DocumentHost`], so the same page
//! can sit behind either backend. `MemoryClipboard` is a clipboard whose
//! reads and writes can be denied.
//!
//! Used by headless hosts and by the conformance tests.

use std::collections::VecDeque;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use clipmenu_core::{
    ClipboardError, HostError, MenuAction, MenuId, PluginError, PluginResult, Position,
};

use crate::backend::{DELETE_SELECTION_SCRIPT, SELECTION_SCRIPT, SELECT_ALL_SCRIPT};
use crate::host::{
    ClipboardHost, DocumentHost, MenuSurface, TriggerListener, TriggerOptions, TriggerResponse,
    TriggerSource, TriggerToken, WebViewHost,
};
use crate::menu::ContextMenu;
use crate::presentation::PresentationStrategy;

// =============================================================================
// Clipboard
// =============================================================================

/// Clipboard held in memory.
#[derive(Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
    deny_reads: AtomicBool,
    deny_writes: AtomicBool,
    read_delays: Mutex<VecDeque<Duration>>,
}

impl MemoryClipboard {
    /// An empty clipboard; reads fail until something is written.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let clipboard = Self::new();
        clipboard.set_text(text);
        clipboard
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock() = Some(text.into());
    }

    pub fn deny_reads(&self, deny: bool) {
        self.deny_reads.store(deny, Ordering::SeqCst);
    }

    pub fn deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// Delay the next read by `delay`.
    pub fn push_read_delay(&self, delay: Duration) {
        self.read_delays.lock().push_back(delay);
    }
}

#[async_trait]
impl ClipboardHost for MemoryClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let delay = self.read_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.deny_reads.load(Ordering::SeqCst) {
            return Err(ClipboardError::Unavailable("read permission denied".to_string()));
        }
        self.text()
            .ok_or_else(|| ClipboardError::Read("clipboard holds no text".to_string()))
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(ClipboardError::Write("write permission denied".to_string()));
        }
        self.set_text(text);
        Ok(())
    }
}

// =============================================================================
// Page model
// =============================================================================

struct EditableField {
    value: String,
    selection: Range<usize>,
}

impl EditableField {
    fn selected(&self) -> &str {
        self.value.get(self.selection.clone()).unwrap_or("")
    }
}

#[derive(Default)]
struct Page {
    document_text: String,
    document_selection: String,
    editable: Option<EditableField>,
}

#[derive(Default)]
struct MenuLog {
    visible: Option<ContextMenu>,
    presented: Vec<(MenuId, PresentationStrategy)>,
    hidden: Vec<MenuId>,
}

struct AttachedTrigger {
    token: TriggerToken,
    listener: Arc<dyn TriggerListener>,
    options: TriggerOptions,
}

// =============================================================================
// MemoryHost
// =============================================================================

/// A page, its trigger listeners, and its menu overlay, all in memory.
#[derive(Default)]
pub struct MemoryHost {
    page: Mutex<Page>,
    triggers: Mutex<Vec<AttachedTrigger>>,
    next_token: AtomicU64,
    menus: Mutex<MenuLog>,
    script_delays: Mutex<VecDeque<Duration>>,
    fail_scripts: AtomicBool,
    default_menus: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Page state
    // =========================================================================

    /// Replace the page content and selection; removes editable focus.
    pub fn set_document(&self, text: impl Into<String>, selection: impl Into<String>) {
        let mut page = self.page.lock();
        page.document_text = text.into();
        page.document_selection = selection.into();
        page.editable = None;
    }

    /// Focus a text field holding `value` with `selection` selected (byte range).
    pub fn focus_editable(&self, value: impl Into<String>, selection: Range<usize>) {
        let value = value.into();
        let end = selection.end.min(value.len());
        let start = selection.start.min(end);
        self.page.lock().editable = Some(EditableField {
            value,
            selection: start..end,
        });
    }

    pub fn blur(&self) {
        self.page.lock().editable = None;
    }

    /// Value of the focused text field.
    pub fn editable_value(&self) -> Option<String> {
        self.page.lock().editable.as_ref().map(|f| f.value.clone())
    }

    /// Selected range of the focused text field.
    pub fn editable_range(&self) -> Option<Range<usize>> {
        self.page.lock().editable.as_ref().map(|f| f.selection.clone())
    }

    /// Make script evaluation fail.
    pub fn fail_scripts(&self, fail: bool) {
        self.fail_scripts.store(fail, Ordering::SeqCst);
    }

    /// Delay the next script evaluation by `delay`.
    pub fn push_script_delay(&self, delay: Duration) {
        self.script_delays.lock().push_back(delay);
    }

    // =========================================================================
    // Driving triggers and menus
    // =========================================================================

    /// Fire a long-press / `contextmenu` at `position` on every attached
    /// listener. Returns their responses.
    ///
    /// When no listener suppresses it, the platform default menu is counted
    /// as shown.
    pub async fn fire(&self, position: Position) -> Vec<TriggerResponse> {
        let listeners: Vec<Arc<dyn TriggerListener>> = self
            .triggers
            .lock()
            .iter()
            .map(|t| t.listener.clone())
            .collect();

        let mut responses = Vec::with_capacity(listeners.len());
        for listener in listeners {
            responses.push(listener.on_trigger(position).await);
        }

        if !responses.contains(&TriggerResponse::SuppressDefault) {
            self.default_menus.fetch_add(1, Ordering::SeqCst);
        }
        responses
    }

    /// Pick `action` on the visible menu.
    pub async fn choose(&self, action: MenuAction) -> PluginResult<()> {
        let menu = self.visible_menu().ok_or(PluginError::MenuNotOpen)?;
        let listener = self.first_listener().ok_or(PluginError::MenuNotOpen)?;
        listener.on_select(menu.id, action).await
    }

    /// Close the visible menu without choosing.
    pub fn click_away(&self) {
        let closed = self.menus.lock().visible.take();
        if let (Some(menu), Some(listener)) = (closed, self.first_listener()) {
            listener.on_dismiss(menu.id);
        }
    }

    fn first_listener(&self) -> Option<Arc<dyn TriggerListener>> {
        self.triggers.lock().first().map(|t| t.listener.clone())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn attached_triggers(&self) -> usize {
        self.triggers.lock().len()
    }

    /// Options of the first attached listener.
    pub fn trigger_options(&self) -> Option<TriggerOptions> {
        self.triggers.lock().first().map(|t| t.options)
    }

    pub fn visible_menu(&self) -> Option<ContextMenu> {
        self.menus.lock().visible.clone()
    }

    /// Number of menus presented so far.
    pub fn presented(&self) -> usize {
        self.menus.lock().presented.len()
    }

    /// Strategies used for each presentation, in order.
    pub fn presentations(&self) -> Vec<PresentationStrategy> {
        self.menus.lock().presented.iter().map(|(_, s)| *s).collect()
    }

    pub fn hidden_menus(&self) -> Vec<MenuId> {
        self.menus.lock().hidden.clone()
    }

    /// Number of triggers that fell through to the platform default menu.
    pub fn default_menus_shown(&self) -> usize {
        self.default_menus.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Page operations shared by both surfaces
    // =========================================================================

    fn selected_text(&self) -> String {
        let page = self.page.lock();
        match page.editable.as_ref().map(EditableField::selected) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => page.document_selection.clone(),
        }
    }

    fn delete_in_editable(&self) -> bool {
        let mut page = self.page.lock();
        let Some(field) = page.editable.as_mut() else {
            return false;
        };
        let range = field.selection.clone();
        if field.value.get(range.clone()).is_some() {
            field.value.replace_range(range.clone(), "");
        }
        field.selection = range.start..range.start;
        true
    }

    fn select_in_editable(&self) -> bool {
        let mut page = self.page.lock();
        let Some(field) = page.editable.as_mut() else {
            return false;
        };
        field.selection = 0..field.value.len();
        true
    }

    fn select_document(&self) {
        let mut page = self.page.lock();
        page.document_selection = page.document_text.clone();
    }
}

impl TriggerSource for MemoryHost {
    fn attach_trigger(
        &self,
        listener: Arc<dyn TriggerListener>,
        options: TriggerOptions,
    ) -> Result<TriggerToken, HostError> {
        let token = TriggerToken(self.next_token.fetch_add(1, Ordering::SeqCst));
        self.triggers.lock().push(AttachedTrigger {
            token,
            listener,
            options,
        });
        Ok(token)
    }

    fn detach_trigger(&self, token: TriggerToken) {
        self.triggers.lock().retain(|t| t.token != token);
    }
}

impl MenuSurface for MemoryHost {
    fn show_menu(
        &self,
        menu: &ContextMenu,
        strategy: PresentationStrategy,
    ) -> Result<(), HostError> {
        let mut menus = self.menus.lock();
        menus.visible = Some(menu.clone());
        menus.presented.push((menu.id, strategy));
        Ok(())
    }

    fn hide_menu(&self, menu: MenuId) {
        let mut menus = self.menus.lock();
        if menus.visible.as_ref().is_some_and(|m| m.id == menu) {
            menus.visible = None;
        }
        menus.hidden.push(menu);
    }
}

#[async_trait]
impl WebViewHost for MemoryHost {
    async fn evaluate_script(&self, script: &str) -> Result<Value, HostError> {
        let delay = self.script_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_scripts.load(Ordering::SeqCst) {
            return Err(HostError::ScriptEvaluation("web content unavailable".to_string()));
        }

        match script {
            SELECTION_SCRIPT => Ok(Value::String(self.selected_text())),
            DELETE_SELECTION_SCRIPT => Ok(Value::Bool(self.delete_in_editable())),
            SELECT_ALL_SCRIPT => {
                if self.select_in_editable() {
                    Ok(Value::Bool(true))
                } else {
                    self.select_document();
                    Ok(Value::Bool(false))
                }
            }
            _ => Err(HostError::ScriptEvaluation("unsupported script".to_string())),
        }
    }
}

impl DocumentHost for MemoryHost {
    fn editable_selection(&self) -> Option<String> {
        self.page
            .lock()
            .editable
            .as_ref()
            .map(|f| f.selected().to_string())
    }

    fn document_selection(&self) -> String {
        self.page.lock().document_selection.clone()
    }

    fn delete_editable_selection(&self) -> bool {
        self.delete_in_editable()
    }

    fn select_all_editable(&self) -> bool {
        self.select_in_editable()
    }

    fn select_all_document(&self) {
        self.select_document();
    }
}
