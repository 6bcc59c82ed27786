//! Conformance suite.
//!
//! Every property here runs against both backends through the in-memory
//! hosts. A backend that passes emits the same menus and events as the
//! other for the same page and clipboard state.

use std::sync::Arc;

use parking_lot::Mutex;

use clipmenu_plugin_api::{
    ClipboardHost, ClipboardMenuActionEvent, ClipboardMenuPlugin, ContextMenuOptions,
    DocumentHost, MemoryClipboard, MemoryHost, MenuAction, NativeBackend, PlatformVersion,
    PluginError, Position, PresentationStrategy, SurfaceSlot, TriggerResponse, WebBackend,
    WebViewHost, CLIPBOARD_MENU_ACTION,
};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Native,
    Web,
}

const KINDS: [Kind; 2] = [Kind::Native, Kind::Web];

struct Harness {
    kind: Kind,
    host: Arc<MemoryHost>,
    clipboard: Arc<MemoryClipboard>,
    plugin: ClipboardMenuPlugin,
    events: Arc<Mutex<Vec<ClipboardMenuActionEvent>>>,
}

impl Harness {
    fn new(kind: Kind) -> Self {
        let host = Arc::new(MemoryHost::new());
        let clipboard = Arc::new(MemoryClipboard::new());
        let clipboard_host: Arc<dyn ClipboardHost> = clipboard.clone();

        let plugin = match kind {
            Kind::Native => {
                let webview: Arc<dyn WebViewHost> = host.clone();
                ClipboardMenuPlugin::new(Arc::new(NativeBackend::new(
                    Arc::new(SurfaceSlot::with(webview)),
                    clipboard_host,
                    PlatformVersion::new(17, 0),
                )))
            }
            Kind::Web => {
                let document: Arc<dyn DocumentHost> = host.clone();
                ClipboardMenuPlugin::new(Arc::new(WebBackend::new(
                    Arc::new(SurfaceSlot::with(document)),
                    clipboard_host,
                )))
            }
        };

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        plugin
            .add_listener(
                CLIPBOARD_MENU_ACTION,
                Arc::new(move |e: &ClipboardMenuActionEvent| sink.lock().push(e.clone())),
            )
            .unwrap();

        Self {
            kind,
            host,
            clipboard,
            plugin,
            events,
        }
    }

    async fn menu_after_trigger(&self) -> Option<Vec<MenuAction>> {
        self.host.fire(Position::new(10.0, 20.0)).await;
        self.host.visible_menu().map(|m| m.actions())
    }

    fn events(&self) -> Vec<ClipboardMenuActionEvent> {
        self.events.lock().clone()
    }
}

fn no_surface_plugin(kind: Kind) -> ClipboardMenuPlugin {
    let clipboard: Arc<dyn ClipboardHost> = Arc::new(MemoryClipboard::new());
    match kind {
        Kind::Native => ClipboardMenuPlugin::new(Arc::new(NativeBackend::new(
            Arc::new(SurfaceSlot::empty()),
            clipboard,
            PlatformVersion::new(17, 0),
        ))),
        Kind::Web => ClipboardMenuPlugin::new(Arc::new(WebBackend::new(
            Arc::new(SurfaceSlot::empty()),
            clipboard,
        ))),
    }
}

#[tokio::test]
async fn omitted_flags_default_to_enabled() {
    for kind in KINDS {
        let h = Harness::new(kind);

        h.plugin.enable_context_menu(None).await.unwrap();
        let config = h.plugin.action_config().unwrap();
        assert!(config.copy && config.paste && config.cut && config.select_all);

        h.plugin
            .enable_context_menu(Some(ContextMenuOptions {
                enable_copy: Some(false),
                ..Default::default()
            }))
            .await
            .unwrap();
        let config = h.plugin.action_config().unwrap();
        assert!(!config.copy, "{:?}", kind);
        assert!(config.paste && config.cut && config.select_all, "{:?}", kind);
    }
}

#[tokio::test]
async fn disable_twice_is_a_no_op() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.plugin.enable_context_menu(None).await.unwrap();

        h.plugin.disable_context_menu().await.unwrap();
        let attached = h.host.attached_triggers();
        h.plugin.disable_context_menu().await.unwrap();

        assert!(!h.plugin.is_enabled());
        assert_eq!(h.host.attached_triggers(), attached);
        assert_eq!(attached, 0);
    }
}

#[tokio::test]
async fn empty_selection_offers_paste_and_select_all() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("page text", "");
        h.clipboard.set_text("xyz");
        h.plugin.enable_context_menu(None).await.unwrap();

        assert_eq!(
            h.menu_after_trigger().await,
            Some(vec![MenuAction::Paste, MenuAction::SelectAll]),
            "{:?}",
            kind
        );
    }
}

#[tokio::test]
async fn menu_order_follows_flags() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("hello there", "hello");
        h.clipboard.set_text("xyz");
        h.plugin
            .enable_context_menu(Some(ContextMenuOptions {
                enable_copy: Some(false),
                enable_paste: Some(true),
                enable_cut: Some(true),
                enable_select_all: Some(false),
            }))
            .await
            .unwrap();

        assert_eq!(
            h.menu_after_trigger().await,
            Some(vec![MenuAction::Cut, MenuAction::Paste]),
            "{:?}",
            kind
        );
    }
}

#[tokio::test]
async fn unreadable_clipboard_hides_paste() {
    for kind in KINDS {
        for deny in [true, false] {
            let h = Harness::new(kind);
            h.host.set_document("hello", "hello");
            if deny {
                h.clipboard.set_text("xyz");
                h.clipboard.deny_reads(true);
            }
            // Otherwise the clipboard is empty and the read fails.
            h.plugin.enable_context_menu(None).await.unwrap();

            let actions = h.menu_after_trigger().await.unwrap();
            assert!(!actions.contains(&MenuAction::Paste), "{:?}", kind);
            assert_eq!(
                actions,
                vec![MenuAction::Copy, MenuAction::Cut, MenuAction::SelectAll]
            );
        }
    }
}

#[tokio::test]
async fn copy_end_to_end() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("abc def", "abc");
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::new(1.0, 1.0)).await;
        h.host.choose(MenuAction::Copy).await.unwrap();

        assert_eq!(h.events(), vec![ClipboardMenuActionEvent::copy("abc")]);
        assert_eq!(
            serde_json::to_value(&h.events()[0]).unwrap(),
            serde_json::json!({ "action": "copy", "selectedText": "abc" })
        );
        assert_eq!(h.clipboard.text().as_deref(), Some("abc"), "{:?}", kind);
        assert!(h.host.visible_menu().is_none());
    }
}

#[tokio::test]
async fn paste_end_to_end() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("page", "");
        h.clipboard.set_text("xyz");
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::default()).await;
        h.host.choose(MenuAction::Paste).await.unwrap();

        assert_eq!(
            serde_json::to_value(h.events()).unwrap(),
            serde_json::json!([{ "action": "paste", "text": "xyz" }]),
            "{:?}",
            kind
        );
    }
}

#[tokio::test]
async fn cut_deletes_from_focused_field() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.focus_editable("hello world", 0..6);
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::default()).await;
        h.host.choose(MenuAction::Cut).await.unwrap();

        assert_eq!(h.events(), vec![ClipboardMenuActionEvent::cut("hello ")]);
        assert_eq!(h.host.editable_value().as_deref(), Some("world"), "{:?}", kind);
        assert_eq!(h.clipboard.text().as_deref(), Some("hello "));
    }
}

#[tokio::test]
async fn select_all_selects_document() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("the whole page", "");
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::default()).await;
        h.host.choose(MenuAction::SelectAll).await.unwrap();

        assert_eq!(h.events(), vec![ClipboardMenuActionEvent::select_all()]);
        assert_eq!(
            serde_json::to_value(&h.events()[0]).unwrap(),
            serde_json::json!({ "action": "selectAll" })
        );

        // The page selection now covers everything.
        h.host.fire(Position::default()).await;
        h.host.choose(MenuAction::Copy).await.unwrap();
        assert_eq!(h.clipboard.text().as_deref(), Some("the whole page"), "{:?}", kind);
    }
}

#[tokio::test]
async fn select_all_selects_focused_field() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("page text", "");
        h.host.focus_editable("hello world", 2..2);
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::default()).await;
        h.host.choose(MenuAction::SelectAll).await.unwrap();

        assert_eq!(h.events(), vec![ClipboardMenuActionEvent::select_all()]);
        assert_eq!(h.host.editable_range(), Some(0..11), "{:?}", kind);
        assert_eq!(h.host.document_selection(), "", "{:?}", kind);
    }
}

#[tokio::test]
async fn presentation_strategy_reaches_host() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.plugin.enable_context_menu(None).await.unwrap();
        h.host.fire(Position::default()).await;

        let expected = match kind {
            Kind::Native => PresentationStrategy::EditMenuInteraction,
            Kind::Web => PresentationStrategy::DomOverlay,
        };
        assert_eq!(h.host.presentations(), vec![expected]);
    }
}

#[tokio::test]
async fn native_script_failure_after_trigger_still_emits() {
    let h = Harness::new(Kind::Native);
    h.host.set_document("hello world", "hello");
    h.plugin.enable_context_menu(None).await.unwrap();

    h.host.fire(Position::default()).await;
    h.host.fail_scripts(true);
    h.host.choose(MenuAction::Cut).await.unwrap();

    assert_eq!(h.events(), vec![ClipboardMenuActionEvent::cut("hello")]);
    assert_eq!(h.clipboard.text().as_deref(), Some("hello"));
    assert!(h.host.visible_menu().is_none());

    // With scripts still failing the selection reads as empty.
    h.host.fire(Position::default()).await;
    h.host.choose(MenuAction::SelectAll).await.unwrap();
    assert_eq!(
        h.events(),
        vec![
            ClipboardMenuActionEvent::cut("hello"),
            ClipboardMenuActionEvent::select_all()
        ]
    );
}

#[tokio::test]
async fn failed_copy_emits_nothing_and_dismisses() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("abc", "abc");
        h.clipboard.deny_writes(true);
        h.plugin.enable_context_menu(None).await.unwrap();

        h.host.fire(Position::default()).await;
        let err = h.host.choose(MenuAction::Copy).await.unwrap_err();

        assert!(matches!(err, PluginError::Clipboard(_)), "{:?}", kind);
        assert!(h.events().is_empty());
        assert!(h.host.visible_menu().is_none());
    }
}

#[tokio::test]
async fn re_enable_keeps_one_listener() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.host.set_document("hello", "hello");
        h.plugin.enable_context_menu(None).await.unwrap();
        h.plugin
            .enable_context_menu(Some(ContextMenuOptions::without(MenuAction::Cut)))
            .await
            .unwrap();
        assert_eq!(h.host.attached_triggers(), 1);

        h.host.fire(Position::default()).await;
        assert_eq!(h.host.presented(), 1, "{:?}", kind);
        h.host.click_away();
        h.host.fire(Position::default()).await;
        assert_eq!(h.host.presented(), 2, "{:?}", kind);

        let actions = h.host.visible_menu().unwrap().actions();
        assert!(!actions.contains(&MenuAction::Cut));
    }
}

#[tokio::test]
async fn active_listener_suppresses_default_menu() {
    for kind in KINDS {
        let h = Harness::new(kind);
        h.plugin.enable_context_menu(None).await.unwrap();

        let responses = h.host.fire(Position::default()).await;
        assert_eq!(responses, vec![TriggerResponse::SuppressDefault]);
        assert_eq!(h.host.default_menus_shown(), 0);

        h.plugin.disable_context_menu().await.unwrap();
        h.host.fire(Position::default()).await;
        assert_eq!(h.host.default_menus_shown(), 1, "{:?}", kind);
    }
}

#[tokio::test]
async fn missing_surface_rejects_enable_and_disable() {
    for kind in KINDS {
        let plugin = no_surface_plugin(kind);

        let err = plugin.enable_context_menu(None).await.unwrap_err();
        assert!(matches!(err, PluginError::NoHostSurface { .. }), "{:?}", kind);
        let err = plugin.disable_context_menu().await.unwrap_err();
        assert!(matches!(err, PluginError::NoHostSurface { .. }), "{:?}", kind);
        assert!(!plugin.is_enabled());
    }
}

#[tokio::test]
async fn native_long_press_uses_configured_duration() {
    let h = Harness::new(Kind::Native);
    h.plugin.enable_context_menu(None).await.unwrap();
    let options = h.host.trigger_options().unwrap();
    assert_eq!(options.min_press_duration.as_millis(), 500);
    assert!(matches!(h.kind, Kind::Native));
}
