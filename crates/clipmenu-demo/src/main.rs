//! clipmenu - headless host for the clipboard context menu.
//!
//! Wires the web backend to an in-memory page and the system clipboard,
//! enables the menu from config.toml, and then drives it from line commands
//! on stdin. Emitted events are printed as JSON.

mod clipboard;
mod commands;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clipmenu_core::{load_config, ClipboardMenuActionEvent, PluginConfig, CLIPBOARD_MENU_ACTION};
use clipmenu_plugin_api::{
    ClipboardHost, ClipboardMenuPlugin, DocumentHost, EchoOptions, MemoryClipboard, MemoryHost,
    SurfaceSlot, WebBackend, WriteOptions,
};

use crate::clipboard::SystemClipboard;
use crate::commands::{Command, HELP};

// =============================================================================
// Setup
// =============================================================================

fn load_or_default() -> PluginConfig {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("config.toml error: {} - continuing with defaults", e);
            PluginConfig::default()
        }
    }
}

fn system_or_memory_clipboard() -> Arc<dyn ClipboardHost> {
    match SystemClipboard::probe() {
        Some(clipboard) => {
            tracing::info!("Using system clipboard");
            Arc::new(clipboard)
        }
        None => {
            tracing::warn!("Falling back to an in-memory clipboard");
            Arc::new(MemoryClipboard::new())
        }
    }
}

/// Page state the commands edit.
struct Demo {
    page: Arc<MemoryHost>,
    page_text: String,
    plugin: ClipboardMenuPlugin,
}

impl Demo {
    fn new() -> Self {
        let page = Arc::new(MemoryHost::new());
        let document: Arc<dyn DocumentHost> = page.clone();
        let backend = WebBackend::new(
            Arc::new(SurfaceSlot::with(document)),
            system_or_memory_clipboard(),
        );
        let plugin = ClipboardMenuPlugin::new(Arc::new(backend));

        let print_event = |event: &ClipboardMenuActionEvent| match serde_json::to_string(event) {
            Ok(json) => println!("event {}", json),
            Err(e) => tracing::error!("Failed to serialize event: {}", e),
        };
        if let Err(e) = plugin.add_listener(CLIPBOARD_MENU_ACTION, Arc::new(print_event)) {
            tracing::error!("Failed to subscribe: {}", e);
        }

        Self {
            page,
            page_text: String::new(),
            plugin,
        }
    }

    fn show_menu(&self) {
        match self.page.visible_menu() {
            Some(menu) => {
                let titles: Vec<&str> = menu.items.iter().map(|item| item.title).collect();
                println!("menu {} [{}]", menu.id, titles.join(", "));
            }
            None => println!("no menu"),
        }
    }

    /// Run one command. Returns false on quit.
    async fn run(&mut self, command: Command) -> bool {
        match command {
            Command::Page(text) => {
                self.page.set_document(text.clone(), "");
                self.page_text = text;
            }
            Command::Select(text) => {
                if !self.page_text.contains(&text) {
                    self.page_text = text.clone();
                }
                self.page.set_document(self.page_text.clone(), text);
            }
            Command::Focus { value, selection } => self.page.focus_editable(value, selection),
            Command::Blur => self.page.blur(),
            Command::Press(position) => {
                self.page.fire(position).await;
                self.show_menu();
            }
            Command::Choose(action) => {
                if let Err(e) = self.page.choose(action).await {
                    println!("error {}", e);
                }
                if let Some(value) = self.page.editable_value() {
                    println!("field {:?}", value);
                }
            }
            Command::Dismiss => self.page.click_away(),
            Command::Enable(options) => report(self.plugin.enable_context_menu(options).await),
            Command::Disable => report(self.plugin.disable_context_menu().await),
            Command::Read => println!("read {:?}", self.plugin.read().await.value),
            Command::Write(text) => report(
                self.plugin
                    .write(WriteOptions { string: Some(text) })
                    .await,
            ),
            Command::Echo(value) => {
                println!("echo {}", self.plugin.echo(EchoOptions { value }).await.value)
            }
            Command::Status => {
                println!(
                    "backend={} enabled={} config={:?} listeners={} default_menus={}",
                    self.plugin.backend_name(),
                    self.plugin.is_enabled(),
                    self.plugin.action_config(),
                    self.plugin.listener_count(),
                    self.page.default_menus_shown()
                );
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
        }
        true
    }
}

fn report(result: clipmenu_core::PluginResult<()>) {
    match result {
        Ok(()) => println!("ok"),
        Err(e) => match serde_json::to_string(&e) {
            Ok(json) => println!("error {}", json),
            Err(_) => println!("error {}", e),
        },
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("clipmenu starting...");

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = load_or_default();
    let mut demo = Demo::new();

    let startup = Command::Enable(Some(config.context_menu));
    rt.block_on(demo.run(startup));
    println!("{}", HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match commands::parse(&line) {
            None => {}
            Some(Err(message)) => println!("{}", message),
            Some(Ok(command)) => {
                if !rt.block_on(demo.run(command)) {
                    break;
                }
            }
        }
        let _ = io::stdout().flush();
    }

    tracing::info!("clipmenu exiting");
}
