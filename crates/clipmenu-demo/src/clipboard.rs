//! System clipboard host.
//!
//! Uses arboard for cross-platform clipboard access. A handle is opened per
//! call so nothing platform-specific is held between calls.

use arboard::Clipboard;
use async_trait::async_trait;

use clipmenu_core::ClipboardError;
use clipmenu_plugin_api::ClipboardHost;

/// The real system clipboard.
pub struct SystemClipboard;

impl SystemClipboard {
    /// Returns `None` when no clipboard can be opened (e.g. no display).
    pub fn probe() -> Option<Self> {
        match Clipboard::new() {
            Ok(_) => Some(Self),
            Err(e) => {
                tracing::warn!("System clipboard unavailable: {}", e);
                None
            }
        }
    }

    fn open() -> Result<Clipboard, ClipboardError> {
        Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ClipboardHost for SystemClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let text = Self::open()?
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))?;
        tracing::debug!("Read {} bytes from clipboard", text.len());
        Ok(text)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        Self::open()?
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        tracing::debug!("Wrote {} bytes to clipboard", text.len());
        Ok(())
    }
}
