//! System clipboard through `arboard`

use async_trait::async_trait;
use tracing::debug;

use super::{ClipboardError, ClipboardSource};

/// OS clipboard provider.
///
/// A fresh `arboard::Clipboard` handle is opened per call so the provider
/// stays `Send + Sync` on every platform.
pub struct SystemClipboard {
    _private: (),
}

impl SystemClipboard {
    /// Probe the platform clipboard once and fail early if it is unreachable
    pub fn new() -> Result<Self, ClipboardError> {
        open()?;
        Ok(Self { _private: () })
    }
}

fn open() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

#[async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let mut clipboard = open()?;
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => {
                debug!("Clipboard holds no text");
                Ok(None)
            }
            Err(e) => Err(ClipboardError::Platform(e.to_string())),
        }
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = open()?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Platform(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
