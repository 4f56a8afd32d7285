//! Clipboard access and change monitoring
//!
//! The engine never touches the OS clipboard. A [`ClipboardSource`] reads and
//! writes plain text, and [`ClipboardMonitor`] polls it and hands new text to
//! the engine.

use async_trait::async_trait;
use thiserror::Error;

pub mod monitor;
pub mod system;

pub use monitor::ClipboardMonitor;
pub use system::SystemClipboard;

/// Default polling interval for the monitor in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Plain-text clipboard access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    /// Current clipboard text, `None` when the clipboard holds no text
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Provider name
    fn name(&self) -> &'static str;
}

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Platform-specific error
    #[error("Platform error: {0}")]
    Platform(String),

    /// No clipboard is reachable (e.g. no display server)
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}
