//! # ClipStash
//!
//! Clipboard history and snippet organizer.
//!
//! The [`engine::ClipboardDataManager`] owns four collections (history,
//! favorite snippets, categories and snippet folders), keeps them
//! consistent, and writes every change through to a
//! [`storage::KeyValueStore`]. The [`clipboard`] module feeds it text from
//! the system clipboard.

pub mod bootstrap;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod model;
pub mod storage;

pub use config::Config;
pub use engine::{ClipboardDataManager, EngineOptions, SharedDataManager};

/// Result type alias for ClipStash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ClipStash operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Clipboard operation error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] clipboard::ClipboardError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
