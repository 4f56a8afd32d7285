//! Durable key-value storage for the four persisted collections
//!
//! Each collection is written as one JSON array under a stable key. The
//! [`KeyValueStore`] trait keeps the engine independent of where those blobs
//! live; [`SqliteStore`] is the on-disk backend and [`MemoryStore`] serves
//! tests and throwaway sessions.

pub mod codec;
pub mod memory;
pub mod sqlite;

use std::fmt;

use thiserror::Error;

pub use codec::{decode, encode, load_collection, save_collection};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON encode/decode error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error preparing the storage location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the write
    #[error("Write rejected for key {0}")]
    WriteRejected(String),

    /// Shared state behind the store was poisoned
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Names of the persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKey {
    History,
    Favorites,
    Categories,
    Folders,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::History,
        CollectionKey::Favorites,
        CollectionKey::Categories,
        CollectionKey::Folders,
    ];

    /// Store key. These strings must never change between releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::History => "ClipboardHistory",
            CollectionKey::Favorites => "ClipboardFavorites",
            CollectionKey::Categories => "ClipboardCategories",
            CollectionKey::Folders => "FavoriteFolders",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte-blob store addressed by string keys
pub trait KeyValueStore: Send {
    /// Read the blob stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Backend name for diagnostics
    fn name(&self) -> &str;
}
