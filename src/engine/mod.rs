//! Clipboard data engine
//!
//! [`ClipboardDataManager`] owns the four ordered collections (history,
//! favorites, categories and folders) and every operation that mutates them.
//! Mutations are write-through: the affected collections are re-encoded and
//! written to the [`KeyValueStore`] before the call returns, after which a
//! [`DataChanged`] event is published.
//!
//! Invalid requests (blank text, duplicate content, unknown ids, deleting a
//! protected record) are silent no-ops reported through the return value.
//! A failed store write is logged and remembered; memory stays authoritative
//! and [`ClipboardDataManager::flush`] retries the write.

mod categories;
mod favorites;
mod history;
pub mod notify;
mod query;

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::model::{Category, ClipboardItem, FavoriteFolder};
use crate::storage::{load_collection, save_collection, CollectionKey, KeyValueStore, StorageError};

pub use notify::{ChangeNotifier, DataChanged};
pub use query::FolderFilter;

/// Default number of history items kept
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Engine shared between tasks; every call runs under the one lock
pub type SharedDataManager = Arc<Mutex<ClipboardDataManager>>;

/// Tunables for [`ClipboardDataManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// History is truncated to this many items after each insert
    pub max_history: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY_ITEMS,
        }
    }
}

/// Owner of clipboard history, snippets, categories and folders
pub struct ClipboardDataManager {
    store: Box<dyn KeyValueStore>,
    options: EngineOptions,
    history_items: Vec<ClipboardItem>,
    favorite_items: Vec<ClipboardItem>,
    categories: Vec<Category>,
    favorite_folders: Vec<FavoriteFolder>,
    pending_writes: BTreeSet<CollectionKey>,
    notifier: ChangeNotifier,
}

impl ClipboardDataManager {
    /// Load state from `store` and run the startup repairs.
    ///
    /// Never fails: unreadable collections start empty.
    pub fn open(store: impl KeyValueStore + 'static, options: EngineOptions) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);

        let history_items = load_collection(store.as_ref(), CollectionKey::History);
        let favorite_items = load_collection(store.as_ref(), CollectionKey::Favorites);
        let categories = load_collection(store.as_ref(), CollectionKey::Categories);
        let favorite_folders = load_collection(store.as_ref(), CollectionKey::Folders);

        let mut manager = Self {
            store,
            options,
            history_items,
            favorite_items,
            categories,
            favorite_folders,
            pending_writes: BTreeSet::new(),
            notifier: ChangeNotifier::new(),
        };

        manager.seed_categories();
        manager.remove_legacy_default_folders();
        manager.fix_orphaned_snippets();

        info!(
            "Loaded {} history items, {} snippets, {} categories, {} folders",
            manager.history_items.len(),
            manager.favorite_items.len(),
            manager.categories.len(),
            manager.favorite_folders.len()
        );

        manager
    }

    /// Wrap the engine for use from several tasks
    pub fn into_shared(self) -> SharedDataManager {
        Arc::new(Mutex::new(self))
    }

    pub fn history_items(&self) -> &[ClipboardItem] {
        &self.history_items
    }

    pub fn favorite_items(&self) -> &[ClipboardItem] {
        &self.favorite_items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn favorite_folders(&self) -> &[FavoriteFolder] {
        &self.favorite_folders
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Receive a [`DataChanged`] event after every applied mutation
    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.notifier.subscribe()
    }

    /// Number of mutations applied since the engine was opened
    pub fn revision(&self) -> u64 {
        self.notifier.revision()
    }

    /// True while some collection has changes the store has not accepted
    pub fn has_pending_writes(&self) -> bool {
        !self.pending_writes.is_empty()
    }

    /// Retry every write that previously failed.
    ///
    /// Returns the first error encountered; collections that still fail stay
    /// pending.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        let pending: Vec<CollectionKey> = self.pending_writes.iter().copied().collect();
        let mut first_error = None;

        for key in pending {
            match self.write_collection(key) {
                Ok(()) => {
                    self.pending_writes.remove(&key);
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Persist `keys` then publish a change event
    fn commit(&mut self, keys: &[CollectionKey]) {
        self.persist(keys);
        let event = self.notifier.notify();
        debug!("Committed revision {} ({:?})", event.revision, keys);
    }

    fn persist(&mut self, keys: &[CollectionKey]) {
        for &key in keys {
            match self.write_collection(key) {
                Ok(()) => {
                    self.pending_writes.remove(&key);
                }
                Err(e) => {
                    error!("Failed to persist {} to {}: {}", key, self.store.name(), e);
                    self.pending_writes.insert(key);
                }
            }
        }
    }

    fn write_collection(&self, key: CollectionKey) -> Result<(), StorageError> {
        let store = self.store.as_ref();
        match key {
            CollectionKey::History => save_collection(store, key, &self.history_items),
            CollectionKey::Favorites => save_collection(store, key, &self.favorite_items),
            CollectionKey::Categories => save_collection(store, key, &self.categories),
            CollectionKey::Folders => save_collection(store, key, &self.favorite_folders),
        }
    }

    fn seed_categories(&mut self) {
        if self.categories.is_empty() {
            info!("Seeding preset categories");
            self.categories = Category::presets();
            self.persist(&[CollectionKey::Categories]);
        }
    }

    /// Drop seed folders left by older releases and un-file their snippets
    fn remove_legacy_default_folders(&mut self) {
        let legacy: Vec<Uuid> = self
            .favorite_folders
            .iter()
            .filter(|folder| folder.is_default)
            .map(|folder| folder.id)
            .collect();

        if legacy.is_empty() {
            return;
        }

        info!("Removing {} legacy default folders", legacy.len());
        self.favorite_folders.retain(|folder| !folder.is_default);
        for item in self.favorite_items.iter_mut() {
            if item
                .favorite_folder_id
                .is_some_and(|folder_id| legacy.contains(&folder_id))
            {
                *item = item.with_folder(None);
            }
        }

        self.persist(&[CollectionKey::Folders, CollectionKey::Favorites]);
    }
}

/// Replace the record whose id matches `replacement.id`; false if none does
fn replace_by_id(items: &mut [ClipboardItem], replacement: ClipboardItem) -> bool {
    match items.iter_mut().find(|item| item.id == replacement.id) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}
