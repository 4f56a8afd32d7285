use tracing::debug;
use uuid::Uuid;

use super::ClipboardDataManager;
use crate::model::{is_storable, ClipboardItem};
use crate::storage::CollectionKey;

impl ClipboardDataManager {
    /// Record new clipboard text at the head of history.
    ///
    /// Blank text and text equal to the current head are ignored. Returns the
    /// stored item when one was added.
    pub fn add_to_history(&mut self, text: &str) -> Option<ClipboardItem> {
        if !is_storable(text) {
            debug!("Ignoring blank clipboard text");
            return None;
        }

        if self
            .history_items
            .first()
            .is_some_and(|head| head.content == text)
        {
            debug!("Ignoring repeat of the latest history item");
            return None;
        }

        let item = ClipboardItem::new(text);
        self.history_items.insert(0, item.clone());
        self.history_items.truncate(self.options.max_history);

        self.commit(&[CollectionKey::History]);
        Some(item)
    }

    /// Delete a history item by id
    pub fn remove_from_history(&mut self, id: Uuid) -> bool {
        let before = self.history_items.len();
        self.history_items.retain(|item| item.id != id);
        if self.history_items.len() == before {
            return false;
        }

        self.commit(&[CollectionKey::History]);
        true
    }

    /// Drop all history items; returns how many were removed
    pub fn clear_history(&mut self) -> usize {
        let removed = self.history_items.len();
        self.history_items.clear();
        self.commit(&[CollectionKey::History]);
        removed
    }
}
