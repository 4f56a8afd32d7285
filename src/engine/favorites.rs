use std::collections::HashSet;

use tracing::{debug, info};
use uuid::Uuid;

use super::{replace_by_id, ClipboardDataManager};
use crate::model::{is_storable, ClipboardItem, FavoriteFolder};
use crate::storage::CollectionKey;

impl ClipboardDataManager {
    /// Save a copy of `item` as a snippet at the end of the favorites.
    ///
    /// Favorites are unique by content, so an item whose text is already a
    /// snippet is ignored.
    pub fn add_to_favorites(
        &mut self,
        item: &ClipboardItem,
        folder_id: Option<Uuid>,
    ) -> Option<ClipboardItem> {
        self.push_favorite(ClipboardItem::favorite_from(item, folder_id))
    }

    /// Register a snippet that did not come from history
    pub fn add_snippet(
        &mut self,
        content: &str,
        folder_id: Option<Uuid>,
        description: &str,
    ) -> Option<ClipboardItem> {
        self.push_favorite(ClipboardItem::snippet(content, folder_id, description))
    }

    fn push_favorite(&mut self, favorite: ClipboardItem) -> Option<ClipboardItem> {
        if !is_storable(&favorite.content) {
            debug!("Ignoring blank snippet");
            return None;
        }
        if self
            .favorite_items
            .iter()
            .any(|existing| existing.content == favorite.content)
        {
            debug!("Snippet with the same content already exists");
            return None;
        }

        self.favorite_items.push(favorite.clone());
        self.commit(&[CollectionKey::Favorites]);
        Some(favorite)
    }

    /// Delete a snippet by id
    pub fn remove_from_favorites(&mut self, id: Uuid) -> bool {
        let before = self.favorite_items.len();
        self.favorite_items.retain(|item| item.id != id);
        if self.favorite_items.len() == before {
            return false;
        }

        self.commit(&[CollectionKey::Favorites]);
        true
    }

    /// Drop all snippets; returns how many were removed
    pub fn clear_favorites(&mut self) -> usize {
        let removed = self.favorite_items.len();
        self.favorite_items.clear();
        self.commit(&[CollectionKey::Favorites]);
        removed
    }

    /// File a snippet under `folder_id` (`None` un-files it)
    pub fn change_favorite_folder(&mut self, item_id: Uuid, folder_id: Option<Uuid>) -> bool {
        let Some(current) = self.favorite_items.iter().find(|item| item.id == item_id) else {
            return false;
        };
        let replacement = current.with_folder(folder_id);
        replace_by_id(&mut self.favorite_items, replacement);

        self.commit(&[CollectionKey::Favorites]);
        true
    }

    /// Replace a snippet wholesale, e.g. after editing content and description
    pub fn update_favorite_item(&mut self, item: ClipboardItem) -> bool {
        if !is_storable(&item.content) {
            debug!("Rejecting snippet update with blank content");
            return false;
        }

        let replacement = ClipboardItem {
            is_favorite: true,
            ..item
        };
        if !replace_by_id(&mut self.favorite_items, replacement) {
            return false;
        }

        self.commit(&[CollectionKey::Favorites]);
        true
    }

    /// Create a user folder
    pub fn add_favorite_folder(&mut self, name: &str, color: &str) -> FavoriteFolder {
        let folder = FavoriteFolder::new(name, color);
        self.favorite_folders.push(folder.clone());
        self.commit(&[CollectionKey::Folders]);
        folder
    }

    /// Delete a folder; its snippets become unfiled
    pub fn delete_favorite_folder(&mut self, folder_id: Uuid) -> bool {
        let Some(folder) = self.get_favorite_folder(folder_id) else {
            return false;
        };
        if folder.is_default {
            debug!("Refusing to delete default folder {}", folder.name);
            return false;
        }

        for item in self.favorite_items.iter_mut() {
            if item.favorite_folder_id == Some(folder_id) {
                *item = item.with_folder(None);
            }
        }
        self.favorite_folders.retain(|folder| folder.id != folder_id);

        self.commit(&[CollectionKey::Folders, CollectionKey::Favorites]);
        true
    }

    /// Rename or recolor a folder
    pub fn update_favorite_folder(&mut self, folder_id: Uuid, name: &str, color: &str) -> bool {
        let Some(slot) = self
            .favorite_folders
            .iter_mut()
            .find(|folder| folder.id == folder_id)
        else {
            return false;
        };

        *slot = FavoriteFolder {
            name: name.to_string(),
            color: color.to_string(),
            ..slot.clone()
        };

        self.commit(&[CollectionKey::Folders]);
        true
    }

    /// Un-file every snippet whose folder no longer exists.
    ///
    /// Writes only when something was repaired, so a second run is a no-op.
    /// Returns the number of repaired snippets.
    pub fn fix_orphaned_snippets(&mut self) -> usize {
        let valid: HashSet<Uuid> = self.favorite_folders.iter().map(|f| f.id).collect();
        let mut repaired = 0;

        for item in self.favorite_items.iter_mut() {
            if let Some(folder_id) = item.favorite_folder_id {
                if !valid.contains(&folder_id) {
                    *item = item.with_folder(None);
                    repaired += 1;
                }
            }
        }

        if repaired > 0 {
            info!("Un-filed {} orphaned snippets", repaired);
            self.commit(&[CollectionKey::Favorites]);
        }
        repaired
    }

    /// File every snippet in `ids` under `folder_id` with a single write.
    /// Unknown ids are skipped. Returns the number of snippets moved.
    pub fn move_snippets_to_folder(&mut self, ids: &[Uuid], folder_id: Option<Uuid>) -> usize {
        let mut moved = 0;
        for item in self.favorite_items.iter_mut() {
            if ids.contains(&item.id) {
                *item = item.with_folder(folder_id);
                moved += 1;
            }
        }

        if moved > 0 {
            self.commit(&[CollectionKey::Favorites]);
        }
        moved
    }

    /// Reorder the snippets of one folder scope by index.
    ///
    /// `permutation[i]` is the current position (within the scope) of the
    /// snippet that should end up at position `i`. Anything other than a
    /// permutation of `0..scope_len` is rejected.
    pub fn reorder_snippets(&mut self, folder_id: Option<Uuid>, permutation: &[usize]) -> bool {
        let (scoped, others) = self.partition_scope(folder_id);
        if scoped.is_empty() || !is_permutation(permutation, scoped.len()) {
            debug!("Rejecting reorder: not a permutation of {} snippets", scoped.len());
            return false;
        }

        let reordered: Vec<ClipboardItem> =
            permutation.iter().map(|&index| scoped[index].clone()).collect();
        self.favorite_items = reordered.into_iter().chain(others).collect();

        self.commit(&[CollectionKey::Favorites]);
        true
    }

    /// Reorder the snippets of one folder scope by id.
    ///
    /// Ids outside the scope are ignored; scoped snippets missing from
    /// `new_order` follow the listed ones in their previous order. The stored
    /// collection becomes the reordered scope followed by every other snippet
    /// in its original relative order.
    pub fn reorder_snippets_in_folder(&mut self, folder_id: Option<Uuid>, new_order: &[Uuid]) -> bool {
        let (mut scoped, others) = self.partition_scope(folder_id);
        if scoped.is_empty() {
            return false;
        }

        let mut reordered = Vec::with_capacity(scoped.len());
        for id in new_order {
            if let Some(position) = scoped.iter().position(|item| item.id == *id) {
                reordered.push(scoped.remove(position));
            }
        }
        reordered.extend(scoped);

        self.favorite_items = reordered.into_iter().chain(others).collect();
        self.commit(&[CollectionKey::Favorites]);
        true
    }

    /// Split favorites into (in scope, everything else), both order-preserving
    fn partition_scope(&self, folder_id: Option<Uuid>) -> (Vec<ClipboardItem>, Vec<ClipboardItem>) {
        self.favorite_items
            .iter()
            .cloned()
            .partition(|item| item.favorite_folder_id == folder_id)
    }
}

fn is_permutation(indices: &[usize], len: usize) -> bool {
    if indices.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in indices {
        if index >= len || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}
