use tracing::debug;
use uuid::Uuid;

use super::ClipboardDataManager;
use crate::model::Category;
use crate::storage::CollectionKey;

impl ClipboardDataManager {
    /// Create a user category
    pub fn add_category(&mut self, name: &str, color: &str) -> Category {
        let category = Category::new(name, color);
        self.categories.push(category.clone());
        self.commit(&[CollectionKey::Categories]);
        category
    }

    /// Delete a category, moving its items to the default category.
    /// Default categories are protected.
    pub fn delete_category(&mut self, category_id: Uuid) -> bool {
        let Some(category) = self.categories.iter().find(|c| c.id == category_id) else {
            return false;
        };
        if category.is_default {
            debug!("Refusing to delete default category {}", category.name);
            return false;
        }

        // The fallback must come from the remaining categories
        self.categories.retain(|c| c.id != category_id);
        let fallback = self.default_category().id;
        for item in self
            .history_items
            .iter_mut()
            .chain(self.favorite_items.iter_mut())
        {
            if item.category_id == category_id {
                *item = item.with_category(fallback);
            }
        }

        self.commit(&[
            CollectionKey::Categories,
            CollectionKey::History,
            CollectionKey::Favorites,
        ]);
        true
    }

    /// Rename or recolor a category; `is_default` is preserved
    pub fn update_category(&mut self, category_id: Uuid, name: &str, color: &str) -> bool {
        let Some(slot) = self.categories.iter_mut().find(|c| c.id == category_id) else {
            return false;
        };

        *slot = Category {
            name: name.to_string(),
            color: color.to_string(),
            ..slot.clone()
        };

        self.commit(&[CollectionKey::Categories]);
        true
    }

    /// Assign `category_id` to the item with `item_id`.
    ///
    /// Matching is by id in both history and favorites. A favorite copied
    /// from a history item has its own id and is not affected.
    pub fn change_item_category(&mut self, item_id: Uuid, category_id: Uuid) -> bool {
        let mut touched = Vec::new();

        if let Some(item) = self.history_items.iter_mut().find(|i| i.id == item_id) {
            *item = item.with_category(category_id);
            touched.push(CollectionKey::History);
        }
        if let Some(item) = self.favorite_items.iter_mut().find(|i| i.id == item_id) {
            *item = item.with_category(category_id);
            touched.push(CollectionKey::Favorites);
        }

        if touched.is_empty() {
            return false;
        }

        self.commit(&touched);
        true
    }

    /// Look up a category, falling back to the default one
    pub fn get_category(&self, category_id: Uuid) -> Category {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .unwrap_or_else(|| self.default_category())
    }

    /// The protected default category.
    ///
    /// Falls back to the first stored category, then to the built-in preset,
    /// when the stored list carries no default.
    pub fn default_category(&self) -> Category {
        self.categories
            .iter()
            .find(|c| c.is_default)
            .or_else(|| self.categories.first())
            .cloned()
            .unwrap_or_else(Category::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineOptions;
    use crate::model::DEFAULT_CATEGORY_ID;
    use crate::storage::{save_collection, CollectionKey, MemoryStore};

    fn manager() -> ClipboardDataManager {
        ClipboardDataManager::open(MemoryStore::new(), EngineOptions::default())
    }

    #[test]
    fn test_add_category() {
        let mut manager = manager();
        let category = manager.add_category("Work", "#123456");
        assert!(!category.is_default);
        assert_eq!(manager.categories().len(), 6);
        assert_eq!(manager.categories().last(), Some(&category));
    }

    #[test]
    fn test_delete_default_category_is_noop() {
        let mut manager = manager();
        let item = manager.add_to_history("text").unwrap();
        let revision = manager.revision();

        assert!(!manager.delete_category(DEFAULT_CATEGORY_ID));
        assert_eq!(manager.categories().len(), 5);
        assert_eq!(manager.history_items()[0], item);
        assert_eq!(manager.revision(), revision);
    }

    #[test]
    fn test_delete_category_repoints_items() {
        let mut manager = manager();
        let custom = manager.add_category("Temp", "#abcdef");
        let history = manager.add_to_history("history").unwrap();
        let untouched = manager.add_to_history("other").unwrap();
        manager.change_item_category(history.id, custom.id);
        let snippet = manager.add_snippet("snippet", None, "").unwrap();
        manager.change_item_category(snippet.id, custom.id);

        assert!(manager.delete_category(custom.id));
        assert!(manager.categories().iter().all(|c| c.id != custom.id));
        assert!(manager
            .history_items()
            .iter()
            .chain(manager.favorite_items())
            .all(|item| item.category_id == DEFAULT_CATEGORY_ID));
        assert_eq!(manager.history_items()[0], untouched);
        assert!(!manager.delete_category(custom.id));
    }

    #[test]
    fn test_delete_first_category_without_stored_default() {
        let store = MemoryStore::new();
        let first = Category::new("First", "#111111");
        let second = Category::new("Second", "#222222");
        save_collection(
            &store,
            CollectionKey::Categories,
            &[first.clone(), second.clone()],
        )
        .unwrap();

        let mut manager = ClipboardDataManager::open(store, EngineOptions::default());
        let item = manager.add_to_history("text").unwrap();
        assert!(manager.change_item_category(item.id, first.id));

        assert!(manager.delete_category(first.id));
        assert_eq!(manager.categories(), &[second.clone()]);
        assert_eq!(manager.history_items()[0].category_id, second.id);
    }

    #[test]
    fn test_update_category_keeps_default_flag() {
        let mut manager = manager();
        assert!(manager.update_category(DEFAULT_CATEGORY_ID, "Inbox", "#000000"));
        let category = manager.get_category(DEFAULT_CATEGORY_ID);
        assert_eq!(category.name, "Inbox");
        assert!(category.is_default);
        assert!(!manager.update_category(Uuid::new_v4(), "x", "y"));
    }

    #[test]
    fn test_change_item_category_is_id_scoped() {
        let mut manager = manager();
        let custom = manager.add_category("Code", "#000000");
        let history = manager.add_to_history("fn main() {}").unwrap();
        let favorite = manager.add_to_favorites(&history, None).unwrap();

        assert!(manager.change_item_category(history.id, custom.id));
        assert_eq!(manager.history_items()[0].category_id, custom.id);
        assert_eq!(manager.favorite_items()[0].id, favorite.id);
        assert_eq!(manager.favorite_items()[0].category_id, DEFAULT_CATEGORY_ID);

        assert!(!manager.change_item_category(Uuid::new_v4(), custom.id));
    }

    #[test]
    fn test_get_category_falls_back_to_default() {
        let manager = manager();
        let category = manager.get_category(Uuid::new_v4());
        assert_eq!(category.id, DEFAULT_CATEGORY_ID);
        assert!(category.is_default);
    }
}
