//! Read-side views over the engine's collections

use std::collections::HashMap;

use uuid::Uuid;

use super::ClipboardDataManager;
use crate::model::{ClipboardItem, FavoriteFolder};

/// Folder scope used when listing snippets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderFilter {
    /// Every snippet
    #[default]
    All,
    /// Snippets without a folder
    Unfiled,
    /// Snippets in one folder
    Folder(Uuid),
}

impl FolderFilter {
    fn accepts(&self, item: &ClipboardItem) -> bool {
        match self {
            FolderFilter::All => true,
            FolderFilter::Unfiled => item.favorite_folder_id.is_none(),
            FolderFilter::Folder(id) => item.favorite_folder_id == Some(*id),
        }
    }
}

impl ClipboardDataManager {
    /// Look up a folder. There is no fallback folder.
    pub fn get_favorite_folder(&self, folder_id: Uuid) -> Option<&FavoriteFolder> {
        self.favorite_folders.iter().find(|f| f.id == folder_id)
    }

    /// History grouped by category id, each group in stored order
    pub fn get_items_by_category(&self) -> HashMap<Uuid, Vec<ClipboardItem>> {
        let mut groups: HashMap<Uuid, Vec<ClipboardItem>> = HashMap::new();
        for item in &self.history_items {
            groups.entry(item.category_id).or_default().push(item.clone());
        }
        groups
    }

    /// Snippets grouped by folder id (`None` = unfiled), each group in stored order
    pub fn get_favorites_by_folder(&self) -> HashMap<Option<Uuid>, Vec<ClipboardItem>> {
        let mut groups: HashMap<Option<Uuid>, Vec<ClipboardItem>> = HashMap::new();
        for item in &self.favorite_items {
            groups
                .entry(item.favorite_folder_id)
                .or_default()
                .push(item.clone());
        }
        groups
    }

    /// Snippets of one folder scope in stored order
    pub fn snippets_in_folder(&self, folder_id: Option<Uuid>) -> Vec<ClipboardItem> {
        self.favorite_items
            .iter()
            .filter(|item| item.favorite_folder_id == folder_id)
            .cloned()
            .collect()
    }

    /// History narrowed to a category and a case-insensitive search term
    pub fn filter_history(&self, category_id: Option<Uuid>, query: &str) -> Vec<ClipboardItem> {
        self.history_items
            .iter()
            .filter(|item| category_id.map_or(true, |id| item.category_id == id))
            .filter(|item| item.matches(query))
            .cloned()
            .collect()
    }

    /// Snippets narrowed to a folder scope and a case-insensitive search term.
    /// Stored order is kept as-is, including any user reordering.
    pub fn filter_favorites(&self, folder: FolderFilter, query: &str) -> Vec<ClipboardItem> {
        self.favorite_items
            .iter()
            .filter(|item| folder.accepts(item))
            .filter(|item| item.matches(query))
            .cloned()
            .collect()
    }

    /// Find an item by id in history, then in favorites
    pub fn find_item(&self, id: Uuid) -> Option<&ClipboardItem> {
        self.history_items
            .iter()
            .chain(&self.favorite_items)
            .find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineOptions;
    use crate::model::DEFAULT_CATEGORY_ID;
    use crate::storage::MemoryStore;

    fn manager() -> ClipboardDataManager {
        ClipboardDataManager::open(MemoryStore::new(), EngineOptions::default())
    }

    #[test]
    fn test_get_favorite_folder() {
        let mut manager = manager();
        let folder = manager.add_favorite_folder("Work", "#000000");
        assert_eq!(manager.get_favorite_folder(folder.id), Some(&folder));
        assert!(manager.get_favorite_folder(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_items_by_category_preserves_order() {
        let mut manager = manager();
        let code = manager.add_category("Code", "#000000");
        let a = manager.add_to_history("a").unwrap();
        manager.add_to_history("b").unwrap();
        let c = manager.add_to_history("c").unwrap();
        manager.change_item_category(a.id, code.id);
        manager.change_item_category(c.id, code.id);

        let groups = manager.get_items_by_category();
        let code_items: Vec<&str> = groups[&code.id].iter().map(|i| i.content.as_str()).collect();
        assert_eq!(code_items, vec!["c", "a"]);
        assert_eq!(groups[&DEFAULT_CATEGORY_ID].len(), 1);
    }

    #[test]
    fn test_favorites_by_folder() {
        let mut manager = manager();
        let folder = manager.add_favorite_folder("F", "#000000");
        manager.add_snippet("one", Some(folder.id), "").unwrap();
        manager.add_snippet("two", None, "").unwrap();
        manager.add_snippet("three", Some(folder.id), "").unwrap();

        let groups = manager.get_favorites_by_folder();
        assert_eq!(groups.len(), 2);
        let filed: Vec<&str> = groups[&Some(folder.id)]
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(filed, vec!["one", "three"]);
        assert_eq!(groups[&None].len(), 1);
    }

    #[test]
    fn test_filter_history() {
        let mut manager = manager();
        let links = manager.add_category("Web", "#000000");
        let url = manager.add_to_history("https://Example.com").unwrap();
        manager.add_to_history("plain note").unwrap();
        manager.change_item_category(url.id, links.id);

        assert_eq!(manager.filter_history(None, "").len(), 2);
        assert_eq!(manager.filter_history(None, "example").len(), 1);
        assert_eq!(manager.filter_history(Some(links.id), "").len(), 1);
        assert!(manager.filter_history(Some(links.id), "note").is_empty());
    }

    #[test]
    fn test_filter_favorites() {
        let mut manager = manager();
        let folder = manager.add_favorite_folder("F", "#000000");
        manager.add_snippet("Alpha", Some(folder.id), "").unwrap();
        manager.add_snippet("alphabet", None, "").unwrap();
        manager.add_snippet("beta", None, "").unwrap();

        assert_eq!(manager.filter_favorites(FolderFilter::All, "ALPHA").len(), 2);
        assert_eq!(manager.filter_favorites(FolderFilter::Unfiled, "").len(), 2);
        assert_eq!(manager.filter_favorites(FolderFilter::Folder(folder.id), "").len(), 1);
        assert!(manager
            .filter_favorites(FolderFilter::Folder(folder.id), "beta")
            .is_empty());
    }

    #[test]
    fn test_find_item() {
        let mut manager = manager();
        let history = manager.add_to_history("h").unwrap();
        let snippet = manager.add_snippet("s", None, "").unwrap();

        assert_eq!(manager.find_item(history.id), Some(&history));
        assert_eq!(manager.find_item(snippet.id), Some(&snippet));
        assert!(manager.find_item(Uuid::new_v4()).is_none());
    }
}
