//! Clipboard item record shared by history and favorites

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::DEFAULT_CATEGORY_ID;

/// Content longer than this is shortened by [`ClipboardItem::display_text`]
pub const DISPLAY_TEXT_LIMIT: usize = 50;

/// A captured clipboard text or a user snippet.
///
/// Records are never edited in place. Every change produces a new value with
/// the same `id` that replaces the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    /// Unique identifier, fixed at creation
    pub id: Uuid,
    /// Text payload, never blank once stored
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Whether this record lives in the favorites collection
    #[serde(default)]
    pub is_favorite: bool,
    /// Category of the item, resolved through the default when unknown
    #[serde(default = "default_category_id")]
    pub category_id: Uuid,
    /// Folder holding the snippet, `None` when unfiled
    #[serde(default)]
    pub favorite_folder_id: Option<Uuid>,
    /// Free-text annotation
    #[serde(default)]
    pub description: String,
}

fn default_category_id() -> Uuid {
    DEFAULT_CATEGORY_ID
}

impl ClipboardItem {
    /// Create a new history item in the default category
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            timestamp: Utc::now(),
            is_favorite: false,
            category_id: DEFAULT_CATEGORY_ID,
            favorite_folder_id: None,
            description: String::new(),
        }
    }

    /// Create a favorite copy of `source` with a fresh id and timestamp.
    ///
    /// Content, category and description are copied by value, so later
    /// changes to `source` do not reach the copy.
    pub fn favorite_from(source: &ClipboardItem, folder_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: source.content.clone(),
            timestamp: Utc::now(),
            is_favorite: true,
            category_id: source.category_id,
            favorite_folder_id: folder_id,
            description: source.description.clone(),
        }
    }

    /// Create a snippet directly, without a history item behind it
    pub fn snippet(
        content: impl Into<String>,
        folder_id: Option<Uuid>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            is_favorite: true,
            favorite_folder_id: folder_id,
            description: description.into(),
            ..Self::new(content)
        }
    }

    /// Copy of this record filed under `folder_id`
    pub fn with_folder(&self, folder_id: Option<Uuid>) -> Self {
        Self {
            favorite_folder_id: folder_id,
            ..self.clone()
        }
    }

    /// Copy of this record assigned to `category_id`
    pub fn with_category(&self, category_id: Uuid) -> Self {
        Self {
            category_id,
            ..self.clone()
        }
    }

    /// Shortened single-entry label for menus and lists
    pub fn display_text(&self) -> String {
        if self.content.chars().count() > DISPLAY_TEXT_LIMIT {
            let head: String = self.content.chars().take(DISPLAY_TEXT_LIMIT - 3).collect();
            format!("{}...", head)
        } else {
            self.content.clone()
        }
    }

    /// Case-insensitive substring match against the content.
    /// An empty query matches every item.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.content.to_lowercase().contains(&query.to_lowercase())
    }
}

/// True when `text` has something other than whitespace in it
pub fn is_storable(text: &str) -> bool {
    !text.trim().is_empty()
}
