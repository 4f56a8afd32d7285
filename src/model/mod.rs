//! Entity definitions for clipboard history and snippet organization
//!
//! Three record types are persisted: [`ClipboardItem`] (used for both history
//! entries and favorites), [`Category`] and [`FavoriteFolder`]. Every field
//! added after the first schema version carries a serde default so older
//! stores keep decoding.

pub mod category;
pub mod folder;
pub mod item;

pub use category::{Category, DEFAULT_CATEGORY_ID};
pub use folder::FavoriteFolder;
pub use item::{is_storable, ClipboardItem, DISPLAY_TEXT_LIMIT};
