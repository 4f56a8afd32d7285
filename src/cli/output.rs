//! Plain-text rendering for CLI listings

use uuid::Uuid;

use crate::model::{Category, ClipboardItem, FavoriteFolder};

/// Label for snippets without a folder
pub const UNFILED_LABEL: &str = "Unfiled";

/// `<id> | <local time> | <display text>` with newlines flattened
pub fn item_line(item: &ClipboardItem) -> String {
    let time = item
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S");
    let mut line = format!("{} | {} | {}", item.id, time, flatten(&item.display_text()));
    if !item.description.is_empty() {
        line.push_str(&format!(" ({})", flatten(&item.description)));
    }
    line
}

pub fn category_line(category: &Category) -> String {
    let marker = if category.is_default { " *" } else { "" };
    format!("{} | {} {}{}", category.id, category.color, category.name, marker)
}

pub fn folder_line(folder: &FavoriteFolder) -> String {
    format!("{} | {} {}", folder.id, folder.color, folder.name)
}

/// Print the outcome of an id-targeted command
pub fn report(applied: bool, message: &str, id: Uuid) {
    if applied {
        println!("{}", message);
    } else {
        println!("Nothing changed for {}", id);
    }
}

fn flatten(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_line_is_single_line() {
        let item = ClipboardItem::new("first\nsecond");
        let line = item_line(&item);
        assert!(!line.contains('\n'));
        assert!(line.starts_with(&item.id.to_string()));
        assert!(line.ends_with("first second"));
    }

    #[test]
    fn test_item_line_shows_description() {
        let item = ClipboardItem::snippet("Best regards", None, "Sign-off");
        assert!(item_line(&item).ends_with("Best regards (Sign-off)"));
    }

    #[test]
    fn test_default_category_is_marked() {
        let line = category_line(&Category::fallback());
        assert!(line.ends_with(" *"));
    }
}
