//! History categories and the preset list seeded on first run

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known id of the protected default category
pub const DEFAULT_CATEGORY_ID: Uuid = Uuid::from_u128(0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0001);

const PRESETS: [(u128, &str, &str); 5] = [
    (0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0001, "General", "#1976D2"),
    (0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0002, "Code", "#388E3C"),
    (0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0003, "Links", "#F57C00"),
    (0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0004, "Notes", "#7B1FA2"),
    (0x6c1f_0a52_3b1e_4d0c_9a51_0000_0000_0005, "Personal", "#C2185B"),
];

/// Classification label for history items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Hex color string, e.g. `#1976D2`
    pub color: String,
    /// Default categories cannot be deleted
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Create a user category
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            is_default: false,
        }
    }

    /// The fixed category set written when no categories are stored
    pub fn presets() -> Vec<Category> {
        PRESETS
            .iter()
            .map(|&(id, name, color)| {
                let id = Uuid::from_u128(id);
                Category {
                    id,
                    name: name.to_string(),
                    color: color.to_string(),
                    is_default: id == DEFAULT_CATEGORY_ID,
                }
            })
            .collect()
    }

    /// The preset default category, used when the stored list has none
    pub fn fallback() -> Category {
        Category {
            id: DEFAULT_CATEGORY_ID,
            name: PRESETS[0].1.to_string(),
            color: PRESETS[0].2.to_string(),
            is_default: true,
        }
    }
}
