//! Optional first-run example content

use tracing::info;

use crate::engine::ClipboardDataManager;

const EXAMPLES: [(&str, &str, &[(&str, &str)]); 2] = [
    (
        "Greetings",
        "#1976D2",
        &[
            ("Thanks for reaching out! I'll get back to you shortly.", "Quick reply"),
            ("Hope you had a great weekend.", ""),
        ],
    ),
    (
        "Signatures",
        "#388E3C",
        &[("Best regards,\n", "Email sign-off")],
    ),
];

/// Create the example folders and their snippets.
///
/// Skipped entirely when a folder with any of the example names already
/// exists. Returns the number of snippets added.
pub fn seed_examples(manager: &mut ClipboardDataManager) -> usize {
    let already_seeded = manager
        .favorite_folders()
        .iter()
        .any(|folder| EXAMPLES.iter().any(|(name, _, _)| folder.name == *name));
    if already_seeded {
        return 0;
    }

    let mut added = 0;
    for (name, color, snippets) in EXAMPLES {
        let folder = manager.add_favorite_folder(name, color);
        for (content, description) in snippets {
            if manager
                .add_snippet(content, Some(folder.id), description)
                .is_some()
            {
                added += 1;
            }
        }
    }

    info!("Seeded {} example snippets", added);
    added
}
