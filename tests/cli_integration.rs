use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use tempfile::TempDir;
use tokio::sync::Mutex;

use clipstash::{
    cli::{
        Cli, CliHandler, Commands, ConfigAction, FavoritesAction, FolderAction, HistoryAction,
    },
    clipboard::{ClipboardError, ClipboardSource},
    config::Config,
};

/// Clipboard double that remembers the last written text
#[derive(Default)]
struct RecordingClipboard {
    text: Mutex<Option<String>>,
}

#[async_trait]
impl ClipboardSource for RecordingClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self.text.lock().await.clone())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.text.lock().await = Some(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn write_config(dir: &Path) -> Result<std::path::PathBuf> {
    let config_path = dir.join("config.toml");
    let mut config = Config::default();
    config.storage.path = dir.join("clipstash.db");
    config.history.max_items = 3;
    config.save_to(&config_path)?;
    Ok(config_path)
}

#[tokio::test]
async fn test_cli_parsing() -> Result<()> {
    let cli = Cli::try_parse_from(["clipstash", "status"])?;
    assert!(matches!(cli.command, Commands::Status));

    let cli = Cli::try_parse_from(["clipstash", "history", "list", "--limit", "5"])?;
    assert!(matches!(
        cli.command,
        Commands::History {
            action: HistoryAction::List { limit: 5, .. }
        }
    ));

    let cli = Cli::try_parse_from(["clipstash", "favorites", "list", "--unfiled"])?;
    match cli.command {
        Commands::Favorites {
            action: FavoritesAction::List { scope, .. },
        } => assert!(scope.unfiled && scope.folder.is_none()),
        _ => panic!("expected favorites list"),
    }

    let id = uuid::Uuid::new_v4().to_string();
    assert!(Cli::try_parse_from(["clipstash", "favorites", "list", "--unfiled", "--folder", id.as_str()]).is_err());
    assert!(Cli::try_parse_from(["clipstash", "copy", "not-a-uuid"]).is_err());

    Ok(())
}

#[tokio::test]
async fn test_history_commands_respect_configured_capacity() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(temp_dir.path())?;
    let mut handler = CliHandler::new(Some(config_path)).await?;

    for text in ["one", "two", "three", "four"] {
        handler
            .handle_command(Commands::History {
                action: HistoryAction::Add {
                    text: text.to_string(),
                },
            })
            .await?;
    }

    let engine = handler.engine().await?;
    let contents: Vec<String> = engine
        .lock()
        .await
        .history_items()
        .iter()
        .map(|item| item.content.clone())
        .collect();
    assert_eq!(contents, vec!["four", "three", "two"]);

    handler
        .handle_command(Commands::History {
            action: HistoryAction::List {
                category: None,
                search: "t".to_string(),
                limit: 10,
            },
        })
        .await?;

    handler
        .handle_command(Commands::History {
            action: HistoryAction::Clear,
        })
        .await?;
    assert!(engine.lock().await.history_items().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_folder_and_snippet_commands() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(temp_dir.path())?;
    let mut handler = CliHandler::new(Some(config_path)).await?;

    handler
        .handle_command(Commands::Folders {
            action: FolderAction::Add {
                name: "Work".to_string(),
                color: "#123456".to_string(),
            },
        })
        .await?;
    let engine = handler.engine().await?;
    let folder_id = engine.lock().await.favorite_folders()[0].id;

    handler
        .handle_command(Commands::Favorites {
            action: FavoritesAction::Snippet {
                text: "Best regards".to_string(),
                folder: Some(folder_id),
                description: "Sign-off".to_string(),
            },
        })
        .await?;
    let snippet_id = engine.lock().await.favorite_items()[0].id;

    handler
        .handle_command(Commands::Favorites {
            action: FavoritesAction::Edit {
                id: snippet_id,
                content: None,
                description: Some("Email sign-off".to_string()),
            },
        })
        .await?;

    handler
        .handle_command(Commands::Folders {
            action: FolderAction::Delete { id: folder_id },
        })
        .await?;

    let engine = engine.lock().await;
    assert!(engine.favorite_folders().is_empty());
    let snippet = &engine.favorite_items()[0];
    assert_eq!(snippet.description, "Email sign-off");
    assert_eq!(snippet.content, "Best regards");
    assert_eq!(snippet.favorite_folder_id, None);

    Ok(())
}

#[tokio::test]
async fn test_copy_writes_item_to_clipboard() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(temp_dir.path())?;
    let clipboard = Arc::new(RecordingClipboard::default());
    let mut handler = CliHandler::new(Some(config_path))
        .await?
        .with_clipboard(clipboard.clone());

    let engine = handler.engine().await?;
    let item = engine.lock().await.add_to_history("copy me").unwrap();

    handler.handle_command(Commands::Copy { id: item.id }).await?;
    assert_eq!(clipboard.read_text().await?, Some("copy me".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_config_commands() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(temp_dir.path())?;
    let mut handler = CliHandler::new(Some(config_path.clone())).await?;
    assert_eq!(handler.config().history.max_items, 3);

    handler
        .handle_command(Commands::Config {
            action: ConfigAction::Show,
        })
        .await?;
    handler
        .handle_command(Commands::Config {
            action: ConfigAction::Validate,
        })
        .await?;

    let refused = handler
        .handle_command(Commands::Config {
            action: ConfigAction::Init { force: false },
        })
        .await;
    assert!(refused.is_err());

    handler
        .handle_command(Commands::Config {
            action: ConfigAction::Init { force: true },
        })
        .await?;
    let regenerated = Config::load_from_path(&config_path)?;
    assert_eq!(regenerated.history.max_items, 50);

    Ok(())
}

#[tokio::test]
async fn test_config_init_creates_missing_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("fresh").join("config.toml");

    let mut handler = CliHandler::new(Some(config_path.clone())).await?;
    assert_eq!(handler.config().history.max_items, 50);

    handler
        .handle_command(Commands::Config {
            action: ConfigAction::Init { force: false },
        })
        .await?;

    assert!(config_path.exists());
    let written = Config::load_from_path(&config_path)?;
    assert_eq!(written.monitor.poll_interval_ms, 500);

    Ok(())
}

#[tokio::test]
async fn test_status_command() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(temp_dir.path())?;
    let mut handler = CliHandler::new(Some(config_path)).await?;

    handler.handle_command(Commands::Status).await?;
    assert!(temp_dir.path().join("clipstash.db").exists());

    Ok(())
}
