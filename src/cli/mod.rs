use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info};
use uuid::Uuid;

use crate::bootstrap;
use crate::clipboard::{ClipboardMonitor, ClipboardSource, SystemClipboard};
use crate::config::{Config, ConfigError};
use crate::engine::{ClipboardDataManager, FolderFilter, SharedDataManager};
use crate::storage::SqliteStore;

pub mod output;

#[derive(Parser)]
#[command(name = "clipstash")]
#[command(about = "Clipboard history and snippet organizer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Watch the clipboard and record history until Ctrl-C")]
    Watch,

    #[command(about = "Show store status")]
    Status,

    #[command(about = "Clipboard history")]
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    #[command(about = "Favorite snippets")]
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    #[command(about = "History categories")]
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    #[command(about = "Snippet folders")]
    Folders {
        #[command(subcommand)]
        action: FolderAction,
    },

    #[command(about = "Copy a history item or snippet back to the clipboard")]
    Copy { id: Uuid },

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    #[command(about = "List history, newest first")]
    List {
        #[arg(long)]
        category: Option<Uuid>,

        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    #[command(about = "Record text as if it had been copied")]
    Add { text: String },

    #[command(about = "Delete a history item")]
    Remove { id: Uuid },

    #[command(about = "Delete all history")]
    Clear,
}

/// Folder scope flags shared by snippet commands
#[derive(Args, Debug, Clone, Default)]
pub struct FolderScope {
    /// Folder id
    #[arg(long, conflicts_with = "unfiled")]
    pub folder: Option<Uuid>,

    /// Only snippets without a folder
    #[arg(long)]
    pub unfiled: bool,
}

impl FolderScope {
    fn filter(&self) -> FolderFilter {
        match (self.folder, self.unfiled) {
            (Some(id), _) => FolderFilter::Folder(id),
            (None, true) => FolderFilter::Unfiled,
            (None, false) => FolderFilter::All,
        }
    }
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    #[command(about = "List snippets")]
    List {
        #[command(flatten)]
        scope: FolderScope,

        #[arg(short, long, default_value = "")]
        search: String,
    },

    #[command(about = "Save a history item as a snippet")]
    Add {
        history_id: Uuid,

        #[arg(long)]
        folder: Option<Uuid>,
    },

    #[command(about = "Create a snippet from text")]
    Snippet {
        text: String,

        #[arg(long)]
        folder: Option<Uuid>,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    #[command(about = "Delete a snippet")]
    Remove { id: Uuid },

    #[command(about = "Delete all snippets")]
    Clear,

    #[command(about = "Move snippets into a folder")]
    Move {
        folder: Uuid,

        #[arg(required = true)]
        ids: Vec<Uuid>,
    },

    #[command(about = "Take snippets out of their folder")]
    Unfile {
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },

    #[command(about = "Set the order of snippets in a folder (omit --folder for unfiled)")]
    Reorder {
        #[arg(required = true)]
        ids: Vec<Uuid>,

        #[arg(long)]
        folder: Option<Uuid>,
    },

    #[command(about = "Edit a snippet's content or description")]
    Edit {
        id: Uuid,

        #[arg(long)]
        content: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    #[command(about = "List categories")]
    List,

    #[command(about = "Create a category")]
    Add { name: String, color: String },

    #[command(about = "Rename or recolor a category")]
    Update {
        id: Uuid,
        name: String,
        color: String,
    },

    #[command(about = "Delete a category; its items move to the default")]
    Delete { id: Uuid },

    #[command(about = "Assign a category to an item")]
    Assign { item_id: Uuid, category_id: Uuid },
}

#[derive(Subcommand)]
pub enum FolderAction {
    #[command(about = "List folders")]
    List,

    #[command(about = "Create a folder")]
    Add { name: String, color: String },

    #[command(about = "Rename or recolor a folder")]
    Update {
        id: Uuid,
        name: String,
        color: String,
    },

    #[command(about = "Delete a folder; its snippets become unfiled")]
    Delete { id: Uuid },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show current configuration")]
    Show,

    #[command(about = "Generate example configuration")]
    Init {
        #[arg(long)]
        force: bool,
    },

    #[command(about = "Validate configuration")]
    Validate,
}

pub struct CliHandler {
    config: Arc<Config>,
    config_path: Option<PathBuf>,
    engine: Option<SharedDataManager>,
    clipboard: Option<Arc<dyn ClipboardSource>>,
}

impl CliHandler {
    pub async fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load_with(config_path.as_deref()).context("Failed to load config")?;

        Ok(Self {
            config: Arc::new(config),
            config_path,
            engine: None,
            clipboard: None,
        })
    }

    /// Use an already configured clipboard provider instead of the system one
    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardSource>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lazily open the store and engine
    pub async fn engine(&mut self) -> Result<SharedDataManager> {
        if let Some(engine) = &self.engine {
            return Ok(Arc::clone(engine));
        }

        info!("Opening store at {}", self.config.storage.path.display());
        let store = SqliteStore::open(&self.config.storage.path)
            .with_context(|| format!("Failed to open {}", self.config.storage.path.display()))?;
        let mut manager = ClipboardDataManager::open(store, self.config.engine_options());
        if self.config.seed_examples {
            bootstrap::seed_examples(&mut manager);
        }

        let engine = manager.into_shared();
        self.engine = Some(Arc::clone(&engine));
        Ok(engine)
    }

    /// Lazily initialize the clipboard provider when needed
    fn clipboard(&mut self) -> Result<Arc<dyn ClipboardSource>> {
        if let Some(clipboard) = &self.clipboard {
            return Ok(Arc::clone(clipboard));
        }

        info!("Initializing clipboard provider");
        let clipboard: Arc<dyn ClipboardSource> = Arc::new(SystemClipboard::new()?);
        self.clipboard = Some(Arc::clone(&clipboard));
        Ok(clipboard)
    }

    pub async fn handle_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Watch => self.watch().await,
            Commands::Status => self.show_status().await,
            Commands::History { action } => self.handle_history(action).await,
            Commands::Favorites { action } => self.handle_favorites(action).await,
            Commands::Categories { action } => self.handle_categories(action).await,
            Commands::Folders { action } => self.handle_folders(action).await,
            Commands::Copy { id } => self.copy_item(id).await,
            Commands::Config { action } => self.handle_config_action(action),
        }
    }

    async fn watch(&mut self) -> Result<()> {
        let engine = self.engine().await?;
        let clipboard = self.clipboard()?;

        let mut changes = engine.lock().await.subscribe();
        let reporter_engine = Arc::clone(&engine);
        let reporter = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(_) => {
                        let engine = reporter_engine.lock().await;
                        if let Some(head) = engine.history_items().first() {
                            println!("{}", output::item_line(head));
                        }
                    }
                    Err(RecvError::Lagged(count)) => {
                        info!("Change reporter skipped {} events", count);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let monitor = ClipboardMonitor::new(clipboard, Arc::clone(&engine), self.config.poll_interval());
        monitor
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl-C: {}", e);
                }
            })
            .await;

        reporter.abort();

        let mut engine = engine.lock().await;
        if engine.has_pending_writes() {
            engine.flush().context("Failed to write pending changes")?;
        }
        Ok(())
    }

    async fn show_status(&mut self) -> Result<()> {
        let engine = self.engine().await?;
        let engine = engine.lock().await;

        println!("ClipStash Status:");
        println!("  Version: {}", crate::VERSION);
        println!(
            "  Built: {} ({}, {})",
            env!("BUILD_DATE"),
            env!("TARGET"),
            env!("PROFILE")
        );
        println!("  Compiler: {}", env!("RUSTC_VERSION"));
        println!("  Store: {}", self.config.storage.path.display());
        println!(
            "  History: {}/{}",
            engine.history_items().len(),
            engine.options().max_history
        );
        println!("  Snippets: {}", engine.favorite_items().len());
        println!("  Categories: {}", engine.categories().len());
        println!("  Folders: {}", engine.favorite_folders().len());
        if engine.has_pending_writes() {
            println!("  Warning: some changes are not yet saved");
        }
        Ok(())
    }

    async fn handle_history(&mut self, action: HistoryAction) -> Result<()> {
        let engine = self.engine().await?;
        let mut engine = engine.lock().await;

        match action {
            HistoryAction::List {
                category,
                search,
                limit,
            } => {
                let items = engine.filter_history(category, &search);
                if items.is_empty() {
                    println!("No clipboard history found");
                    return Ok(());
                }
                println!("Clipboard History (showing {} entries):", items.len().min(limit));
                for item in items.iter().take(limit) {
                    let category = engine.get_category(item.category_id);
                    println!("{}  [{}]", output::item_line(item), category.name);
                }
            }
            HistoryAction::Add { text } => match engine.add_to_history(&text) {
                Some(item) => println!("Added {}", item.id),
                None => println!("Nothing added (blank or same as latest item)"),
            },
            HistoryAction::Remove { id } => {
                output::report(engine.remove_from_history(id), "History item removed", id)
            }
            HistoryAction::Clear => {
                let removed = engine.clear_history();
                println!("Cleared {} history items", removed);
            }
        }
        Ok(())
    }

    async fn handle_favorites(&mut self, action: FavoritesAction) -> Result<()> {
        let engine = self.engine().await?;
        let mut engine = engine.lock().await;

        match action {
            FavoritesAction::List { scope, search } => {
                let items = engine.filter_favorites(scope.filter(), &search);
                if items.is_empty() {
                    println!("No snippets found");
                    return Ok(());
                }
                for item in &items {
                    let folder = item
                        .favorite_folder_id
                        .and_then(|id| engine.get_favorite_folder(id))
                        .map(|f| f.name.as_str())
                        .unwrap_or(output::UNFILED_LABEL);
                    println!("{}  [{}]", output::item_line(item), folder);
                }
            }
            FavoritesAction::Add { history_id, folder } => {
                let Some(source) = engine
                    .history_items()
                    .iter()
                    .find(|item| item.id == history_id)
                    .cloned()
                else {
                    println!("No history item with id {}", history_id);
                    return Ok(());
                };
                match engine.add_to_favorites(&source, folder) {
                    Some(item) => println!("Saved snippet {}", item.id),
                    None => println!("A snippet with the same content already exists"),
                }
            }
            FavoritesAction::Snippet {
                text,
                folder,
                description,
            } => match engine.add_snippet(&text, folder, &description) {
                Some(item) => println!("Saved snippet {}", item.id),
                None => println!("Nothing saved (blank or duplicate content)"),
            },
            FavoritesAction::Remove { id } => {
                output::report(engine.remove_from_favorites(id), "Snippet removed", id)
            }
            FavoritesAction::Clear => {
                let removed = engine.clear_favorites();
                println!("Cleared {} snippets", removed);
            }
            FavoritesAction::Move { folder, ids } => {
                if engine.get_favorite_folder(folder).is_none() {
                    println!("No folder with id {}", folder);
                    return Ok(());
                }
                let moved = engine.move_snippets_to_folder(&ids, Some(folder));
                println!("Moved {} snippets", moved);
            }
            FavoritesAction::Unfile { ids } => {
                let moved = engine.move_snippets_to_folder(&ids, None);
                println!("Un-filed {} snippets", moved);
            }
            FavoritesAction::Reorder { ids, folder } => {
                if engine.reorder_snippets_in_folder(folder, &ids) {
                    println!("Snippets reordered");
                } else {
                    println!("No snippets in that folder");
                }
            }
            FavoritesAction::Edit {
                id,
                content,
                description,
            } => {
                let Some(current) = engine
                    .favorite_items()
                    .iter()
                    .find(|item| item.id == id)
                    .cloned()
                else {
                    println!("No snippet with id {}", id);
                    return Ok(());
                };
                let edited = crate::model::ClipboardItem {
                    content: content.unwrap_or(current.content.clone()),
                    description: description.unwrap_or(current.description.clone()),
                    ..current
                };
                output::report(engine.update_favorite_item(edited), "Snippet updated", id);
            }
        }
        Ok(())
    }

    async fn handle_categories(&mut self, action: CategoryAction) -> Result<()> {
        let engine = self.engine().await?;
        let mut engine = engine.lock().await;

        match action {
            CategoryAction::List => {
                let groups = engine.get_items_by_category();
                for category in engine.categories() {
                    let count = groups.get(&category.id).map_or(0, Vec::len);
                    println!("{}  ({} items)", output::category_line(category), count);
                }
            }
            CategoryAction::Add { name, color } => {
                let category = engine.add_category(&name, &color);
                println!("Created category {}", category.id);
            }
            CategoryAction::Update { id, name, color } => {
                output::report(engine.update_category(id, &name, &color), "Category updated", id)
            }
            CategoryAction::Delete { id } => output::report(
                engine.delete_category(id),
                "Category deleted",
                id,
            ),
            CategoryAction::Assign {
                item_id,
                category_id,
            } => output::report(
                engine.change_item_category(item_id, category_id),
                "Category assigned",
                item_id,
            ),
        }
        Ok(())
    }

    async fn handle_folders(&mut self, action: FolderAction) -> Result<()> {
        let engine = self.engine().await?;
        let mut engine = engine.lock().await;

        match action {
            FolderAction::List => {
                let groups = engine.get_favorites_by_folder();
                for folder in engine.favorite_folders() {
                    let count = groups.get(&Some(folder.id)).map_or(0, Vec::len);
                    println!("{}  ({} snippets)", output::folder_line(folder), count);
                }
                let unfiled = groups.get(&None).map_or(0, Vec::len);
                println!("{}  ({} snippets)", output::UNFILED_LABEL, unfiled);
            }
            FolderAction::Add { name, color } => {
                let folder = engine.add_favorite_folder(&name, &color);
                println!("Created folder {}", folder.id);
            }
            FolderAction::Update { id, name, color } => output::report(
                engine.update_favorite_folder(id, &name, &color),
                "Folder updated",
                id,
            ),
            FolderAction::Delete { id } => {
                output::report(engine.delete_favorite_folder(id), "Folder deleted", id)
            }
        }
        Ok(())
    }

    async fn copy_item(&mut self, id: Uuid) -> Result<()> {
        let engine = self.engine().await?;
        let content = engine.lock().await.find_item(id).map(|item| item.content.clone());

        let Some(content) = content else {
            println!("No item with id {}", id);
            return Ok(());
        };

        let clipboard = self.clipboard()?;
        clipboard.write_text(&content).await?;
        println!("Copied to clipboard");
        Ok(())
    }

    fn handle_config_action(&mut self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                println!("Current Configuration:");
                println!("{}", toml::to_string_pretty(self.config.as_ref())?);
            }
            ConfigAction::Init { force } => {
                let path = match &self.config_path {
                    Some(path) => path.clone(),
                    None => Config::default_path().ok_or(ConfigError::NoConfigDir)?,
                };
                Config::write_example(&path, force)?;
                println!("Example configuration written to {}", path.display());
            }
            ConfigAction::Validate => {
                // Loading in CliHandler::new already validated it
                println!("Configuration is valid");
            }
        }
        Ok(())
    }
}
