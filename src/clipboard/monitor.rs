//! Polling bridge from a clipboard source into the engine

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::ClipboardSource;
use crate::engine::SharedDataManager;
use crate::model::ClipboardItem;

/// Polls a [`ClipboardSource`] and records changed text in history
pub struct ClipboardMonitor {
    source: Arc<dyn ClipboardSource>,
    manager: SharedDataManager,
    poll_interval: Duration,
    last_seen: Option<String>,
}

impl ClipboardMonitor {
    pub fn new(
        source: Arc<dyn ClipboardSource>,
        manager: SharedDataManager,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            manager,
            poll_interval,
            last_seen: None,
        }
    }

    /// Remember the current clipboard text without recording it, so only
    /// changes made after startup reach history
    pub async fn prime(&mut self) {
        match self.source.read_text().await {
            Ok(text) => self.last_seen = text,
            Err(e) => warn!("Failed to read clipboard: {}", e),
        }
    }

    /// Read the clipboard once and record its text if it changed
    pub async fn poll_once(&mut self) -> Option<ClipboardItem> {
        let text = match self.source.read_text().await {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read clipboard: {}", e);
                return None;
            }
        };

        if self.last_seen.as_deref() == Some(text.as_str()) {
            return None;
        }

        debug!("Clipboard content changed");
        let added = self.manager.lock().await.add_to_history(&text);
        self.last_seen = Some(text);
        added
    }

    /// Poll until `shutdown` resolves
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Watching clipboard every {}ms",
            self.poll_interval.as_millis()
        );

        self.prime().await;

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Clipboard monitor stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(item) = self.poll_once().await {
                        debug!("Recorded history item {}", item.id);
                    }
                }
            }
        }
    }
}
