//! Coarse change notifications for presentation layers

use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_CAPACITY: usize = 64;

/// Fired after a mutation has been applied in memory and written to the
/// store. Carries no diff; subscribers re-read whatever they display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChanged {
    /// Monotonic counter, one step per applied mutation
    pub revision: u64,
}

/// Per-engine broadcast channel for [`DataChanged`] events
#[derive(Debug)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<DataChanged>,
    revision: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            revision: 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.sender.subscribe()
    }

    /// Bump the revision and publish it
    pub fn notify(&mut self) -> DataChanged {
        self.revision += 1;
        let event = DataChanged {
            revision: self.revision,
        };
        if self.sender.send(event).is_err() {
            trace!("No subscribers for revision {}", self.revision);
        }
        event
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_without_subscribers() {
        let mut notifier = ChangeNotifier::new();
        assert_eq!(notifier.notify().revision, 1);
        assert_eq!(notifier.revision(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_revisions_in_order() {
        let mut notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify();
        notifier.notify();

        assert_eq!(rx.recv().await.unwrap().revision, 1);
        assert_eq!(rx.recv().await.unwrap().revision, 2);
    }
}
