//! Transient operator notifications with auto-dismiss.

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{sync::watch, time::sleep};
use uuid::Uuid;

/// Texts shown to the operator.
pub mod messages {
    pub const PLAY_SAVED: &str = "Play saved";
    pub const PLAY_FAILED: &str = "Failed to save play";
    pub const PLAY_NETWORK_ERROR: &str = "Network error — play not saved";
    pub const PLAY_UNDONE: &str = "Play undone";
    pub const NOTHING_TO_UNDO: &str = "Nothing to undo";
    pub const NETWORK_ERROR: &str = "Network error";
    pub const SCORE_UPDATED: &str = "Score updated";
    pub const QUARTER_UPDATED: &str = "Quarter updated";
}

/// Default time a notification stays visible.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(2200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

/// Holds the single visible notification and broadcasts changes to watchers.
///
/// Showing a notification replaces the current one. Each notification schedules its own
/// dismissal, which only clears it if it is still the one on screen.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Arc<watch::Sender<Option<Notification>>>,
    dismiss_after: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            dismiss_after,
        }
    }

    /// Subscribe to notification changes; `None` means nothing is shown.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<Notification> {
        self.tx.borrow().clone()
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Error, message.into())
    }

    /// Must be called from within a tokio runtime.
    fn show(&self, kind: NotificationKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.tx.send_replace(Some(Notification { id, kind, message }));

        let tx = Arc::clone(&self.tx);
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            sleep(dismiss_after).await;
            tx.send_if_modified(|current| {
                if current.as_ref().is_some_and(|shown| shown.id == id) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
        });

        id
    }
}
