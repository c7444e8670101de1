//! Downstream notification seam (email/push delivery lives elsewhere).

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    LevelUp,
    BadgeEarned,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::LevelUp => f.write_str("level_up"),
            NotificationKind::BadgeEarned => f.write_str("badge_earned"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Receives level-up and badge events after the profile has been saved.
///
/// Errors are logged by the engine and never undo the state change.
pub trait Notifier: Send + Sync {
    fn notify(&self, email: &str, kind: NotificationKind, payload: &Value)
        -> Result<(), NotifyError>;
}

/// Writes each notification to the log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(
        &self,
        email: &str,
        kind: NotificationKind,
        payload: &Value,
    ) -> Result<(), NotifyError> {
        tracing::info!(%email, %kind, %payload, "Notification");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub email: String,
    pub kind: NotificationKind,
    pub payload: Value,
}

/// Keeps every notification in memory, e.g. for batching or inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().clone()
    }

    pub fn take(&self) -> Vec<SentNotification> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(
        &self,
        email: &str,
        kind: NotificationKind,
        payload: &Value,
    ) -> Result<(), NotifyError> {
        self.sent.lock().push(SentNotification {
            email: email.to_string(),
            kind,
            payload: payload.clone(),
        });
        Ok(())
    }
}
