// ── User-facing notifications ──
//
// Mutations report their outcome as toast-style notifications. The sink
// is a trait object so the CLI can print them, tests can collect them,
// and headless callers can route them into tracing.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

/// How long a success notification stays visible.
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
    /// Display duration hint. `None` leaves it to the presenter.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: None,
            duration: Some(SUCCESS_DURATION),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: Some(description.into()),
            duration: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Receives mutation outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs notifications through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(title = %notification.title, "notification"),
            NotificationLevel::Error => warn!(
                title = %notification.title,
                description = notification.description.as_deref().unwrap_or_default(),
                "notification"
            ),
        }
    }
}

/// Forwards notifications to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Receiver dropped: nobody is listening any more.
        let _ = self.tx.send(notification);
    }
}
