//! Surfacing envelopes to an operator.
//!
//! The client never notifies anyone. Presentation code calls a [`Notifier`]
//! explicitly with the envelope it got back.

use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::mpsc;

use crate::{Envelope, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A message ready to be shown to an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    /// Builds the operator-facing message for `envelope`, prefixed with
    /// `context` (e.g. `"refund"`).
    pub fn from_envelope(context: &str, envelope: &Envelope) -> Self {
        if envelope.is_success() {
            return Notification {
                level: Level::Success,
                message: format!("{context}: ok"),
            };
        }
        let message = match envelope.failure {
            Some(FailureKind::Parse) => format!("{context}: could not read the server response"),
            Some(FailureKind::Timeout) => format!("{context}: the device did not answer in time"),
            Some(FailureKind::Transport) => format!("{context}: {}", envelope.message()),
            Some(FailureKind::Remote) | None => format!("{context}: API error: {}", envelope.message()),
        };
        Notification {
            level: Level::Error,
            message,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, context: &str, envelope: &Envelope);

    /// Notifies only when the envelope is negative.
    async fn notify_failure(&self, context: &str, envelope: &Envelope) {
        if !envelope.is_success() {
            self.notify(context, envelope).await;
        }
    }
}

/// Writes notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, context: &str, envelope: &Envelope) {
        let notification = Notification::from_envelope(context, envelope);
        match notification.level {
            Level::Success => info!("{}", notification.message),
            Level::Error => warn!("{}", notification.message),
        }
    }
}

/// Forwards notifications to a channel, for a UI task to drain.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Creates a notifier and the receiving end of its channel.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, context: &str, envelope: &Envelope) {
        // A closed receiver means nobody is displaying anymore.
        let _ = self.tx.send(Notification::from_envelope(context, envelope)).await;
    }
}
