//! Messages pushed to the host page.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::status::PendingIndicator;

/// Gateway reads whose failure is reported as a [`Notification::FetchFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOperation {
    /// Record list
    Records,
    /// Positions of the selected record
    AuxiliaryInfo,
    /// Contributions panel
    Contributions,
}

/// Events pushed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Interaction is blocked; `label` describes the running operation.
    Frozen {
        /// Text shown on the overlay
        label: String,
    },
    /// Interaction is possible again.
    Unfrozen,
    /// The pending-edit indicator changed.
    Pending(PendingIndicator),
    /// A batch was accepted.
    Success {
        /// Message shown to the user
        message: String,
    },
    /// A read failed; whatever was shown before stays.
    FetchFailed {
        /// The failed read
        operation: FetchOperation,
        /// Gateway error text
        message: String,
    },
    /// A submission failed; the pending edits are kept.
    SubmitFailed {
        /// Gateway error text
        message: String,
    },
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    /// Channel to the host
    sender: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub(crate) const fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Delivers `notification`, dropping it when the host stopped listening.
    pub(crate) fn send(&self, notification: Notification) {
        if let Err(error) = self.sender.send(notification) {
            tracing::debug!("Notification dropped, receiver closed: {:?}", error.0);
        }
    }
}
