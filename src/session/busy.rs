//! Freeze/unfreeze discipline for the primary fetch path.

use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use super::notification::{
    Notification,
    Notifier,
};

pub(crate) const FETCHING_LABEL: &str = "Fetching...";
pub(crate) const SUBMITTING_LABEL: &str = "Submitting...";

/// Nesting counter behind the page-wide busy overlay.
#[derive(Debug)]
pub(crate) struct BusyIndicator {
    /// Number of live guards
    depth: AtomicUsize,
    /// Sends freeze and unfreeze events
    notifier: Notifier,
}

impl BusyIndicator {
    pub(crate) const fn new(notifier: Notifier) -> Self {
        Self { depth: AtomicUsize::new(0), notifier }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    /// Marks the session busy until the guard is dropped. Nests with other guards.
    pub(crate) fn enter(&self, label: &str) -> BusyGuard<'_> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        self.freeze(label)
    }

    /// Like [`Self::enter`], but only when nothing else holds the indicator.
    pub(crate) fn try_enter(&self, label: &str) -> Option<BusyGuard<'_>> {
        self.depth.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(self.freeze(label))
    }

    fn freeze(&self, label: &str) -> BusyGuard<'_> {
        tracing::debug!(label = %label, "Freezing interaction");
        self.notifier.send(Notification::Frozen { label: label.to_string() });
        BusyGuard { indicator: self }
    }
}

/// Releases its hold on the busy indicator when dropped, on every exit path.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    /// Indicator to release
    indicator: &'a BusyIndicator,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.indicator.depth.fetch_sub(1, Ordering::AcqRel) == 1 {
            tracing::debug!("Unfreezing interaction");
            self.indicator.notifier.send(Notification::Unfrozen);
        }
    }
}
