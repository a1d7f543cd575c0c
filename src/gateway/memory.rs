//! In-memory gateway backed by a JSON fixture.
//!
//! Used by the host binary and by tests. Operations can be made to fail or be held
//! until a [`Gate`] is released, which lets callers complete responses out of order.

use std::collections::{
    HashMap,
    VecDeque,
};
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use tokio::sync::{
    Mutex,
    oneshot,
};

use super::{
    EditBatch,
    GatewayError,
    RemoteGateway,
};
use crate::types::{
    AuxiliaryInfo,
    ContributionRecord,
    ContributionStatus,
    Position,
    Record,
};

/// Gateway operations, used to script failures and holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list_records`
    ListRecords,
    /// `get_auxiliary_info`
    AuxiliaryInfo,
    /// `list_contributions`
    ListContributions,
    /// `submit_batch`
    SubmitBatch,
}

/// Server-side data served by [`MemoryGateway`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayFixture {
    /// Records per language code.
    pub records: HashMap<String, Vec<Record>>,
    /// Contributions per language code.
    pub contributions: HashMap<String, Vec<ContributionRecord>>,
    /// Positions per record id.
    pub positions: HashMap<String, Vec<Position>>,
}

impl GatewayFixture {
    /// # Errors
    /// - File read error
    /// - JSON parse error
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        tracing::debug!("Loading gateway fixture from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Releases one held gateway call. Dropping the gate releases it as well.
#[derive(Debug)]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        // The call may already have been abandoned.
        let _ = self.0.send(());
    }
}

/// Mutable gateway state.
#[derive(Debug, Default)]
struct Inner {
    /// Data served to callers
    fixture: GatewayFixture,
    /// Scripted failure messages
    failures: HashMap<Operation, String>,
    /// Calls to hold, oldest first
    holds: HashMap<Operation, VecDeque<oneshot::Receiver<()>>>,
    /// Call counters
    calls: HashMap<Operation, usize>,
    /// Accepted batches with their language
    submitted: Vec<(String, EditBatch)>,
}

/// [`RemoteGateway`] serving a [`GatewayFixture`] from memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    /// Fixture and scripting state
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new(fixture: GatewayFixture) -> Self {
        Self { inner: Mutex::new(Inner { fixture, ..Inner::default() }) }
    }

    /// Makes every subsequent `operation` fail with a transport error until [`Self::recover`].
    pub async fn fail(&self, operation: Operation, message: impl Into<String>) {
        self.inner.lock().await.failures.insert(operation, message.into());
    }

    pub async fn recover(&self, operation: Operation) {
        self.inner.lock().await.failures.remove(&operation);
    }

    /// Holds the next call of `operation` until the returned gate is released.
    pub async fn hold(&self, operation: Operation) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.inner.lock().await.holds.entry(operation).or_default().push_back(receiver);
        Gate(sender)
    }

    /// Number of calls made for `operation`, including failed ones.
    pub async fn calls(&self, operation: Operation) -> usize {
        self.inner.lock().await.calls.get(&operation).copied().unwrap_or_default()
    }

    /// Batches accepted so far, with the language they were submitted for.
    pub async fn submitted(&self) -> Vec<(String, EditBatch)> {
        self.inner.lock().await.submitted.clone()
    }

    /// Counts the call, waits for a pending hold, then applies any scripted failure.
    async fn admit(&self, operation: Operation) -> Result<(), GatewayError> {
        let hold = {
            let mut inner = self.inner.lock().await;
            *inner.calls.entry(operation).or_default() += 1;
            inner.holds.get_mut(&operation).and_then(VecDeque::pop_front)
        };
        if let Some(hold) = hold {
            // A dropped gate counts as a release.
            let _ = hold.await;
        }

        let inner = self.inner.lock().await;
        match inner.failures.get(&operation) {
            Some(message) => Err(GatewayError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

impl RemoteGateway for MemoryGateway {
    async fn list_records(
        &self,
        language: &str,
        search_text: Option<&str>,
    ) -> Result<Vec<Record>, GatewayError> {
        self.admit(Operation::ListRecords).await?;

        let needle = search_text.map(str::to_lowercase);
        let inner = self.inner.lock().await;
        let records = inner.fixture.records.get(language).map_or_else(Vec::new, |records| {
            records
                .iter()
                .filter(|record| {
                    needle
                        .as_deref()
                        .is_none_or(|needle| record.source_text.to_lowercase().contains(needle))
                })
                .cloned()
                .collect()
        });
        drop(inner);

        tracing::debug!(language = %language, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn get_auxiliary_info(
        &self,
        record_id: &str,
        language: &str,
    ) -> Result<AuxiliaryInfo, GatewayError> {
        self.admit(Operation::AuxiliaryInfo).await?;

        let inner = self.inner.lock().await;
        let positions = inner.fixture.positions.get(record_id).cloned().unwrap_or_default();
        tracing::debug!(record_id = %record_id, language = %language, "Fetched auxiliary info");
        Ok(AuxiliaryInfo { positions })
    }

    async fn list_contributions(
        &self,
        language: &str,
    ) -> Result<Vec<ContributionRecord>, GatewayError> {
        self.admit(Operation::ListContributions).await?;

        let inner = self.inner.lock().await;
        Ok(inner.fixture.contributions.get(language).cloned().unwrap_or_default())
    }

    async fn submit_batch(&self, edits: &EditBatch, language: &str) -> Result<(), GatewayError> {
        self.admit(Operation::SubmitBatch).await?;

        if edits.is_empty() {
            return Err(GatewayError::Rejected("No translations to submit".to_string()));
        }

        let mut inner = self.inner.lock().await;
        let fixture = &mut inner.fixture;
        let records = fixture.records.entry(language.to_string()).or_default();
        for edit in edits.values() {
            if let Some(record) = records.iter_mut().find(|record| record.id == edit.id) {
                record.translated_text = Some(edit.translated_text.clone());
                record.translated = true;
                record.translated_by_google = false;
            }
        }
        let contributions = fixture.contributions.entry(language.to_string()).or_default();
        contributions.extend(edits.values().map(|edit| ContributionRecord {
            id: edit.id.clone(),
            source_text: edit.source_text.clone(),
            contribution_status: ContributionStatus::Pending,
        }));
        inner.submitted.push((language.to_string(), edits.clone()));

        tracing::debug!(language = %language, count = edits.len(), "Accepted translations");
        Ok(())
    }
}
