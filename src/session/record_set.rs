//! Ordered candidate records for the active filter.

use crate::gateway::{
    GatewayError,
    RemoteGateway,
};
use crate::types::Record;

/// Records in the order the gateway returned them.
///
/// A set is never patched in place; each reload produces a new one that replaces the old.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Records in gateway order
    records: Vec<Record>,
}

impl RecordSet {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Fetches a fresh set from the gateway.
    ///
    /// The caller swaps it in only once it is available, so a failed load leaves the
    /// current set untouched.
    ///
    /// # Errors
    /// Gateway failure
    pub async fn load<G: RemoteGateway>(
        gateway: &G,
        language: &str,
        search_text: Option<&str>,
    ) -> Result<Self, GatewayError> {
        let records = gateway.list_records(language, search_text).await?;
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
