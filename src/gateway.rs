//! Remote service boundary: listing, auxiliary info and batch submission.
mod error;
mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use error::GatewayError;
pub use memory::{
    Gate,
    GatewayFixture,
    MemoryGateway,
    Operation,
};

use crate::types::{
    AuxiliaryInfo,
    ContributionRecord,
    Edit,
    Record,
};

/// Edits sent in one submission, keyed by record id.
pub type EditBatch = BTreeMap<String, Edit>;

/// Network operations consumed by the editing session.
///
/// Calls are awaited on the session's single logical thread, so implementations
/// need not be `Send`.
pub trait RemoteGateway {
    /// Lists candidate records for `language`, optionally filtered by source text.
    fn list_records(
        &self,
        language: &str,
        search_text: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Record>, GatewayError>>;

    fn get_auxiliary_info(
        &self,
        record_id: &str,
        language: &str,
    ) -> impl Future<Output = Result<AuxiliaryInfo, GatewayError>>;

    /// Lists the current user's own contributions for `language`.
    fn list_contributions(
        &self,
        language: &str,
    ) -> impl Future<Output = Result<Vec<ContributionRecord>, GatewayError>>;

    fn submit_batch(
        &self,
        edits: &EditBatch,
        language: &str,
    ) -> impl Future<Output = Result<(), GatewayError>>;
}

impl<G: RemoteGateway + ?Sized> RemoteGateway for Arc<G> {
    fn list_records(
        &self,
        language: &str,
        search_text: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Record>, GatewayError>> {
        (**self).list_records(language, search_text)
    }

    fn get_auxiliary_info(
        &self,
        record_id: &str,
        language: &str,
    ) -> impl Future<Output = Result<AuxiliaryInfo, GatewayError>> {
        (**self).get_auxiliary_info(record_id, language)
    }

    fn list_contributions(
        &self,
        language: &str,
    ) -> impl Future<Output = Result<Vec<ContributionRecord>, GatewayError>> {
        (**self).list_contributions(language)
    }

    fn submit_batch(
        &self,
        edits: &EditBatch,
        language: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> {
        (**self).submit_batch(edits, language)
    }
}
