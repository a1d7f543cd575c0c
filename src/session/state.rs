//! Mutable state owned by a session controller.

use serde::Serialize;

use super::{
    ConfirmationRow,
    EditLedger,
    RecordSet,
    SelectionCursor,
};
use crate::types::{
    AuxiliaryInfo,
    ContributionRecord,
    Edit,
    Record,
};

/// Language and search text the record list is loaded for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Target language code
    pub language: Option<String>,
    /// Case-insensitive match on the source text
    pub search_text: Option<String>,
}

impl Filter {
    /// Empty strings mean "not set".
    fn normalize(&mut self) {
        if self.language.as_deref().is_some_and(str::is_empty) {
            self.language = None;
        }
        if self.search_text.as_deref().is_some_and(str::is_empty) {
            self.search_text = None;
        }
    }
}

/// Session state.
///
/// `generation` is bumped whenever a reload is requested; results captured under an older
/// generation are dropped. `selection_epoch` plays the same role for auxiliary info.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// Filter the current records were requested for
    pub(crate) filter: Filter,
    /// Bumped on every reload request
    pub(crate) generation: u64,
    /// Bumped on every selection
    pub(crate) selection_epoch: u64,
    /// Records of the last applied reload
    pub(crate) records: RecordSet,
    /// Unsubmitted edits
    pub(crate) ledger: EditLedger,
    /// Record open for editing
    pub(crate) cursor: SelectionCursor,
    /// Auxiliary info of the selected record, once fetched
    pub(crate) auxiliary: Option<AuxiliaryInfo>,
    /// The user's contributions for the filter language
    pub(crate) contributions: Vec<ContributionRecord>,
}

impl SessionState {
    /// Applies a filter update and resets the selection.
    ///
    /// Contributions of the previous language are dropped. Returns whether the language changed.
    pub(crate) fn change_filter(&mut self, update: impl FnOnce(&mut Filter)) -> bool {
        let previous_language = self.filter.language.clone();
        update(&mut self.filter);
        self.filter.normalize();
        self.reset_selection();
        let language_changed = self.filter.language != previous_language;
        if language_changed {
            self.contributions.clear();
        }
        language_changed
    }

    pub(crate) const fn begin_reload(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(crate) const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Starts a new selection: previous auxiliary info no longer applies.
    pub(crate) fn begin_selection(&mut self) -> u64 {
        self.selection_epoch = self.selection_epoch.wrapping_add(1);
        self.auxiliary = None;
        self.selection_epoch
    }

    pub(crate) fn reset_selection(&mut self) {
        self.cursor.reset();
        self.begin_selection();
    }

    /// Replaces the record set with a freshly loaded one.
    ///
    /// The ledger is left alone; edits outlive the record set they were made on.
    pub(crate) fn swap_records(&mut self, records: RecordSet) {
        self.records = records;
        if !self.cursor.retain(&self.records) {
            self.begin_selection();
        }
    }

    #[must_use]
    pub(crate) fn selected_record(&self) -> Option<&Record> {
        self.cursor.selected().and_then(|id| self.records.get(id))
    }

    /// Feeds reviewed confirmation rows back through the dirty rules.
    ///
    /// Rows without a pending edit are ignored.
    pub(crate) fn apply_review(&mut self, rows: &[ConfirmationRow]) {
        for row in rows {
            let Some(pending) = self.ledger.get(&row.source) else {
                tracing::warn!(source = %row.source, "Ignoring reviewed row without a pending edit");
                continue;
            };
            let candidate = Edit { translated_text: row.translated_text.clone(), ..pending.clone() };
            let original =
                self.records.get(&row.source).map(Record::original_text).unwrap_or_default();
            self.ledger.apply(candidate, original);
        }
    }
}
