//! Pending edits keyed by record id.

use std::collections::BTreeMap;

use crate::gateway::EditBatch;
use crate::types::Edit;

/// How [`EditLedger::apply`] changed the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerChange {
    /// A new entry was created
    Inserted,
    /// An existing entry now holds different text
    Updated,
    /// The entry was dropped because the text is empty or back to the original
    Removed,
    /// Nothing changed
    Unchanged,
}

/// Edits that have not been submitted yet.
///
/// Holds an entry for a record exactly when its current form value is non-empty and differs
/// from the record's translated text as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLedger {
    /// Pending edits keyed by record id.
    entries: BTreeMap<String, Edit>,
}

impl EditLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `candidate` as the current form state of its record.
    ///
    /// `original_text` is the record's translated text at load time, never a previous
    /// ledger value.
    pub fn apply(&mut self, candidate: Edit, original_text: &str) -> LedgerChange {
        if candidate.translated_text.is_empty() || candidate.translated_text == original_text {
            return if self.entries.remove(&candidate.id).is_some() {
                LedgerChange::Removed
            } else {
                LedgerChange::Unchanged
            };
        }

        let change = match self.entries.get(&candidate.id) {
            None => LedgerChange::Inserted,
            Some(existing) if *existing == candidate => return LedgerChange::Unchanged,
            Some(_) => LedgerChange::Updated,
        };
        self.entries.insert(candidate.id.clone(), candidate);
        change
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Edit> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.entries.values()
    }

    /// Snapshot of every entry, ready to be submitted. The ledger itself is left as is.
    #[must_use]
    pub fn flush(&self) -> EditBatch {
        self.entries.clone()
    }

    /// Empties the ledger. Only called once a submission is confirmed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::record;
    use crate::types::Record;

    #[fixture]
    fn untranslated() -> Record {
        record("a", "Hello", None)
    }

    #[fixture]
    fn translated() -> Record {
        record("b", "Good morning", Some("Bonjour"))
    }

    #[rstest]
    fn test_diverging_text_creates_entry(untranslated: Record) {
        let mut ledger = EditLedger::new();

        let change = ledger.apply(Edit::from_record(&untranslated, "Salut"), "");

        assert_that!(change, eq(LedgerChange::Inserted));
        assert_that!(ledger.size(), eq(1));
        assert_that!(ledger.get("a").map(|edit| edit.translated_text.as_str()), some(eq("Salut")));
    }

    #[rstest]
    fn test_repeated_edits_keep_one_entry(translated: Record) {
        let mut ledger = EditLedger::new();

        ledger.apply(Edit::from_record(&translated, "Salut"), "Bonjour");
        let change = ledger.apply(Edit::from_record(&translated, "Coucou"), "Bonjour");

        assert_that!(change, eq(LedgerChange::Updated));
        assert_that!(ledger.size(), eq(1));
        assert_that!(ledger.get("b").map(|edit| edit.translated_text.as_str()), some(eq("Coucou")));
    }

    #[rstest]
    fn test_same_text_twice_is_unchanged(translated: Record) {
        let mut ledger = EditLedger::new();

        ledger.apply(Edit::from_record(&translated, "Salut"), "Bonjour");
        let change = ledger.apply(Edit::from_record(&translated, "Salut"), "Bonjour");

        assert_that!(change, eq(LedgerChange::Unchanged));
    }

    #[rstest]
    fn test_reverting_to_original_removes_entry(translated: Record) {
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&translated, "Salut"), "Bonjour");

        let change = ledger.apply(Edit::from_record(&translated, "Bonjour"), "Bonjour");

        assert_that!(change, eq(LedgerChange::Removed));
        assert_that!(ledger.is_empty(), eq(true));
    }

    #[rstest]
    fn test_original_value_never_creates_entry(translated: Record) {
        let mut ledger = EditLedger::new();

        let change = ledger.apply(Edit::from_record(&translated, "Bonjour"), "Bonjour");

        assert_that!(change, eq(LedgerChange::Unchanged));
        assert_that!(ledger.contains("b"), eq(false));
    }

    #[rstest]
    #[case::untranslated_record(record("a", "Hello", None), "")]
    #[case::translated_record(record("b", "Good morning", Some("Bonjour")), "Bonjour")]
    fn test_clearing_removes_entry(#[case] record: Record, #[case] original: &str) {
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&record, "Salut"), original);

        let change = ledger.apply(Edit::from_record(&record, ""), original);

        assert_that!(change, eq(LedgerChange::Removed));
        assert_that!(ledger.size(), eq(0));
    }

    #[rstest]
    fn test_flush_is_read_only(untranslated: Record, translated: Record) {
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&untranslated, "Salut"), "");
        ledger.apply(Edit::from_record(&translated, "Coucou"), "Bonjour");

        let batch = ledger.flush();

        let ids: Vec<&str> = batch.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_that!(ledger.size(), eq(2));
    }

    #[rstest]
    fn test_clear_empties(untranslated: Record) {
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&untranslated, "Salut"), "");

        ledger.clear();

        assert_that!(ledger.size(), eq(0));
    }
}
