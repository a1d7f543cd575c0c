//! Single selection over a [`RecordSet`].

use super::RecordSet;

/// Which record is open for editing.
///
/// The selected id, when set, always names a record of the set it was last checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    /// Id of the open record
    selected: Option<String>,
}

impl SelectionCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects `id`. Ids missing from `records` are ignored.
    pub fn select(&mut self, records: &RecordSet, id: &str) -> bool {
        if !records.contains(id) {
            tracing::debug!(id = %id, "Ignoring selection of unknown record");
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Moves to the following record. No-op on the last record or without a selection.
    pub fn next(&mut self, records: &RecordSet) -> bool {
        let Some(index) = self.current_index(records) else {
            return false;
        };
        self.move_to(records, index.checked_add(1))
    }

    /// Moves to the preceding record. No-op on the first record or without a selection.
    pub fn prev(&mut self, records: &RecordSet) -> bool {
        let Some(index) = self.current_index(records) else {
            return false;
        };
        self.move_to(records, index.checked_sub(1))
    }

    /// Keeps the selection only if `records` still has it.
    pub fn retain(&mut self, records: &RecordSet) -> bool {
        if self.selected.as_deref().is_some_and(|id| !records.contains(id)) {
            self.selected = None;
        }
        self.selected.is_some()
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    fn current_index(&self, records: &RecordSet) -> Option<usize> {
        self.selected.as_deref().and_then(|id| records.position(id))
    }

    fn move_to(&mut self, records: &RecordSet, index: Option<usize>) -> bool {
        match index.and_then(|index| records.get_index(index)) {
            Some(record) => {
                self.selected = Some(record.id.clone());
                true
            }
            None => false,
        }
    }
}
