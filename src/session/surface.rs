//! Views handed to the host page: record list, edit form and confirmation table.

use serde::{
    Deserialize,
    Serialize,
};

use super::EditLedger;
use crate::config::CuratorSettings;
use crate::status::{
    IndicatorColor,
    StatusIndicator,
    contribution_color,
};
use crate::types::{
    AuxiliaryInfo,
    ContributionRecord,
    ContributionStatus,
    Position,
    Record,
};

/// One entry of the record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordListItem {
    /// Record id
    pub id: String,
    /// Text shown in the list
    pub source_text: String,
    /// Status indicator
    pub status: StatusIndicator,
    /// Whether the record is open for editing
    pub active: bool,
    /// Whether the record has a pending edit.
    pub dirty: bool,
}

/// One entry of the contributions panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionListItem {
    /// Contribution id
    pub id: String,
    /// Text shown in the panel
    pub source_text: String,
    /// Review state
    pub status: ContributionStatus,
    /// Indicator colour for the review state
    pub color: IndicatorColor,
}

impl From<&ContributionRecord> for ContributionListItem {
    fn from(contribution: &ContributionRecord) -> Self {
        Self {
            id: contribution.id.clone(),
            source_text: contribution.source_text.clone(),
            status: contribution.contribution_status.clone(),
            color: contribution_color(contribution),
        }
    }
}

/// A position rendered for display; `url` is absent for `DocType` positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionView {
    /// Path as reported by the server
    pub path: String,
    /// Link to the source line
    pub url: Option<String>,
}

impl PositionView {
    fn new(position: &Position, settings: &CuratorSettings) -> Self {
        Self {
            path: position.path.clone(),
            url: position.code_url(&settings.code_host, &settings.code_branch),
        }
    }
}

/// The edit form for the selected record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSurface {
    /// Record id
    pub id: String,
    /// Header indicator
    pub status: StatusIndicator,
    /// Read-only source text
    pub source_text: String,
    /// Read-only context
    pub context: Option<String>,
    /// Read-only `DocType`
    pub doctype: Option<String>,
    /// Context field is hidden when empty
    pub show_context: bool,
    /// `DocType` field is hidden when empty
    pub show_doctype: bool,
    /// Pending edit if there is one, otherwise the loaded translation.
    pub translated_text: String,
    /// Translation as loaded
    pub original_text: String,
    /// Whether a pending edit exists
    pub dirty: bool,
    /// `None` until the auxiliary info for this selection has arrived.
    pub positions: Option<Vec<PositionView>>,
}

impl EditSurface {
    pub(crate) fn build(
        record: &Record,
        ledger: &EditLedger,
        auxiliary: Option<&AuxiliaryInfo>,
        settings: &CuratorSettings,
    ) -> Self {
        let pending = ledger.get(&record.id);
        let translated_text = pending.map_or_else(
            || record.original_text().to_string(),
            |edit| edit.translated_text.clone(),
        );
        let positions = auxiliary.map(|info| {
            info.positions.iter().map(|position| PositionView::new(position, settings)).collect()
        });

        Self {
            id: record.id.clone(),
            status: StatusIndicator::for_record(record),
            source_text: record.source_text.clone(),
            context: record.context.clone(),
            doctype: record.doctype.clone(),
            show_context: record.context.as_deref().is_some_and(|context| !context.is_empty()),
            show_doctype: record.doctype.as_deref().is_some_and(|doctype| !doctype.is_empty()),
            translated_text,
            original_text: record.original_text().to_string(),
            dirty: pending.is_some(),
            positions,
        }
    }
}

/// A pending edit as listed in the confirmation table. `source` is the record id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfirmationRow {
    /// Read-only source text
    pub source_text: String,
    /// Record id
    pub source: String,
    /// Editable during review.
    pub translated_text: String,
}

/// Confirmation shown before a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfirmationView {
    /// Language the batch is submitted for
    pub language: String,
    /// One row per pending edit
    pub rows: Vec<ConfirmationRow>,
}

impl ConfirmationView {
    pub(crate) fn new(language: String, ledger: &EditLedger) -> Self {
        let rows = ledger
            .iter()
            .map(|edit| ConfirmationRow {
                source_text: edit.source_text.clone(),
                source: edit.id.clone(),
                translated_text: edit.translated_text.clone(),
            })
            .collect();
        Self { language, rows }
    }

    /// Replaces the reviewed text of the row for `source`. Returns false for unknown rows.
    pub fn revise(&mut self, source: &str, translated_text: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|row| row.source == source) {
            Some(row) => {
                row.translated_text = translated_text.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::{
        google_record,
        record,
    };
    use crate::types::Edit;

    #[googletest::test]
    fn test_surface_prefers_pending_edit() {
        let record = record("b", "Good morning", Some("Bonjour"));
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&record, "Salut"), "Bonjour");

        let surface = EditSurface::build(&record, &ledger, None, &CuratorSettings::default());

        expect_that!(surface.translated_text, eq("Salut"));
        expect_that!(surface.original_text, eq("Bonjour"));
        expect_that!(surface.dirty, eq(true));
        expect_that!(surface.positions, none());
    }

    #[googletest::test]
    fn test_surface_hides_empty_context_and_doctype() {
        let mut record = google_record("a", "Hello", "Bonjour");
        record.context = Some(String::new());
        record.doctype = Some("Note".to_string());

        let surface =
            EditSurface::build(&record, &EditLedger::new(), None, &CuratorSettings::default());

        expect_that!(surface.show_context, eq(false));
        expect_that!(surface.show_doctype, eq(true));
        expect_that!(surface.status.color, eq(IndicatorColor::Orange));
        expect_that!(surface.dirty, eq(false));
    }

    #[googletest::test]
    fn test_surface_renders_positions() {
        let record = record("a", "Hello", None);
        let auxiliary = AuxiliaryInfo {
            positions: vec![
                Position {
                    path: "apps/frappe/frappe/www/login.py".to_string(),
                    line_no: 7,
                    app: "frappe".to_string(),
                },
                Position { path: "DocType: User".to_string(), line_no: 0, app: "frappe".to_string() },
            ],
        };

        let surface = EditSurface::build(
            &record,
            &EditLedger::new(),
            Some(&auxiliary),
            &CuratorSettings::default(),
        );

        let positions = surface.positions.unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(
            positions[0].url.as_deref(),
            Some("https://github.com/frappe/frappe/blob/develop/frappe/www/login.py#L7")
        );
        assert_eq!(positions[1].url, None);
    }

    #[googletest::test]
    fn test_confirmation_rows_follow_ledger() {
        let mut ledger = EditLedger::new();
        ledger.apply(Edit::from_record(&record("a", "Hello", None), "Salut"), "");

        let mut view = ConfirmationView::new("fr".to_string(), &ledger);

        expect_that!(view.rows.len(), eq(1));
        expect_that!(view.rows[0].source, eq("a"));
        expect_that!(view.rows[0].source_text, eq("Hello"));
        expect_that!(view.revise("a", "Coucou"), eq(true));
        expect_that!(view.revise("zzz", "Coucou"), eq(false));
        expect_that!(view.rows[0].translated_text, eq("Coucou"));
    }

    #[googletest::test]
    fn test_contribution_item_color() {
        let contribution = ContributionRecord {
            id: "c".to_string(),
            source_text: "Hello".to_string(),
            contribution_status: ContributionStatus::Approved,
        };

        let item = ContributionListItem::from(&contribution);

        expect_that!(item.color, eq(IndicatorColor::Green));
    }
}
