//! Core types shared by the gateway and the editing session.

use serde::{
    Deserialize,
    Serialize,
};

/// Prefix the server uses for positions that point at a `DocType` field rather than code.
pub const DOCTYPE_POSITION_PREFIX: &str = "DocType: ";

/// One source string eligible for translation in the active language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    /// Stable identifier, also used as `source` when submitting
    pub id: String,
    /// Text to translate
    pub source_text: String,
    /// Current translation on the server, if any
    #[serde(default)]
    pub translated_text: Option<String>,
    /// Disambiguation hint shown next to the source text
    #[serde(default)]
    pub context: Option<String>,
    /// `DocType` the string belongs to
    #[serde(default)]
    pub doctype: Option<String>,
    /// Whether a translation exists
    #[serde(default)]
    pub translated: bool,
    /// Whether the translation came from machine translation
    #[serde(default)]
    pub translated_by_google: bool,
}

impl Record {
    /// The translated text as loaded, with an absent translation read as empty.
    #[must_use]
    pub fn original_text(&self) -> &str {
        self.translated_text.as_deref().unwrap_or_default()
    }
}

/// Review state of one of the user's own contributions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ContributionStatus {
    /// Waiting for review
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Declined by a reviewer
    Rejected,
    /// Any status this client does not know about
    Other(String),
}

impl From<String> for ContributionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Approved" => Self::Approved,
            "Rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<ContributionStatus> for String {
    fn from(status: ContributionStatus) -> Self {
        match status {
            ContributionStatus::Pending => "Pending".to_string(),
            ContributionStatus::Approved => "Approved".to_string(),
            ContributionStatus::Rejected => "Rejected".to_string(),
            ContributionStatus::Other(value) => value,
        }
    }
}

/// A contribution made by the current user for the active language.
///
/// Lives in its own id space; never merged with [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContributionRecord {
    /// Contribution id, unrelated to record ids
    pub id: String,
    /// Source text the contribution translates
    pub source_text: String,
    /// Review state
    pub contribution_status: ContributionStatus,
}

/// Snapshot of the edit form for one record whose translated text diverged from the original.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edit {
    /// Id of the edited record
    pub id: String,
    /// Text as typed
    pub translated_text: String,
    /// Source text of the record
    pub source_text: String,
    /// Context of the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// `DocType` of the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctype: Option<String>,
}

impl Edit {
    /// Captures the current form values for `record` with `translated_text` as typed.
    #[must_use]
    pub fn from_record(record: &Record, translated_text: impl Into<String>) -> Self {
        Self {
            id: record.id.clone(),
            translated_text: translated_text.into(),
            source_text: record.source_text.clone(),
            context: record.context.clone(),
            doctype: record.doctype.clone(),
        }
    }
}

/// Where a source string occurs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Position {
    /// File path relative to the bench, or `DocType: ...`
    pub path: String,
    /// 1-based line number
    #[serde(default)]
    pub line_no: u32,
    /// App the file belongs to, also the repository name
    #[serde(default)]
    pub app: String,
}

impl Position {
    /// Returns a link to the source line, or `None` for `DocType` positions.
    ///
    /// `apps/{app}` is stripped from the path before it is joined onto the repository URL.
    #[must_use]
    pub fn code_url(&self, code_host: &str, branch: &str) -> Option<String> {
        if self.path.starts_with(DOCTYPE_POSITION_PREFIX) {
            return None;
        }
        let app_prefix = format!("apps/{}", self.app);
        let code_path = self.path.strip_prefix(&app_prefix).unwrap_or(&self.path);
        let code_path = code_path.trim_start_matches('/');
        let host = code_host.trim_end_matches('/');
        Some(format!("{host}/{}/blob/{branch}/{code_path}#L{}", self.app, self.line_no))
    }
}

/// Per-record details fetched lazily when a record is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuxiliaryInfo {
    /// Places where the source string occurs
    #[serde(default)]
    pub positions: Vec<Position>,
}
