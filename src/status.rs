//! Status indicators derived from record and contribution flags.

use serde::Serialize;

use crate::types::{
    ContributionRecord,
    ContributionStatus,
    Record,
};

/// Indicator colours understood by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    /// Untranslated
    Red,
    /// Machine translated, or a pending contribution
    Orange,
    /// Community contribution
    Blue,
    /// Reviewed contribution
    Green,
}

impl IndicatorColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

/// Translation state of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordStatus {
    /// No translation yet
    Untranslated,
    /// Translated by machine translation
    GoogleTranslation,
    /// Translated by a user
    CommunityContribution,
}

impl RecordStatus {
    /// `translated_by_google` is only consulted for translated records.
    #[must_use]
    pub const fn derive(translated: bool, translated_by_google: bool) -> Self {
        match (translated, translated_by_google) {
            (false, _) => Self::Untranslated,
            (true, true) => Self::GoogleTranslation,
            (true, false) => Self::CommunityContribution,
        }
    }

    #[must_use]
    pub const fn of(record: &Record) -> Self {
        Self::derive(record.translated, record.translated_by_google)
    }

    #[must_use]
    pub const fn color(self) -> IndicatorColor {
        match self {
            Self::Untranslated => IndicatorColor::Red,
            Self::GoogleTranslation => IndicatorColor::Orange,
            Self::CommunityContribution => IndicatorColor::Blue,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Untranslated => "Untranslated",
            Self::GoogleTranslation => "Google Translation",
            Self::CommunityContribution => "Community Contribution",
        }
    }
}

/// Colour and label shown next to a record, both in the list and in the edit header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    /// Indicator colour
    pub color: IndicatorColor,
    /// Status text
    pub label: &'static str,
}

impl StatusIndicator {
    #[must_use]
    pub const fn for_record(record: &Record) -> Self {
        let status = RecordStatus::of(record);
        Self { color: status.color(), label: status.label() }
    }
}

/// Pending contributions are orange, anything already reviewed is green.
#[must_use]
pub fn contribution_color(contribution: &ContributionRecord) -> IndicatorColor {
    match contribution.contribution_status {
        ContributionStatus::Pending => IndicatorColor::Orange,
        _ => IndicatorColor::Green,
    }
}

/// Page indicator for unsent edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingIndicator {
    /// Number of pending edits
    pub count: usize,
    /// Empty when nothing is pending.
    pub label: String,
    /// `None` when nothing is pending
    pub color: Option<IndicatorColor>,
}

impl PendingIndicator {
    #[must_use]
    pub fn new(count: usize) -> Self {
        if count == 0 {
            return Self { count, label: String::new(), color: None };
        }
        Self {
            count,
            label: format!("{count} translations pending"),
            color: Some(IndicatorColor::Orange),
        }
    }

    /// The primary "Contribute Translations" action is only offered with pending edits.
    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.count > 0
    }
}
