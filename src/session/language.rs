//! Target language options and the initial language choice.

use serde::Serialize;

use crate::config::LanguageEntry;

/// Desk language that never doubles as a translation target.
const SOURCE_LANGUAGE: &str = "en";

/// An entry of the language select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    /// `"{label} ({code})"`
    pub label: String,
    /// Language code
    pub value: String,
}

#[must_use]
pub fn language_options(languages: &[LanguageEntry]) -> Vec<LanguageOption> {
    languages
        .iter()
        .map(|language| LanguageOption {
            label: format!("{} ({})", language.label, language.code),
            value: language.code.clone(),
        })
        .collect()
}

/// Outcome of choosing the language a session starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "language", rename_all = "snake_case")]
pub enum InitialLanguage {
    /// Load this language right away.
    Use(String),
    /// Nothing to go on; the host asks the user to pick a language.
    Prompt,
}

/// The stored preference wins, then the desk language unless it is English.
#[must_use]
pub fn resolve_initial_language(stored: Option<String>, boot_language: &str) -> InitialLanguage {
    match stored.filter(|language| !language.is_empty()) {
        Some(language) => InitialLanguage::Use(language),
        None if !boot_language.is_empty() && boot_language != SOURCE_LANGUAGE => {
            InitialLanguage::Use(boot_language.to_string())
        }
        None => InitialLanguage::Prompt,
    }
}
