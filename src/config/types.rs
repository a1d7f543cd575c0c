use std::collections::HashSet;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Settings file looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = ".translation-curator.json";

/// 設定項目ごとのバリデーションエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0].code")
    pub field_path: String,
    /// 修正方法を含むエラーメッセージ
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// 設定の読み込みエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// バリデーションエラー
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// ファイル読み込みエラー
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON パースエラー
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A selectable target language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageEntry {
    /// Human readable name, e.g. "French"
    pub label: String,
    /// Language code sent to the server, e.g. "fr"
    pub code: String,
}

impl LanguageEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self { label: label.into(), code: code.into() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CuratorSettings {
    /// Languages offered in the language filter.
    /// May be empty; codes chosen by the host are not checked against this list.
    pub languages: Vec<LanguageEntry>,

    /// Language the desk itself runs in.
    /// Used as the initial target language unless it is English.
    pub boot_language: String,

    /// Base URL of the code host, positions link to `{codeHost}/{app}/blob/{codeBranch}/...`.
    pub code_host: String,
    pub code_branch: String,

    /// Where the last chosen language is stored. Kept in memory when unset.
    pub preference_file: Option<PathBuf>,

    /// Log file for the host binary. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl CuratorSettings {
    /// # Errors
    /// - Empty or duplicated language code
    /// - Empty language label
    /// - Empty boot language, code host or code branch
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_codes = HashSet::new();

        for (index, language) in self.languages.iter().enumerate() {
            if language.code.is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}].code"),
                    "The language code cannot be empty. Example: \"fr\"",
                ));
            } else if !seen_codes.insert(language.code.as_str()) {
                errors.push(ValidationError::new(
                    format!("languages[{index}].code"),
                    format!("Duplicate language code '{}'", language.code),
                ));
            }
            if language.label.is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}].label"),
                    "The language label cannot be empty. Example: \"French\"",
                ));
            }
        }

        if self.boot_language.is_empty() {
            errors.push(ValidationError::new(
                "bootLanguage",
                "The boot language cannot be empty. Example: \"en\"",
            ));
        }

        if self.code_host.is_empty() {
            errors.push(ValidationError::new(
                "codeHost",
                "The code host cannot be empty. Example: \"https://github.com/frappe\"",
            ));
        }

        if self.code_branch.is_empty() {
            errors.push(ValidationError::new(
                "codeBranch",
                "The code branch cannot be empty. Example: \"develop\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CuratorSettings {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            boot_language: "en".to_string(),
            code_host: "https://github.com/frappe".to_string(),
            code_branch: "develop".to_string(),
            preference_file: None,
            log_file: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = CuratorSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn validate_accepts_empty_language_list() {
        let settings = CuratorSettings { languages: Vec::new(), ..CuratorSettings::default() };

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"bootLanguage": "fr", "languages": [{"label": "French", "code": "fr"}]}"#;

        let settings: CuratorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.boot_language, eq("fr"));
        assert_that!(settings.languages, elements_are![eq(&LanguageEntry::new("French", "fr"))]);
        assert_that!(settings.code_branch, eq("develop"));
        assert_that!(settings.preference_file, none());
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: CuratorSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.boot_language, eq("en"));
        assert_that!(settings.code_host, eq("https://github.com/frappe"));
        assert_that!(settings.languages, is_empty());
    }

    #[rstest]
    fn validate_duplicate_language_code() {
        let settings = CuratorSettings {
            languages: vec![LanguageEntry::new("French", "fr"), LanguageEntry::new("Français", "fr")],
            ..CuratorSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languages[1].code")),
                field!(ValidationError.message, contains_substring("Duplicate language code 'fr'"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_language_fields() {
        let settings = CuratorSettings {
            languages: vec![LanguageEntry::new("", "")],
            ..CuratorSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                field!(ValidationError.field_path, eq("languages[0].code")),
                field!(ValidationError.field_path, eq("languages[0].label"))
            ])
        );
    }

    #[rstest]
    #[case::boot_language(CuratorSettings { boot_language: String::new(), ..CuratorSettings::default() }, "bootLanguage")]
    #[case::code_host(CuratorSettings { code_host: String::new(), ..CuratorSettings::default() }, "codeHost")]
    #[case::code_branch(CuratorSettings { code_branch: String::new(), ..CuratorSettings::default() }, "codeBranch")]
    fn validate_required_fields(#[case] settings: CuratorSettings, #[case] field_path: &str) {
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = CuratorSettings {
            boot_language: String::new(),
            code_branch: String::new(),
            ..CuratorSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. bootLanguage"));
        assert_that!(error_message, contains_substring("2. codeBranch"));
    }
}
