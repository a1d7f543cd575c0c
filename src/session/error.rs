use thiserror::Error;

/// Commands the host issued at a moment the session cannot honour them.
///
/// Gateway failures are never reported through this type; they become notifications.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A reload or submission is running and interaction is frozen
    #[error("The session is busy")]
    Busy,
    /// No target language has been chosen yet
    #[error("No target language selected")]
    NoLanguage,
    /// Editing requires a selected record
    #[error("No record is selected")]
    NoSelection,
    /// Submission requires at least one pending edit
    #[error("There are no translations to submit")]
    NothingToSubmit,
}
