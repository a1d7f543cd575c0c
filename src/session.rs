//! Editing session: record list, pending edits, selection and their orchestration.
mod busy;
mod controller;
mod cursor;
mod error;
mod language;
mod ledger;
mod notification;
mod record_set;
mod state;
mod surface;

pub use controller::{
    ReloadOutcome,
    SelectOutcome,
    SessionController,
    SubmitOutcome,
};
pub use cursor::SelectionCursor;
pub use error::SessionError;
pub use language::{
    InitialLanguage,
    LanguageOption,
    language_options,
    resolve_initial_language,
};
pub use ledger::{
    EditLedger,
    LedgerChange,
};
pub use notification::{
    FetchOperation,
    Notification,
};
pub use record_set::RecordSet;
pub use state::Filter;
pub use surface::{
    ConfirmationRow,
    ConfirmationView,
    ContributionListItem,
    EditSurface,
    PositionView,
    RecordListItem,
};
