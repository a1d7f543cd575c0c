//! Orchestration of reloads, selection, edits and submission.
//!
//! Commands take `&self` and only hold the state lock between suspension points, so the
//! host may drive several of them at once on one thread. Results that arrive after the
//! filter (or selection) moved on are dropped instead of applied.
//!
//! The contributions panel is loaded by [`SessionController::load_contributions`], apart
//! from the record reload, so a slow contributions response never holds up a command.

use std::fmt;

use serde::Serialize;
use tokio::sync::{
    Mutex,
    mpsc,
};

use super::busy::{
    BusyIndicator,
    FETCHING_LABEL,
    SUBMITTING_LABEL,
};
use super::language::{
    InitialLanguage,
    LanguageOption,
    language_options,
    resolve_initial_language,
};
use super::notification::{
    FetchOperation,
    Notification,
    Notifier,
};
use super::state::{
    Filter,
    SessionState,
};
use super::{
    ConfirmationView,
    ContributionListItem,
    EditLedger,
    EditSurface,
    LedgerChange,
    RecordListItem,
    RecordSet,
    SelectionCursor,
    SessionError,
};
use crate::config::CuratorSettings;
use crate::gateway::{
    GatewayError,
    RemoteGateway,
};
use crate::status::{
    PendingIndicator,
    StatusIndicator,
};
use crate::storage::{
    LANGUAGE_KEY,
    PreferenceStore,
};
use crate::types::Edit;

const SUBMITTED_MESSAGE: &str = "Successfully Submitted!";

/// Result of reloading the record list or the contributions panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReloadOutcome {
    /// The response replaced the previous list.
    Applied {
        /// Number of entries now listed
        count: usize,
    },
    /// The filter changed while the request was in flight; the response was dropped.
    Stale,
    /// The gateway failed; the previous records are still shown.
    Failed,
    /// No language is selected, nothing was requested.
    NoLanguage,
    /// Interaction is frozen; the filter was left unchanged and nothing was requested.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The record is open for editing.
    Selected {
        /// Id of the opened record
        id: String,
    },
    /// Unknown id or a navigation step past either end.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The batch was accepted and the ledger cleared.
    Submitted {
        /// Number of edits sent
        count: usize,
        /// Result of the record reload that followed
        reload: ReloadOutcome,
    },
    /// Nothing was cleared; the same edits can be submitted again.
    Failed,
}

/// Editing session driven by the host page.
pub struct SessionController<G, S> {
    /// Remote service the records come from
    gateway: G,
    /// Remembers the last chosen language
    store: Mutex<S>,
    /// Settings the session was created with
    settings: CuratorSettings,
    /// Filter, records, ledger and selection
    state: Mutex<SessionState>,
    /// Freezes interaction during reloads and submissions
    busy: BusyIndicator,
    /// Pushes notifications to the host
    notifier: Notifier,
}

impl<G, S> fmt::Debug for SessionController<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("gateway", &"<RemoteGateway>")
            .field("store", &"<PreferenceStore>")
            .field("settings", &self.settings)
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

impl<G: RemoteGateway, S: PreferenceStore> SessionController<G, S> {
    /// Creates a session together with the receiving end of its notifications.
    pub fn new(
        gateway: G,
        store: S,
        settings: CuratorSettings,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let notifier = Notifier::new(sender);
        let controller = Self {
            gateway,
            store: Mutex::new(store),
            settings,
            state: Mutex::new(SessionState::default()),
            busy: BusyIndicator::new(notifier.clone()),
            notifier,
        };
        (controller, receiver)
    }

    #[must_use]
    pub const fn settings(&self) -> &CuratorSettings {
        &self.settings
    }

    #[must_use]
    pub fn language_options(&self) -> Vec<LanguageOption> {
        language_options(&self.settings.languages)
    }

    /// Picks the starting language and loads its records.
    ///
    /// Returns [`InitialLanguage::Prompt`] without loading anything when the host has to
    /// ask the user; the answer is then passed to [`Self::on_language_change`].
    /// Contributions are left to [`Self::load_contributions`].
    pub async fn start(&self) -> InitialLanguage {
        let stored = match self.store.lock().await.get(LANGUAGE_KEY) {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!("Failed to read stored language: {error}");
                None
            }
        };

        let initial = resolve_initial_language(stored, &self.settings.boot_language);
        match &initial {
            InitialLanguage::Use(language) => {
                tracing::debug!(language = %language, "Starting session");
                self.on_language_change(language).await;
            }
            InitialLanguage::Prompt => tracing::debug!("No target language known, prompting"),
        }
        initial
    }

    /// Switches the target language and reloads the records.
    ///
    /// Returns [`ReloadOutcome::Busy`] without touching the filter while interaction is frozen.
    pub async fn on_language_change(&self, language: &str) -> ReloadOutcome {
        self.change_filter(|filter| filter.language = Some(language.to_string())).await
    }

    /// Filters the records by source text. Empty text clears the search.
    pub async fn on_search_change(&self, search_text: &str) -> ReloadOutcome {
        self.change_filter(|filter| filter.search_text = Some(search_text.to_string())).await
    }

    /// Replaces language and search text at once.
    pub async fn on_filter_change(&self, filter: Filter) -> ReloadOutcome {
        self.change_filter(|current| *current = filter).await
    }

    /// Reloads with the current filter, keeping the selection if the record is still listed.
    pub async fn on_refresh(&self) -> ReloadOutcome {
        if self.busy.is_busy() {
            tracing::debug!("Ignoring refresh while busy");
            return ReloadOutcome::Busy;
        }
        let (generation, filter) = {
            let mut state = self.state.lock().await;
            (state.begin_reload(), state.filter.clone())
        };
        self.reload(generation, &filter).await
    }

    /// Opens the record `id` for editing. Unknown ids are ignored.
    ///
    /// # Errors
    /// [`SessionError::Busy`] while interaction is frozen
    pub async fn on_select(&self, id: &str) -> Result<SelectOutcome, SessionError> {
        self.move_selection(|cursor, records| cursor.select(records, id)).await
    }

    /// # Errors
    /// [`SessionError::Busy`] while interaction is frozen
    pub async fn on_next(&self) -> Result<SelectOutcome, SessionError> {
        self.move_selection(SelectionCursor::next).await
    }

    /// # Errors
    /// [`SessionError::Busy`] while interaction is frozen
    pub async fn on_prev(&self) -> Result<SelectOutcome, SessionError> {
        self.move_selection(SelectionCursor::prev).await
    }

    /// Handles a change of the translated text field of the selected record.
    ///
    /// # Errors
    /// - [`SessionError::Busy`] while interaction is frozen
    /// - [`SessionError::NoSelection`] when no record is open
    pub async fn on_edit(&self, translated_text: &str) -> Result<LedgerChange, SessionError> {
        self.ensure_idle()?;

        let (id, change, pending) = {
            let mut state = self.state.lock().await;
            let SessionState { cursor, records, ledger, .. } = &mut *state;
            let record = cursor
                .selected()
                .and_then(|id| records.get(id))
                .ok_or(SessionError::NoSelection)?;
            let change =
                ledger.apply(Edit::from_record(record, translated_text), record.original_text());
            (record.id.clone(), change, ledger.size())
        };

        tracing::debug!(id = %id, ?change, pending, "Edit applied");
        self.notifier.send(Notification::Pending(PendingIndicator::new(pending)));
        Ok(change)
    }

    /// Lists the pending edits for review before they are sent.
    ///
    /// # Errors
    /// - [`SessionError::Busy`] while interaction is frozen
    /// - [`SessionError::NoLanguage`] before a language is chosen
    /// - [`SessionError::NothingToSubmit`] with an empty ledger
    pub async fn begin_submit(&self) -> Result<ConfirmationView, SessionError> {
        self.ensure_idle()?;

        let state = self.state.lock().await;
        let language = state.filter.language.clone().ok_or(SessionError::NoLanguage)?;
        if state.ledger.is_empty() {
            return Err(SessionError::NothingToSubmit);
        }
        Ok(ConfirmationView::new(language, &state.ledger))
    }

    /// Applies the reviewed rows and submits the whole ledger in one batch.
    ///
    /// The ledger is cleared only once the gateway accepted the batch; the record list is
    /// then reloaded. Contributions are left to [`Self::load_contributions`].
    ///
    /// # Errors
    /// - [`SessionError::Busy`] while interaction is frozen
    /// - [`SessionError::NoLanguage`] before a language is chosen
    /// - [`SessionError::NothingToSubmit`] when review left no pending edit
    pub async fn on_submit(
        &self,
        reviewed: &ConfirmationView,
    ) -> Result<SubmitOutcome, SessionError> {
        let busy = self.busy.try_enter(SUBMITTING_LABEL).ok_or(SessionError::Busy)?;

        let (language, batch) = {
            let mut state = self.state.lock().await;
            let language = state.filter.language.clone().ok_or(SessionError::NoLanguage)?;
            let before = state.ledger.size();
            state.apply_review(&reviewed.rows);
            let pending = state.ledger.size();
            if pending != before {
                self.notifier.send(Notification::Pending(PendingIndicator::new(pending)));
            }
            if state.ledger.is_empty() {
                return Err(SessionError::NothingToSubmit);
            }
            (language, state.ledger.flush())
        };
        let count = batch.len();
        tracing::debug!(language = %language, count, "Submitting translations");

        if let Err(error) = self.gateway.submit_batch(&batch, &language).await {
            tracing::error!(language = %language, count, "Failed to submit translations: {error}");
            self.notifier.send(Notification::SubmitFailed { message: error.to_string() });
            return Ok(SubmitOutcome::Failed);
        }

        self.state.lock().await.ledger.clear();
        drop(busy);
        self.notifier.send(Notification::Pending(PendingIndicator::new(0)));
        self.notifier.send(Notification::Success { message: SUBMITTED_MESSAGE.to_string() });

        let reload = self.on_refresh().await;
        Ok(SubmitOutcome::Submitted { count, reload })
    }

    /// Loads the contributions panel for the current filter.
    ///
    /// Independent of the record reload and of the busy indicator; the host starts it after
    /// each reload and may keep issuing commands while it runs. A response that arrives
    /// after the filter changed is dropped. On failure the previous list stays.
    pub async fn load_contributions(&self) -> ReloadOutcome {
        let (generation, language) = {
            let state = self.state.lock().await;
            (state.generation, state.filter.language.clone())
        };
        let Some(language) = language else {
            return ReloadOutcome::NoLanguage;
        };

        let loaded = self.gateway.list_contributions(&language).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            tracing::debug!(generation, current = state.generation, "Dropping stale contributions");
            return ReloadOutcome::Stale;
        }
        match loaded {
            Ok(contributions) => {
                let count = contributions.len();
                state.contributions = contributions;
                ReloadOutcome::Applied { count }
            }
            Err(error) => {
                drop(state);
                tracing::warn!(language = %language, "Failed to fetch contributions: {error}");
                self.report_fetch_failure(FetchOperation::Contributions, &error);
                ReloadOutcome::Failed
            }
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub async fn filter(&self) -> Filter {
        self.state.lock().await.filter.clone()
    }

    pub async fn selected(&self) -> Option<String> {
        self.state.lock().await.cursor.selected().map(ToString::to_string)
    }

    pub async fn records(&self) -> Vec<RecordListItem> {
        let state = self.state.lock().await;
        let active = state.cursor.selected();
        state
            .records
            .iter()
            .map(|record| RecordListItem {
                id: record.id.clone(),
                source_text: record.source_text.clone(),
                status: StatusIndicator::for_record(record),
                active: active == Some(record.id.as_str()),
                dirty: state.ledger.contains(&record.id),
            })
            .collect()
    }

    pub async fn contributions(&self) -> Vec<ContributionListItem> {
        self.state.lock().await.contributions.iter().map(ContributionListItem::from).collect()
    }

    /// The edit form for the selected record, if any.
    pub async fn edit_surface(&self) -> Option<EditSurface> {
        let state = self.state.lock().await;
        let record = state.selected_record()?;
        Some(EditSurface::build(record, &state.ledger, state.auxiliary.as_ref(), &self.settings))
    }

    pub async fn pending_indicator(&self) -> PendingIndicator {
        PendingIndicator::new(self.state.lock().await.ledger.size())
    }

    /// Whether "Contribute Translations" is enabled.
    pub async fn submit_enabled(&self) -> bool {
        self.pending_indicator().await.submit_enabled()
    }

    /// Copy of the pending edits.
    pub async fn ledger(&self) -> EditLedger {
        self.state.lock().await.ledger.clone()
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.busy.is_busy() { Err(SessionError::Busy) } else { Ok(()) }
    }

    async fn change_filter(&self, update: impl FnOnce(&mut Filter)) -> ReloadOutcome {
        if self.busy.is_busy() {
            tracing::debug!("Ignoring filter change while busy");
            return ReloadOutcome::Busy;
        }

        let (generation, filter, language_changed) = {
            let mut state = self.state.lock().await;
            let language_changed = state.change_filter(update);
            (state.begin_reload(), state.filter.clone(), language_changed)
        };
        tracing::debug!(
            generation,
            language = ?filter.language,
            search_text = ?filter.search_text,
            "Filter changed"
        );

        if language_changed && let Some(language) = &filter.language {
            self.remember_language(language).await;
        }
        self.reload(generation, &filter).await
    }

    async fn remember_language(&self, language: &str) {
        if let Err(error) = self.store.lock().await.set(LANGUAGE_KEY, language) {
            tracing::warn!(language = %language, "Failed to store language: {error}");
        }
    }

    /// Loads the records for `filter` under the busy indicator and swaps them in.
    async fn reload(&self, generation: u64, filter: &Filter) -> ReloadOutcome {
        let Some(language) = filter.language.as_deref() else {
            tracing::debug!("No language selected, skipping reload");
            return ReloadOutcome::NoLanguage;
        };

        let loaded = {
            let _busy = self.busy.enter(FETCHING_LABEL);
            RecordSet::load(&self.gateway, language, filter.search_text.as_deref()).await
        };

        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            tracing::debug!(generation, current = state.generation, "Dropping stale record list");
            return ReloadOutcome::Stale;
        }
        match loaded {
            Ok(records) => {
                let count = records.len();
                state.swap_records(records);
                tracing::debug!(generation, count, "Record list replaced");
                ReloadOutcome::Applied { count }
            }
            Err(error) => {
                drop(state);
                tracing::warn!(language = %language, "Failed to fetch records: {error}");
                self.report_fetch_failure(FetchOperation::Records, &error);
                ReloadOutcome::Failed
            }
        }
    }

    async fn move_selection(
        &self,
        step: impl FnOnce(&mut SelectionCursor, &RecordSet) -> bool,
    ) -> Result<SelectOutcome, SessionError> {
        self.ensure_idle()?;

        let (epoch, id, language) = {
            let mut state = self.state.lock().await;
            let session = &mut *state;
            if !step(&mut session.cursor, &session.records) {
                return Ok(SelectOutcome::Ignored);
            }
            let Some(id) = state.cursor.selected().map(ToString::to_string) else {
                return Ok(SelectOutcome::Ignored);
            };
            (state.begin_selection(), id, state.filter.language.clone())
        };
        tracing::debug!(id = %id, epoch, "Record selected");

        if let Some(language) = language {
            self.fetch_auxiliary(epoch, &id, &language).await;
        }
        Ok(SelectOutcome::Selected { id })
    }

    async fn fetch_auxiliary(&self, epoch: u64, id: &str, language: &str) {
        let loaded = self.gateway.get_auxiliary_info(id, language).await;

        let mut state = self.state.lock().await;
        if state.selection_epoch != epoch {
            tracing::debug!(id = %id, "Dropping auxiliary info for a previous selection");
            return;
        }
        match loaded {
            Ok(info) => state.auxiliary = Some(info),
            Err(error) => {
                drop(state);
                tracing::warn!(id = %id, "Failed to fetch auxiliary info: {error}");
                self.report_fetch_failure(FetchOperation::AuxiliaryInfo, &error);
            }
        }
    }

    fn report_fetch_failure(&self, operation: FetchOperation, error: &GatewayError) {
        self.notifier.send(Notification::FetchFailed { operation, message: error.to_string() });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::gateway::{
        GatewayFixture,
        MemoryGateway,
        Operation,
    };
    use crate::status::IndicatorColor;
    use crate::storage::MemoryStore;
    use crate::test_utils::record;
    use crate::types::{
        ContributionRecord,
        ContributionStatus,
        Position,
    };

    type Controller = SessionController<Arc<MemoryGateway>, MemoryStore>;

    #[fixture]
    fn gateway() -> Arc<MemoryGateway> {
        let mut fixture = GatewayFixture::default();
        fixture.records.insert(
            "fr".to_string(),
            vec![
                record("a", "Hello", None),
                record("b", "Good morning", Some("Bonjour")),
                record("c", "Thanks", None),
            ],
        );
        fixture.records.insert("de".to_string(), vec![record("a", "Hello", Some("Hallo"))]);
        fixture.contributions.insert(
            "fr".to_string(),
            vec![ContributionRecord {
                id: "x".to_string(),
                source_text: "Yes".to_string(),
                contribution_status: ContributionStatus::Pending,
            }],
        );
        fixture.positions.insert(
            "a".to_string(),
            vec![Position {
                path: "apps/frappe/frappe/hello.py".to_string(),
                line_no: 2,
                app: "frappe".to_string(),
            }],
        );
        Arc::new(MemoryGateway::new(fixture))
    }

    fn controller(
        gateway: &Arc<MemoryGateway>,
    ) -> (Controller, mpsc::UnboundedReceiver<Notification>) {
        SessionController::new(Arc::clone(gateway), MemoryStore::new(), CuratorSettings::default())
    }

    fn drain(receiver: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
        std::iter::from_fn(|| receiver.try_recv().ok()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn test_filter_change_rejected_while_fetching(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        let gate = gateway.hold(Operation::ListRecords).await;

        let (first, (second, refresh)) = tokio::join!(session.on_language_change("fr"), async {
            let second = session.on_language_change("de").await;
            let refresh = session.on_refresh().await;
            gate.release();
            (second, refresh)
        });

        assert_that!(first, eq(ReloadOutcome::Applied { count: 3 }));
        assert_that!(second, eq(ReloadOutcome::Busy));
        assert_that!(refresh, eq(ReloadOutcome::Busy));
        assert_that!(session.filter().await.language, some(eq("fr")));
        assert_that!(gateway.calls(Operation::ListRecords).await, eq(1));
        assert_that!(session.is_busy(), eq(false));
    }

    #[rstest]
    #[tokio::test]
    async fn test_stale_contributions_are_dropped(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        let gate = gateway.hold(Operation::ListContributions).await;

        let (loaded, reload) = tokio::join!(session.load_contributions(), async {
            let reload = session.on_language_change("de").await;
            gate.release();
            reload
        });

        assert_that!(loaded, eq(ReloadOutcome::Stale));
        assert_that!(reload, eq(ReloadOutcome::Applied { count: 1 }));
        assert_that!(session.contributions().await, is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_contributions_load_for_current_language(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;

        assert_that!(gateway.calls(Operation::ListContributions).await, eq(0));
        assert_that!(session.load_contributions().await, eq(ReloadOutcome::Applied { count: 1 }));

        let contributions = session.contributions().await;
        assert_that!(contributions.len(), eq(1));
        assert_that!(contributions[0].color, eq(IndicatorColor::Orange));
    }

    #[rstest]
    #[tokio::test]
    async fn test_contributions_without_language(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);

        assert_that!(session.load_contributions().await, eq(ReloadOutcome::NoLanguage));
        assert_that!(gateway.calls(Operation::ListContributions).await, eq(0));
    }

    #[rstest]
    #[tokio::test]
    async fn test_auxiliary_info_for_previous_selection_is_dropped(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        let gate = gateway.hold(Operation::AuxiliaryInfo).await;

        let (first, second) = tokio::join!(session.on_select("a"), async {
            let outcome = session.on_select("b").await;
            gate.release();
            outcome
        });

        assert_eq!(first, Ok(SelectOutcome::Selected { id: "a".to_string() }));
        assert_eq!(second, Ok(SelectOutcome::Selected { id: "b".to_string() }));
        let surface = session.edit_surface().await.unwrap();
        assert_that!(surface.id, eq("b"));
        assert_that!(surface.positions, some(is_empty()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_interaction_blocked_while_fetching(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        session.on_select("a").await.unwrap();
        let gate = gateway.hold(Operation::ListRecords).await;

        let (reload, (edit, submit)) = tokio::join!(session.on_refresh(), async {
            let edit = session.on_edit("Salut").await;
            let view = ConfirmationView { language: "fr".to_string(), rows: Vec::new() };
            let submit = session.on_submit(&view).await;
            gate.release();
            (edit, submit)
        });

        assert_that!(reload, eq(ReloadOutcome::Applied { count: 3 }));
        assert_eq!(edit, Err(SessionError::Busy));
        assert_eq!(submit, Err(SessionError::Busy));
        assert_that!(session.is_busy(), eq(false));
    }

    #[rstest]
    #[tokio::test]
    async fn test_refresh_keeps_selection(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        session.on_select("c").await.unwrap();

        session.on_refresh().await;

        assert_that!(session.selected().await, some(eq("c")));
        assert_that!(session.edit_surface().await.and_then(|s| s.positions), some(is_empty()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_filter_change_resets_selection_and_keeps_edits(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        session.on_select("c").await.unwrap();
        session.on_edit("Merci").await.unwrap();

        session.on_search_change("hello").await;

        assert_that!(session.selected().await, none());
        assert_that!(session.ledger().await.size(), eq(1));
        assert_that!(session.records().await.len(), eq(1));
        assert_that!(
            session.filter().await,
            eq(&Filter { language: Some("fr".to_string()), search_text: Some("hello".to_string()) })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_reload_without_language(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);

        assert_that!(session.on_refresh().await, eq(ReloadOutcome::NoLanguage));
        assert_eq!(session.begin_submit().await, Err(SessionError::NoLanguage));
        assert_that!(gateway.calls(Operation::ListRecords).await, eq(0));
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_without_selection(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);
        session.on_language_change("fr").await;

        assert_eq!(session.on_edit("Salut").await, Err(SessionError::NoSelection));
    }

    #[rstest]
    #[tokio::test]
    async fn test_auxiliary_failure_is_notified(gateway: Arc<MemoryGateway>) {
        let (session, mut notifications) = controller(&gateway);
        session.on_language_change("fr").await;
        gateway.fail(Operation::AuxiliaryInfo, "boom").await;
        drain(&mut notifications);

        let outcome = session.on_select("a").await;

        assert_eq!(outcome, Ok(SelectOutcome::Selected { id: "a".to_string() }));
        assert_that!(session.edit_surface().await.and_then(|s| s.positions), none());
        let failed = drain(&mut notifications).into_iter().any(|notification| {
            matches!(
                notification,
                Notification::FetchFailed { operation: FetchOperation::AuxiliaryInfo, .. }
            )
        });
        assert!(failed);
    }

    #[rstest]
    #[tokio::test]
    async fn test_language_change_is_remembered(gateway: Arc<MemoryGateway>) {
        let (session, _notifications) = controller(&gateway);

        session.on_language_change("de").await;

        let stored = session.store.lock().await.get(LANGUAGE_KEY).unwrap();
        assert_that!(stored, some(eq("de")));
    }
}
