//! Host for a translation curation session.
//!
//! Serves records from a JSON fixture and reads one command per line from stdin:
//!
//! ```text
//! language <code> | search [text] | refresh | select <id> | next | prev
//! edit [text] | review | submit | revise <id> [text] | list | contributions | show | quit
//! ```
//!
//! Every response and notification is written to stdout as one JSON object per line.
//! The contributions panel is reloaded in the background after each record reload and
//! reported as a `contributions_loaded` event once it arrives.
//!
//! Usage: `translation-curator <fixture.json> [workspace]`

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use translation_curator::SessionController;
use translation_curator::config::{
    ConfigError,
    ConfigManager,
    CuratorSettings,
};
use translation_curator::gateway::{
    GatewayError,
    GatewayFixture,
    MemoryGateway,
};
use translation_curator::session::{
    ConfirmationView,
    InitialLanguage,
    Notification,
    ReloadOutcome,
    SubmitOutcome,
};
use translation_curator::storage::{
    JsonFileStore,
    MemoryStore,
    PreferenceStore,
    StoreError,
};

type Session = SessionController<MemoryGateway, Box<dyn PreferenceStore>>;

/// Errors that end the host.
#[derive(Error, Debug)]
enum AppError {
    /// Missing fixture argument
    #[error("Usage: translation-curator <fixture.json> [workspace]")]
    Usage,
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Fixture could not be loaded
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Preference file could not be opened
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Reading stdin or writing stdout failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    /// An event could not be serialized
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let fixture_path = args.next().map(PathBuf::from);
    let workspace = args.next().map(PathBuf::from);

    let mut config_manager = ConfigManager::new();
    let config_result = config_manager.load_settings(workspace.or_else(|| std::env::current_dir().ok()));
    let _log_guard = init_tracing(config_manager.get_settings());
    if let Err(error) = config_result {
        tracing::error!("Configuration error: {error}");
        return ExitCode::FAILURE;
    }

    match run(fixture_path, config_manager.get_settings().clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to the configured file, or to stderr. `RUST_LOG` controls the level.
fn init_tracing(settings: &CuratorSettings) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let log_file = settings.log_file.as_ref().and_then(|path| {
        let file_name = path.file_name()?.to_owned();
        let directory = path.parent().map(PathBuf::from).unwrap_or_default();
        Some((directory, file_name))
    });

    if let Some((directory, file_name)) = log_file {
        let appender = tracing_appender::rolling::never(directory, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        None
    }
}

async fn run(fixture_path: Option<PathBuf>, settings: CuratorSettings) -> Result<(), AppError> {
    let fixture = GatewayFixture::load(&fixture_path.ok_or(AppError::Usage)?)?;
    let store: Box<dyn PreferenceStore> = match &settings.preference_file {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };

    let (session, mut notifications) =
        SessionController::new(MemoryGateway::new(fixture), store, settings);
    let mut review: Option<ConfirmationView> = None;

    emit(&json!({ "event": "languages", "options": session.language_options() }))?;
    let mut contributions = FuturesUnordered::new();
    match session.start().await {
        InitialLanguage::Use(language) => {
            emit(&json!({ "event": "started", "language": language }))?;
            contributions.push(session.load_contributions());
        }
        InitialLanguage::Prompt => emit(&json!({ "event": "select_language" }))?,
    }
    flush_notifications(&mut notifications)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
                if command == "quit" {
                    break;
                }
                if handle_command(&session, &mut review, command, argument).await? {
                    contributions.push(session.load_contributions());
                }
            }
            Some(outcome) = contributions.next() => {
                emit(&json!({ "event": "contributions_loaded", "result": outcome }))?;
            }
        }
        flush_notifications(&mut notifications)?;
    }

    Ok(())
}

/// Runs one command. Returns whether the record list was reloaded.
async fn handle_command(
    session: &Session,
    review: &mut Option<ConfirmationView>,
    command: &str,
    argument: &str,
) -> Result<bool, AppError> {
    match command {
        "language" => return emit_reload(session.on_language_change(argument).await),
        "search" => return emit_reload(session.on_search_change(argument).await),
        "refresh" => return emit_reload(session.on_refresh().await),
        "select" => emit_result("select", session.on_select(argument).await)?,
        "next" => emit_result("select", session.on_next().await)?,
        "prev" => emit_result("select", session.on_prev().await)?,
        "edit" => emit_result("edit", session.on_edit(argument).await)?,
        "review" => {
            let view = session.begin_submit().await;
            emit_result("review", view.as_ref())?;
            *review = view.ok();
        }
        "revise" => {
            let (source, text) = argument.split_once(' ').unwrap_or((argument, ""));
            let revised = review.as_mut().is_some_and(|view| view.revise(source, text));
            emit(&json!({ "event": "revise", "source": source, "revised": revised }))?;
        }
        "submit" => {
            let view = match review.take() {
                Some(view) => Ok(view),
                None => session.begin_submit().await,
            };
            match view {
                Ok(view) => {
                    let outcome = session.on_submit(&view).await;
                    emit_result("submit", outcome)?;
                    return Ok(matches!(outcome, Ok(SubmitOutcome::Submitted { .. })));
                }
                Err(error) => emit_result::<()>("submit", Err(error))?,
            }
        }
        "list" => emit(&json!({
            "event": "records",
            "records": session.records().await,
            "pending": session.pending_indicator().await,
            "submit_enabled": session.submit_enabled().await,
        }))?,
        "contributions" => {
            emit(&json!({ "event": "contributions", "contributions": session.contributions().await }))?;
        }
        "show" => emit(&json!({ "event": "surface", "surface": session.edit_surface().await }))?,
        _ => {
            tracing::warn!("Unknown command: {}", command);
            emit(&json!({ "event": "unknown_command", "command": command }))?;
        }
    }
    Ok(false)
}

fn emit_reload(outcome: ReloadOutcome) -> Result<bool, AppError> {
    emit(&json!({ "event": "reload", "result": outcome }))?;
    Ok(!matches!(outcome, ReloadOutcome::Busy | ReloadOutcome::NoLanguage))
}

fn emit_result<T: Serialize>(
    event: &str,
    result: Result<T, impl std::fmt::Display>,
) -> Result<(), AppError> {
    match result {
        Ok(value) => emit(&json!({ "event": event, "result": value })),
        Err(error) => emit(&json!({ "event": event, "error": error.to_string() })),
    }
}

fn flush_notifications(
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
) -> Result<(), AppError> {
    while let Ok(notification) = notifications.try_recv() {
        emit(&notification)?;
    }
    Ok(())
}

fn emit(value: &impl Serialize) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
