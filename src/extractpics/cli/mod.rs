//! # CLI Layer
//!
//! The only place that knows about stdout/stderr, argument parsing and log
//! output. `run()` parses arguments, installs the tracing subscriber, builds
//! the API over a [`FsBackend`] rooted at the data directory, dispatches, and
//! prints.

mod print;

use crate::args::{Cli, Commands, EmailAction, HistoryAction, PrefsAction};
use clap::Parser;
use extractpics::api::RetentionApi;
use extractpics::config::{self, RetentionConfig};
use extractpics::error::{Result, RetentionError};
use extractpics::model::{NewHistoryEntry, PreferencesPatch};
use extractpics::store::fs_backend::FsBackend;
use extractpics::store::RetentionStore;
use print::{
    print_email_status, print_history, print_messages, print_preferences, print_summary,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EXTRACTPICS_LOG";

type Api = RetentionApi<FsBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let api = init_api()?;

    match cli.command {
        Some(Commands::Show) => {
            let state = api.get_storage();
            let json =
                serde_json::to_string_pretty(&state).map_err(RetentionError::Serialization)?;
            println!("{}", json);
            Ok(())
        }
        Some(Commands::History { action }) => handle_history(&api, action),
        Some(Commands::Prefs { action }) => handle_prefs(&api, action),
        Some(Commands::Stats) => {
            print_summary(&api.summary());
            Ok(())
        }
        Some(Commands::Record {
            images,
            batch,
            deep,
        }) => {
            let result = api.record_extraction(images, batch, deep);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Visit) => {
            let result = api.record_visit();
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Email { action }) => handle_email(&api, action),
        Some(Commands::Doctor) => {
            let result = api.doctor();
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Export) => {
            println!("{}", api.export_state()?);
            Ok(())
        }
        Some(Commands::Import { file }) => {
            let content = std::fs::read_to_string(&file).map_err(RetentionError::Io)?;
            let result = api.import_state(&content)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Reset) => {
            let result = api.reset();
            print_messages(&result.messages);
            Ok(())
        }
        None => handle_history(&api, None),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "extractpics=debug" } else { "warn" })
    });
    // Fails only when a subscriber is already installed; keep that one.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn init_api() -> Result<Api> {
    let data_dir = config::data_dir()?;
    let config = RetentionConfig::load(&data_dir)?;
    tracing::debug!(
        dir = %data_dir.display(),
        key = %config.storage_key,
        "opening retention store"
    );

    let store = RetentionStore::with_backend(FsBackend::new(data_dir))
        .with_key(config.storage_key)
        .with_pretty_json(config.pretty_json);
    Ok(RetentionApi::new(store))
}

fn handle_history(api: &Api, action: Option<HistoryAction>) -> Result<()> {
    match action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => print_history(&api.get_history()),
        HistoryAction::Add {
            url,
            images,
            scan_mode,
            thumbnail,
        } => {
            let now = api.store().now();
            let mut entry = NewHistoryEntry::new(url, now, images, scan_mode.into());
            if let Some(thumbnail) = thumbnail {
                entry = entry.with_thumbnail(thumbnail);
            }
            let result = api.add_to_history(entry);
            print_messages(&result.messages);
            for entry in &result.affected_entries {
                println!("{}", entry.id);
            }
        }
        HistoryAction::Remove { id } => print_messages(&api.remove_from_history(&id).messages),
        HistoryAction::Clear => print_messages(&api.clear_history().messages),
    }
    Ok(())
}

fn handle_prefs(api: &Api, action: Option<PrefsAction>) -> Result<()> {
    match action.unwrap_or(PrefsAction::Show) {
        PrefsAction::Show => print_preferences(&api.get_preferences()),
        PrefsAction::Set {
            scan_mode,
            mode,
            sound,
            min_width,
        } => {
            let patch = PreferencesPatch {
                default_scan_mode: scan_mode.map(Into::into),
                default_mode: mode.map(Into::into),
                sound_enabled: sound,
                last_min_width: min_width,
            };
            let result = api.update_preferences(&patch);
            print_messages(&result.messages);
            if let Some(prefs) = &result.preferences {
                print_preferences(prefs);
            }
        }
    }
    Ok(())
}

fn handle_email(api: &Api, action: Option<EmailAction>) -> Result<()> {
    match action.unwrap_or(EmailAction::Status) {
        EmailAction::Status => {
            print_email_status(&api.get_storage(), api.should_show_email_capture())
        }
        EmailAction::Shown => print_messages(&api.mark_email_capture_shown().messages),
        EmailAction::Captured => print_messages(&api.mark_email_captured().messages),
    }
    Ok(())
}
