use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notecli_lib::cli::Cli;
use notecli_lib::commands::{self, App};
use notecli_lib::models::SettingsOverride;
use notecli_lib::notes::NoteStorage;
use notecli_lib::storage::{global_config_path, load_settings};
use notecli_lib::tasks::TaskManager;
use notecli_lib::ui::{self, Dashboard};

const LOG_ENV: &str = "NOTECLI_LOG";

/// Logs go to stderr so stdout stays clean for command output.
/// The dashboard owns the terminal, so its logs are discarded.
fn init_tracing(verbose: bool, dashboard: bool) {
    let default = if verbose { "notecli_lib=debug,notecli=debug" } else { "notecli_lib=warn" };
    let filter = tracing_subscriber::EnvFilter::new(std::env::var(LOG_ENV).unwrap_or_else(|_| default.into()));

    if dashboard {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.command.is_none());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path: PathBuf = cli.config.unwrap_or_else(global_config_path);
    let settings = load_settings(&config_path)?.with_override(&SettingsOverride::from_env());
    tracing::debug!(config = %config_path.display(), notes_dir = %settings.notes_dir.display(), "settings loaded");

    let app = App::new(settings, config_path);
    match cli.command {
        Some(command) => commands::run(&app, command),
        None => {
            let storage = NoteStorage::from_settings(&app.settings)?;
            let manager = TaskManager::from_settings(&app.settings)?;
            ui::run(Dashboard::new(storage, manager, &app.settings)?)?;
            Ok(())
        }
    }
}
