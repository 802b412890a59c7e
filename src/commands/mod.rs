// Command handlers behind the CLI
// Each handler prints to stdout and returns anyhow::Result for main to report

pub mod common;
pub mod daily;
pub mod note;
pub mod settings;
pub mod task;

pub use common::App;

use crate::cli::{Command, NoteCommand};

/// Dispatch one parsed subcommand
pub fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Note(cmd) => note::run(app, cmd),
        Command::Task(cmd) => task::run(app, cmd),
        Command::Daily { date, no_edit } => daily::run(app, date.as_deref(), no_edit),
        Command::Config(cmd) => settings::run(app, cmd),
        Command::Create(args) => note::run(app, NoteCommand::Create(args)),
        Command::List(args) => note::run(app, NoteCommand::List(args)),
        Command::Show(args) => note::run(app, NoteCommand::Show(args)),
        Command::Edit(args) => note::run(app, NoteCommand::Edit(args)),
        Command::Search(args) => note::run(app, NoteCommand::Search(args)),
    }
}
