// Command-line surface (clap derive)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "notecli", version)]
#[command(about = "Markdown notes with wiki-links, full-text search and tasks")]
pub struct Cli {
    /// Config file (defaults to <config dir>/notecli/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Open (or create) the daily note
    #[command(visible_alias = "d")]
    Daily {
        /// today, yesterday, tomorrow, +N, -N or a date in the configured format
        date: Option<String>,
        #[arg(long)]
        no_edit: bool,
    },
    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Shortcut for `note create`
    Create(CreateArgs),
    /// Shortcut for `note list`
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Shortcut for `note show`
    Show(QueryArgs),
    /// Shortcut for `note edit`
    Edit(QueryArgs),
    /// Shortcut for `note search`
    Search(QueryArgs),
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Create a note and open it in the editor
    Create(CreateArgs),
    /// List notes, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Print a note with its links and backlinks
    Show(QueryArgs),
    /// Open a note in the editor
    Edit(QueryArgs),
    /// Delete a note
    #[command(visible_alias = "rm")]
    Delete {
        #[command(flatten)]
        query: QueryArgs,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Full-text search across all note files
    Search(QueryArgs),
    /// Show outgoing [[links]] of a note
    Links(QueryArgs),
    /// Show notes linking to a note
    Backlinks(QueryArgs),
    /// List available templates
    Templates,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(required = true)]
    pub title: Vec<String>,
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
    #[arg(short = 'T', long)]
    pub template: Option<String>,
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Note id, title or part of a title
    #[arg(required = true)]
    pub query: Vec<String>,
}

impl QueryArgs {
    pub fn joined(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task
    Add {
        #[arg(required = true)]
        description: Vec<String>,
        /// 1|2|3 or high|medium|low
        #[arg(short, long)]
        priority: Option<String>,
        /// Note to link (id or title)
        #[arg(short, long)]
        note: Option<String>,
        /// today, tomorrow, +N, YYYY-MM-DD, MM-DD, MM/DD
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List tasks
    #[command(visible_alias = "ls")]
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
        /// Order by due date instead of priority
        #[arg(short = 'd', long = "due")]
        by_due: bool,
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as done
    Done { id: String },
    /// Toggle a task between done and pending
    Undo { id: String },
    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete { id: String },
    /// Link a task to a note
    Link {
        id: String,
        #[arg(required = true)]
        note: Vec<String>,
    },
    /// Remove a task's note link
    Unlink { id: String },
    /// Set or clear (`none`) a task's due date
    Due { id: String, date: String },
    /// Tasks linked to a note
    Note {
        #[arg(required = true)]
        note: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Set a key (e.g. `paths.daily_dir journal`) and save
    Set { key: String, value: String },
    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_task_add() {
        let cli = Cli::try_parse_from(["notecli", "task", "add", "Buy", "milk", "-p", "high", "-d", "+2"]).unwrap();
        match cli.command {
            Some(Command::Task(TaskCommand::Add { description, priority, due, note })) => {
                assert_eq!(description.join(" "), "Buy milk");
                assert_eq!(priority.as_deref(), Some("high"));
                assert_eq!(due.as_deref(), Some("+2"));
                assert!(note.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["notecli", "--verbose"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn root_shortcuts() {
        let cli = Cli::try_parse_from(["notecli", "create", "Meeting", "-t", "work", "--no-edit"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Create(CreateArgs { no_edit: true, .. }))));
    }
}
