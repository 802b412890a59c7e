// Error taxonomy for the notes/tasks core
// Every fallible core operation returns crate::Result

use std::path::PathBuf;

/// Why a note file could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("missing front-matter marker (file must start with ---)")]
    MissingMarker,
    #[error("missing closing front-matter marker")]
    MissingClosingMarker,
    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse note {id}: {source}")]
    Parse {
        id: String,
        #[source]
        source: FrontmatterError,
    },

    #[error("corrupt task store {}: {source}", path.display())]
    TaskStore {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("task not found: ID={0}")]
    TaskNotFound(u32),

    #[error("no task ids left in {}", .0.display())]
    TaskIdsExhausted(PathBuf),

    #[error("invalid date format: {0}")]
    InvalidDate(String),

    #[error("invalid task ID: {0}")]
    InvalidTaskId(String),

    #[error("template not found: {0}")]
    Template(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap an io::Error with the action and path that produced it
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
