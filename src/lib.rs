// notecli: markdown notes with YAML front-matter, wiki-links and a YAML task store

pub mod cli;
pub mod commands;
pub mod daily;
pub mod dates;
pub mod error;
pub mod models;
pub mod notes;
pub mod search;
pub mod storage;
pub mod tasks;
pub mod templates;
pub mod ui;

pub use error::{Error, FrontmatterError, Result};
