// Full-text search over raw note files
// Line-oriented: front-matter lines match too, and line numbers count from the top of the file

use std::fs;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::storage::{is_markdown, relative_id, unquote_scalar};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Path relative to the search root
    pub filename: String,
    pub title: String,
    /// 1-based
    pub line: usize,
    pub content: String,
}

/// Case-insensitive substring search across every `*.md` file under `root`
pub fn search(root: &Path, query: &str) -> Result<Vec<SearchResult>> {
    if !root.is_dir() {
        return Err(Error::io(
            "search",
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "notes directory does not exist"),
        ));
    }

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        let filename = relative_id(root, path);
        let title = data
            .lines()
            .find_map(|line| line.strip_prefix("title:"))
            .map(unquote_scalar)
            .unwrap_or_else(|| entry.file_name().to_string_lossy().to_string());

        for (i, line) in data.lines().enumerate() {
            if line.to_lowercase().contains(&needle) {
                results.push(SearchResult {
                    filename: filename.clone(),
                    title: title.clone(),
                    line: i + 1,
                    content: line.trim().to_string(),
                });
            }
        }
    }

    tracing::debug!(query = %query, hits = results.len(), "search finished");
    Ok(results)
}
