// Wiki-style [[links]] between notes
// Nothing is cached: the link graph is recomputed from note content on every call

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::Note;
use crate::notes::store::NoteStorage;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid link regex"));

/// Link names in first-seen order, trimmed, without empties or exact duplicates
pub fn extract_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    LINK_RE
        .captures_iter(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

/// Outcome of resolving link names against storage
#[derive(Debug, Default)]
pub struct Resolved {
    pub found: Vec<Note>,
    pub not_found: Vec<String>,
}

/// Look each name up with `NoteStorage::find`, keeping input order in both halves
pub fn resolve_links(storage: &NoteStorage, names: &[String]) -> Resolved {
    let mut resolved = Resolved::default();
    for name in names {
        match storage.find(name) {
            Ok(note) => resolved.found.push(note),
            Err(e) => {
                tracing::debug!(link = %name, error = %e, "unresolved link");
                resolved.not_found.push(name.clone());
            }
        }
    }
    resolved
}

/// Notes whose content links to `target_title` (case-insensitive).
/// A note that links to itself is included.
pub fn find_backlinks(storage: &NoteStorage, target_title: &str) -> Result<Vec<Note>> {
    let target = target_title.to_lowercase();
    let notes = storage.list(None)?;
    Ok(notes
        .into_iter()
        .filter(|n| extract_links(&n.content).iter().any(|l| l.to_lowercase() == target))
        .collect())
}
