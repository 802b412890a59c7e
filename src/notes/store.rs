// Note storage engine
// One markdown file per note, id = path relative to the notes root

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::{Note, NoteFrontmatter, Settings};
use crate::storage::{
    ensure_dir, is_markdown, parse_frontmatter, relative_id, yaml_scalar, FRONTMATTER_MARKER, NOTE_EXTENSION,
};

const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derive a filesystem-safe filename from a note title
pub fn generate_filename(title: &str) -> String {
    let safe: String = title.chars().filter(|c| !UNSAFE_FILENAME_CHARS.contains(c)).collect();
    let safe = safe.trim();
    let stem = if safe.is_empty() { "untitled" } else { safe };
    format!("{stem}{NOTE_EXTENSION}")
}

/// Serialize a note: frontmatter, blank line, `# title` heading, blank line, content
pub fn format_note(note: &Note) -> String {
    let tags = note
        .tags
        .iter()
        .map(|t| yaml_scalar(t, true))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str(FRONTMATTER_MARKER);
    out.push('\n');
    out.push_str(&format!("title: {}\n", yaml_scalar(&note.title, false)));
    out.push_str(&format!("created: {}\n", note.created.to_rfc3339_opts(SecondsFormat::Secs, false)));
    out.push_str(&format!("modified: {}\n", note.modified.to_rfc3339_opts(SecondsFormat::Secs, false)));
    out.push_str(&format!("tags: [{tags}]\n"));
    out.push_str(FRONTMATTER_MARKER);
    out.push_str("\n\n");
    out.push_str(&format!("# {}\n\n", note.title));
    out.push_str(&note.content);
    out
}

/// Result of a directory listing: the notes that parsed, and the ids that did not
#[derive(Debug, Default)]
pub struct Listing {
    pub notes: Vec<Note>,
    pub skipped: Vec<String>,
}

/// Path-based CRUD for notes under a root directory
#[derive(Debug, Clone)]
pub struct NoteStorage {
    root: PathBuf,
    templates_dir: String,
}

impl NoteStorage {
    pub fn new(root: impl Into<PathBuf>, templates_dir: impl Into<String>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root, templates_dir: templates_dir.into() })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.notes_dir, &settings.paths.templates_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full filesystem path for an id (no I/O)
    pub fn get_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Write the note under a filename derived from its title and assign its id.
    /// An existing file with the same name is overwritten.
    pub fn save(&self, note: &mut Note) -> Result<()> {
        let filename = generate_filename(&note.title);
        let path = self.root.join(&filename);
        note.modified = Local::now();
        write_note(&path, note)?;
        tracing::info!(id = %filename, "saved note");
        note.id = filename;
        Ok(())
    }

    /// Write the note to an explicit path; the caller owns the id
    pub fn save_at(&self, note: &mut Note, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        note.modified = Local::now();
        write_note(path, note)?;
        tracing::info!(path = %path.display(), "saved note at explicit path");
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<Note> {
        let path = self.get_path(id);
        let data = fs::read_to_string(&path).map_err(|e| Error::io("read note", &path, e))?;
        parse_note(id, &data)
    }

    /// All parseable notes, newest first; see `list_detailed` for skipped files
    pub fn list(&self, tag: Option<&str>) -> Result<Vec<Note>> {
        Ok(self.list_detailed(tag)?.notes)
    }

    /// Recursively list notes, skipping the templates directory.
    /// Files that fail to parse are reported in `skipped` instead of failing the listing.
    pub fn list_detailed(&self, tag: Option<&str>) -> Result<Listing> {
        let tag = tag.filter(|t| !t.is_empty());
        let mut listing = Listing::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_templates_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let path = e.path().unwrap_or(&self.root).to_path_buf();
                    return Err(Error::io("list notes in", path, e.into()));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            let id = relative_id(&self.root, entry.path());
            let note = match self.load(&id) {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping unreadable note");
                    listing.skipped.push(id);
                    continue;
                }
            };

            if let Some(tag) = tag {
                if !note.has_tag(tag) {
                    continue;
                }
            }
            listing.notes.push(note);
        }

        // sort_by is stable, so equal timestamps keep walk order
        listing.notes.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(listing)
    }

    fn is_templates_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.depth() == 1
            && entry.file_type().is_dir()
            && entry.file_name().to_str() == Some(self.templates_dir.as_str())
    }

    /// Resolve a user query to a note: id, id + ".md", exact title, then title substring
    pub fn find(&self, query: &str) -> Result<Note> {
        if query.ends_with(NOTE_EXTENSION) {
            if let Ok(note) = self.load(query) {
                return Ok(note);
            }
        }

        if let Ok(note) = self.load(&format!("{query}{NOTE_EXTENSION}")) {
            return Ok(note);
        }

        let notes = self.list(None)?;
        let needle = query.to_lowercase();

        if let Some(note) = notes.iter().find(|n| n.title.to_lowercase() == needle) {
            return Ok(note.clone());
        }

        notes
            .into_iter()
            .find(|n| n.title.to_lowercase().contains(&needle))
            .ok_or_else(|| Error::NoteNotFound(query.to_string()))
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let path = self.get_path(id);
        fs::remove_file(&path).map_err(|e| Error::io("delete note", &path, e))?;
        tracing::info!(id = %id, "deleted note");
        Ok(())
    }
}

fn write_note(path: &Path, note: &Note) -> Result<()> {
    fs::write(path, format_note(note)).map_err(|e| Error::io("write note", path, e))
}

fn parse_note(id: &str, data: &str) -> Result<Note> {
    let (fm, body) = parse_frontmatter::<NoteFrontmatter>(data)
        .map_err(|source| Error::Parse { id: id.to_string(), source })?;
    Ok(Note::from_frontmatter(id, fm, body))
}
