// Filesystem helpers shared by notes, tasks and configuration
// Markdown files carry a YAML frontmatter block between two --- lines

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, FrontmatterError, Result};
use crate::models::Settings;

pub const FRONTMATTER_MARKER: &str = "---";
pub const NOTE_EXTENSION: &str = ".md";

// ============================================
// PATH HELPERS
// ============================================

/// Global config directory (~/.config/notecli/ on Linux)
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notecli")
}

/// Global config file path
pub fn global_config_path() -> PathBuf {
    global_config_dir().join("config.yaml")
}

/// Storage-relative id for a path under `root`, always with `/` separators
pub fn relative_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io("create directory", path, e))
}

// ============================================
// FRONTMATTER PARSING
// ============================================

/// Split a markdown document into parsed frontmatter and trimmed body.
/// The document must start with `---` and contain a closing `---` line.
pub fn parse_frontmatter<T: serde::de::DeserializeOwned>(content: &str) -> Result<(T, String), FrontmatterError> {
    let rest = content
        .strip_prefix(FRONTMATTER_MARKER)
        .ok_or(FrontmatterError::MissingMarker)?;

    let end = rest.find("\n---").ok_or(FrontmatterError::MissingClosingMarker)?;
    let yaml = rest[..end].trim();
    let body = rest[end + 4..].trim().to_string();

    // An empty block still has to deserialize into a struct of defaults
    let yaml = if yaml.is_empty() { "{}" } else { yaml };
    let frontmatter: T = serde_yaml::from_str(yaml)?;
    Ok((frontmatter, body))
}

/// Render a string as a YAML scalar, quoting only when a plain scalar
/// would not read back as the same string. `flow` marks values that sit
/// inside a `[a, b]` sequence.
pub fn yaml_scalar(value: &str, flow: bool) -> String {
    const INDICATORS: &[char] = &['-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`'];
    const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~", "y", "n"];

    let needs_quotes = value.is_empty()
        || value.trim() != value
        || value.starts_with(INDICATORS)
        || value.contains(": ")
        || value.ends_with(':')
        || value.contains(" #")
        || value.chars().any(char::is_control)
        || (flow && value.contains([',', '[', ']', '{', '}']))
        || RESERVED.contains(&value.to_lowercase().as_str())
        || value.parse::<f64>().is_ok();

    if needs_quotes {
        // A JSON string is a valid YAML double-quoted scalar
        serde_json::to_string(value).unwrap_or_else(|_| format!("'{}'", value.replace('\'', "''")))
    } else {
        value.to_string()
    }
}

/// Inverse of `yaml_scalar` for a raw `key: value` line read without a YAML parser
pub fn unquote_scalar(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        if let Ok(s) = serde_json::from_str::<String>(raw) {
            return s;
        }
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].replace("''", "'");
    }
    raw.to_string()
}

// ============================================
// GLOBAL CONFIG
// ============================================

/// Load settings from a YAML file; a missing file yields the defaults
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file does not exist, using defaults");
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| Error::io("read config", path, e))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    settings
        .validate()
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), notes_dir = %settings.notes_dir.display(), "loaded config");
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let yaml = serde_yaml::to_string(settings)?;
    fs::write(path, yaml).map_err(|e| Error::io("write config", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteFrontmatter;

    #[test]
    fn parse_frontmatter_splits_header_and_body() {
        let doc = "---\ntitle: Hello\ntags: [a, b]\n---\n\n# Hello\n\nbody text\n";
        let (fm, body): (NoteFrontmatter, String) = parse_frontmatter(doc).unwrap();
        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(body, "# Hello\n\nbody text");
    }

    #[test]
    fn parse_frontmatter_requires_leading_marker() {
        let err = parse_frontmatter::<NoteFrontmatter>("title: x\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingMarker));
        assert!(err.to_string().contains("front-matter marker"));
    }

    #[test]
    fn parse_frontmatter_requires_closing_marker() {
        let err = parse_frontmatter::<NoteFrontmatter>("---\ntitle: x\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingClosingMarker));
    }

    #[test]
    fn parse_frontmatter_rejects_bad_yaml() {
        let err = parse_frontmatter::<NoteFrontmatter>("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn yaml_scalar_quotes_only_when_needed() {
        assert_eq!(yaml_scalar("Meeting notes", false), "Meeting notes");
        assert_eq!(yaml_scalar("Q1: plan", false), "\"Q1: plan\"");
        assert_eq!(yaml_scalar("a,b", false), "a,b");
        assert_eq!(yaml_scalar("a,b", true), "\"a,b\"");
        assert_eq!(yaml_scalar("", true), "\"\"");
        assert_eq!(yaml_scalar("true", false), "\"true\"");
        assert_eq!(yaml_scalar("2026", false), "\"2026\"");
        assert_eq!(yaml_scalar("- dash", false), "\"- dash\"");
    }

    #[test]
    fn quoted_scalars_read_back() {
        for value in ["Q1: plan", "#hash", "  padded ", "it's", "[x]", "null", "12.5", "tab\there"] {
            let yaml = format!("v: {}\n", yaml_scalar(value, false));
            let parsed: std::collections::HashMap<String, String> = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(parsed["v"], value, "{yaml}");
            assert_eq!(unquote_scalar(&yaml_scalar(value, false)), value);
        }
    }

    #[test]
    fn relative_id_uses_forward_slashes() {
        let root = Path::new("/notes");
        assert_eq!(relative_id(root, Path::new("/notes/a.md")), "a.md");
        assert_eq!(relative_id(root, &Path::new("/notes").join("daily").join("2026-01-20.md")), "daily/2026-01-20.md");
    }

    #[test]
    fn missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.yaml");
        let mut settings = Settings::default();
        settings.editor = "hx".into();
        settings.paths.daily_dir = "journal".into();
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "notes_dir: [oops\n").unwrap();
        assert!(matches!(load_settings(&path), Err(Error::Config(_))));
    }
}
