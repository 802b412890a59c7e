// Configuration models for notecli
// Settings come from the YAML config file, environment overrides are applied on top

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// All settings (stored in config.yaml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notes_dir: PathBuf,
    pub editor: String,
    pub default_tags: Vec<String>,
    pub paths: Paths,
    pub formats: Formats,
    pub display: Display,
}

/// Locations relative to notes_dir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub templates_dir: String,
    pub tasks_file: String,
    pub daily_dir: String,
}

/// strftime patterns used for display and daily note names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    pub date: String,
    pub datetime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub separator_width: usize,
    pub search_truncate: usize,
    pub due_soon_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notes_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("notes"),
            editor: "vim".to_string(),
            default_tags: Vec::new(),
            paths: Paths::default(),
            formats: Formats::default(),
            display: Display::default(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            templates_dir: ".templates".to_string(),
            tasks_file: ".tasks.yaml".to_string(),
            daily_dir: "daily".to_string(),
        }
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            date: "%Y-%m-%d".to_string(),
            datetime: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            separator_width: 40,
            search_truncate: 60,
            due_soon_days: 3,
        }
    }
}

/// Partial settings taken from the environment (all fields optional)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverride {
    pub notes_dir: Option<PathBuf>,
    pub editor: Option<String>,
}

impl SettingsOverride {
    /// Read NOTECLI_NOTES_DIR, NOTECLI_EDITOR and EDITOR
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            notes_dir: non_empty("NOTECLI_NOTES_DIR").map(PathBuf::from),
            editor: non_empty("NOTECLI_EDITOR").or_else(|| non_empty("EDITOR")),
        }
    }
}

impl Settings {
    /// Merge with environment override and expand `~/` in notes_dir
    pub fn with_override(&self, over: &SettingsOverride) -> Self {
        let notes_dir = over.notes_dir.clone().unwrap_or_else(|| self.notes_dir.clone());
        Self {
            notes_dir: expand_tilde(&notes_dir),
            editor: over.editor.clone().unwrap_or_else(|| self.editor.clone()),
            ..self.clone()
        }
    }

    pub fn templates_path(&self) -> PathBuf {
        self.notes_dir.join(&self.paths.templates_dir)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.notes_dir.join(&self.paths.tasks_file)
    }

    pub fn daily_path(&self) -> PathBuf {
        self.notes_dir.join(&self.paths.daily_dir)
    }

    /// Update one dotted key from a string value (used by `config set`)
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = key.replace('-', "_");
        let parse_num = |v: &str| v.trim().parse::<i64>().map_err(|_| format!("{} expects a number, got {:?}", key, v));
        match key.as_str() {
            "notes_dir" => self.notes_dir = PathBuf::from(value),
            "editor" => self.editor = value.to_string(),
            "default_tags" => {
                self.default_tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            }
            "paths.templates_dir" => self.paths.templates_dir = value.to_string(),
            "paths.tasks_file" => self.paths.tasks_file = value.to_string(),
            "paths.daily_dir" => self.paths.daily_dir = value.to_string(),
            "formats.date" => {
                check_date_format(value)?;
                self.formats.date = value.to_string()
            }
            "formats.datetime" => {
                check_datetime_format(value)?;
                self.formats.datetime = value.to_string()
            }
            "display.separator_width" => self.display.separator_width = parse_num(value)?.max(0) as usize,
            "display.search_truncate" => self.display.search_truncate = parse_num(value)?.max(0) as usize,
            "display.due_soon_days" => self.display.due_soon_days = parse_num(value)?,
            _ => return Err(format!("unknown key: {}", key)),
        }
        Ok(())
    }
}

impl Settings {
    /// Reject strftime patterns chrono cannot render
    pub fn validate(&self) -> Result<(), String> {
        check_date_format(&self.formats.date)?;
        check_datetime_format(&self.formats.datetime)
    }
}

// Dates are formatted both as NaiveDate (daily notes) and as timestamps,
// so the date pattern must render on a bare date
fn check_date_format(fmt: &str) -> Result<(), String> {
    let mut out = String::new();
    write!(out, "{}", NaiveDate::default().format(fmt)).map_err(|_| format!("invalid date format: {fmt:?}"))
}

fn check_datetime_format(fmt: &str) -> Result<(), String> {
    let mut out = String::new();
    write!(out, "{}", Local::now().format(fmt)).map_err(|_| format!("invalid datetime format: {fmt:?}"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_layout() {
        let s = Settings::default();
        assert!(s.notes_dir.ends_with("notes"));
        assert_eq!(s.editor, "vim");
        assert_eq!(s.paths.templates_dir, ".templates");
        assert_eq!(s.paths.tasks_file, ".tasks.yaml");
        assert_eq!(s.paths.daily_dir, "daily");
        assert_eq!(s.formats.date, "%Y-%m-%d");
        assert_eq!(s.display.due_soon_days, 3);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let s: Settings = serde_yaml::from_str("notes_dir: /tmp/n\npaths:\n  daily_dir: journal\n").unwrap();
        assert_eq!(s.notes_dir, PathBuf::from("/tmp/n"));
        assert_eq!(s.paths.daily_dir, "journal");
        assert_eq!(s.paths.tasks_file, ".tasks.yaml");
        assert_eq!(s.editor, "vim");
    }

    #[test]
    fn override_prefers_notecli_editor_over_editor() {
        let env: HashMap<&str, &str> =
            [("EDITOR", "nano"), ("NOTECLI_EDITOR", "hx"), ("NOTECLI_NOTES_DIR", "/srv/notes")].into();
        let over = SettingsOverride::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        let s = Settings::default().with_override(&over);
        assert_eq!(s.editor, "hx");
        assert_eq!(s.notes_dir, PathBuf::from("/srv/notes"));
    }

    #[test]
    fn tilde_is_expanded() {
        let over = SettingsOverride { notes_dir: Some(PathBuf::from("~/memo")), editor: None };
        let s = Settings::default().with_override(&over);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(s.notes_dir, home.join("memo"));
        }
    }

    #[test]
    fn derived_paths_join_notes_dir() {
        let mut s = Settings::default();
        s.notes_dir = PathBuf::from("/n");
        assert_eq!(s.tasks_path(), PathBuf::from("/n/.tasks.yaml"));
        assert_eq!(s.templates_path(), PathBuf::from("/n/.templates"));
        assert_eq!(s.daily_path(), PathBuf::from("/n/daily"));
    }

    #[test]
    fn set_key_updates_nested_values() {
        let mut s = Settings::default();
        s.set_key("paths.tasks-file", "todo.yaml").unwrap();
        s.set_key("default_tags", "work, ideas,").unwrap();
        s.set_key("display.due_soon_days", "5").unwrap();
        assert_eq!(s.paths.tasks_file, "todo.yaml");
        assert_eq!(s.default_tags, vec!["work", "ideas"]);
        assert_eq!(s.display.due_soon_days, 5);
        assert!(s.set_key("display.due_soon_days", "soon").is_err());
        assert!(s.set_key("theme.colors", "red").is_err());
    }

    #[test]
    fn bad_strftime_patterns_are_rejected() {
        let mut s = Settings::default();
        assert!(s.set_key("formats.date", "%Q").is_err());
        assert!(s.set_key("formats.date", "%Y-%m-%d %H:%M").is_err());
        assert!(s.set_key("formats.datetime", "%Q").is_err());
        assert_eq!(s.formats, Formats::default());

        s.set_key("formats.date", "%d.%m.%Y").unwrap();
        s.set_key("formats.datetime", "%d.%m.%Y %H:%M").unwrap();
        assert!(s.validate().is_ok());

        s.formats.date = "%Q".to_string();
        assert!(s.validate().is_err());
    }
}
