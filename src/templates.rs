// Note templates stored as markdown files in the templates directory
// Placeholders are plain `{{name}}` substitutions

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::storage::is_markdown;

/// Template used for new daily notes when present
pub const DAILY_TEMPLATE: &str = "daily";

/// Load `<root>/<templates_dir>/<name>.md` and substitute `{{title}}`
pub fn load_template(root: &Path, templates_dir: &str, name: &str, title: &str) -> Result<String> {
    let raw = read_template(root, templates_dir, name)?.ok_or_else(|| Error::Template(name.to_string()))?;
    Ok(raw.replace("{{title}}", title))
}

/// Raw template text, or None when the template does not exist
pub fn read_template(root: &Path, templates_dir: &str, name: &str) -> Result<Option<String>> {
    let path = root.join(templates_dir).join(format!("{name}.md"));
    match fs::read_to_string(&path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io("read template", &path, e)),
    }
}

pub fn render_daily(template: &str, date: NaiveDate, date_format: &str) -> String {
    template
        .replace("{{date}}", &date.format(date_format).to_string())
        .replace("{{year}}", &date.format("%Y").to_string())
        .replace("{{month}}", &date.format("%m").to_string())
        .replace("{{day}}", &date.format("%d").to_string())
        .replace("{{weekday}}", &date.format("%A").to_string())
}

pub fn default_daily_content(date: NaiveDate, date_format: &str) -> String {
    format!(
        "## Todo\n\n- [ ]\n\n## Notes\n\n## Review\n\n---\n{} ({})\n",
        date.format(date_format),
        date.format("%A")
    )
}

/// Template names (file stems), sorted; empty when the directory is missing
pub fn list_templates(root: &Path, templates_dir: &str) -> Result<Vec<String>> {
    let dir = root.join(templates_dir);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io("read templates", &dir, e)),
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_markdown(p))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    #[test]
    fn title_is_substituted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".templates")).unwrap();
        fs::write(dir.path().join(".templates/meeting.md"), "# {{title}}\n\nAttendees:\n").unwrap();
        let out = load_template(dir.path(), ".templates", "meeting", "Standup").unwrap();
        assert_eq!(out, "# Standup\n\nAttendees:\n");
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_template(dir.path(), ".templates", "nope", "x"), Err(Error::Template(n)) if n == "nope"));
    }

    #[test]
    fn daily_placeholders() {
        let out = render_daily("{{date}} {{year}}/{{month}}/{{day}} {{weekday}}", date(), "%d.%m.%Y");
        assert_eq!(out, "20.01.2026 2026/01/20 Tuesday");
    }

    #[test]
    fn default_daily_has_sections_and_footer() {
        let out = default_daily_content(date(), "%Y-%m-%d");
        assert!(out.contains("## Todo"));
        assert!(out.contains("## Notes"));
        assert!(out.contains("## Review"));
        assert!(out.ends_with("2026-01-20 (Tuesday)\n"));
    }

    #[test]
    fn lists_template_names() {
        let dir = tempfile::tempdir().unwrap();
        let tdir = dir.path().join(".templates");
        fs::create_dir(&tdir).unwrap();
        fs::write(tdir.join("weekly.md"), "").unwrap();
        fs::write(tdir.join("daily.md"), "").unwrap();
        fs::write(tdir.join("notes.txt"), "").unwrap();
        assert_eq!(list_templates(dir.path(), ".templates").unwrap(), vec!["daily", "weekly"]);
        assert!(list_templates(dir.path(), "missing").unwrap().is_empty());
    }
}
