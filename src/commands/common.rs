// Shared context and helpers for command handlers

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};

use crate::models::{DueState, Settings, Task};
use crate::notes::NoteStorage;
use crate::tasks::TaskManager;

/// Effective settings plus the config file they came from
#[derive(Debug, Clone)]
pub struct App {
    pub settings: Settings,
    pub config_path: PathBuf,
}

impl App {
    pub fn new(settings: Settings, config_path: PathBuf) -> Self {
        Self { settings, config_path }
    }

    pub fn storage(&self) -> anyhow::Result<NoteStorage> {
        NoteStorage::from_settings(&self.settings)
            .with_context(|| format!("cannot open notes directory {}", self.settings.notes_dir.display()))
    }

    pub fn tasks(&self) -> anyhow::Result<TaskManager> {
        TaskManager::from_settings(&self.settings).context("cannot open task store")
    }

    /// Launch the configured editor on `path` and wait for it
    pub fn open_editor(&self, path: &Path) -> anyhow::Result<()> {
        let editor = &self.settings.editor;
        tracing::debug!(editor = %editor, path = %path.display(), "launching editor");
        let status = Command::new(editor)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch editor {editor:?}"))?;
        if !status.success() {
            bail!("editor {editor:?} exited with {status}");
        }
        Ok(())
    }
}

/// One-line task summary shared by `task` output
pub fn format_task(task: &Task, due_soon_days: i64) -> String {
    let checkbox = if task.is_done() { "[x]" } else { "[ ]" };
    let mut line = format!("{} [{}]", checkbox, task.id);
    if !task.priority.label().is_empty() {
        line.push_str(&format!(" ({})", task.priority.label()));
    }
    line.push(' ');
    line.push_str(&task.description);
    if task.has_note() {
        line.push_str(&format!(" -> {}", task.note_id));
    }
    if let (Some(due), Some(state)) = (task.due_date, task.due_state(due_soon_days)) {
        let label = due.format("%m/%d");
        match state {
            DueState::Overdue => line.push_str(&format!(" ! overdue {label}")),
            DueState::Soon => line.push_str(&format!(" @ soon {label}")),
            DueState::Later => line.push_str(&format!(" @ {label}")),
        }
    }
    line
}

/// Cut `s` to at most `width` characters, ending with "..."
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn task_line_shows_priority_and_note() {
        let mut task = Task::new(3, "Call dentist", Priority::High);
        task.note_id = "health.md".to_string();
        assert_eq!(format_task(&task, 3), "[ ] [3] (P1) Call dentist -> health.md");
        task.complete();
        assert!(format_task(&task, 3).starts_with("[x] [3]"));
    }
}
