// Task manager backed by a single YAML file under the notes root
// Every mutation rewrites the whole store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::order::{sort_tasks, TaskOrder};
use crate::error::{Error, Result};
use crate::models::{Priority, Settings, Task, TaskStore};
use crate::storage::ensure_dir;

#[derive(Debug)]
pub struct TaskManager {
    path: PathBuf,
    store: TaskStore,
}

impl TaskManager {
    /// Load `root/tasks_file`, starting empty when the file does not exist yet
    pub fn open(root: impl AsRef<Path>, tasks_file: &str) -> Result<Self> {
        let root = root.as_ref();
        ensure_dir(root)?;
        let path = root.join(tasks_file);
        let store = read_store(&path)?;
        tracing::debug!(path = %path.display(), tasks = store.tasks.len(), "task store loaded");
        Ok(Self { path, store })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::open(&settings.notes_dir, &settings.paths.tasks_file)
    }

    pub fn next_id(&self) -> u32 {
        self.store.next_id
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn add(
        &mut self,
        description: &str,
        priority: Priority,
        note_id: &str,
        due_date: Option<DateTime<Local>>,
    ) -> Result<Task> {
        let next_id = self
            .store
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::TaskIdsExhausted(self.path.clone()))?;
        let task = self.commit(|store| {
            let mut task = Task::new(store.next_id, description, priority);
            task.note_id = note_id.to_string();
            task.due_date = due_date;
            store.next_id = next_id;
            store.tasks.push(task.clone());
            Ok(task)
        })?;
        tracing::info!(id = task.id, "task added");
        Ok(task)
    }

    pub fn done(&mut self, id: u32) -> Result<()> {
        self.update(id, Task::complete)?;
        tracing::info!(id, "task completed");
        Ok(())
    }

    /// Flip between pending and done; returns the task's new state
    pub fn toggle(&mut self, id: u32) -> Result<Task> {
        let task = self.update(id, |t| if t.is_done() { t.reopen() } else { t.complete() })?;
        tracing::info!(id, done = task.is_done(), "task toggled");
        Ok(task)
    }

    pub fn delete(&mut self, id: u32) -> Result<()> {
        self.commit(|store| {
            let index = store.tasks.iter().position(|t| t.id == id).ok_or(Error::TaskNotFound(id))?;
            store.tasks.remove(index);
            Ok(())
        })?;
        tracing::info!(id, "task deleted");
        Ok(())
    }

    pub fn set_note_id(&mut self, id: u32, note_id: &str) -> Result<()> {
        self.update(id, |t| t.note_id = note_id.to_string())?;
        tracing::info!(id, note = %note_id, "task linked");
        Ok(())
    }

    pub fn unlink_note(&mut self, id: u32) -> Result<()> {
        self.set_note_id(id, "")
    }

    pub fn set_due_date(&mut self, id: u32, due_date: Option<DateTime<Local>>) -> Result<()> {
        self.update(id, |t| t.due_date = due_date)?;
        tracing::info!(id, due = ?due_date, "task due date set");
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, id: u32) -> Result<&Task> {
        self.store.find(id).ok_or(Error::TaskNotFound(id))
    }

    pub fn list(&self, show_done: bool) -> Vec<Task> {
        self.list_ordered(show_done, TaskOrder::Priority)
    }

    pub fn list_by_due_date(&self, show_done: bool) -> Vec<Task> {
        self.list_ordered(show_done, TaskOrder::DueDate)
    }

    pub fn list_ordered(&self, show_done: bool, order: TaskOrder) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.store.tasks.iter().filter(|t| show_done || !t.is_done()).cloned().collect();
        sort_tasks(&mut tasks, order);
        tasks
    }

    /// Tasks linked to `note_id` (done included), in priority order
    pub fn list_by_note(&self, note_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.store.tasks.iter().filter(|t| t.note_id == note_id).cloned().collect();
        sort_tasks(&mut tasks, TaskOrder::Priority);
        tasks
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn update(&mut self, id: u32, apply: impl FnOnce(&mut Task)) -> Result<Task> {
        self.commit(|store| {
            let task = store.find_mut(id).ok_or(Error::TaskNotFound(id))?;
            apply(task);
            Ok(task.clone())
        })
    }

    // Apply to a copy, write it, and only then replace the in-memory store
    fn commit<T>(&mut self, change: impl FnOnce(&mut TaskStore) -> Result<T>) -> Result<T> {
        let mut next = self.store.clone();
        let out = change(&mut next)?;
        write_store(&self.path, &next)?;
        self.store = next;
        Ok(out)
    }
}

fn read_store(path: &Path) -> Result<TaskStore> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TaskStore::default()),
        Err(e) => return Err(Error::io("read", path, e)),
    };
    if data.trim().is_empty() {
        return Ok(TaskStore::default());
    }

    let mut store: TaskStore =
        serde_yaml::from_str(&data).map_err(|source| Error::TaskStore { path: path.to_path_buf(), source })?;

    let max_id = store.max_id();
    if store.next_id <= max_id || store.next_id == 0 {
        tracing::warn!(path = %path.display(), next_id = store.next_id, max_id, "repairing task store next_id");
        store.next_id = max_id.checked_add(1).ok_or_else(|| Error::TaskIdsExhausted(path.to_path_buf()))?;
    }
    Ok(store)
}

fn write_store(path: &Path, store: &TaskStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let data = serde_yaml::to_string(store)?;
    fs::write(path, data).map_err(|e| Error::io("write", path, e))
}
