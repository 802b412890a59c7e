// Task model for the YAML task store
// Ids are assigned by the TaskManager and never reused

use chrono::{DateTime, Datelike, Duration, Local};
use serde::{Deserialize, Deserializer, Serialize};

use super::common::{Priority, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "zero_time_as_none")]
    pub due_date: Option<DateTime<Local>>,
    pub created: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "zero_time_as_none")]
    pub completed: Option<DateTime<Local>>,
}

// Older stores wrote the zero time (0001-01-01) for "unset"
fn zero_time_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Local>>::deserialize(deserializer)?;
    Ok(value.filter(|t| t.year() > 1))
}

impl Task {
    pub fn new(id: u32, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            description: description.into(),
            priority,
            status: TaskStatus::Pending,
            note_id: String::new(),
            due_date: None,
            created: Local::now(),
            completed: None,
        }
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
        self.completed = Some(Local::now());
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::Pending;
        self.completed = None;
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn has_note(&self) -> bool {
        !self.note_id.is_empty()
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Local::now())
    }

    pub fn is_overdue_at(&self, now: DateTime<Local>) -> bool {
        match self.due_date {
            Some(due) if !self.is_done() => now > due,
            _ => false,
        }
    }

    /// Due within `days` of now, but not yet overdue
    pub fn is_due_soon(&self, days: i64) -> bool {
        self.is_due_soon_at(days, Local::now())
    }

    pub fn is_due_soon_at(&self, days: i64, now: DateTime<Local>) -> bool {
        // A window past chrono's range covers every date (or none, when negative)
        let within = |due: DateTime<Local>| match Duration::try_days(days).and_then(|d| now.checked_add_signed(d)) {
            Some(limit) => due < limit,
            None => days > 0,
        };
        match self.due_date {
            Some(due) if !self.is_done() => within(due) && !self.is_overdue_at(now),
            _ => false,
        }
    }

    /// How the due date should be flagged, if the task has one
    pub fn due_state(&self, soon_days: i64) -> Option<DueState> {
        self.due_state_at(soon_days, Local::now())
    }

    pub fn due_state_at(&self, soon_days: i64, now: DateTime<Local>) -> Option<DueState> {
        if self.due_date.is_none() {
            return None;
        }
        Some(if self.is_overdue_at(now) {
            DueState::Overdue
        } else if self.is_due_soon_at(soon_days, now) {
            DueState::Soon
        } else {
            DueState::Later
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    Overdue,
    Soon,
    Later,
}

/// Persisted container for all tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStore {
    pub next_id: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self { next_id: 1, tasks: Vec::new() }
    }
}

impl TaskStore {
    pub fn max_id(&self) -> u32 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0)
    }

    pub fn find(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}
