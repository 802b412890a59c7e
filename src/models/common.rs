// Common types for notes and tasks
// Priority and status are stored as small integers in the task store

use serde::{Deserialize, Serialize};

/// Task priority, ordered None < Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// Order used when cycling priorities in the dashboard input
pub const PRIORITY_CYCLE: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

impl Priority {
    /// Parse a user-supplied priority ("1"/"high", "2"/"medium", "3"/"low").
    /// Anything else means no priority.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "1" | "high" => Self::High,
            "2" | "medium" => Self::Medium,
            "3" | "low" => Self::Low,
            _ => Self::None,
        }
    }

    /// Short label shown next to tasks ("P1".."P3"), empty for no priority
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "P1",
            Self::Medium => "P2",
            Self::Low => "P3",
            Self::None => "",
        }
    }

    pub fn cycle(self, reverse: bool) -> Self {
        let len = PRIORITY_CYCLE.len();
        match PRIORITY_CYCLE.iter().position(|p| *p == self) {
            Some(i) if reverse => PRIORITY_CYCLE[(i + len - 1) % len],
            Some(i) => PRIORITY_CYCLE[(i + 1) % len],
            None => PRIORITY_CYCLE[0],
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::None),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(format!("unknown priority {}", other)),
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
}

impl From<TaskStatus> for u8 {
    fn from(s: TaskStatus) -> Self {
        s as u8
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Done),
            other => Err(format!("unknown task status {}", other)),
        }
    }
}
