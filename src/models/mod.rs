// Models module for notecli
// Plain value types shared by storage, tasks and the presentation layer

pub mod common;
pub mod config;
pub mod note;
pub mod task;

pub use common::{Priority, TaskStatus};
pub use config::{Display, Formats, Paths, Settings, SettingsOverride};
pub use note::{Note, NoteFrontmatter};
pub use task::{DueState, Task, TaskStore};
