// Task management: YAML-backed store plus ordering strategies

pub mod manager;
pub mod order;

pub use manager::TaskManager;
pub use order::{sort_tasks, TaskOrder};
