// Task ordering strategies
// All sorts are stable, so equal keys keep their stored order

use std::cmp::Ordering;

use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskOrder {
    /// Priority descending, then creation time ascending
    #[default]
    Priority,
    /// Dated before undated, earlier due first, then priority descending
    DueDate,
}

impl TaskOrder {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => b.priority.cmp(&a.priority).then_with(|| a.created.cmp(&b.created)),
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| b.priority.cmp(&a.priority)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.priority.cmp(&a.priority),
            },
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Priority,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due date",
        }
    }
}

pub fn sort_tasks(tasks: &mut [Task], order: TaskOrder) {
    tasks.sort_by(|a, b| order.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn base() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()
    }

    fn task(id: u32, priority: Priority, due_in_days: Option<i64>) -> Task {
        let mut t = Task::new(id, format!("task {id}"), priority);
        t.created = base() + Duration::minutes(id as i64);
        t.due_date = due_in_days.map(|d| base() + Duration::days(d));
        t
    }

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn priority_order_breaks_ties_by_creation() {
        let mut tasks = vec![
            task(1, Priority::Low, None),
            task(2, Priority::High, None),
            task(3, Priority::None, None),
            task(4, Priority::High, None),
            task(5, Priority::Medium, None),
        ];
        sort_tasks(&mut tasks, TaskOrder::Priority);
        assert_eq!(ids(&tasks), vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn due_date_order_puts_undated_last() {
        let mut tasks = vec![
            task(1, Priority::High, None),
            task(2, Priority::Low, Some(5)),
            task(3, Priority::None, Some(1)),
            task(4, Priority::Low, None),
            task(5, Priority::High, Some(5)),
        ];
        sort_tasks(&mut tasks, TaskOrder::DueDate);
        assert_eq!(ids(&tasks), vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn undated_group_is_ordered_by_priority() {
        let mut tasks = vec![task(1, Priority::Low, None), task(2, Priority::Medium, None)];
        sort_tasks(&mut tasks, TaskOrder::DueDate);
        assert_eq!(ids(&tasks), vec![2, 1]);
    }

    #[test]
    fn toggled_flips_between_strategies() {
        assert_eq!(TaskOrder::Priority.toggled(), TaskOrder::DueDate);
        assert_eq!(TaskOrder::DueDate.toggled(), TaskOrder::Priority);
    }
}
