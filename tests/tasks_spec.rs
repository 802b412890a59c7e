use std::fs;

use chrono::{Local, NaiveDate, TimeZone};
use notecli_lib::dates::parse_due_date;
use notecli_lib::models::{Priority, TaskStatus};
use notecli_lib::tasks::TaskManager;
use notecli_lib::Error;
use tempfile::TempDir;

fn manager() -> (TempDir, TaskManager) {
    let dir = tempfile::tempdir().unwrap();
    let tm = TaskManager::open(dir.path(), ".tasks.yaml").unwrap();
    (dir, tm)
}

fn descriptions(tasks: &[notecli_lib::models::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.description.as_str()).collect()
}

#[test]
fn higher_priority_lists_first() {
    let (_dir, mut tm) = manager();
    tm.add("Buy milk", Priority::Medium, "", None).unwrap();
    tm.add("Call dentist", Priority::High, "", None).unwrap();
    assert_eq!(descriptions(&tm.list(false)), vec!["Call dentist", "Buy milk"]);
}

#[test]
fn dated_tasks_list_before_undated() {
    let (_dir, mut tm) = manager();
    let due = parse_due_date("2026-01-20").unwrap();
    tm.add("Renew passport", Priority::Medium, "", due).unwrap();
    tm.add("Pay rent", Priority::High, "", None).unwrap();
    assert_eq!(descriptions(&tm.list_by_due_date(false)), vec!["Renew passport", "Pay rent"]);
}

#[test]
fn ids_increase_across_deletes_and_reloads() {
    let (dir, mut tm) = manager();
    for (i, d) in ["a", "b", "c"].iter().enumerate() {
        assert_eq!(tm.add(d, Priority::None, "", None).unwrap().id, i as u32 + 1);
    }
    tm.delete(3).unwrap();

    let mut reopened = TaskManager::open(dir.path(), ".tasks.yaml").unwrap();
    assert_eq!(reopened.add("d", Priority::None, "", None).unwrap().id, 4);
}

#[test]
fn done_and_double_toggle() {
    let (_dir, mut tm) = manager();
    let t = tm.add("x", Priority::Low, "", None).unwrap();

    tm.done(t.id).unwrap();
    let done = tm.get(t.id).unwrap();
    assert!(done.is_done());
    assert!(done.completed.is_some());

    let (_dir2, mut tm2) = manager();
    let t2 = tm2.add("y", Priority::Low, "", None).unwrap();
    tm2.toggle(t2.id).unwrap();
    tm2.toggle(t2.id).unwrap();
    let back = tm2.get(t2.id).unwrap();
    assert_eq!(back.status, TaskStatus::Pending);
    assert!(back.completed.is_none());
}

#[test]
fn done_tasks_hidden_unless_requested() {
    let (_dir, mut tm) = manager();
    tm.add("open", Priority::None, "", None).unwrap();
    let closed = tm.add("closed", Priority::None, "", None).unwrap();
    tm.done(closed.id).unwrap();
    assert_eq!(descriptions(&tm.list(false)), vec!["open"]);
    assert_eq!(tm.list(true).len(), 2);
    assert_eq!(tm.list_by_due_date(true).len(), 2);
}

#[test]
fn changes_persist_to_yaml() {
    let (dir, mut tm) = manager();
    let t = tm.add("persist me", Priority::High, "plan.md", parse_due_date("2026-03-01").unwrap()).unwrap();
    tm.done(t.id).unwrap();

    let reopened = TaskManager::open(dir.path(), ".tasks.yaml").unwrap();
    let loaded = reopened.get(t.id).unwrap();
    assert_eq!(loaded.description, "persist me");
    assert_eq!(loaded.priority, Priority::High);
    assert_eq!(loaded.note_id, "plan.md");
    assert!(loaded.is_done());
    assert_eq!(loaded.due_date.unwrap().date_naive(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

    let raw = fs::read_to_string(dir.path().join(".tasks.yaml")).unwrap();
    assert!(raw.contains("next_id: 2"));
    assert!(raw.contains("priority: 3"));
    assert!(raw.contains("status: 1"));
}

#[test]
fn optional_fields_are_omitted() {
    let (dir, mut tm) = manager();
    tm.add("bare", Priority::None, "", None).unwrap();
    let raw = fs::read_to_string(dir.path().join(".tasks.yaml")).unwrap();
    assert!(!raw.contains("note_id"));
    assert!(!raw.contains("due_date"));
    assert!(!raw.contains("completed"));
}

#[test]
fn legacy_zero_times_read_as_unset() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".tasks.yaml"),
        "next_id: 2\ntasks:\n- id: 1\n  description: old\n  priority: 2\n  status: 0\n  due_date: 0001-01-01T00:00:00Z\n  created: 2025-05-01T10:00:00+00:00\n  completed: 0001-01-01T00:00:00Z\n",
    )
    .unwrap();
    let tm = TaskManager::open(dir.path(), ".tasks.yaml").unwrap();
    let t = tm.get(1).unwrap();
    assert!(t.due_date.is_none());
    assert!(t.completed.is_none());
    assert_eq!(t.priority, Priority::Medium);
}

#[test]
fn corrupt_store_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".tasks.yaml"), "next_id: [oops\n").unwrap();
    let err = TaskManager::open(dir.path(), ".tasks.yaml").unwrap_err();
    assert!(matches!(err, Error::TaskStore { .. }));
}

#[test]
fn stale_next_id_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".tasks.yaml"),
        "next_id: 1\ntasks:\n- id: 5\n  description: later\n  priority: 0\n  status: 0\n  created: 2025-05-01T10:00:00+00:00\n",
    )
    .unwrap();
    let mut tm = TaskManager::open(dir.path(), ".tasks.yaml").unwrap();
    assert_eq!(tm.next_id(), 6);
    assert_eq!(tm.add("new", Priority::None, "", None).unwrap().id, 6);
}

#[test]
fn overdue_and_due_soon_against_fixed_now() {
    let (_dir, mut tm) = manager();
    let due = Local.with_ymd_and_hms(2026, 1, 20, 23, 59, 59).unwrap();
    let t = tm.add("deadline", Priority::None, "", Some(due)).unwrap();

    let before = Local.with_ymd_and_hms(2026, 1, 19, 9, 0, 0).unwrap();
    let after = Local.with_ymd_and_hms(2026, 1, 21, 9, 0, 0).unwrap();
    assert!(t.is_due_soon_at(3, before));
    assert!(!t.is_overdue_at(before));
    assert!(t.is_overdue_at(after));
    assert!(!t.is_due_soon_at(3, after));
}

#[test]
fn missing_ids_are_errors() {
    let (_dir, mut tm) = manager();
    assert!(matches!(tm.toggle(42), Err(Error::TaskNotFound(42))));
    assert!(matches!(tm.unlink_note(42), Err(Error::TaskNotFound(42))));
    assert!(matches!(tm.set_note_id(42, "x.md"), Err(Error::TaskNotFound(42))));
}
