// Task commands

use anyhow::Context;

use super::common::{format_task, App};
use crate::cli::TaskCommand;
use crate::dates::{parse_due_date, parse_task_id};
use crate::models::{Priority, Task};

pub fn run(app: &App, cmd: TaskCommand) -> anyhow::Result<()> {
    let mut manager = app.tasks()?;
    let due_soon = app.settings.display.due_soon_days;

    match cmd {
        TaskCommand::Add { description, priority, note, due } => {
            let description = description.join(" ");
            let priority = priority.as_deref().map(Priority::parse).unwrap_or_default();
            let due_date = parse_due_date(due.as_deref().unwrap_or(""))?;
            let note_id = match note {
                Some(query) => app.storage()?.find(&query).context("cannot link task")?.id,
                None => String::new(),
            };

            let task = manager.add(&description, priority, &note_id, due_date)?;
            let mut extras = Vec::new();
            if task.has_note() {
                extras.push(format!("note {}", task.note_id));
            }
            if let Some(due) = task.due_date {
                extras.push(format!("due {}", due.format(&app.settings.formats.date)));
            }
            let extras = if extras.is_empty() { String::new() } else { format!(" ({})", extras.join(", ")) };
            println!("Added task [{}] {}{}", task.id, task.description, extras);
        }
        TaskCommand::List { all, by_due, json } => {
            let tasks = if by_due { manager.list_by_due_date(all) } else { manager.list(all) };
            print_tasks(&tasks, json, due_soon)?;
        }
        TaskCommand::Done { id } => {
            let id = parse_task_id(&id)?;
            manager.done(id)?;
            println!("Completed task [{}] {}", id, manager.get(id)?.description);
        }
        TaskCommand::Undo { id } => {
            let task = manager.toggle(parse_task_id(&id)?)?;
            let state = if task.is_done() { "done" } else { "pending" };
            println!("Task [{}] {} is now {}", task.id, task.description, state);
        }
        TaskCommand::Delete { id } => {
            let id = parse_task_id(&id)?;
            let description = manager.get(id)?.description.clone();
            manager.delete(id)?;
            println!("Deleted task [{id}] {description}");
        }
        TaskCommand::Link { id, note } => {
            let id = parse_task_id(&id)?;
            let note = app.storage()?.find(&note.join(" "))?;
            manager.set_note_id(id, &note.id)?;
            println!("Linked task [{id}] to {}", note.id);
        }
        TaskCommand::Unlink { id } => {
            let id = parse_task_id(&id)?;
            manager.unlink_note(id)?;
            println!("Unlinked task [{id}]");
        }
        TaskCommand::Due { id, date } => {
            let id = parse_task_id(&id)?;
            let due = if date.eq_ignore_ascii_case("none") { None } else { parse_due_date(&date)? };
            manager.set_due_date(id, due)?;
            match due {
                Some(due) => println!("Task [{id}] due {}", due.format(&app.settings.formats.date)),
                None => println!("Task [{id}] has no due date"),
            }
        }
        TaskCommand::Note { note } => {
            let note = app.storage()?.find(&note.join(" "))?;
            println!("Tasks for {}:", note.title);
            print_tasks(&manager.list_by_note(&note.id), false, due_soon)?;
        }
    }
    Ok(())
}

fn print_tasks(tasks: &[Task], json: bool, due_soon: i64) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("No tasks");
    }
    for task in tasks {
        println!("{}", format_task(task, due_soon));
    }
    Ok(())
}
