// Dashboard rendering with ratatui (read-only view of Dashboard)

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::state::{Dashboard, Mode};
use crate::models::{DueState, Note, Task};

const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";

pub fn render(frame: &mut Frame, app: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(frame.area());

    match &app.mode {
        Mode::NotesList => render_notes(frame, app, chunks[0]),
        Mode::NoteDetail | Mode::AddTask { .. } => render_detail(frame, app, chunks[0]),
        Mode::AttachTask { candidates, selected } => render_attach(frame, app, candidates, *selected, chunks[0]),
    }

    let status = app.status.as_deref().unwrap_or("");
    frame.render_widget(Paragraph::new(status).style(Style::default().fg(Color::Red)), chunks[1]);
    frame.render_widget(Paragraph::new(help_text(app)).style(Style::default().fg(Color::DarkGray)), chunks[2]);
}

fn help_text(app: &Dashboard) -> String {
    match &app.mode {
        Mode::NotesList => "j/k: move | Enter: open | q: quit".to_string(),
        Mode::NoteDetail => format!(
            "j/k: move | Enter/Space: toggle | i: add | a: attach | d: delete | o: unlink | s: sort by {} | Tab/Esc: back",
            app.order.toggled().label()
        ),
        Mode::AddTask { editing_due: true, .. } => "Enter: save | Esc: back".to_string(),
        Mode::AddTask { .. } => "Tab: priority | Ctrl+D: due date | Enter: save | Esc: cancel".to_string(),
        Mode::AttachTask { .. } => "j/k: move | Enter: attach | Esc: cancel".to_string(),
    }
}

fn selected_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn render_notes(frame: &mut Frame, app: &Dashboard, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Notes ");

    if app.notes.is_empty() {
        frame.render_widget(Paragraph::new("No notes yet").block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let cursor = if i == app.selected_note { CURSOR } else { NO_CURSOR };
            let line = Line::from(vec![
                Span::raw(cursor),
                Span::raw(display_title(note)),
                Span::styled(
                    format!("  {}", note.modified.format(&app.formats.date)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected_note));
    let list = List::new(items).block(block).highlight_style(selected_style());
    frame.render_stateful_widget(list, area, &mut state);
}

// Notes in subdirectories show their directory
fn display_title(note: &Note) -> String {
    match note.id.rsplit_once('/') {
        Some((dir, _)) => format!("{}/{}", dir, note.title),
        None => note.title.clone(),
    }
}

fn render_detail(frame: &mut Frame, app: &Dashboard, area: Rect) {
    let Some(note) = app.current_note() else {
        frame.render_widget(Paragraph::new("No note selected"), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let meta = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::styled(
            format!(
                "created {} | modified {}",
                note.created.format(&app.formats.datetime),
                note.modified.format(&app.formats.datetime)
            ),
            meta,
        ),
    ];
    if !note.tags.is_empty() {
        lines.push(Line::styled(format!("tags: {}", note.tags.join(", ")), meta));
    }
    let width = app.display.separator_width.min(area.width.saturating_sub(2) as usize);
    lines.push(Line::raw("─".repeat(width)));

    let max_content = (chunks[0].height as usize).saturating_sub(lines.len() + 5).max(3);
    let content: Vec<&str> = note.content.lines().collect();
    lines.extend(content.iter().take(max_content).map(|l| Line::raw(l.to_string())));
    if content.len() > max_content {
        lines.push(Line::styled("...", meta));
    }

    let links = &app.links;
    if !links.found.is_empty() || !links.not_found.is_empty() {
        let parts: Vec<String> = links
            .found
            .iter()
            .map(|n| n.title.clone())
            .chain(links.not_found.iter().map(|name| format!("{name}(?)")))
            .collect();
        lines.push(Line::styled(format!("links: {}", parts.join(", ")), meta));
    }
    if !app.backlinks.is_empty() {
        let parts: Vec<&str> = app.backlinks.iter().map(|n| n.title.as_str()).collect();
        lines.push(Line::styled(format!("backlinks: {}", parts.join(", ")), meta));
    }

    let title = format!(" {} ", note.title);
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[0]);

    render_tasks(frame, app, chunks[1]);
}

fn render_tasks(frame: &mut Frame, app: &Dashboard, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" Tasks (by {}) ", app.order.label()));

    let mut items: Vec<ListItem> = Vec::new();
    if let Mode::AddTask { description, priority, due, editing_due } = &app.mode {
        let label = if priority.label().is_empty() { "-" } else { priority.label() };
        items.push(ListItem::new(format!("  [{}] {}{}", label, description, if *editing_due { "" } else { "_" })));
        if *editing_due {
            items.push(ListItem::new(format!("  due: {due}_")));
        }
    }

    let adding = matches!(app.mode, Mode::AddTask { .. });
    if app.tasks.is_empty() && !adding {
        items.push(ListItem::new(Line::styled("  no tasks", Style::default().fg(Color::DarkGray))));
    }

    for (i, task) in app.tasks.iter().enumerate() {
        let selected = i == app.selected_task && !adding;
        let style = if task.is_done() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else if selected {
            selected_style()
        } else {
            Style::default()
        };
        let cursor = if selected { CURSOR } else { NO_CURSOR };
        let line = task_line(task, true, app.display.due_soon_days);
        items.push(ListItem::new(Line::styled(format!("{cursor}{line}"), style)));
    }

    frame.render_widget(List::new(items).block(block), area);
}

fn render_attach(frame: &mut Frame, app: &Dashboard, candidates: &[Task], selected: usize, area: Rect) {
    let title = app.current_note().map(|n| n.title.as_str()).unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(format!(" {title} - attach task "));

    let items: Vec<ListItem> = candidates
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let cursor = if i == selected { CURSOR } else { NO_CURSOR };
            ListItem::new(format!("{}{}", cursor, task_line(task, false, app.display.due_soon_days)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(List::new(items).block(block).highlight_style(selected_style()), area, &mut state);
}

fn task_line(task: &Task, checkbox: bool, due_soon_days: i64) -> String {
    let mut line = String::new();
    if checkbox {
        line.push_str(if task.is_done() { "[x] " } else { "[ ] " });
    }
    if !task.priority.label().is_empty() {
        line.push_str(&format!("({}) ", task.priority.label()));
    }
    line.push_str(&task.description);
    if let (Some(due), Some(state)) = (task.due_date, task.due_state(due_soon_days)) {
        let marker = match state {
            DueState::Overdue => " !",
            DueState::Soon => " @soon ",
            DueState::Later => " @",
        };
        line.push_str(&format!("{}{}", marker, due.format("%m/%d")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, Local};

    #[test]
    fn task_line_marks_due_soon_with_configured_window() {
        let mut task = Task::new(1, "Pay rent", Priority::High);
        task.due_date = Some(Local::now() + Duration::days(2));
        assert!(task_line(&task, true, 3).contains(" @soon "));
        assert!(!task_line(&task, true, 1).contains("soon"));

        task.due_date = Some(Local::now() - Duration::days(1));
        assert!(task_line(&task, false, 3).contains(" !"));
    }

    #[test]
    fn task_line_layout() {
        let task = Task::new(4, "Call dentist", Priority::Medium);
        assert_eq!(task_line(&task, true, 3), "[ ] (P2) Call dentist");
        assert_eq!(task_line(&task, false, 3), "(P2) Call dentist");
    }
}
