// Dashboard state machine
// Every key press goes through Dashboard::handle_key; rendering only reads this state

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::dates::parse_due_date;
use crate::error::Result;
use crate::models::{Display, Formats, Note, Priority, Settings, Task};
use crate::notes::{extract_links, find_backlinks, resolve_links, NoteStorage, Resolved};
use crate::tasks::{sort_tasks, TaskManager, TaskOrder};

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    NotesList,
    NoteDetail,
    /// Typing a new task for the open note; `editing_due` switches input to `due`
    AddTask {
        description: String,
        priority: Priority,
        due: String,
        editing_due: bool,
    },
    /// Picking an unlinked pending task to attach to the open note
    AttachTask { candidates: Vec<Task>, selected: usize },
}

impl Mode {
    fn add_task() -> Self {
        Self::AddTask { description: String::new(), priority: Priority::Medium, due: String::new(), editing_due: false }
    }
}

pub struct Dashboard {
    pub(crate) storage: NoteStorage,
    pub(crate) manager: TaskManager,
    pub(crate) formats: Formats,
    pub(crate) display: Display,
    pub(crate) notes: Vec<Note>,
    pub(crate) selected_note: usize,
    pub(crate) tasks: Vec<Task>,
    pub(crate) selected_task: usize,
    pub(crate) links: Resolved,
    pub(crate) backlinks: Vec<Note>,
    pub(crate) order: TaskOrder,
    pub(crate) mode: Mode,
    pub(crate) status: Option<String>,
    quit: bool,
}

impl Dashboard {
    pub fn new(storage: NoteStorage, manager: TaskManager, settings: &Settings) -> Result<Self> {
        let notes = storage.list(None)?;
        Ok(Self {
            storage,
            manager,
            formats: settings.formats.clone(),
            display: settings.display.clone(),
            notes,
            selected_note: 0,
            tasks: Vec::new(),
            selected_task: 0,
            links: Resolved::default(),
            backlinks: Vec::new(),
            order: TaskOrder::Priority,
            mode: Mode::NotesList,
            status: None,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.notes.get(self.selected_note)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        match self.mode {
            Mode::AddTask { .. } => self.handle_task_input(key),
            Mode::AttachTask { .. } => self.handle_attach(key),
            Mode::NotesList | Mode::NoteDetail => self.handle_navigation(key),
        }
    }

    // ========================================================================
    // NotesList / NoteDetail
    // ========================================================================

    fn handle_navigation(&mut self, key: KeyEvent) {
        let detail = self.mode == Mode::NoteDetail;
        let has_tasks = !self.tasks.is_empty();
        self.status = None;

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter if !detail && !self.notes.is_empty() => self.open_detail(),
            KeyCode::Enter | KeyCode::Char(' ') if detail && has_tasks => self.toggle_task(),
            KeyCode::Tab | KeyCode::Esc if detail => self.mode = Mode::NotesList,
            KeyCode::Char('i') if detail => self.mode = Mode::add_task(),
            KeyCode::Char('d') | KeyCode::Char('x') if detail && has_tasks => self.delete_task(),
            KeyCode::Char('o') if detail && has_tasks => self.unlink_task(),
            KeyCode::Char('a') if detail => self.start_attach(),
            KeyCode::Char('s') if detail => {
                self.order = self.order.toggled();
                self.reload_tasks();
            }
            _ => {}
        }
    }

    fn move_down(&mut self) {
        let (index, len) = match self.mode {
            Mode::NotesList => (&mut self.selected_note, self.notes.len()),
            _ => (&mut self.selected_task, self.tasks.len()),
        };
        if *index + 1 < len {
            *index += 1;
        }
    }

    fn move_up(&mut self) {
        let index = match self.mode {
            Mode::NotesList => &mut self.selected_note,
            _ => &mut self.selected_task,
        };
        *index = index.saturating_sub(1);
    }

    fn open_detail(&mut self) {
        let Some(note) = self.current_note() else { return };
        let names = extract_links(&note.content);
        let title = note.title.clone();

        self.links = resolve_links(&self.storage, &names);
        self.backlinks = match find_backlinks(&self.storage, &title) {
            Ok(notes) => notes,
            Err(e) => {
                self.status = Some(e.to_string());
                Vec::new()
            }
        };
        self.selected_task = 0;
        self.mode = Mode::NoteDetail;
        self.reload_tasks();
    }

    fn reload_tasks(&mut self) {
        let Some(note) = self.notes.get(self.selected_note) else { return };
        self.tasks = self.manager.list_by_note(&note.id);
        if self.order == TaskOrder::DueDate {
            sort_tasks(&mut self.tasks, TaskOrder::DueDate);
        }
        if self.selected_task >= self.tasks.len() {
            self.selected_task = self.tasks.len().saturating_sub(1);
        }
    }

    fn selected_task_id(&self) -> Option<u32> {
        self.tasks.get(self.selected_task).map(|t| t.id)
    }

    fn toggle_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.manager.toggle(id).map(|_| ());
            self.after(result);
        }
    }

    fn delete_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.manager.delete(id);
            self.after(result);
        }
    }

    fn unlink_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.manager.unlink_note(id);
            self.after(result);
        }
    }

    fn start_attach(&mut self) {
        let candidates: Vec<Task> = self.manager.list(false).into_iter().filter(|t| !t.has_note()).collect();
        if candidates.is_empty() {
            self.status = Some("no unlinked tasks to attach".to_string());
        } else {
            self.mode = Mode::AttachTask { candidates, selected: 0 };
        }
    }

    // Reload after a mutation, surfacing a failure on the status line
    fn after(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "dashboard action failed");
            self.status = Some(e.to_string());
        }
        self.reload_tasks();
    }

    // ========================================================================
    // AddTask
    // ========================================================================

    fn handle_task_input(&mut self, key: KeyEvent) {
        let Mode::AddTask { description, priority, due, editing_due } = &mut self.mode else { return };

        if *editing_due {
            match key.code {
                KeyCode::Enter => {
                    let parsed = parse_due_date(due);
                    let (description, priority) = (description.clone(), *priority);
                    match parsed {
                        Ok(due_date) => self.commit_task(&description, priority, due_date),
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
                KeyCode::Esc => {
                    due.clear();
                    *editing_due = false;
                }
                KeyCode::Backspace => {
                    due.pop();
                }
                KeyCode::Char(c) if is_text(&key) => due.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let (description, priority) = (description.clone(), *priority);
                if description.trim().is_empty() {
                    self.mode = Mode::NoteDetail;
                } else {
                    self.commit_task(&description, priority, None);
                }
            }
            KeyCode::Esc => self.mode = Mode::NoteDetail,
            KeyCode::Tab => *priority = priority.cycle(false),
            KeyCode::BackTab => *priority = priority.cycle(true),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !description.trim().is_empty() {
                    *editing_due = true;
                }
            }
            KeyCode::Backspace => {
                description.pop();
            }
            KeyCode::Char(c) if is_text(&key) => description.push(c),
            _ => {}
        }
    }

    fn commit_task(&mut self, description: &str, priority: Priority, due_date: Option<chrono::DateTime<chrono::Local>>) {
        let Some(note_id) = self.current_note().map(|n| n.id.clone()) else { return };
        self.mode = Mode::NoteDetail;
        let result = self.manager.add(description.trim(), priority, &note_id, due_date).map(|_| ());
        self.after(result);
    }

    // ========================================================================
    // AttachTask
    // ========================================================================

    fn handle_attach(&mut self, key: KeyEvent) {
        let Mode::AttachTask { candidates, selected } = &mut self.mode else { return };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if *selected + 1 < candidates.len() {
                    *selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => *selected = selected.saturating_sub(1),
            KeyCode::Enter => {
                let task_id = candidates.get(*selected).map(|t| t.id);
                let note_id = self.notes.get(self.selected_note).map(|n| n.id.clone());
                self.mode = Mode::NoteDetail;
                if let (Some(task_id), Some(note_id)) = (task_id, note_id) {
                    let result = self.manager.set_note_id(task_id, &note_id);
                    self.after(result);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.mode = Mode::NoteDetail,
            _ => {}
        }
    }
}

// Plain or shifted characters only; Ctrl/Alt chords are commands, not text
fn is_text(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
