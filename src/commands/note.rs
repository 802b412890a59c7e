// Note commands: create, list, show, edit, delete, search, links

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::{DateTime, Local};

use super::common::{truncate, App};
use crate::cli::{CreateArgs, ListArgs, NoteCommand};
use crate::models::Note;
use crate::notes::{extract_links, find_backlinks, resolve_links, NoteStorage};
use crate::search::search;
use crate::templates::{list_templates, load_template};

#[derive(serde::Serialize)]
pub struct NoteInfo {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
    pub path: String,
}

impl NoteInfo {
    fn new(note: &Note, storage: &NoteStorage) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            tags: note.tags.clone(),
            created: note.created,
            modified: note.modified,
            path: storage.get_path(&note.id).to_string_lossy().to_string(),
        }
    }
}

pub fn run(app: &App, cmd: NoteCommand) -> anyhow::Result<()> {
    match cmd {
        NoteCommand::Create(args) => create(app, args),
        NoteCommand::List(args) => list(app, args),
        NoteCommand::Show(q) => show(app, &q.joined()),
        NoteCommand::Edit(q) => edit(app, &q.joined()),
        NoteCommand::Delete { query, force } => delete(app, &query.joined(), force),
        NoteCommand::Search(q) => search_notes(app, &q.joined()),
        NoteCommand::Links(q) => links(app, &q.joined()),
        NoteCommand::Backlinks(q) => backlinks(app, &q.joined()),
        NoteCommand::Templates => templates(app),
    }
}

fn create(app: &App, args: CreateArgs) -> anyhow::Result<()> {
    let settings = &app.settings;
    let storage = app.storage()?;
    let title = args.title.join(" ");

    let mut tags = settings.default_tags.clone();
    for tag in args.tags {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let mut note = Note::new(title.clone(), tags);
    if let Some(name) = &args.template {
        note.content = load_template(storage.root(), &settings.paths.templates_dir, name, &title)?;
    }

    storage.save(&mut note).with_context(|| format!("cannot save note {title:?}"))?;
    println!("Created note: {}", note.id);

    if !args.no_edit {
        app.open_editor(&storage.get_path(&note.id))?;
    }
    Ok(())
}

fn list(app: &App, args: ListArgs) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let listing = storage.list_detailed(args.tag.as_deref())?;

    if args.json {
        let infos: Vec<NoteInfo> = listing.notes.iter().map(|n| NoteInfo::new(n, &storage)).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if listing.notes.is_empty() {
        println!("No notes");
    }
    for note in &listing.notes {
        let tags = if note.tags.is_empty() { String::new() } else { format!(" [{}]", note.tags.join(", ")) };
        println!("- {}{} ({})", note.title, tags, note.modified.format(&app.settings.formats.datetime));
    }
    if !listing.skipped.is_empty() {
        eprintln!("{} file(s) skipped (run with --verbose for details)", listing.skipped.len());
    }
    Ok(())
}

fn show(app: &App, query: &str) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let note = storage.find(query)?;
    let formats = &app.settings.formats;

    println!("# {}", note.title);
    println!(
        "created: {} | modified: {}",
        note.created.format(&formats.datetime),
        note.modified.format(&formats.datetime)
    );
    if !note.tags.is_empty() {
        println!("tags: {}", note.tags.join(", "));
    }
    println!("{}", "-".repeat(app.settings.display.separator_width));
    println!("{}", note.content);

    let names = extract_links(&note.content);
    if !names.is_empty() {
        let resolved = resolve_links(&storage, &names);
        let mut parts: Vec<String> = resolved.found.iter().map(|n| n.title.clone()).collect();
        parts.extend(resolved.not_found.iter().map(|name| format!("{name}(?)")));
        println!();
        println!("links: {}", parts.join(", "));
    }

    let back = find_backlinks(&storage, &note.title)?;
    if !back.is_empty() {
        let titles: Vec<&str> = back.iter().map(|n| n.title.as_str()).collect();
        println!("backlinks: {}", titles.join(", "));
    }
    Ok(())
}

fn edit(app: &App, query: &str) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let note = storage.find(query)?;
    app.open_editor(&storage.get_path(&note.id))
}

fn delete(app: &App, query: &str, force: bool) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let note = storage.find(query)?;

    if !force && !confirm(&format!("Delete note \"{}\"? [y/N]: ", note.title))? {
        println!("Cancelled");
        return Ok(());
    }

    storage.delete(&note.id)?;
    println!("Deleted note \"{}\"", note.title);
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn search_notes(app: &App, query: &str) -> anyhow::Result<()> {
    let results = search(&app.settings.notes_dir, query)?;
    if results.is_empty() {
        println!("No notes match {query:?}");
        return Ok(());
    }

    println!("{} match(es) for {query:?}\n", results.len());
    let width = app.settings.display.search_truncate;
    let mut current = "";
    for r in &results {
        if r.filename != current {
            println!("{} ({})", r.title, r.filename);
            current = &r.filename;
        }
        println!("   L{}: {}", r.line, truncate(&r.content, width));
    }
    Ok(())
}

fn links(app: &App, query: &str) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let note = storage.find(query)?;
    let names = extract_links(&note.content);
    if names.is_empty() {
        println!("\"{}\" has no links", note.title);
        return Ok(());
    }

    let resolved = resolve_links(&storage, &names);
    for linked in &resolved.found {
        println!("- {} ({})", linked.title, linked.id);
    }
    for name in &resolved.not_found {
        println!("- {name} (not found)");
    }
    Ok(())
}

fn backlinks(app: &App, query: &str) -> anyhow::Result<()> {
    let storage = app.storage()?;
    let note = storage.find(query)?;
    let back = find_backlinks(&storage, &note.title)?;
    if back.is_empty() {
        println!("No notes link to \"{}\"", note.title);
    }
    for n in &back {
        println!("- {} ({})", n.title, n.id);
    }
    Ok(())
}

fn templates(app: &App) -> anyhow::Result<()> {
    let names = list_templates(&app.settings.notes_dir, &app.settings.paths.templates_dir)?;
    if names.is_empty() {
        println!("No templates in {}", app.settings.templates_path().display());
    }
    for name in names {
        println!("- {name}");
    }
    Ok(())
}
