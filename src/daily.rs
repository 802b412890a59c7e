// Daily notes: one file per date under the daily directory

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Note, Settings};
use crate::notes::NoteStorage;
use crate::templates::{default_daily_content, read_template, render_daily, DAILY_TEMPLATE};

pub const DAILY_TAG: &str = "daily";

pub fn daily_id(settings: &Settings, date: NaiveDate) -> String {
    format!("{}/{}.md", settings.paths.daily_dir, date.format(&settings.formats.date))
}

/// Return the id of the daily note for `date`, creating it first if needed.
/// The flag is true when the note was created by this call.
pub fn open_or_create(storage: &NoteStorage, settings: &Settings, date: NaiveDate) -> Result<(String, bool)> {
    let id = daily_id(settings, date);
    let path = storage.get_path(&id);
    if path.exists() {
        tracing::debug!(id = %id, "daily note exists");
        return Ok((id, false));
    }

    let content = match read_template(storage.root(), &settings.paths.templates_dir, DAILY_TEMPLATE)? {
        Some(template) => render_daily(&template, date, &settings.formats.date),
        None => default_daily_content(date, &settings.formats.date),
    };

    let title = date.format(&settings.formats.date).to_string();
    let mut note = Note::new(title, vec![DAILY_TAG.to_string()]);
    note.id = id.clone();
    note.content = content;
    storage.save_at(&mut note, &path)?;
    tracing::info!(id = %id, "daily note created");
    Ok((id, true))
}
