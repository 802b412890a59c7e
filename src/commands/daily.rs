// Daily note command

use chrono::Local;

use super::common::App;
use crate::daily::open_or_create;
use crate::dates::parse_date;

pub fn run(app: &App, date: Option<&str>, no_edit: bool) -> anyhow::Result<()> {
    let settings = &app.settings;
    let date = match date {
        Some(s) => parse_date(s, &settings.formats.date)?,
        None => Local::now().date_naive(),
    };

    let storage = app.storage()?;
    let (id, created) = open_or_create(&storage, settings, date)?;
    let label = date.format(&settings.formats.date);
    if created {
        println!("Created daily note {label}");
    } else {
        println!("Opening daily note {label}");
    }

    if !no_edit {
        app.open_editor(&storage.get_path(&id))?;
    }
    Ok(())
}
