// Config commands: show, set, path

use anyhow::Context;

use super::common::App;
use crate::cli::ConfigCommand;
use crate::error::Error;
use crate::storage::{load_settings, save_settings};

pub fn run(app: &App, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show => {
            if app.config_path.exists() {
                println!("# config file: {}", app.config_path.display());
            } else {
                println!("# config file: (not created, using defaults)");
            }
            print!("{}", serde_yaml::to_string(&app.settings)?);
        }
        ConfigCommand::Set { key, value } => {
            // Edit the file's own values, not the environment-overridden ones
            let mut file_settings = load_settings(&app.config_path)?;
            file_settings.set_key(&key, &value).map_err(Error::Config)?;
            save_settings(&app.config_path, &file_settings)
                .with_context(|| format!("cannot write {}", app.config_path.display()))?;
            println!("{key} = {value}");
        }
        ConfigCommand::Path => println!("{}", app.config_path.display()),
    }
    Ok(())
}
