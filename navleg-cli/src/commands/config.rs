//! `config` subcommands for `~/.navleg/config.ini`.

use std::path::Path;

use clap::Subcommand;
use navleg::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., navdata.path)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., navdata.path)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the user configuration file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path()?;

    match command {
        ConfigCommands::Get { key } => {
            let config = ConfigFile::load_from(&path)?;
            println!("{}", display_value(&lookup(&config, &key)?));
        }
        ConfigCommands::Set { key, value } => {
            let key = assign(&path, &key, &value)?;
            println!("{} = {} (saved to {})", key, value, path.display());
        }
        ConfigCommands::List => {
            let config = ConfigFile::load_from(&path)?;
            print!("{}", render_settings(&config));
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }

    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        let known: Vec<&str> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "Unknown key '{}', expected one of: {}",
            key,
            known.join(", ")
        ))
    })
}

fn lookup(config: &ConfigFile, key: &str) -> Result<String, CliError> {
    Ok(parse_key(key)?.get(config))
}

/// Update one key in the file at `path`, keeping every other setting.
fn assign(path: &Path, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let key = parse_key(key)?;
    let mut config = ConfigFile::load_from(path)?;
    key.set(&mut config, value)?;
    config.save_to(path)?;
    Ok(key)
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Settings grouped by section, in INI layout.
fn render_settings(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut section = None;

    for key in ConfigKey::all() {
        if section != Some(key.section()) {
            if section.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", key.section()));
            section = Some(key.section());
        }
        out.push_str(&format!(
            "{} = {}\n",
            key.key_name(),
            display_value(&key.get(config))
        ));
    }

    out
}
