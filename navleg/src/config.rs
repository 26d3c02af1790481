//! User configuration file.
//!
//! Settings live in `~/.navleg/config.ini`:
//!
//! ```ini
//! [navdata]
//! path = /home/pilot/navdata/klas.ini
//!
//! [logging]
//! level = debug
//! ```
//!
//! A missing file is not an error: every setting has a default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

/// Directory under the home directory holding navleg files.
pub const CONFIG_DIR_NAME: &str = ".navleg";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default tracing filter level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Normalize a tracing level name, accepting any case.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`] if `value` isn't one of [`LOG_LEVELS`].
pub fn parse_log_level(value: &str) -> Result<String, ConfigError> {
    let level = value.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ConfigError::InvalidValue {
            key: ConfigKey::LoggingLevel.name().to_string(),
            value: value.to_string(),
            reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
        })
    }
}

/// Errors that can occur while loading or changing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading or writing the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid INI.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] ini::ParseError),

    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// The key is not a known `section.key`.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The value is not valid for the key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Path of the user configuration file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// `[navdata]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavDataSettings {
    /// Navigation data file used when no `--navdata` is given.
    pub path: Option<PathBuf>,
}

/// `[logging]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Tracing filter level.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub navdata: NavDataSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load the user configuration file, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let ini = Ini::load_from_str(&content)?;
        let mut config = Self::default();

        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        Ok(config)
    }

    /// Save to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }

        ini.write_to_file(path)?;
        Ok(())
    }
}

/// Settable configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    NavDataPath,
    LoggingLevel,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::NavDataPath, ConfigKey::LoggingLevel]
    }

    /// `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::NavDataPath => "navdata.path",
            ConfigKey::LoggingLevel => "logging.level",
        }
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::NavDataPath => "navdata",
            ConfigKey::LoggingLevel => "logging",
        }
    }

    /// Key within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::NavDataPath => "path",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::NavDataPath => config
                .navdata
                .path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate and store a value. An empty navdata path clears the setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::NavDataPath => {
                config.navdata.path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            ConfigKey::LoggingLevel => {
                config.logging.level = parse_log_level(value)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
