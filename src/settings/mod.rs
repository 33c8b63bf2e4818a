//! User settings, read from a small JSON file in the home directory.
//!
//! Only `projects-path` is mandatory. The other keys are optional and fall
//! back to defaults. If the file does not exist a complete default file is
//! written out and then read back in.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

const SETTINGS_FILE: &str = ".prc";

const PROJECTS_PATH: &str = "projects-path";
const NUMBER_COLOR: &str = "number-color";
const HIGHLIGHT_COLOR: &str = "highlight-color";
const PLUGINS: &str = "plugins";

/// Colours the settings file may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub projects_path: String,
    pub number_color: Color,
    pub highlight_color: Color,
    pub plugins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            projects_path: "~/projects".to_string(),
            number_color: Color::Yellow,
            highlight_color: Color::Yellow,
            plugins: Vec::new(),
        }
    }
}

impl Settings {
    /// The projects directory with a leading `~` replaced by the user's
    /// home directory.
    pub fn projects_dir(&self) -> PathBuf {
        let home = BaseDirs::new().map(|dirs| {
            dirs.home_dir()
                .to_path_buf()
        });

        match (
            self.projects_path
                .strip_prefix("~"),
            home,
        ) {
            (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
            _ => PathBuf::from(&self.projects_path),
        }
    }
}

/// Everything that can go wrong finding, creating, or reading the settings
/// file. Each carries the path so the message can name the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    NoHomeDirectory,
    Creation(PathBuf, String),
    Reading(PathBuf, String),
    Syntax(PathBuf, String),
    MissingKey(PathBuf, &'static str),
    UnknownKey(PathBuf, String),
    InvalidValue(PathBuf, String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoHomeDirectory => {
                write!(f, "Unable to determine home directory for settings file")
            }
            SettingsError::Creation(path, details) => write!(
                f,
                "Settings file ({}) cannot be created: {}",
                path.display(),
                details
            ),
            SettingsError::Reading(path, details) => write!(
                f,
                "Settings file ({}) cannot be read: {}",
                path.display(),
                details
            ),
            SettingsError::Syntax(path, details) => write!(
                f,
                "Invalid JSON format in settings file ({}): {}",
                path.display(),
                details
            ),
            SettingsError::MissingKey(path, key) => write!(
                f,
                "Missing mandatory key \"{}\" in settings file ({})",
                key,
                path.display()
            ),
            SettingsError::UnknownKey(path, key) => write!(
                f,
                "Invalid key \"{}\" in settings file ({})",
                key,
                path.display()
            ),
            SettingsError::InvalidValue(path, key) => write!(
                f,
                "Invalid value for key \"{}\" in settings file ({})",
                key,
                path.display()
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Where the settings file lives unless told otherwise.
pub fn default_path() -> Result<PathBuf, SettingsError> {
    let dirs = BaseDirs::new().ok_or(SettingsError::NoHomeDirectory)?;
    Ok(dirs
        .home_dir()
        .join(SETTINGS_FILE))
}

/// Load and validate the settings from the default location.
pub fn load() -> Result<Settings, SettingsError> {
    let path = default_path()?;
    load_from(&path)
}

/// Load and validate the settings from the given file, creating it with
/// the default settings first if it doesn't exist.
pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            info!("Creating default settings file {}", path.display());
            create_default(path)?;
            std::fs::read_to_string(path)
                .map_err(|e| SettingsError::Creation(path.to_path_buf(), e.to_string()))?
        }
        Err(error) => {
            return Err(SettingsError::Reading(path.to_path_buf(), error.to_string()));
        }
    };

    debug!("Loading settings from {}", path.display());

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| SettingsError::Syntax(path.to_path_buf(), e.to_string()))?;

    validate(path, &value)
}

fn create_default(path: &Path) -> Result<(), SettingsError> {
    let content = serde_json::to_string_pretty(&Settings::default())
        .map_err(|e| SettingsError::Creation(path.to_path_buf(), e.to_string()))?;

    std::fs::write(path, content + "\n")
        .map_err(|e| SettingsError::Creation(path.to_path_buf(), e.to_string()))
}

/// Checks run in the same order every time: the mandatory key must be
/// present, then every key present must be known and of the right type.
fn validate(path: &Path, value: &Value) -> Result<Settings, SettingsError> {
    let object: &Map<String, Value> = match value.as_object() {
        Some(object) => object,
        None => {
            return Err(SettingsError::Syntax(
                path.to_path_buf(),
                "expected a JSON object".to_string(),
            ))
        }
    };

    if !object.contains_key(PROJECTS_PATH) {
        return Err(SettingsError::MissingKey(path.to_path_buf(), PROJECTS_PATH));
    }

    let mut settings = Settings::default();

    for (key, value) in object {
        let invalid = || SettingsError::InvalidValue(path.to_path_buf(), key.clone());

        match key.as_str() {
            PROJECTS_PATH => {
                settings.projects_path = typed(value).ok_or_else(invalid)?;
            }
            NUMBER_COLOR => {
                settings.number_color = typed(value).ok_or_else(invalid)?;
            }
            HIGHLIGHT_COLOR => {
                settings.highlight_color = typed(value).ok_or_else(invalid)?;
            }
            PLUGINS => {
                settings.plugins = typed(value).ok_or_else(invalid)?;
            }
            _ => {
                return Err(SettingsError::UnknownKey(path.to_path_buf(), key.clone()));
            }
        }
    }

    Ok(settings)
}

/// A single key's value as its expected type, if it is one.
fn typed<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}
