//! Global taskdir configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEZONE;
use crate::error::{TaskDirError, TaskDirResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/taskdir";
static DEFAULT_CALENDAR_DIR: &str = "~/calendar";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Whether taskdir may write events into the calendar directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarAccess {
    /// Ask every time a task is added.
    #[default]
    Ask,
    Granted,
    Denied,
}

/// Configuration at ~/.config/taskdir/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskdirConfig {
    /// Where the task and category collections are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Calendar directory the "Task Manager" calendar lives in
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    #[serde(default)]
    pub calendar_access: CalendarAccess,

    /// IANA zone events are created in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for TaskdirConfig {
    fn default() -> Self {
        TaskdirConfig {
            data_dir: default_data_dir(),
            calendar_dir: default_calendar_dir(),
            calendar_access: CalendarAccess::default(),
            timezone: default_timezone(),
        }
    }
}

impl TaskdirConfig {
    pub fn config_path() -> TaskDirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TaskDirError::Config("Could not determine config directory".into()))?
            .join("taskdir");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/taskdir/config.toml, writing a commented default file
    /// first if there is none.
    pub fn load() -> TaskDirResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TaskDirResult<Self> {
        let config: TaskdirConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| TaskDirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TaskDirError::Config(e.to_string()))?;

        config.tz()?;

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn calendar_path(&self) -> PathBuf {
        expand(&self.calendar_dir)
    }

    pub fn tz(&self) -> TaskDirResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| TaskDirError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TaskDirResult<()> {
        let contents = format!(
            "\
# taskdir configuration

# Where tasks and categories are stored:
# data_dir = \"{}\"

# Calendar directory new tasks are mirrored into:
# calendar_dir = \"{}\"

# May taskdir add events to your calendar? \"ask\", \"granted\" or \"denied\"
# calendar_access = \"ask\"

# Timezone for calendar events:
# timezone = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_CALENDAR_DIR, DEFAULT_TIMEZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaskDirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TaskDirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
