//! Global daybook configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};
use crate::grid::WeekStart;

static FALLBACK_DATA_DIR: &str = "~/.local/share/daybook";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("daybook"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_year_week_start() -> WeekStart {
    WeekStart::SundayFirst
}

/// Configuration at ~/.config/daybook/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaybookConfig {
    /// Where the event blob is stored.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Column 0 of the month and week views.
    #[serde(default)]
    pub month_week_start: WeekStart,

    /// Column 0 of the year view's month tiles.
    #[serde(default = "default_year_week_start")]
    pub year_week_start: WeekStart,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            data_dir: default_data_dir(),
            month_week_start: WeekStart::default(),
            year_week_start: default_year_week_start(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/daybook/config.toml, writing a commented default
    /// file first if there is none.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> DaybookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where your events are stored:
# data_dir = \"{}\"

# First column of the month and week views (\"monday\" or \"sunday\"):
# month_week_start = \"monday\"

# First column of the year view:
# year_week_start = \"sunday\"
",
            FALLBACK_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
