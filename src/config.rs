use crate::setter::{FehMode, Setter, SetterKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// SQLite file holding the color fingerprints
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Descend into subdirectories when updating from a directory
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackgroundConfig {
    #[serde(default)]
    pub setter: SetterKind,
    #[serde(default)]
    pub feh_mode: FehMode,
    /// swww output name; all outputs when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swww_output: Option<String>,
    /// Program and leading arguments for `setter = "command"`
    #[serde(default)]
    pub command: Vec<String>,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "walltime", "walltime")
}

fn default_database() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("wall.db"))
        .unwrap_or_else(|| PathBuf::from("wall.db"))
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            recursive: false,
        }
    }
}

impl Config {
    /// Return the path to the configuration file.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, creating a default if missing and falling
    /// back to defaults if corrupt.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Ok(Config::default())
                }
            }
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    /// Index database path, expanding ~ if needed.
    pub fn database_path(&self) -> PathBuf {
        crate::utils::expand_tilde(&self.index.database)
    }

    /// Build the background setter from config settings.
    pub fn setter(&self) -> Setter {
        match self.background.setter {
            SetterKind::Feh => Setter::Feh {
                mode: self.background.feh_mode,
            },
            SetterKind::Swww => Setter::Swww {
                output: self.background.swww_output.clone(),
            },
            SetterKind::Command => Setter::Command {
                argv: self.background.command.clone(),
            },
        }
    }
}
