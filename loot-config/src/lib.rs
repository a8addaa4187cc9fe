use log::warn;
use logging::LoggingConfig;
use loot_core::TableFormat;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub mod logging;

pub const DEFAULT_CONFIG_PATH: &str = "loot.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read configuration file at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't parse config at {path:?}. Reason: {}", .source.message())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for loading and rolling loot tables.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LootConfiguration {
    /// Directory the loot table files are read from and saved to.
    pub loot_tables_directory: PathBuf,
    /// Format used when writing loot tables.
    pub save_format: TableFormat,
    /// Seed for the loot roll RNG. Rolls are random each run when unset.
    pub seed: Option<u64>,
    /// Whether mobs have an off hand (Minecraft 1.9+).
    pub off_hand: bool,
    pub logging: LoggingConfig,
}

impl Default for LootConfiguration {
    fn default() -> Self {
        Self {
            loot_tables_directory: PathBuf::from("loot_tables"),
            save_format: TableFormat::Toml,
            seed: None,
            off_hand: true,
            logging: LoggingConfig::default(),
        }
    }
}

pub trait LoadTomlConfiguration: Sized + Default + Serialize + DeserializeOwned {
    /// Reads the configuration at `path`. When there is none yet, the
    /// defaults are written there and returned.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            let content = Self::default();

            if let Err(err) = fs::write(path, toml::to_string(&content)?) {
                warn!(
                    "Couldn't write default config to {:?}. Reason: {}",
                    path, err
                );
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadTomlConfiguration for LootConfiguration {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.loot_tables_directory.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "loot_tables_directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
