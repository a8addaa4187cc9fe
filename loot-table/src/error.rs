use std::{io, path::PathBuf};

use log::log;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LootError {
    #[error("Couldn't access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid TOML loot table: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Couldn't write loot table as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid JSON loot table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported loot table file '{0}', expected a .toml or .json file")]
    UnsupportedFormat(String),
    #[error("Unknown loot table '{0}'")]
    UnknownTable(String),
    #[error("'{0}' can't be used as a loot table file name")]
    InvalidName(String),
}

impl LootError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub fn severity(&self) -> log::Level {
        match self {
            Self::Io { .. } | Self::Toml(_) | Self::TomlSerialize(_) | Self::Json(_) => {
                log::Level::Error
            }
            Self::UnsupportedFormat(_) | Self::UnknownTable(_) | Self::InvalidName(_) => {
                log::Level::Warn
            }
        }
    }

    pub fn log(&self) {
        log!(self.severity(), "{}", self);
    }
}
