use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use loot_core::TableFormat;

use crate::{error::LootError, table::LootTable};

impl LootTable {
    /// Parses a loot table document.
    pub fn parse(
        name: impl Into<String>,
        content: &str,
        format: TableFormat,
    ) -> Result<Self, LootError> {
        let mut table: Self = match format {
            TableFormat::Toml => toml::from_str(content)?,
            TableFormat::Json => serde_json::from_str(content)?,
        };
        table.set_name(name);
        Ok(table)
    }

    /// Loads the loot table file at `path`. The table is named after the
    /// file, without its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LootError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)
            .ok_or_else(|| LootError::UnsupportedFormat(path.display().to_string()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = fs::read_to_string(path).map_err(LootError::io(path))?;
        let table = Self::parse(name, &content, format)?;
        debug!("Loaded {} with {} entries from {:?}", table, table.len(), path);
        Ok(table)
    }

    pub fn to_document(&self, format: TableFormat) -> Result<String, LootError> {
        Ok(match format {
            TableFormat::Toml => toml::to_string(self)?,
            TableFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Writes the table to `<dir>/<name>.<extension>` and returns that path.
    /// Names that would leave `dir` are rejected.
    pub fn save(&self, dir: impl AsRef<Path>, format: TableFormat) -> Result<PathBuf, LootError> {
        let name = self.name();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(LootError::InvalidName(name.to_string()));
        }
        let path = dir
            .as_ref()
            .join(format!("{}.{}", self.name(), format.extension()));
        fs::write(&path, self.to_document(format)?).map_err(LootError::io(&path))?;
        debug!("Saved {} to {:?}", self, path);
        Ok(path)
    }
}
