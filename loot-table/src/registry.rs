use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use itertools::Itertools;
use log::{debug, info, warn};
use loot_core::TableFormat;

use crate::{error::LootError, table::LootTable};

/// All loot tables known to the server, by name.
#[derive(Debug, Default)]
pub struct LootTableRegistry {
    tables: HashMap<String, LootTable>,
}

impl LootTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` under its name, returning the table it replaced.
    pub fn register(&mut self, table: LootTable) -> Option<LootTable> {
        let replaced = self.tables.insert(table.name().to_string(), table);
        if let Some(replaced) = &replaced {
            debug!("Replaced registered {}", replaced);
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&LootTable> {
        self.tables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LootTable> {
        self.tables.get_mut(name)
    }

    /// Like [`Self::get`], but a missing table is an error.
    pub fn require(&self, name: &str) -> Result<&LootTable, LootError> {
        self.get(name)
            .ok_or_else(|| LootError::UnknownTable(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<LootTable> {
        self.tables.remove(name)
    }

    /// Names of all tables, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).sorted().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LootTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Loads every `.toml` and `.json` file directly inside `dir`.
    /// Files that fail to load are logged and skipped.
    ///
    /// Returns how many distinct tables were loaded. A later file with the
    /// same name as an earlier one replaces it.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, LootError> {
        let dir = dir.as_ref();
        let read_dir = fs::read_dir(dir).map_err(LootError::io(dir))?;

        let mut loaded = HashSet::new();
        for path in read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .sorted()
        {
            if TableFormat::from_path(&path).is_none() {
                debug!("Ignoring {:?}, not a loot table file", path);
                continue;
            }
            match LootTable::load(&path) {
                Ok(table) => {
                    let name = table.name().to_string();
                    if let Some(replaced) = self.register(table) {
                        warn!("{:?} replaces the already loaded {}", path, replaced);
                    }
                    loaded.insert(name);
                }
                Err(err) => warn!("Couldn't load loot table {:?}: {}", path, err),
            }
        }

        info!("Loaded {} loot tables from {:?}", loaded.len(), dir);
        Ok(loaded.len())
    }

    /// Saves every table into `dir`, creating it if needed.
    pub fn save_all(&self, dir: impl AsRef<Path>, format: TableFormat) -> Result<(), LootError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(LootError::io(dir))?;
        for table in self.iter() {
            table.save(dir, format)?;
        }
        Ok(())
    }
}
