pub mod entry;
pub mod error;
mod format;
pub mod registry;
pub mod table;

pub use entry::LootEntry;
pub use error::LootError;
pub use registry::LootTableRegistry;
pub use table::LootTable;
