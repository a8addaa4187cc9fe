pub mod equipment;
pub mod format;
pub mod item;

pub use equipment::{EntityEquipment, EquipmentHolder, EquipmentSlot};
pub use format::TableFormat;
pub use item::ItemStack;
