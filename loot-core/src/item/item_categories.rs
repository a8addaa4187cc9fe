use crate::{equipment::EquipmentSlot, item::ItemStack};

// Heads that can be worn, besides helmets
const WEARABLE_HEADS: [&str; 3] = ["carved_pumpkin", "dragon_head", "player_head"];

impl ItemStack {
    pub fn is_sword(&self) -> bool {
        self.path().ends_with("_sword")
    }

    pub fn is_helmet(&self) -> bool {
        // Includes the turtle helmet
        self.path().ends_with("_helmet")
    }

    pub fn is_chestplate(&self) -> bool {
        self.path().ends_with("_chestplate")
    }

    pub fn is_leggings(&self) -> bool {
        self.path().ends_with("_leggings")
    }

    pub fn is_boots(&self) -> bool {
        self.path().ends_with("_boots")
    }

    /// The armor slot this item naturally goes into, if any.
    pub fn armor_slot(&self) -> Option<EquipmentSlot> {
        let path = self.path();
        if self.is_helmet() || path.ends_with("_skull") || WEARABLE_HEADS.contains(&path) {
            Some(EquipmentSlot::Head)
        } else if self.is_chestplate() || path == "elytra" {
            Some(EquipmentSlot::Chest)
        } else if self.is_leggings() {
            Some(EquipmentSlot::Legs)
        } else if self.is_boots() {
            Some(EquipmentSlot::Feet)
        } else {
            None
        }
    }
}
