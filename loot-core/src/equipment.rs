use std::{fmt, str::FromStr};

use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::item::ItemStack;

/// Drop chance vanilla assigns to equipment a mob spawned with.
pub const DEFAULT_DROP_CHANCE: f32 = 0.085;

/// https://wiki.vg/Protocol#Set_Equipment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Feet,
    Legs,
    Chest,
    Head,
}

impl EquipmentSlot {
    pub const ALL: [Self; 6] = [
        Self::MainHand,
        Self::OffHand,
        Self::Feet,
        Self::Legs,
        Self::Chest,
        Self::Head,
    ];

    pub const MAIN_HAND: &'static str = "mainHand";
    pub const OFF_HAND: &'static str = "offHand";
    pub const HELMET: &'static str = "helmet";
    pub const CHESTPLATE: &'static str = "chestplate";
    pub const LEGGINGS: &'static str = "leggings";
    pub const BOOTS: &'static str = "boots";

    /// Id of the loot table entry that fills this slot.
    pub const fn entry_id(&self) -> &'static str {
        match self {
            Self::MainHand => Self::MAIN_HAND,
            Self::OffHand => Self::OFF_HAND,
            Self::Feet => Self::BOOTS,
            Self::Legs => Self::LEGGINGS,
            Self::Chest => Self::CHESTPLATE,
            Self::Head => Self::HELMET,
        }
    }

    pub const fn is_armor(&self) -> bool {
        !matches!(self, Self::MainHand | Self::OffHand)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry_id())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseEquipmentSlotError(pub String);

impl fmt::Display for ParseEquipmentSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not an equipment slot", self.0)
    }
}

impl std::error::Error for ParseEquipmentSlotError {}

impl FromStr for EquipmentSlot {
    type Err = ParseEquipmentSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.entry_id() == s)
            .ok_or_else(|| ParseEquipmentSlotError(s.to_string()))
    }
}

/// Anything that wears gear: the target of `LootTable::apply_equipment`.
pub trait EquipmentHolder {
    fn set_item(&mut self, slot: EquipmentSlot, item: Option<ItemStack>);

    /// `chance` is in `0.0..=1.0`
    fn set_drop_chance(&mut self, slot: EquipmentSlot, chance: f32);

    /// Entities from before 1.9 only have a single hand.
    fn supports_off_hand(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquippedItem {
    pub item: Option<ItemStack>,
    pub drop_chance: f32,
}

impl Default for EquippedItem {
    fn default() -> Self {
        Self {
            item: None,
            drop_chance: DEFAULT_DROP_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityEquipment {
    slots: [EquippedItem; 6],
    legacy: bool,
}

impl EntityEquipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equipment without an off hand. Writes to it are ignored.
    pub fn legacy() -> Self {
        Self {
            legacy: true,
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: EquipmentSlot) -> &EquippedItem {
        &self.slots[slot.index()]
    }

    pub fn item(&self, slot: EquipmentSlot) -> Option<&ItemStack> {
        self.slot(slot).item.as_ref()
    }

    pub fn drop_chance(&self, slot: EquipmentSlot) -> f32 {
        self.slot(slot).drop_chance
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &EquippedItem)> {
        EquipmentSlot::ALL
            .into_iter()
            .filter(|slot| !self.legacy || *slot != EquipmentSlot::OffHand)
            .map(|slot| (slot, self.slot(slot)))
    }

    /// Whether `slot` is ignored by this equipment
    fn ignores(&self, slot: EquipmentSlot) -> bool {
        self.legacy && slot == EquipmentSlot::OffHand
    }
}

impl EquipmentHolder for EntityEquipment {
    fn set_item(&mut self, slot: EquipmentSlot, item: Option<ItemStack>) {
        if !self.ignores(slot) {
            self.slots[slot.index()].item = item;
        }
    }

    fn set_drop_chance(&mut self, slot: EquipmentSlot, chance: f32) {
        if !self.ignores(slot) {
            self.slots[slot.index()].drop_chance = chance.clamp(0.0, 1.0);
        }
    }

    fn supports_off_hand(&self) -> bool {
        !self.legacy
    }
}

#[cfg(test)]
mod test {
    use num_traits::{FromPrimitive, ToPrimitive};

    use super::*;

    #[test]
    fn test_protocol_indices() {
        assert_eq!(EquipmentSlot::MainHand.to_u8(), Some(0));
        assert_eq!(EquipmentSlot::Head.to_u8(), Some(5));
        assert_eq!(EquipmentSlot::from_u8(2), Some(EquipmentSlot::Feet));
        assert_eq!(EquipmentSlot::from_u8(6), None);
    }

    #[test]
    fn test_entry_ids() {
        for slot in EquipmentSlot::ALL {
            assert_eq!(slot.entry_id().parse::<EquipmentSlot>(), Ok(slot));
        }
        assert_eq!("helmet".parse::<EquipmentSlot>(), Ok(EquipmentSlot::Head));
        assert!("head".parse::<EquipmentSlot>().is_err());
    }

    #[test]
    fn test_legacy_equipment_ignores_off_hand() {
        let mut equipment = EntityEquipment::legacy();
        assert!(!equipment.supports_off_hand());

        equipment.set_item(EquipmentSlot::OffHand, Some(ItemStack::new("shield")));
        equipment.set_drop_chance(EquipmentSlot::OffHand, 1.0);
        assert_eq!(equipment.item(EquipmentSlot::OffHand), None);
        assert_eq!(
            equipment.drop_chance(EquipmentSlot::OffHand),
            DEFAULT_DROP_CHANCE
        );
        assert_eq!(equipment.iter().count(), 5);
    }

    #[test]
    fn test_drop_chance_clamped() {
        let mut equipment = EntityEquipment::new();
        equipment.set_drop_chance(EquipmentSlot::Head, 2.0);
        assert_eq!(equipment.drop_chance(EquipmentSlot::Head), 1.0);
        equipment.set_drop_chance(EquipmentSlot::Head, -1.0);
        assert_eq!(equipment.drop_chance(EquipmentSlot::Head), 0.0);
    }
}
