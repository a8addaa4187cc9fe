use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use log::{debug, warn};
use loot_core::{EquipmentHolder, EquipmentSlot, ItemStack};
use rand::Rng;
use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::entry::LootEntry;

/// A named set of loot entries, e.g. for mob drops.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LootTable {
    name: String,
    // Sorted by id so a seeded RNG always rolls the entries in the same order
    entries: BTreeMap<String, LootEntry>,
}

impl LootTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = LootEntry>,
    ) -> Self {
        let mut table = Self::new(name);
        for entry in entries {
            table.add_entry(entry);
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn entries(&self) -> impl Iterator<Item = &LootEntry> {
        self.entries.values()
    }

    pub fn entry(&self, id: &str) -> Option<&LootEntry> {
        self.entries.get(id)
    }

    pub fn entry_mut(&mut self, id: &str) -> Option<&mut LootEntry> {
        self.entries.get_mut(id)
    }

    /// Adds an entry under its id. Returns the entry it replaced, if any.
    pub fn add_entry(&mut self, entry: LootEntry) -> Option<LootEntry> {
        self.entries.insert(entry.id().to_string(), entry)
    }

    pub fn remove_entry(&mut self, id: &str) -> Option<LootEntry> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rolls every entry once and collects the items that dropped.
    pub fn generate_loot<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ItemStack> {
        self.entries()
            .filter(|entry| entry.roll(rng))
            .map(|entry| entry.item().clone())
            .collect()
    }

    /// [`Self::generate_loot`] with the thread local RNG
    pub fn generate_loot_list(&self) -> Vec<ItemStack> {
        self.generate_loot(&mut rand::thread_rng())
    }

    /// Equips `holder` with the entries named after the equipment slots
    /// ("mainHand", "offHand", "helmet", "chestplate", "leggings" and "boots").
    /// Each slot gets the entry's item and its chance as drop chance.
    /// Slots without an entry are left alone.
    pub fn apply_equipment<H: EquipmentHolder + ?Sized>(&self, holder: &mut H) {
        let off_hand = holder.supports_off_hand();
        for slot in EquipmentSlot::ALL {
            if slot == EquipmentSlot::OffHand && !off_hand {
                continue;
            }
            let Some(entry) = self.entry(slot.entry_id()) else {
                continue;
            };

            let item = entry.item();
            match item.armor_slot() {
                Some(armor_slot) if slot.is_armor() && armor_slot != slot => {
                    debug!("{self}: {item} is worn as {slot} but belongs in {armor_slot}");
                }
                _ => {}
            }
            holder.set_item(slot, Some(item.clone()));
            holder.set_drop_chance(slot, entry.drop_chance());
        }
    }
}

impl Display for LootTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LootTable{{Name={}}}", self.name)
    }
}

impl Serialize for LootTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Entries that fail to parse are skipped instead of failing the whole table.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeEntry {
    Entry(RawEntry),
    Invalid(IgnoredAny),
}

struct RawEntry {
    item: Option<ItemStack>,
    chance: RawChance,
}

// Only tables are entries; a derived struct would also accept arrays.
impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawEntryVisitor;

        impl<'de> Visitor<'de> for RawEntryVisitor {
            type Value = RawEntry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a loot table entry with an item and a chance")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut item = None;
                let mut chance = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "item" => item = map.next_value::<Option<ItemStack>>()?,
                        "chance" => chance = Some(map.next_value::<RawChance>()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(RawEntry {
                    item,
                    chance: chance.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_map(RawEntryVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChance {
    Number(f64),
    // Anything else leaves the chance at 0
    Other(IgnoredAny),
}

impl Default for RawChance {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl<'de> Deserialize<'de> for LootTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, MaybeEntry>::deserialize(deserializer)?;

        let mut table = Self::default();
        for (id, entry) in raw {
            let MaybeEntry::Entry(RawEntry {
                item: Some(item),
                chance,
            }) = entry
            else {
                warn!("Skipping erroneous loot table entry \"{id}\".");
                continue;
            };
            let chance = match chance {
                RawChance::Number(chance) => chance,
                RawChance::Other(_) => {
                    warn!("Loot table entry \"{id}\" has a non-numeric chance, using 0.");
                    0.0
                }
            };
            table.add_entry(LootEntry::new(id, item, chance));
        }
        Ok(table)
    }
}
