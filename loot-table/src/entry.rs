use loot_core::ItemStack;
use rand::Rng;
use serde::Serialize;

pub const MIN_CHANCE: f64 = 0.0;
pub const MAX_CHANCE: f64 = 100.0;

/// One item of a loot table and the percentage chance of it dropping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootEntry {
    // The key of the entry in its table
    #[serde(skip)]
    id: String,
    chance: f64,
    item: ItemStack,
}

impl LootEntry {
    pub fn new(id: impl Into<String>, item: ItemStack, chance: f64) -> Self {
        Self {
            id: id.into(),
            item,
            chance: clamp_chance(chance),
        }
    }

    /// The id of the loot table entry
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn item(&self) -> &ItemStack {
        &self.item
    }

    pub fn set_item(&mut self, item: ItemStack) {
        self.item = item;
    }

    /// The loot chance in percent
    pub fn chance(&self) -> f64 {
        self.chance
    }

    /// Sets the loot chance, clamped to `0..=100`. NaN counts as 0.
    pub fn set_chance(&mut self, chance: f64) {
        self.chance = clamp_chance(chance);
    }

    /// The loot chance as a fraction, the way entity equipment stores it
    pub fn drop_chance(&self) -> f32 {
        (self.chance / 100.0) as f32
    }

    /// Rolls an integer in `0..100`; the entry drops when it is below the chance.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let roll: u8 = rng.gen_range(0..100);
        f64::from(roll) < self.chance
    }
}

fn clamp_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        MIN_CHANCE
    } else {
        chance.clamp(MIN_CHANCE, MAX_CHANCE)
    }
}

#[cfg(test)]
mod test {
    use loot_core::ItemStack;
    use rand::{rngs::StdRng, SeedableRng};

    use super::LootEntry;

    fn entry(chance: f64) -> LootEntry {
        LootEntry::new("bone", ItemStack::new("bone"), chance)
    }

    #[test]
    fn test_chance_clamped() {
        assert_eq!(entry(-5.0).chance(), 0.0);
        assert_eq!(entry(250.0).chance(), 100.0);
        assert_eq!(entry(f64::NAN).chance(), 0.0);
        assert_eq!(entry(f64::INFINITY).chance(), 100.0);
        assert_eq!(entry(42.5).chance(), 42.5);

        let mut entry = entry(10.0);
        entry.set_chance(101.0);
        assert_eq!(entry.chance(), 100.0);
        entry.set_chance(-0.1);
        assert_eq!(entry.chance(), 0.0);
    }

    #[test]
    fn test_drop_chance() {
        assert_eq!(entry(100.0).drop_chance(), 1.0);
        assert_eq!(entry(0.0).drop_chance(), 0.0);
        assert_eq!(entry(50.0).drop_chance(), 0.5);
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = entry(100.0);
        let never = entry(0.0);
        for _ in 0..1000 {
            assert!(always.roll(&mut rng));
            assert!(!never.roll(&mut rng));
        }
    }

    #[test]
    fn test_roll_distribution() {
        let mut rng = StdRng::seed_from_u64(1337);
        let half = entry(50.0);
        let drops = (0..10_000).filter(|_| half.roll(&mut rng)).count();
        assert!((4_500..5_500).contains(&drops), "{drops} drops");

        // Only a roll of 0 is below a fractional chance under 1
        let rare = entry(0.5);
        let drops = (0..10_000).filter(|_| rare.roll(&mut rng)).count();
        assert!((40..200).contains(&drops), "{drops} drops");
    }

    #[test]
    fn test_serialize_without_id() {
        let json = serde_json::to_value(entry(12.5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "item": "minecraft:bone", "chance": 12.5 })
        );
    }
}
