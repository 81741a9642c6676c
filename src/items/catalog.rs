//! Global item catalog: every weapon, armor, spell, potion and consumable
//! that can exist in the game, keyed by name.

use super::types::{item_data, Item, ItemKind, ItemStat};

/// Static description of a catalog item.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: ItemKind,
    pub stats: &'static [(ItemStat, u32)],
}

impl CatalogEntry {
    pub fn to_item(&self) -> Item {
        Item::new(self.name, self.kind, item_data(self.stats))
    }
}

use ItemKind::*;
use ItemStat::*;

pub const CATALOG: &[CatalogEntry] = &[
    // Weapons
    CatalogEntry { name: "Basic Sword", kind: Weapon, stats: &[(Attack, 15)] },
    CatalogEntry { name: "Quick Dagger", kind: Weapon, stats: &[(Attack, 10)] },
    CatalogEntry { name: "Longbow", kind: Weapon, stats: &[(Attack, 18)] },
    CatalogEntry { name: "Heavy Axe", kind: Weapon, stats: &[(Attack, 25)] },
    CatalogEntry { name: "Magic Staff", kind: Weapon, stats: &[(Attack, 12)] },
    // Armor
    CatalogEntry { name: "Simple Leather", kind: Armor, stats: &[(Defense, 2)] },
    CatalogEntry { name: "Wooden Shield", kind: Armor, stats: &[(Defense, 3)] },
    CatalogEntry { name: "Iron Plate", kind: Armor, stats: &[(Defense, 5)] },
    CatalogEntry { name: "Warrior Helmet", kind: Armor, stats: &[(Defense, 4)] },
    CatalogEntry { name: "Magic Cloak", kind: Armor, stats: &[(Defense, 3)] },
    // Spells: Damage is the spell power, zero means a support spell
    CatalogEntry { name: "Fireball", kind: Spell, stats: &[(Damage, 35), (Cost, 10)] },
    CatalogEntry { name: "Lightning", kind: Spell, stats: &[(Damage, 28), (Cost, 8)] },
    CatalogEntry { name: "Ice Shield", kind: Spell, stats: &[(Damage, 0), (Cost, 6)] },
    CatalogEntry { name: "Greater Heal", kind: Spell, stats: &[(Damage, 0), (Cost, 10)] },
    CatalogEntry { name: "Teleport", kind: Spell, stats: &[(Damage, 0), (Cost, 12)] },
    // Potions
    CatalogEntry { name: "Small Healing Potion", kind: Potion, stats: &[(Heal, 60)] },
    CatalogEntry { name: "Small Mana Potion", kind: Potion, stats: &[(Mana, 30)] },
    CatalogEntry { name: "Strength Potion", kind: Potion, stats: &[(Attack, 15), (Duration, 3)] },
    CatalogEntry { name: "Defense Potion", kind: Potion, stats: &[(Defense, 10), (Duration, 3)] },
    CatalogEntry { name: "Poison Potion", kind: Potion, stats: &[(Damage, 40)] },
    // Consumables
    CatalogEntry { name: "Bandage", kind: Consumable, stats: &[(Heal, 25)] },
    CatalogEntry { name: "Simple Meal", kind: Consumable, stats: &[(Heal, 35)] },
    CatalogEntry { name: "Magic Fruit", kind: Consumable, stats: &[(Mana, 40)] },
    CatalogEntry { name: "Attack Scroll", kind: Consumable, stats: &[(Attack, 12)] },
    CatalogEntry { name: "Defense Scroll", kind: Consumable, stats: &[(Defense, 8)] },
];

/// Looks up a catalog entry by name.
pub fn find_entry(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

/// Resolves an item name to a fresh [`Item`] instance.
pub fn lookup_item(name: &str) -> Option<Item> {
    find_entry(name).map(CatalogEntry::to_item)
}

/// Resolves an item name only if it has the expected kind.
pub fn lookup_item_of_kind(name: &str, kind: ItemKind) -> Option<Item> {
    find_entry(name)
        .filter(|entry| entry.kind == kind)
        .map(CatalogEntry::to_item)
}
