use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Spell,
    Potion,
    Consumable,
}

impl ItemKind {
    /// Returns the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Armor => "Armor",
            ItemKind::Spell => "Spell",
            ItemKind::Potion => "Potion",
            ItemKind::Consumable => "Consumable",
        }
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

/// Attribute keys an item can carry in its data mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemStat {
    Attack,
    Defense,
    /// Spell power, or damage thrown at the enemy for potions.
    Damage,
    /// Mana cost for spells.
    Cost,
    Heal,
    Mana,
    Duration,
}

impl ItemStat {
    pub fn name(&self) -> &'static str {
        match self {
            ItemStat::Attack => "Attack",
            ItemStat::Defense => "Defense",
            ItemStat::Damage => "Damage",
            ItemStat::Cost => "Cost",
            ItemStat::Heal => "Heal",
            ItemStat::Mana => "Mana",
            ItemStat::Duration => "Duration",
        }
    }
}

pub type ItemData = BTreeMap<ItemStat, u32>;

/// Builds an [`ItemData`] mapping from `(stat, value)` pairs.
pub fn item_data(pairs: &[(ItemStat, u32)]) -> ItemData {
    pairs.iter().copied().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub data: ItemData,
    pub quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, data: ItemData) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
            quantity: 1,
        }
    }

    pub fn stat(&self, stat: ItemStat) -> Option<u32> {
        self.data.get(&stat).copied()
    }

    /// Lookup equality: same name and same kind.
    pub fn matches(&self, name: &str, kind: ItemKind) -> bool {
        self.kind == kind && self.name == name
    }

    /// One-line summary of the item's stats, e.g. "Heal 60, Mana 30".
    pub fn stats_summary(&self) -> String {
        self.data
            .iter()
            .map(|(stat, value)| format!("{} {}", stat.name(), value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new(
            "Fireball",
            ItemKind::Spell,
            item_data(&[(ItemStat::Damage, 35), (ItemStat::Cost, 10)]),
        );
        assert_eq!(item.quantity, 1);
        assert_eq!(item.stat(ItemStat::Damage), Some(35));
        assert_eq!(item.stat(ItemStat::Cost), Some(10));
        assert_eq!(item.stat(ItemStat::Heal), None);
    }

    #[test]
    fn test_matches_requires_name_and_kind() {
        let item = Item::new("Bandage", ItemKind::Consumable, item_data(&[(ItemStat::Heal, 25)]));
        assert!(item.matches("Bandage", ItemKind::Consumable));
        assert!(!item.matches("Bandage", ItemKind::Potion));
        assert!(!item.matches("Bread", ItemKind::Consumable));
    }

    #[test]
    fn test_stats_summary_is_ordered() {
        let item = Item::new(
            "Odd Brew",
            ItemKind::Potion,
            item_data(&[(ItemStat::Mana, 30), (ItemStat::Heal, 60)]),
        );
        assert_eq!(item.stats_summary(), "Heal 60, Mana 30");
    }

    #[test]
    fn test_equipment_kinds() {
        assert!(ItemKind::Weapon.is_equipment());
        assert!(ItemKind::Armor.is_equipment());
        assert!(!ItemKind::Potion.is_equipment());
    }
}
