use super::types::{Item, ItemKind};
use crate::core::constants::INVENTORY_CAPACITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory full ({capacity} items), could not add {name}")]
    Full { name: String, capacity: usize },
}

/// Ordered, bounded bag of items. Insertion order is kept so that
/// "first available" lookups are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn add(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                name: item.name,
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Index of the first item with this name and kind.
    pub fn position(&self, name: &str, kind: ItemKind) -> Option<usize> {
        self.items.iter().position(|item| item.matches(name, kind))
    }

    /// First item of the given kind in insertion order.
    pub fn first_of_kind(&self, kind: ItemKind) -> Option<&Item> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn names_of_kind(&self, kind: ItemKind) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.name.clone())
            .collect()
    }

    /// Inventory indices visible under a tab, in insertion order.
    pub fn tab_indices(&self, tab: InventoryTab) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| tab.accepts(item.kind))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Filter tabs of the inventory overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryTab {
    #[default]
    All,
    Weapons,
    Armor,
    Spells,
    Potions,
}

impl InventoryTab {
    pub const ALL: [InventoryTab; 5] = [
        InventoryTab::All,
        InventoryTab::Weapons,
        InventoryTab::Armor,
        InventoryTab::Spells,
        InventoryTab::Potions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InventoryTab::All => "All",
            InventoryTab::Weapons => "Weapons",
            InventoryTab::Armor => "Armor",
            InventoryTab::Spells => "Spells",
            InventoryTab::Potions => "Potions",
        }
    }

    /// The potions tab also lists consumables.
    pub fn accepts(&self, kind: ItemKind) -> bool {
        match self {
            InventoryTab::All => true,
            InventoryTab::Weapons => kind == ItemKind::Weapon,
            InventoryTab::Armor => kind == ItemKind::Armor,
            InventoryTab::Spells => kind == ItemKind::Spell,
            InventoryTab::Potions => matches!(kind, ItemKind::Potion | ItemKind::Consumable),
        }
    }

    pub fn next(&self) -> InventoryTab {
        let index = Self::ALL.iter().position(|tab| tab == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}
