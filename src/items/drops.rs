use super::catalog::lookup_item;
use super::inventory::InventoryError;
use crate::character::Player;
use crate::core::constants::SECOND_DROP_CHANCE;
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCategory {
    Weapons,
    Armor,
    Potions,
    Consumables,
    Gold,
}

#[derive(Debug, Clone, Copy)]
pub enum DropReward {
    Items(&'static [&'static str]),
    Gold { min: u32, max: u32 },
}

/// One weighted category of a dungeon's drop table.
#[derive(Debug, Clone, Copy)]
pub struct DropRule {
    pub category: DropCategory,
    /// Relative weight, not a percentage of anything.
    pub chance: u32,
    pub reward: DropReward,
}

#[derive(Debug, Clone, Copy)]
pub struct DropTable {
    pub rules: &'static [DropRule],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drop {
    Gold(u32),
    Item {
        category: DropCategory,
        name: &'static str,
    },
}

/// Rolls the rewards for a defeated regular enemy: one drop, plus a second
/// one with [`SECOND_DROP_CHANCE`]. Each drop picks a category weighted by
/// its chance.
pub fn roll_drops(table: &DropTable, rng: &mut impl Rng) -> Vec<Drop> {
    let weights: Vec<u32> = table.rules.iter().map(|rule| rule.chance).collect();
    let Ok(index) = WeightedIndex::new(&weights) else {
        return Vec::new();
    };

    let count = if rng.gen::<f64>() < SECOND_DROP_CHANCE { 2 } else { 1 };

    (0..count)
        .filter_map(|_| {
            let rule = &table.rules[index.sample(rng)];
            match rule.reward {
                DropReward::Gold { min, max } => Some(Drop::Gold(rng.gen_range(min..=max))),
                DropReward::Items(names) if !names.is_empty() => Some(Drop::Item {
                    category: rule.category,
                    name: names[rng.gen_range(0..names.len())],
                }),
                DropReward::Items(_) => None,
            }
        })
        .collect()
}

/// Hands the rolled drops to the player and returns one message per drop.
///
/// Items are resolved against the catalog. A full inventory discards the
/// item and reports it instead.
pub fn apply_drops(player: &mut Player, drops: &[Drop]) -> Vec<String> {
    let mut messages = Vec::with_capacity(drops.len());

    for drop in drops {
        match drop {
            Drop::Gold(amount) => {
                player.gold = player.gold.saturating_add(*amount);
                messages.push(format!("{} Gold", amount));
            }
            Drop::Item { name, .. } => match lookup_item(name) {
                Some(item) => match player.inventory.add(item) {
                    Ok(()) => {
                        debug!(item = %name, "drop added to inventory");
                        messages.push(format!("Drop: {}", name));
                    }
                    Err(InventoryError::Full { .. }) => {
                        messages.push(format!("Inventory full: {}", name));
                    }
                },
                None => {
                    warn!(item = %name, "drop table references unknown item");
                    messages.push(format!("Unknown item: {}", name));
                }
            },
        }
    }

    messages
}
