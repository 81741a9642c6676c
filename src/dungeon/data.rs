//! The five dungeons of a run: rosters, bosses, drop tables and floor masks.

use crate::character::Character;
use crate::items::{DropCategory, DropReward, DropRule, DropTable};

/// Base stats of an enemy before difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl EnemyTemplate {
    pub const fn new(name: &'static str, hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name,
            hp,
            attack,
            defense,
        }
    }

    pub fn spawn(&self) -> Character {
        Character::new(self.name, self.hp, self.attack, self.defense)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DungeonDef {
    pub name: &'static str,
    /// Regular enemies for random encounters. May be empty.
    pub enemies: &'static [EnemyTemplate],
    pub boss: EnemyTemplate,
    pub drops: DropTable,
    /// Text collision mask, `#` = wall.
    pub map: &'static str,
}

const fn items(category: DropCategory, chance: u32, names: &'static [&'static str]) -> DropRule {
    DropRule {
        category,
        chance,
        reward: DropReward::Items(names),
    }
}

const fn gold(chance: u32, min: u32, max: u32) -> DropRule {
    DropRule {
        category: DropCategory::Gold,
        chance,
        reward: DropReward::Gold { min, max },
    }
}

use DropCategory::{Armor, Consumables, Potions, Weapons};

pub const DUNGEONS: [DungeonDef; 5] = [
    DungeonDef {
        name: "Cave",
        enemies: &[
            EnemyTemplate::new("Goblin", 35, 8, 2),
            EnemyTemplate::new("Venomous Spider", 28, 10, 1),
            EnemyTemplate::new("Zombie", 40, 7, 4),
        ],
        boss: EnemyTemplate::new("Goblin King", 110, 13, 5),
        drops: DropTable {
            rules: &[
                items(Weapons, 15, &["Basic Sword", "Quick Dagger"]),
                items(Armor, 15, &["Simple Leather", "Wooden Shield"]),
                items(Potions, 60, &["Small Healing Potion", "Small Mana Potion"]),
                items(Consumables, 30, &["Bandage", "Simple Meal"]),
                gold(40, 10, 25),
            ],
        },
        map: include_str!("../../assets/maps/cave.txt"),
    },
    DungeonDef {
        name: "Desert",
        enemies: &[
            EnemyTemplate::new("Desert Bandit", 38, 9, 3),
            EnemyTemplate::new("Scorpion", 34, 11, 2),
            EnemyTemplate::new("Mummy", 42, 8, 5),
        ],
        boss: EnemyTemplate::new("Scorpion Queen", 120, 15, 4),
        drops: DropTable {
            rules: &[
                items(Weapons, 20, &["Longbow", "Heavy Axe"]),
                items(Armor, 20, &["Wooden Shield", "Iron Plate"]),
                items(Potions, 65, &["Small Healing Potion", "Strength Potion"]),
                items(Consumables, 35, &["Simple Meal", "Magic Fruit"]),
                gold(45, 20, 40),
            ],
        },
        map: include_str!("../../assets/maps/desert.txt"),
    },
    DungeonDef {
        name: "Tech",
        enemies: &[
            EnemyTemplate::new("Surveillance Drone", 32, 9, 4),
            EnemyTemplate::new("Hostile Cleaning Robot", 38, 10, 4),
            EnemyTemplate::new("Disabled Turret", 36, 12, 3),
        ],
        boss: EnemyTemplate::new("Cyber Golem", 130, 16, 6),
        drops: DropTable {
            rules: &[
                items(Weapons, 25, &["Magic Staff", "Longbow"]),
                items(Armor, 25, &["Iron Plate", "Warrior Helmet"]),
                items(Potions, 70, &["Small Mana Potion", "Defense Potion"]),
                items(Consumables, 40, &["Magic Fruit", "Attack Scroll"]),
                gold(50, 30, 50),
            ],
        },
        map: include_str!("../../assets/maps/tech.txt"),
    },
    DungeonDef {
        name: "Haunted",
        enemies: &[
            EnemyTemplate::new("Ghost", 30, 10, 3),
            EnemyTemplate::new("Gargoyle", 40, 11, 4),
            EnemyTemplate::new("Giant Bat", 34, 9, 3),
        ],
        boss: EnemyTemplate::new("Poltergeist", 125, 14, 5),
        drops: DropTable {
            rules: &[
                items(Weapons, 25, &["Heavy Axe", "Magic Staff"]),
                items(Armor, 25, &["Warrior Helmet", "Magic Cloak"]),
                items(Potions, 75, &["Strength Potion", "Defense Potion"]),
                items(Consumables, 45, &["Attack Scroll", "Defense Scroll"]),
                gold(55, 40, 60),
            ],
        },
        map: include_str!("../../assets/maps/haunted.txt"),
    },
    DungeonDef {
        name: "Final",
        enemies: &[],
        boss: EnemyTemplate::new("Divine Entity", 200, 18, 7),
        drops: DropTable {
            rules: &[
                items(Weapons, 100, &["Heavy Axe", "Magic Staff"]),
                items(Armor, 100, &["Magic Cloak"]),
                items(Potions, 100, &["Small Healing Potion"]),
                items(Consumables, 100, &["Defense Scroll"]),
                gold(100, 100, 150),
            ],
        },
        map: include_str!("../../assets/maps/final.txt"),
    },
];

pub fn dungeon_count() -> usize {
    DUNGEONS.len()
}

pub fn get_dungeon(index: usize) -> Option<&'static DungeonDef> {
    DUNGEONS.get(index)
}

pub fn find_dungeon(name: &str) -> Option<&'static DungeonDef> {
    DUNGEONS.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::lookup_item;

    #[test]
    fn test_five_dungeons_in_order() {
        let names: Vec<_> = DUNGEONS.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Cave", "Desert", "Tech", "Haunted", "Final"]);
        assert_eq!(dungeon_count(), 5);
        assert!(get_dungeon(5).is_none());
    }

    #[test]
    fn test_final_dungeon_is_boss_only() {
        let last = find_dungeon("Final").unwrap();
        assert!(last.enemies.is_empty());
        assert_eq!(last.boss.name, "Divine Entity");
    }

    #[test]
    fn test_drop_items_exist_in_catalog() {
        for dungeon in &DUNGEONS {
            for rule in dungeon.drops.rules {
                if let DropReward::Items(names) = rule.reward {
                    for name in names {
                        assert!(lookup_item(name).is_some(), "{} in {}", name, dungeon.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_spawn_template() {
        let goblin = DUNGEONS[0].enemies[0].spawn();
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.hp_max, 35);
        assert_eq!(goblin.defense(), 2);
    }
}
