use super::types::Character;
use crate::core::constants::{
    PLAYER_BASE_ATTACK, PLAYER_BASE_DEFENSE, PLAYER_BASE_HP, PLAYER_NAME,
};
use crate::items::{lookup_item, Inventory, ItemKind, ItemStat};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Items every new run starts with. The first weapon is equipped.
pub const STARTING_ITEMS: [&str; 3] = ["Basic Sword", "Small Healing Potion", "Fireball"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub character: Character,
    pub inventory: Inventory,
    pub gold: u32,
    pub steps: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let mut character = Character::new(
            PLAYER_NAME,
            PLAYER_BASE_HP,
            PLAYER_BASE_ATTACK,
            PLAYER_BASE_DEFENSE,
        );
        let mut inventory = Inventory::default();

        for name in STARTING_ITEMS {
            let Some(item) = lookup_item(name) else {
                warn!(item = name, "starting item missing from catalog");
                continue;
            };
            if item.kind == ItemKind::Weapon && character.weapon.is_none() {
                character.equip(item.clone());
            }
            let added = inventory.add(item);
            debug_assert!(added.is_ok(), "starting kit must fit an empty inventory");
        }

        Self {
            character,
            inventory,
            gold: 0,
            steps: 0,
        }
    }

    /// Uses an inventory item outside of combat.
    ///
    /// Weapons and armor are equipped and stay in the bag. Potions and
    /// consumables with a heal, mana or attack effect are consumed. Returns
    /// the message to show, or `None` when nothing happened.
    pub fn use_item(&mut self, index: usize) -> Option<String> {
        let item = self.inventory.get(index)?.clone();

        match item.kind {
            ItemKind::Weapon => {
                let message = format!("Equipped: {}", item.name);
                self.character.equip(item);
                Some(message)
            }
            ItemKind::Armor => {
                let message = format!("Wearing: {}", item.name);
                self.character.equip(item);
                Some(message)
            }
            ItemKind::Spell => Some(format!("Spell {} ready.", item.name)),
            ItemKind::Potion | ItemKind::Consumable => {
                let mut message = None;
                if let Some(heal) = item.stat(ItemStat::Heal) {
                    self.character.heal(heal);
                    message = Some(format!("Healed {}", heal));
                }
                if let Some(mana) = item.stat(ItemStat::Mana) {
                    self.character.restore_mana(mana);
                    message = Some(format!("Mana +{}", mana));
                }
                if item.stat(ItemStat::Attack).is_some() {
                    message = Some(format!("Used {}", item.name));
                }
                if message.is_some() {
                    self.inventory.remove(index);
                }
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_kit() {
        let player = Player::new();
        assert_eq!(player.character.name, "Rey");
        assert_eq!(player.character.hp_max, 160);
        assert_eq!(player.character.attack(), 18 + 15);
        assert_eq!(player.character.defense(), 8);
        assert_eq!(player.inventory.len(), 3);
        assert_eq!(player.gold, 0);
    }

    #[test]
    fn test_use_weapon_equips_and_keeps_item() {
        let mut player = Player::new();
        player.inventory.add(lookup_item("Heavy Axe").unwrap()).unwrap();
        let index = player.inventory.position("Heavy Axe", ItemKind::Weapon).unwrap();

        let message = player.use_item(index);
        assert_eq!(message.as_deref(), Some("Equipped: Heavy Axe"));
        assert_eq!(player.character.attack(), 18 + 25);
        assert!(player.inventory.position("Heavy Axe", ItemKind::Weapon).is_some());
    }

    #[test]
    fn test_use_potion_consumes_it() {
        let mut player = Player::new();
        player.character.receive_damage(100);
        let index = player
            .inventory
            .position("Small Healing Potion", ItemKind::Potion)
            .unwrap();

        let message = player.use_item(index);
        assert_eq!(message.as_deref(), Some("Healed 60"));
        assert!(player
            .inventory
            .position("Small Healing Potion", ItemKind::Potion)
            .is_none());
    }

    #[test]
    fn test_use_defense_scroll_does_nothing() {
        let mut player = Player::new();
        player.inventory.add(lookup_item("Defense Scroll").unwrap()).unwrap();
        let index = player.inventory.len() - 1;

        assert!(player.use_item(index).is_none());
        assert_eq!(player.inventory.len(), 4);
    }

    #[test]
    fn test_use_item_out_of_range() {
        let mut player = Player::new();
        assert!(player.use_item(99).is_none());
    }
}
