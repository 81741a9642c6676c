use crate::core::constants::BASE_MANA;
use crate::items::{Item, ItemKind, ItemStat};
use serde::{Deserialize, Serialize};

/// Top-left corner of an entity in dungeon coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A combatant: the player's body or an enemy.
///
/// Invariants: `hp <= hp_max` and `mana <= mana_max`. Both are unsigned so
/// they can never go below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub hp: u32,
    pub hp_max: u32,
    pub mana: u32,
    pub mana_max: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub position: Position,
}

impl Character {
    pub fn new(name: impl Into<String>, hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            hp_max: hp,
            mana: BASE_MANA,
            mana_max: BASE_MANA,
            base_attack: attack,
            base_defense: defense,
            weapon: None,
            armor: None,
            position: Position::default(),
        }
    }

    /// Effective attack: base plus the equipped weapon's bonus.
    pub fn attack(&self) -> u32 {
        let bonus = self
            .weapon
            .as_ref()
            .and_then(|w| w.stat(ItemStat::Attack))
            .unwrap_or(0);
        self.base_attack + bonus
    }

    /// Effective defense: base plus the equipped armor's bonus.
    pub fn defense(&self) -> u32 {
        let bonus = self
            .armor
            .as_ref()
            .and_then(|a| a.stat(ItemStat::Defense))
            .unwrap_or(0);
        self.base_defense + bonus
    }

    /// Applies incoming damage after defense and returns what was dealt.
    /// At least 1 point always lands.
    pub fn receive_damage(&mut self, raw_damage: u32) -> u32 {
        let actual = raw_damage.saturating_sub(self.defense()).max(1);
        self.hp = self.hp.saturating_sub(actual);
        actual
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.hp_max);
    }

    pub fn restore_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount).min(self.mana_max);
    }

    /// Deducts `cost` if affordable. Returns false and leaves mana untouched otherwise.
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Puts a weapon or armor into its slot. Returns false for other kinds.
    pub fn equip(&mut self, item: Item) -> bool {
        match item.kind {
            ItemKind::Weapon => {
                self.weapon = Some(item);
                true
            }
            ItemKind::Armor => {
                self.armor = Some(item);
                true
            }
            _ => false,
        }
    }
}
