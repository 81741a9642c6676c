use crate::core::constants::{COMBAT_LOG_CAPACITY, COMBAT_LOG_VISIBLE};
use std::collections::VecDeque;

/// Why a player action was rejected. None of these consume the turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("not enough mana: {required} required, {available} available")]
    InsufficientMana { required: u32, available: u32 },
    #[error("{0} is not in the inventory")]
    ItemNotFound(String),
    #[error("{0} has no effect in combat")]
    NoEffect(String),
    #[error("nothing to use")]
    NothingToUse,
}

/// Whose move the fight is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Enemy,
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Combat state machine.
///
/// `Menu -> PlayerResolving -> EnemyTurn -> EnemyResolving -> Menu`, with
/// `Finished` reachable whenever someone dies or the player escapes. Every
/// countdown is in frames and only ever decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// Waiting for the player to pick an action.
    Menu,
    /// Player's action is applied; its result is on screen.
    PlayerResolving { frames_left: u32 },
    /// Enemy winding up before it retaliates.
    EnemyTurn { frames_left: u32 },
    /// Enemy's attack is applied; its result is on screen.
    EnemyResolving { frames_left: u32 },
    Finished(CombatOutcome),
}

impl CombatPhase {
    pub fn turn(&self) -> Turn {
        match self {
            CombatPhase::Menu | CombatPhase::PlayerResolving { .. } | CombatPhase::Finished(_) => {
                Turn::Player
            }
            CombatPhase::EnemyTurn { .. } | CombatPhase::EnemyResolving { .. } => Turn::Enemy,
        }
    }

    pub fn frames_left(&self) -> u32 {
        match self {
            CombatPhase::PlayerResolving { frames_left }
            | CombatPhase::EnemyTurn { frames_left }
            | CombatPhase::EnemyResolving { frames_left } => *frames_left,
            CombatPhase::Menu | CombatPhase::Finished(_) => 0,
        }
    }
}

/// The four entries of the combat menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Fight,
    Spell,
    Potion,
    Flee,
}

impl CombatAction {
    pub const ALL: [CombatAction; 4] = [
        CombatAction::Fight,
        CombatAction::Spell,
        CombatAction::Potion,
        CombatAction::Flee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CombatAction::Fight => "Fight",
            CombatAction::Spell => "Spell",
            CombatAction::Potion => "Potion",
            CombatAction::Flee => "Flee",
        }
    }
}

/// Flavor of the last number shown over a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Normal,
    Critical,
    Special,
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitDisplay {
    pub amount: u32,
    pub kind: HitKind,
    pub target: Turn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatLogEntry {
    pub message: String,
    pub is_player_action: bool,
}

/// Bounded message log, oldest entries dropped first.
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
}

impl CombatLog {
    pub fn push(&mut self, message: String, is_player_action: bool) {
        if self.entries.len() >= COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(CombatLogEntry {
            message,
            is_player_action,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.back()
    }

    /// The most recent entries shown in the combat panel, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &CombatLogEntry> {
        let skip = self.entries.len().saturating_sub(COMBAT_LOG_VISIBLE);
        self.entries.iter().skip(skip)
    }
}
