//! Pure combat rolls. Every function takes the RNG from the caller so
//! fights can be replayed with a seeded generator.

use crate::character::Character;
use crate::core::constants::{
    CRIT_CHANCE, CRIT_MULTIPLIER, DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN,
    ENEMY_SPECIAL_ATTACKS, ENEMY_SPECIAL_CHANCE, FLEE_FAIL_THRESHOLD, SPELL_DAMAGE_SPREAD,
};
use crate::core::settings::Difficulty;
use rand::Rng;

/// Result of a player attack roll, before defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub damage: u32,
    pub is_crit: bool,
}

/// Result of an enemy attack roll, before defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyAttackRoll {
    pub damage: u32,
    /// Name of the special move, if one was used.
    pub special: Option<&'static str>,
}

/// `attack + uniform(-2..=3)`, floored at zero.
pub fn roll_base_damage(attack: u32, rng: &mut impl Rng) -> u32 {
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..=DAMAGE_VARIANCE_MAX);
    (attack as i64 + variance as i64).max(0) as u32
}

/// Multiplies and truncates toward zero.
pub fn apply_multiplier(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier) as u32
}

pub fn roll_crit(rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < CRIT_CHANCE
}

/// Player swing: base roll, then a 20% chance of a x1.5 critical.
pub fn roll_player_attack(attack: u32, rng: &mut impl Rng) -> AttackRoll {
    let base = roll_base_damage(attack, rng);
    if roll_crit(rng) {
        AttackRoll {
            damage: apply_multiplier(base, CRIT_MULTIPLIER),
            is_crit: true,
        }
    } else {
        AttackRoll {
            damage: base,
            is_crit: false,
        }
    }
}

/// Enemy swing: 30% chance of a special move picked uniformly from
/// [`ENEMY_SPECIAL_ATTACKS`], otherwise a plain base roll.
pub fn roll_enemy_attack(attack: u32, rng: &mut impl Rng) -> EnemyAttackRoll {
    if rng.gen::<f64>() < ENEMY_SPECIAL_CHANCE {
        let (name, multiplier) = ENEMY_SPECIAL_ATTACKS[rng.gen_range(0..ENEMY_SPECIAL_ATTACKS.len())];
        let base = roll_base_damage(attack, rng);
        EnemyAttackRoll {
            damage: apply_multiplier(base, multiplier),
            special: Some(name),
        }
    } else {
        EnemyAttackRoll {
            damage: roll_base_damage(attack, rng),
            special: None,
        }
    }
}

/// `uniform(power-2..=power+2)`, floored at zero.
pub fn roll_spell_damage(power: u32, rng: &mut impl Rng) -> u32 {
    let low = power.saturating_sub(SPELL_DAMAGE_SPREAD);
    rng.gen_range(low..=power + SPELL_DAMAGE_SPREAD)
}

/// 60% escape chance: `uniform(1..=100) > 40`.
pub fn roll_flee(rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=100u32) > FLEE_FAIL_THRESHOLD
}

/// Applies difficulty to a freshly spawned enemy. The scaled hp becomes
/// the encounter's max hp.
pub fn scale_for_difficulty(enemy: &mut Character, difficulty: Difficulty) {
    let multiplier = difficulty.enemy_multiplier();
    enemy.hp = apply_multiplier(enemy.hp, multiplier);
    enemy.hp_max = enemy.hp;
    enemy.base_attack = apply_multiplier(enemy.base_attack, multiplier);
}
