use super::math::{
    roll_enemy_attack, roll_flee, roll_player_attack, roll_spell_damage, scale_for_difficulty,
};
use super::types::*;
use crate::character::{Character, Player};
use crate::core::constants::{ACTION_DISPLAY_FRAMES, ENEMY_WINDUP_FRAMES, SUPPORT_SPELL_HEAL};
use crate::core::settings::Difficulty;
use crate::items::{roll_drops, Drop, DropTable, ItemKind, ItemStat};
use rand::Rng;
use tracing::debug;

/// What happened on a combat frame, for the caller to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    EnemyAttack {
        damage: u32,
        special: Option<&'static str>,
    },
    PlayerDied,
    /// The enemy's result finished displaying and the menu is open again.
    MenuReady,
}

/// A single fight between the player and one enemy.
///
/// The player is borrowed per call rather than owned so the dungeon keeps
/// the only copy of the run state.
#[derive(Debug, Clone)]
pub struct CombatSession {
    pub enemy: Character,
    pub is_boss: bool,
    pub log: CombatLog,
    pub last_hit: Option<HitDisplay>,
    /// Highlighted row of the combat menu.
    pub selected: usize,
    phase: CombatPhase,
    drops: DropTable,
}

impl CombatSession {
    /// Starts a fight. `enemy` is the unscaled template; difficulty scaling
    /// is applied here.
    pub fn new(mut enemy: Character, is_boss: bool, difficulty: Difficulty, drops: DropTable) -> Self {
        scale_for_difficulty(&mut enemy, difficulty);
        debug!(enemy = %enemy.name, hp = enemy.hp, attack = enemy.attack(), is_boss, "combat started");

        let mut log = CombatLog::default();
        log.push(format!("A hostile {} appeared!", enemy.name), false);

        Self {
            enemy,
            is_boss,
            log,
            last_hit: None,
            selected: 0,
            phase: CombatPhase::Menu,
            drops,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn turn(&self) -> Turn {
        self.phase.turn()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.phase == CombatPhase::Menu
    }

    pub fn selected_action(&self) -> CombatAction {
        CombatAction::ALL[self.selected % CombatAction::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % CombatAction::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + CombatAction::ALL.len() - 1) % CombatAction::ALL.len();
    }

    /// Runs a menu action. Spell and Potion pick the first one the player
    /// carries.
    pub fn choose(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        match action {
            CombatAction::Fight => self.player_attack(player, rng),
            CombatAction::Spell => {
                let name = player
                    .inventory
                    .first_of_kind(ItemKind::Spell)
                    .map(|item| item.name.clone())
                    .ok_or(CombatError::NothingToUse)?;
                self.cast_spell(player, &name, rng)
            }
            CombatAction::Potion => {
                let name = player
                    .inventory
                    .first_of_kind(ItemKind::Potion)
                    .map(|item| item.name.clone())
                    .ok_or(CombatError::NothingToUse)?;
                self.use_potion(player, &name)
            }
            CombatAction::Flee => self.try_flee(rng).map(|_| ()),
        }
    }

    pub fn player_attack(&mut self, player: &mut Player, rng: &mut impl Rng) -> Result<(), CombatError> {
        self.ensure_menu()?;

        let roll = roll_player_attack(player.character.attack(), rng);
        let dealt = self.enemy.receive_damage(roll.damage);
        let message = if roll.is_crit {
            format!("Critical hit! {} took {} damage!", self.enemy.name, dealt)
        } else {
            format!("{} dealt {} damage.", player.character.name, dealt)
        };
        self.log.push(message, true);
        self.last_hit = Some(HitDisplay {
            amount: dealt,
            kind: if roll.is_crit { HitKind::Critical } else { HitKind::Normal },
            target: Turn::Enemy,
        });

        self.finish_player_action();
        Ok(())
    }

    /// Casts a spell the player carries. A spell without damage heals
    /// instead. Lack of mana is logged and does not use up the turn.
    pub fn cast_spell(
        &mut self,
        player: &mut Player,
        name: &str,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        self.ensure_menu()?;

        let spell = player
            .inventory
            .items()
            .iter()
            .find(|item| item.matches(name, ItemKind::Spell))
            .cloned()
            .ok_or_else(|| CombatError::ItemNotFound(name.to_string()))?;

        let cost = spell.stat(ItemStat::Cost).unwrap_or(0);
        let available = player.character.mana;
        if !player.character.spend_mana(cost) {
            self.log.push("Not enough mana!".to_string(), true);
            return Err(CombatError::InsufficientMana {
                required: cost,
                available,
            });
        }

        let power = spell.stat(ItemStat::Damage).unwrap_or(0);
        if power > 0 {
            let dealt = self.enemy.receive_damage(roll_spell_damage(power, rng));
            self.log.push(
                format!("{}! {} took {} damage.", spell.name, self.enemy.name, dealt),
                true,
            );
            self.last_hit = Some(HitDisplay {
                amount: dealt,
                kind: HitKind::Normal,
                target: Turn::Enemy,
            });
        } else {
            player.character.heal(SUPPORT_SPELL_HEAL);
            self.log.push(
                format!("{}! Restored {} HP.", spell.name, SUPPORT_SPELL_HEAL),
                true,
            );
            self.last_hit = Some(HitDisplay {
                amount: SUPPORT_SPELL_HEAL,
                kind: HitKind::Heal,
                target: Turn::Player,
            });
        }

        self.finish_player_action();
        Ok(())
    }

    /// Drinks or throws the first potion with this name. The potion is
    /// consumed only if one of its effects applied.
    pub fn use_potion(&mut self, player: &mut Player, name: &str) -> Result<(), CombatError> {
        self.ensure_menu()?;

        let index = player
            .inventory
            .position(name, ItemKind::Potion)
            .ok_or_else(|| CombatError::ItemNotFound(name.to_string()))?;
        let potion = player
            .inventory
            .get(index)
            .cloned()
            .ok_or_else(|| CombatError::ItemNotFound(name.to_string()))?;

        let mut applied = false;
        if let Some(heal) = potion.stat(ItemStat::Heal) {
            player.character.heal(heal);
            self.log.push(format!("Used {}. HP +{}", potion.name, heal), true);
            self.last_hit = Some(HitDisplay {
                amount: heal,
                kind: HitKind::Heal,
                target: Turn::Player,
            });
            applied = true;
        }
        if let Some(mana) = potion.stat(ItemStat::Mana) {
            player.character.restore_mana(mana);
            self.log.push(format!("Used {}. MP +{}", potion.name, mana), true);
            applied = true;
        }
        if let Some(damage) = potion.stat(ItemStat::Damage) {
            let dealt = self.enemy.receive_damage(damage);
            self.log.push(
                format!("Threw {}! {} took {} damage.", potion.name, self.enemy.name, dealt),
                true,
            );
            self.last_hit = Some(HitDisplay {
                amount: dealt,
                kind: HitKind::Normal,
                target: Turn::Enemy,
            });
            applied = true;
        }

        if !applied {
            return Err(CombatError::NoEffect(potion.name));
        }
        player.inventory.remove(index);

        self.finish_player_action();
        Ok(())
    }

    /// Attempts to run. On failure the enemy gets its turn right away.
    pub fn try_flee(&mut self, rng: &mut impl Rng) -> Result<bool, CombatError> {
        self.ensure_menu()?;

        if roll_flee(rng) {
            self.log.push("You escaped!".to_string(), true);
            self.phase = CombatPhase::Finished(CombatOutcome::Fled);
            Ok(true)
        } else {
            self.log.push("Couldn't escape!".to_string(), true);
            self.phase = CombatPhase::EnemyTurn {
                frames_left: ENEMY_WINDUP_FRAMES,
            };
            Ok(false)
        }
    }

    /// Advances the phase countdowns by one frame. The enemy strikes when
    /// its wind-up runs out.
    pub fn tick(&mut self, player: &mut Player, rng: &mut impl Rng) -> Option<CombatEvent> {
        match self.phase {
            CombatPhase::PlayerResolving { frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                self.phase = if frames_left == 0 {
                    CombatPhase::EnemyTurn {
                        frames_left: ENEMY_WINDUP_FRAMES,
                    }
                } else {
                    CombatPhase::PlayerResolving { frames_left }
                };
                None
            }
            CombatPhase::EnemyTurn { frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                if frames_left == 0 {
                    Some(self.enemy_attack(player, rng))
                } else {
                    self.phase = CombatPhase::EnemyTurn { frames_left };
                    None
                }
            }
            CombatPhase::EnemyResolving { frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                if frames_left == 0 {
                    self.phase = CombatPhase::Menu;
                    self.last_hit = None;
                    Some(CombatEvent::MenuReady)
                } else {
                    self.phase = CombatPhase::EnemyResolving { frames_left };
                    None
                }
            }
            CombatPhase::Menu | CombatPhase::Finished(_) => None,
        }
    }

    /// Rewards for a won fight against a regular enemy. Bosses drop nothing.
    pub fn roll_drops(&self, rng: &mut impl Rng) -> Vec<Drop> {
        if self.is_boss || self.outcome() != Some(CombatOutcome::Victory) {
            return Vec::new();
        }
        roll_drops(&self.drops, rng)
    }

    fn enemy_attack(&mut self, player: &mut Player, rng: &mut impl Rng) -> CombatEvent {
        let roll = roll_enemy_attack(self.enemy.attack(), rng);
        let dealt = player.character.receive_damage(roll.damage);

        let message = match roll.special {
            Some(special) => format!("{} used {}! You took {} damage.", self.enemy.name, special, dealt),
            None => format!("{} attacked! You took {} damage.", self.enemy.name, dealt),
        };
        self.log.push(message, false);
        self.last_hit = Some(HitDisplay {
            amount: dealt,
            kind: if roll.special.is_some() { HitKind::Special } else { HitKind::Normal },
            target: Turn::Player,
        });

        if !player.character.is_alive() {
            self.log.push(format!("{} has fallen...", player.character.name), false);
            self.phase = CombatPhase::Finished(CombatOutcome::Defeat);
            debug!(enemy = %self.enemy.name, "player defeated");
            return CombatEvent::PlayerDied;
        }

        self.phase = CombatPhase::EnemyResolving {
            frames_left: ACTION_DISPLAY_FRAMES,
        };
        CombatEvent::EnemyAttack {
            damage: dealt,
            special: roll.special,
        }
    }

    fn ensure_menu(&self) -> Result<(), CombatError> {
        if self.phase == CombatPhase::Menu {
            Ok(())
        } else {
            Err(CombatError::NotPlayerTurn)
        }
    }

    /// Victory resolves on the spot, otherwise the result stays on screen.
    fn finish_player_action(&mut self) {
        if !self.enemy.is_alive() {
            self.log.push(format!("{} was defeated!", self.enemy.name), true);
            self.phase = CombatPhase::Finished(CombatOutcome::Victory);
            debug!(enemy = %self.enemy.name, "enemy defeated");
        } else {
            self.phase = CombatPhase::PlayerResolving {
                frames_left: ACTION_DISPLAY_FRAMES,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{lookup_item, DropCategory, DropReward, DropRule};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const GOLD_TABLE: DropTable = DropTable {
        rules: &[DropRule {
            category: DropCategory::Gold,
            chance: 1,
            reward: DropReward::Gold { min: 5, max: 5 },
        }],
    };

    fn goblin_fight() -> CombatSession {
        CombatSession::new(Character::new("Goblin", 35, 8, 2), false, Difficulty::Normal, GOLD_TABLE)
    }

    fn run_until_menu(session: &mut CombatSession, player: &mut Player, rng: &mut ChaCha8Rng) -> u32 {
        let mut frames = 0;
        while !session.is_menu_open() && session.outcome().is_none() {
            session.tick(player, rng);
            frames += 1;
            assert!(frames < 1000, "combat stalled in {:?}", session.phase());
        }
        frames
    }

    #[test]
    fn test_opening_log_line() {
        let session = goblin_fight();
        assert_eq!(session.log.last().unwrap().message, "A hostile Goblin appeared!");
        assert!(session.is_menu_open());
        assert_eq!(session.turn(), Turn::Player);
    }

    #[test]
    fn test_difficulty_scales_enemy() {
        let session = CombatSession::new(
            Character::new("Zombie", 40, 7, 4),
            false,
            Difficulty::Hard,
            GOLD_TABLE,
        );
        assert_eq!(session.enemy.hp, 56);
        assert_eq!(session.enemy.hp_max, 56);
        assert_eq!(session.enemy.base_attack, 9);
    }

    #[test]
    fn test_attack_goes_through_all_phases() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut player = Player::new();
        let mut session = CombatSession::new(
            Character::new("Gargoyle", 500, 11, 4),
            false,
            Difficulty::Normal,
            GOLD_TABLE,
        );

        session.player_attack(&mut player, &mut rng).unwrap();
        assert!(matches!(session.phase(), CombatPhase::PlayerResolving { frames_left: 60 }));
        assert!(session.enemy.hp < 500);

        for _ in 0..ACTION_DISPLAY_FRAMES {
            session.tick(&mut player, &mut rng);
        }
        assert!(matches!(session.phase(), CombatPhase::EnemyTurn { .. }));
        assert_eq!(session.turn(), Turn::Enemy);

        let hp_before = player.character.hp;
        let mut event = None;
        for _ in 0..ENEMY_WINDUP_FRAMES {
            event = session.tick(&mut player, &mut rng);
        }
        assert!(matches!(event, Some(CombatEvent::EnemyAttack { .. })));
        assert!(player.character.hp < hp_before);
        assert!(matches!(session.phase(), CombatPhase::EnemyResolving { .. }));

        run_until_menu(&mut session, &mut player, &mut rng);
        assert!(session.is_menu_open());
        assert!(session.last_hit.is_none());
    }

    #[test]
    fn test_actions_rejected_outside_menu() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = Player::new();
        let mut session = CombatSession::new(
            Character::new("Gargoyle", 500, 11, 4),
            false,
            Difficulty::Normal,
            GOLD_TABLE,
        );
        session.player_attack(&mut player, &mut rng).unwrap();
        let hp = session.enemy.hp;

        assert_eq!(session.player_attack(&mut player, &mut rng), Err(CombatError::NotPlayerTurn));
        assert_eq!(session.try_flee(&mut rng), Err(CombatError::NotPlayerTurn));
        assert_eq!(session.enemy.hp, hp);
    }

    #[test]
    fn test_victory_resolves_immediately() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut player = Player::new();
        let mut session = CombatSession::new(Character::new("Bat", 1, 9, 0), false, Difficulty::Normal, GOLD_TABLE);

        session.player_attack(&mut player, &mut rng).unwrap();
        assert_eq!(session.outcome(), Some(CombatOutcome::Victory));
        assert!(session.tick(&mut player, &mut rng).is_none());
        assert_eq!(session.roll_drops(&mut rng), vec![Drop::Gold(5)]);
    }

    #[test]
    fn test_boss_drops_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut player = Player::new();
        let mut session = CombatSession::new(Character::new("King", 1, 9, 0), true, Difficulty::Normal, GOLD_TABLE);
        session.player_attack(&mut player, &mut rng).unwrap();
        assert_eq!(session.outcome(), Some(CombatOutcome::Victory));
        assert!(session.roll_drops(&mut rng).is_empty());
    }

    #[test]
    fn test_defeat_when_player_dies() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = Player::new();
        player.character.hp = 1;
        let mut session = CombatSession::new(
            Character::new("Golem", 500, 30, 6),
            true,
            Difficulty::Normal,
            GOLD_TABLE,
        );

        session.player_attack(&mut player, &mut rng).unwrap();
        let mut died = false;
        for _ in 0..(ACTION_DISPLAY_FRAMES + ENEMY_WINDUP_FRAMES) {
            if session.tick(&mut player, &mut rng) == Some(CombatEvent::PlayerDied) {
                died = true;
            }
        }
        assert!(died);
        assert_eq!(session.outcome(), Some(CombatOutcome::Defeat));
        assert_eq!(player.character.hp, 0);
    }

    #[test]
    fn test_spell_without_mana_keeps_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut player = Player::new();
        player.character.mana = 5;
        let mut session = goblin_fight();

        let result = session.cast_spell(&mut player, "Fireball", &mut rng);
        assert_eq!(
            result,
            Err(CombatError::InsufficientMana {
                required: 10,
                available: 5
            })
        );
        assert_eq!(session.log.last().unwrap().message, "Not enough mana!");
        assert!(session.is_menu_open());
        assert_eq!(player.character.mana, 5);
        assert_eq!(session.enemy.hp, 35);
    }

    #[test]
    fn test_damage_spell_spends_mana() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut player = Player::new();
        let mut session = CombatSession::new(
            Character::new("Mummy", 200, 8, 5),
            false,
            Difficulty::Normal,
            GOLD_TABLE,
        );

        session.cast_spell(&mut player, "Fireball", &mut rng).unwrap();
        assert_eq!(player.character.mana, 40);
        let dealt = 200 - session.enemy.hp;
        // 33..=37 before the mummy's 5 defense.
        assert!((28..=32).contains(&dealt), "dealt {dealt}");
    }

    #[test]
    fn test_support_spell_heals() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut player = Player::new();
        player.inventory.add(lookup_item("Greater Heal").unwrap()).unwrap();
        player.character.hp = 100;
        let mut session = goblin_fight();

        session.cast_spell(&mut player, "Greater Heal", &mut rng).unwrap();
        assert_eq!(player.character.hp, 130);
        assert_eq!(player.character.mana, 40);
        assert_eq!(session.enemy.hp, 35);
    }

    #[test]
    fn test_unknown_spell() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut player = Player::new();
        let mut session = goblin_fight();
        assert_eq!(
            session.cast_spell(&mut player, "Lightning", &mut rng),
            Err(CombatError::ItemNotFound("Lightning".to_string()))
        );
    }

    #[test]
    fn test_healing_potion_consumed() {
        let mut player = Player::new();
        player.character.hp = 50;
        let mut session = goblin_fight();

        session.use_potion(&mut player, "Small Healing Potion").unwrap();
        assert_eq!(player.character.hp, 110);
        assert!(player.inventory.position("Small Healing Potion", ItemKind::Potion).is_none());
        assert!(matches!(session.phase(), CombatPhase::PlayerResolving { .. }));
    }

    #[test]
    fn test_poison_potion_damages_enemy() {
        let mut player = Player::new();
        player.inventory.add(lookup_item("Poison Potion").unwrap()).unwrap();
        let mut session = goblin_fight();

        session.use_potion(&mut player, "Poison Potion").unwrap();
        assert_eq!(session.outcome(), Some(CombatOutcome::Victory));
    }

    #[test]
    fn test_potion_without_effect_is_kept() {
        let mut player = Player::new();
        player.inventory.add(lookup_item("Strength Potion").unwrap()).unwrap();
        let mut session = goblin_fight();

        assert_eq!(
            session.use_potion(&mut player, "Strength Potion"),
            Err(CombatError::NoEffect("Strength Potion".to_string()))
        );
        assert!(player.inventory.position("Strength Potion", ItemKind::Potion).is_some());
        assert!(session.is_menu_open());
    }

    #[test]
    fn test_failed_flee_hands_turn_to_enemy() {
        let mut player = Player::new();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut session = goblin_fight();
            match session.try_flee(&mut rng).unwrap() {
                true => assert_eq!(session.outcome(), Some(CombatOutcome::Fled)),
                false => {
                    assert!(matches!(session.phase(), CombatPhase::EnemyTurn { frames_left } if frames_left == ENEMY_WINDUP_FRAMES));
                    run_until_menu(&mut session, &mut player, &mut rng);
                    player.character.hp = player.character.hp_max;
                }
            }
        }
    }

    #[test]
    fn test_choose_without_potions() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut player = Player::new();
        let index = player.inventory.position("Small Healing Potion", ItemKind::Potion).unwrap();
        player.inventory.remove(index);
        let mut session = goblin_fight();

        assert_eq!(
            session.choose(CombatAction::Potion, &mut player, &mut rng),
            Err(CombatError::NothingToUse)
        );
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut session = goblin_fight();
        session.select_prev();
        assert_eq!(session.selected_action(), CombatAction::Flee);
        session.select_next();
        assert_eq!(session.selected_action(), CombatAction::Fight);
    }
}
