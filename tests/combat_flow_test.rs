//! Integration test: combat from the first menu to the loot
//!
//! Drives CombatSession the way the game loop does: choose on the menu,
//! tick every other frame, stop at an outcome.

use beyond::character::Player;
use beyond::combat::{CombatAction, CombatError, CombatOutcome, CombatPhase, CombatSession};
use beyond::core::Difficulty;
use beyond::dungeon::get_dungeon;
use beyond::items::{apply_drops, lookup_item, ItemKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cave_fight(enemy_index: usize) -> CombatSession {
    let cave = get_dungeon(0).unwrap();
    CombatSession::new(cave.enemies[enemy_index].spawn(), false, Difficulty::Normal, cave.drops)
}

/// Attacks whenever the menu is open until the fight ends. Returns frames used.
fn fight_to_the_end(combat: &mut CombatSession, player: &mut Player, rng: &mut ChaCha8Rng) -> u32 {
    let mut frames = 0;
    while combat.outcome().is_none() {
        if combat.is_menu_open() {
            combat.choose(CombatAction::Fight, player, rng).unwrap();
        } else {
            combat.tick(player, rng);
        }
        frames += 1;
        assert!(frames < 5_000, "fight never ended: {:?}", combat.phase());
    }
    frames
}

#[test]
fn test_full_fight_ends_in_victory_with_loot() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut player = Player::new();
    let mut combat = cave_fight(0);

    fight_to_the_end(&mut combat, &mut player, &mut rng);

    assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));
    assert!(player.character.is_alive());
    assert_eq!(combat.enemy.hp, 0);
    assert_eq!(combat.log.last().unwrap().message, "Goblin was defeated!");

    let drops = combat.roll_drops(&mut rng);
    assert!((1..=2).contains(&drops.len()));

    let items_before = player.inventory.len();
    let gold_before = player.gold;
    let messages = apply_drops(&mut player, &drops);
    assert_eq!(messages.len(), drops.len());
    assert!(player.inventory.len() > items_before || player.gold > gold_before);
}

#[test]
fn test_every_cave_enemy_can_be_beaten_from_a_fresh_start() {
    for index in 0..3 {
        let mut rng = ChaCha8Rng::seed_from_u64(100 + index as u64);
        let mut player = Player::new();
        let mut combat = cave_fight(index);
        fight_to_the_end(&mut combat, &mut player, &mut rng);
        assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));
    }
}

#[test]
fn test_turn_cycle_returns_to_menu() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut player = Player::new();
    // Zombie survives a single hit.
    let mut combat = cave_fight(2);
    combat.enemy.hp = 1_000;
    combat.enemy.hp_max = 1_000;

    combat.choose(CombatAction::Fight, &mut player, &mut rng).unwrap();
    assert_eq!(combat.phase(), CombatPhase::PlayerResolving { frames_left: 60 });
    assert_eq!(
        combat.choose(CombatAction::Fight, &mut player, &mut rng),
        Err(CombatError::NotPlayerTurn)
    );

    let hp_before = player.character.hp;
    let mut frames = 0;
    while !combat.is_menu_open() {
        combat.tick(&mut player, &mut rng);
        frames += 1;
        assert!(frames < 1_000);
    }
    // 60 to show the hit, 30 of wind-up, 60 to show the retaliation.
    assert_eq!(frames, 150);
    assert!(player.character.hp < hp_before);
}

#[test]
fn test_boss_drops_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut player = Player::new();
    let cave = get_dungeon(0).unwrap();
    let mut combat = CombatSession::new(cave.boss.spawn(), true, Difficulty::Normal, cave.drops);
    combat.enemy.hp = 1;

    combat.choose(CombatAction::Fight, &mut player, &mut rng).unwrap();
    assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));
    assert!(combat.roll_drops(&mut rng).is_empty());
}

#[test]
fn test_spell_without_mana_keeps_the_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut player = Player::new();
    player.character.mana = 5;
    let mut combat = cave_fight(0);

    let result = combat.choose(CombatAction::Spell, &mut player, &mut rng);
    assert_eq!(
        result,
        Err(CombatError::InsufficientMana {
            required: 10,
            available: 5
        })
    );
    assert!(combat.is_menu_open());
    assert_eq!(player.character.mana, 5);
    assert_eq!(combat.log.last().unwrap().message, "Not enough mana!");
}

#[test]
fn test_healing_potion_is_consumed() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut player = Player::new();
    player.character.hp = 50;
    let mut combat = cave_fight(0);

    combat.choose(CombatAction::Potion, &mut player, &mut rng).unwrap();
    assert_eq!(player.character.hp, 110);
    assert!(player.inventory.first_of_kind(ItemKind::Potion).is_none());

    let mut frames = 0;
    while !combat.is_menu_open() && combat.outcome().is_none() {
        combat.tick(&mut player, &mut rng);
        frames += 1;
        assert!(frames < 1_000);
    }
    assert_eq!(
        combat.choose(CombatAction::Potion, &mut player, &mut rng),
        Err(CombatError::NothingToUse)
    );
}

#[test]
fn test_flee_succeeds_about_sixty_percent_of_the_time() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut player = Player::new();
    let trials = 4_000;
    let mut escaped = 0;

    for _ in 0..trials {
        let mut combat = cave_fight(0);
        combat.choose(CombatAction::Flee, &mut player, &mut rng).unwrap();
        match combat.phase() {
            CombatPhase::Finished(CombatOutcome::Fled) => escaped += 1,
            CombatPhase::EnemyTurn { frames_left } => assert_eq!(frames_left, 30),
            other => panic!("unexpected phase after flee: {:?}", other),
        }
    }

    let rate = escaped as f64 / trials as f64;
    assert!((0.56..=0.64).contains(&rate), "flee rate {}", rate);
}

#[test]
fn test_full_inventory_rejects_the_next_item() {
    let mut player = Player::new();
    let potion = lookup_item("Small Mana Potion").unwrap();
    while player.inventory.len() < 30 {
        player.inventory.add(potion.clone()).unwrap();
    }
    assert!(player.inventory.is_full());
    assert!(player.inventory.add(potion).is_err());
    assert_eq!(player.inventory.len(), 30);
}
