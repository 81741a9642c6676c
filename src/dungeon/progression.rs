use super::collision::{CollisionGrid, CollisionMap};
use super::data::{dungeon_count, get_dungeon, DungeonDef, EnemyTemplate};
use crate::character::{Player, Position};
use crate::core::constants::{
    BOSS_SIZE, ENCOUNTER_CHANCE_PER_FRAME, FRAMES_PER_SECOND, PLAYER_SIZE,
    PLAYER_SPEED, TRANSITION_FRAMES, TRANSITION_SKIP_BELOW,
};
use rand::Rng;
use tracing::info;

/// A fight the dungeon wants to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    Regular(EnemyTemplate),
    Boss(EnemyTemplate),
}

impl Encounter {
    pub fn template(&self) -> &EnemyTemplate {
        match self {
            Encounter::Regular(t) | Encounter::Boss(t) => t,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Encounter::Boss(_))
    }
}

/// Result of the transition countdown reaching zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    NextDungeon(usize),
    Complete,
}

/// Axis-aligned square overlap. Touching edges do not count.
pub fn rects_overlap(a: Position, a_size: i32, b: Position, b_size: i32) -> bool {
    a.x < b.x + b_size && b.x < a.x + a_size && a.y < b.y + b_size && b.y < a.y + a_size
}

/// Which dungeon the run is in, where its boss stands and the floor layout.
#[derive(Debug, Clone)]
pub struct Progression {
    dungeon_index: usize,
    grid: CollisionGrid,
    boss_position: Position,
    transition_frames: u32,
}

impl Progression {
    /// Loads the first dungeon and places the player in it.
    pub fn start(player: &mut Player, rng: &mut impl Rng) -> Self {
        let mut progression = Self {
            dungeon_index: 0,
            grid: CollisionGrid::open_default(),
            boss_position: Position::default(),
            transition_frames: 0,
        };
        progression.load_dungeon(player, rng);
        progression
    }

    pub fn dungeon_index(&self) -> usize {
        self.dungeon_index
    }

    /// `None` once every dungeon is cleared.
    pub fn current_dungeon(&self) -> Option<&'static DungeonDef> {
        get_dungeon(self.dungeon_index)
    }

    pub fn is_complete(&self) -> bool {
        self.dungeon_index >= dungeon_count()
    }

    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    pub fn boss_position(&self) -> Position {
        self.boss_position
    }

    pub fn transition_frames(&self) -> u32 {
        self.transition_frames
    }

    /// Rebuilds the floor and picks fresh spawn points for the player and boss.
    pub fn load_dungeon(&mut self, player: &mut Player, rng: &mut impl Rng) {
        let Some(dungeon) = self.current_dungeon() else {
            return;
        };
        self.grid = CollisionGrid::from_mask_or_open(dungeon.name, dungeon.map);
        player.character.position = self.grid.find_spawn_point(rng);
        self.boss_position = self.grid.find_boss_spawn_point(rng);
        info!(
            dungeon = dungeon.name,
            index = self.dungeon_index,
            player = ?player.character.position,
            boss = ?self.boss_position,
            "dungeon loaded"
        );
    }

    /// Moves the player one step in the given direction (each of `dx`, `dy`
    /// in -1..=1). A blocked move is undone. Returns whether the player
    /// actually moved.
    pub fn move_player(&self, player: &mut Player, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        let max = self.grid.size() - PLAYER_SIZE;
        let old = player.character.position;
        let new = Position::new(
            (old.x + dx.signum() * PLAYER_SPEED).clamp(0, max),
            (old.y + dy.signum() * PLAYER_SPEED).clamp(0, max),
        );
        if new == old || !self.grid.is_passable(new.x, new.y, PLAYER_SIZE, PLAYER_SIZE) {
            return false;
        }
        player.character.position = new;
        player.steps += 1;
        true
    }

    pub fn is_touching_boss(&self, player: &Player) -> bool {
        rects_overlap(
            player.character.position,
            PLAYER_SIZE,
            self.boss_position,
            BOSS_SIZE,
        )
    }

    /// Touching the boss always starts the boss fight. Otherwise, if the
    /// player moved, a random encounter fires with a chance proportional to
    /// the frame time.
    pub fn check_encounter(
        &self,
        player: &Player,
        moved: bool,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Option<Encounter> {
        let dungeon = self.current_dungeon()?;
        if self.is_touching_boss(player) {
            return Some(Encounter::Boss(dungeon.boss));
        }
        if !moved || dungeon.enemies.is_empty() {
            return None;
        }
        let chance = ENCOUNTER_CHANCE_PER_FRAME * dt * FRAMES_PER_SECOND as f64;
        if rng.gen::<f64>() < chance {
            let template = dungeon.enemies[rng.gen_range(0..dungeon.enemies.len())];
            return Some(Encounter::Regular(template));
        }
        None
    }

    pub fn begin_transition(&mut self) {
        self.transition_frames = TRANSITION_FRAMES;
    }

    /// Cuts the transition short once the first second of it has played.
    /// Returns whether the skip was accepted.
    pub fn skip_transition(&mut self) -> bool {
        if self.transition_frames > 0 && self.transition_frames < TRANSITION_SKIP_BELOW {
            self.transition_frames = 0;
            true
        } else {
            false
        }
    }

    /// Counts the transition down. At zero the next dungeon is loaded, or the
    /// run is reported complete if none is left.
    pub fn tick_transition(&mut self, player: &mut Player, rng: &mut impl Rng) -> Option<TransitionResult> {
        self.transition_frames = self.transition_frames.saturating_sub(1);
        if self.transition_frames > 0 {
            return None;
        }
        self.dungeon_index += 1;
        if self.is_complete() {
            info!("all dungeons cleared");
            return Some(TransitionResult::Complete);
        }
        self.load_dungeon(player, rng);
        Some(TransitionResult::NextDungeon(self.dungeon_index))
    }
}
