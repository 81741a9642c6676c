// Frame timing
pub const FRAMES_PER_SECOND: u32 = 60;
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 FPS

// World geometry
pub const DUNGEON_SIZE: i32 = 1280;
pub const MIN_MAP_SIZE: i32 = 400; // room for both spawn search bands
pub const PLAYER_SIZE: i32 = 48;
pub const BOSS_SIZE: i32 = 96;
pub const PLAYER_SPEED: i32 = 5;

// Spawn search
pub const SPAWN_POINT_ATTEMPTS: u32 = 1000;
pub const BOSS_SPAWN_POINT_ATTEMPTS: u32 = 500;

// Player defaults
pub const PLAYER_NAME: &str = "Rey";
pub const PLAYER_BASE_HP: u32 = 160;
pub const PLAYER_BASE_ATTACK: u32 = 18;
pub const PLAYER_BASE_DEFENSE: u32 = 8;
pub const BASE_MANA: u32 = 50;
pub const INVENTORY_CAPACITY: usize = 30;

// Encounters
pub const ENCOUNTER_CHANCE_PER_FRAME: f64 = 0.015;

// Combat rolls
pub const DAMAGE_VARIANCE_MIN: i32 = -2;
pub const DAMAGE_VARIANCE_MAX: i32 = 3;
pub const CRIT_CHANCE: f64 = 0.20;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const ENEMY_SPECIAL_CHANCE: f64 = 0.30;
pub const ENEMY_SPECIAL_ATTACKS: [(&str, f64); 3] =
    [("Charge", 1.3), ("Double Strike", 1.2), ("Venom", 1.1)];
pub const SPELL_DAMAGE_SPREAD: u32 = 2;
pub const SUPPORT_SPELL_HEAL: u32 = 30;
pub const FLEE_FAIL_THRESHOLD: u32 = 40; // roll 1..=100 must exceed this

// Combat timers (frames)
pub const ACTION_DISPLAY_FRAMES: u32 = 60;
pub const ENEMY_WINDUP_FRAMES: u32 = 30; // 500ms at 60 FPS
pub const COMBAT_LOG_CAPACITY: usize = 10;
pub const COMBAT_LOG_VISIBLE: usize = 4;

// Drops
pub const SECOND_DROP_CHANCE: f64 = 0.30;

// Transition between dungeons (frames)
pub const TRANSITION_FRAMES: u32 = 180;
pub const TRANSITION_SKIP_BELOW: u32 = 120;

// HUD notices (frames)
pub const NOTICE_FRAMES: u32 = 120;
pub const DROP_NOTICE_FRAMES: u32 = 180;

// Ranking
pub const RANKING_CAPACITY: usize = 10;
pub const KILL_SCORE: f64 = 100.0;
pub const TIME_PENALTY_DIVISOR: f64 = 10.0;
pub const MAX_NAME_LENGTH: usize = 15;

// Save system
pub const RANKING_VERSION_MAGIC: u64 = 0x4259_4F4E_4452_4B00; // "BYONDRK\0"
pub const RANKING_FILENAME: &str = "ranking.dat";
pub const SETTINGS_FILENAME: &str = "settings.json";
pub const LOG_FILENAME: &str = "beyond.log";
