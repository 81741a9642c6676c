use crate::core::constants::{KILL_SCORE, TIME_PENALTY_DIVISOR};
use crate::core::settings::Difficulty;

/// `kills * 100 - (seconds / 10) * multiplier`, truncated and floored at zero.
/// Harder difficulties are penalized more per second played.
pub fn calculate_score(enemies_killed: u32, elapsed_seconds: f64, difficulty: Difficulty) -> u64 {
    let raw = enemies_killed as f64 * KILL_SCORE
        - (elapsed_seconds / TIME_PENALTY_DIVISOR) * difficulty.score_multiplier();
    raw.max(0.0) as u64
}

/// Formats a duration as `MM:SS`. Minutes keep growing past 99.
pub fn format_elapsed(elapsed_seconds: f64) -> String {
    let total = elapsed_seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
