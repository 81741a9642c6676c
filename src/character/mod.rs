//! Combatants: shared character model and the player.

pub mod player;
pub mod types;

pub use player::*;
pub use types::*;
