//! Turn-based combat: rolls, the phase state machine and its log.

pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use math::*;
pub use types::*;
