//! Dungeon layout, rosters and the encounter/progression controller.

pub mod collision;
pub mod data;
pub mod progression;

pub use collision::*;
pub use data::*;
pub use progression::*;
