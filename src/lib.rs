//! Beyond the Dungeon - terminal dungeon crawler library
//!
//! Game logic lives here so it can be tested without a terminal. The
//! ratatui front end is private to the binary.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;
pub mod ranking;
pub mod utils;
