//! Game state machine, run session, input and settings.

pub mod constants;
pub mod game;
pub mod input;
pub mod mode;
pub mod session;
pub mod settings;

pub use constants::*;
pub use game::*;
pub use input::*;
pub use mode::*;
pub use session::*;
pub use settings::*;
