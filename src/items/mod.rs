//! Item system: types, inventory, catalog, and drops.

pub mod catalog;
pub mod drops;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use inventory::*;
pub use types::*;
