//! Scoring formula and the persistent top-10 table.

pub mod scoring;
pub mod store;

pub use scoring::*;
pub use store::*;
