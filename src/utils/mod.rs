//! Utility modules: on-disk persistence helpers.

pub mod persistence;

pub use persistence::*;
