//! Fishing system: rod catalog, species tables and fish generation.

pub mod catalog;
pub mod generation;
pub mod types;

pub use catalog::*;
pub use generation::*;
pub use types::*;
