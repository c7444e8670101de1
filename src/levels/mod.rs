//! Level table: maps cumulative points to a named tier.

pub mod data;
pub mod logic;
pub mod types;

pub use data::DEFAULT_LEVELS;
pub use logic::LevelTable;
pub use types::{LevelName, LevelThreshold};
