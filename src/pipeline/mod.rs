//! Generation pipeline orchestration

/// Configuration, generator, and the generated dungeon layers
pub mod generator;

pub use generator::{Dungeon, DungeonConfig, DungeonGenerator};
