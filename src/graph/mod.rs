//! Grid graph generation: cells, placement steps, and loop search

/// Graph cells, classifications, and placeable kinds
pub mod cell;
/// Labeled node/edge export for persistence
pub mod export;
/// Grid graph and generation steps
pub mod grid;
/// Integer grid coordinates
pub mod position;
/// Route search used to close the loop
pub mod search;

pub use cell::{Cell, Classification, Placeable, same_kind};
pub use grid::GridGraph;
pub use position::Position;
