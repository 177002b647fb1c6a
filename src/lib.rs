//! Cyclic dungeon layout generation on a grid graph
//!
//! A dungeon starts as a grid of cells. An entrance is placed, a loop is
//! carved through the grid starting next to it, and a goal is hung off the
//! loop. The graph is then expanded twice: into a coarse tile grid with doors
//! between connected cells, and into a fine tile grid of room and door areas
//! whose doors are compacted to single tiles.

#![forbid(unsafe_code)]

/// Grid graph, cells, and the loop-carving generation steps
pub mod graph;
/// Input/output operations, configuration, and error handling
pub mod io;
/// End-to-end generation pipeline
pub mod pipeline;
/// Coarse and fine tile grids derived from a generated graph
pub mod tiles;

pub use io::error::{DungeonError, Result};
