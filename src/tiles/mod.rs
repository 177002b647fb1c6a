//! Two-pass spatial expansion of a finished graph into tile space

/// Coarse grid with rooms on odd coordinates and doors between them
pub mod coarse;
/// Fine grid of room and door areas with door compaction
pub mod fine;

pub use coarse::{CoarseTile, CoarseTileGrid, TileKind};
pub use fine::{Area, AreaKind, CompactionReport, FineTileGrid};
