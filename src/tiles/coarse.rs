//! Coarse tile grid: graph cells on odd coordinates, doors between them
//!
//! A `W x H` graph becomes a `(2W+1) x (2H+1)` tile grid. The cell at
//! `(x, y)` lands on `(2x+1, 2y+1)`, and a door is written on the even
//! coordinate between two cells only when a placed connection joins them.

use std::fmt;

use ndarray::Array2;

use crate::graph::cell::Classification;
use crate::graph::grid::GridGraph;
use crate::graph::position::{NEIGHBOR_OFFSETS, Position};
use crate::io::configuration::COARSE_SCALE;

/// Kind of a coarse or fine tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    /// Nothing here
    #[default]
    Empty,
    /// Part of a room
    Room,
    /// Part of a door
    Door,
}

impl TileKind {
    /// Single character used when rendering tile grids
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Room => 'X',
            Self::Door => 'D',
        }
    }
}

impl From<Classification> for TileKind {
    fn from(classification: Classification) -> Self {
        if classification.is_empty() {
            Self::Empty
        } else {
            Self::Room
        }
    }
}

/// A tile of the coarse grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoarseTile {
    /// Position in coarse space
    pub position: Position,
    /// What the tile holds
    pub kind: TileKind,
}

/// Coarse tile grid derived from a finished graph
#[derive(Debug, Clone)]
pub struct CoarseTileGrid {
    kinds: Array2<TileKind>,
}

impl CoarseTileGrid {
    /// Lay out `graph` on a coarse grid, adding doors for placed connections
    pub fn new(graph: &GridGraph) -> Self {
        let width = graph.width() * COARSE_SCALE + 1;
        let height = graph.height() * COARSE_SCALE + 1;
        let mut grid = Self {
            kinds: Array2::from_elem((height, width), TileKind::Empty),
        };

        for cell in graph.cells() {
            let position = cell.position();
            let tile = to_coarse(position);
            grid.set(tile, cell.classification.into());

            let right = position + Position::new(1, 0);
            if graph.are_connected(position, right) {
                grid.set(tile + Position::new(1, 0), TileKind::Door);
            }
            let below = position + Position::new(0, 1);
            if graph.are_connected(position, below) {
                grid.set(tile + Position::new(0, 1), TileKind::Door);
            }
        }

        log::debug!(
            "coarse grid {}x{}: {} rooms, {} doors",
            grid.width(),
            grid.height(),
            grid.count_of(TileKind::Room),
            grid.count_of(TileKind::Door)
        );
        grid
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.kinds.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.kinds.nrows()
    }

    /// Tile at `position`, if in bounds
    pub fn tile_at(&self, position: Position) -> Option<CoarseTile> {
        let kind = self.kinds.get(position.to_index()?).copied()?;
        Some(CoarseTile { position, kind })
    }

    /// Every tile in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = CoarseTile> + '_ {
        self.kinds
            .indexed_iter()
            .map(|((row, col), &kind)| CoarseTile {
                position: Position::from_index(row, col),
                kind,
            })
    }

    /// Non-empty tiles around `position`, ordered up, down, left, right
    pub fn neighbors(&self, position: Position) -> Vec<CoarseTile> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&offset| self.tile_at(position + offset))
            .filter(|tile| tile.kind != TileKind::Empty)
            .collect()
    }

    /// Number of tiles of `kind`
    pub fn count_of(&self, kind: TileKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    /// Render one glyph per tile, one line per row
    pub fn render(&self) -> String {
        render_kinds(&self.kinds)
    }

    fn set(&mut self, position: Position, kind: TileKind) {
        if let Some(slot) = position.to_index().and_then(|index| self.kinds.get_mut(index)) {
            *slot = kind;
        }
    }
}

impl fmt::Display for CoarseTileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Coarse position of the graph cell at `position`
pub const fn to_coarse(position: Position) -> Position {
    let scale = COARSE_SCALE as i32;
    Position::new(position.x * scale + 1, position.y * scale + 1)
}

pub(crate) fn render_kinds(kinds: &Array2<TileKind>) -> String {
    let mut out = String::with_capacity((kinds.ncols() + 1) * kinds.nrows());
    for row in kinds.rows() {
        out.extend(row.iter().map(|kind| kind.glyph()));
        out.push('\n');
    }
    out
}
