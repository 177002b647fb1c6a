//! Fine tile grid: each coarse tile expanded into a square block of tiles
//!
//! Every non-empty coarse tile becomes a `FINE_SCALE x FINE_SCALE` block and
//! an [`Area`] owning that block. Areas are linked whenever their coarse tiles
//! are neighbours. Door compaction then shrinks each door block to its center
//! tile and hands the freed tiles to the rooms on either side of it.

use std::collections::HashMap;
use std::fmt;

use ndarray::Array2;

use crate::graph::position::Position;
use crate::io::configuration::FINE_SCALE;
use crate::tiles::coarse::{CoarseTileGrid, TileKind, render_kinds};

/// What an area models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// A room block
    Room,
    /// A door block between two rooms
    Door,
}

/// Tiles expanded from a single coarse tile
#[derive(Debug, Clone)]
pub struct Area {
    kind: AreaKind,
    center: Position,
    source: Position,
    tiles: Vec<Position>,
    connections: Vec<usize>,
}

impl Area {
    /// Room or door
    pub const fn kind(&self) -> AreaKind {
        self.kind
    }

    /// Middle tile of the original block, in fine space
    pub const fn center(&self) -> Position {
        self.center
    }

    /// Coarse tile this area was expanded from
    pub const fn source(&self) -> Position {
        self.source
    }

    /// Fine tiles owned by this area
    pub fn tiles(&self) -> &[Position] {
        &self.tiles
    }

    /// Indices of connected areas
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }
}

/// Direction of a tile relative to a door center, in reassignment priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Above,
    Below,
    Left,
    Right,
}

impl Direction {
    const ORDER: [Self; 4] = [Self::Above, Self::Below, Self::Left, Self::Right];

    const fn holds(self, position: Position, center: Position) -> bool {
        match self {
            Self::Above => position.is_above(center),
            Self::Below => position.is_below(center),
            Self::Left => position.is_left_of(center),
            Self::Right => position.is_right_of(center),
        }
    }
}

/// Outcome of a door compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Door tiles removed from their door area
    pub freed: usize,
    /// Freed tiles handed to a neighbouring room
    pub reassigned: usize,
}

impl CompactionReport {
    /// Freed tiles left empty
    pub const fn emptied(&self) -> usize {
        self.freed - self.reassigned
    }
}

/// Fine tile grid with its areas
#[derive(Debug, Clone)]
pub struct FineTileGrid {
    kinds: Array2<TileKind>,
    areas: Vec<Area>,
}

impl FineTileGrid {
    /// Expand `coarse`, link areas, and compact doors
    pub fn new(coarse: &CoarseTileGrid) -> Self {
        let mut grid = Self::expand(coarse);
        let report = grid.compact_doors();
        log::debug!(
            "door compaction freed {} tiles, reassigned {}",
            report.freed,
            report.reassigned
        );
        grid
    }

    /// Expand `coarse` and link areas without compacting doors
    pub fn expand(coarse: &CoarseTileGrid) -> Self {
        let width = coarse.width() * FINE_SCALE;
        let height = coarse.height() * FINE_SCALE;
        let mut grid = Self {
            kinds: Array2::from_elem((height, width), TileKind::Empty),
            areas: Vec::new(),
        };

        let mut by_source = HashMap::new();
        for tile in coarse.tiles() {
            let kind = match tile.kind {
                TileKind::Empty => continue,
                TileKind::Room => AreaKind::Room,
                TileKind::Door => AreaKind::Door,
            };
            by_source.insert(tile.position, grid.areas.len());
            let area = grid.fill_block(tile.position, kind);
            grid.areas.push(area);
        }

        for index in 0..grid.areas.len() {
            let Some(source) = grid.areas.get(index).map(Area::source) else {
                continue;
            };
            for neighbor in coarse.neighbors(source) {
                if let Some(&other) = by_source.get(&neighbor.position) {
                    grid.link(index, other);
                }
            }
        }

        log::debug!(
            "fine grid {width}x{height} with {} areas",
            grid.areas.len()
        );
        grid
    }

    /// Shrink every door area to its center tile
    ///
    /// Freed tiles go to the first connected room lying in the same direction
    /// from the door center as the tile, checking above, below, left, then
    /// right. Tiles with no matching room stay empty. Running the pass again
    /// frees nothing.
    pub fn compact_doors(&mut self) -> CompactionReport {
        let mut report = CompactionReport::default();

        for door in 0..self.areas.len() {
            let Some(area) = self.areas.get_mut(door) else {
                continue;
            };
            if area.kind != AreaKind::Door {
                continue;
            }
            let center = area.center;
            let freed: Vec<Position> = area
                .tiles
                .iter()
                .copied()
                .filter(|&position| position != center)
                .collect();
            area.tiles.retain(|&position| position == center);
            let connections = area.connections.clone();

            for &position in &freed {
                self.set(position, TileKind::Empty);
            }

            let targets = Direction::ORDER.map(|direction| {
                connections.iter().copied().find(|&other| {
                    self.areas.get(other).is_some_and(|room| {
                        room.kind == AreaKind::Room && direction.holds(room.center, center)
                    })
                })
            });

            for &position in &freed {
                let owner = Direction::ORDER
                    .iter()
                    .zip(targets)
                    .find_map(|(direction, target)| {
                        target.filter(|_| direction.holds(position, center))
                    });
                let Some(room) = owner.and_then(|index| self.areas.get_mut(index)) else {
                    continue;
                };
                room.tiles.push(position);
                self.set(position, TileKind::Room);
                report.reassigned += 1;
            }

            report.freed += freed.len();
        }

        report
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.kinds.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.kinds.nrows()
    }

    /// All areas, in coarse row-major order of their source tiles
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Area by index
    pub fn area(&self, index: usize) -> Option<&Area> {
        self.areas.get(index)
    }

    /// Tile kind at `position`, if in bounds
    pub fn tile_at(&self, position: Position) -> Option<TileKind> {
        self.kinds.get(position.to_index()?).copied()
    }

    /// Number of tiles of `kind`
    pub fn count_of(&self, kind: TileKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    /// Render one glyph per tile, one line per row
    pub fn render(&self) -> String {
        render_kinds(&self.kinds)
    }

    fn fill_block(&mut self, source: Position, kind: AreaKind) -> Area {
        let scale = FINE_SCALE as i32;
        let origin = Position::new(source.x * scale, source.y * scale);
        let tile_kind = match kind {
            AreaKind::Room => TileKind::Room,
            AreaKind::Door => TileKind::Door,
        };

        let mut tiles = Vec::with_capacity(FINE_SCALE * FINE_SCALE);
        for dy in 0..scale {
            for dx in 0..scale {
                let position = origin + Position::new(dx, dy);
                self.set(position, tile_kind);
                tiles.push(position);
            }
        }

        Area {
            kind,
            center: origin + Position::new(scale / 2, scale / 2),
            source,
            tiles,
            connections: Vec::new(),
        }
    }

    fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        if let Some(area) = self.areas.get_mut(a) {
            if !area.connections.contains(&b) {
                area.connections.push(b);
            }
        }
        if let Some(area) = self.areas.get_mut(b) {
            if !area.connections.contains(&a) {
                area.connections.push(a);
            }
        }
    }

    fn set(&mut self, position: Position, kind: TileKind) {
        if let Some(slot) = position.to_index().and_then(|index| self.kinds.get_mut(index)) {
            *slot = kind;
        }
    }
}

impl fmt::Display for FineTileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
