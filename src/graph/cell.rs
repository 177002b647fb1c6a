//! Graph cells, their classifications, and the placeable subset

use crate::graph::position::Position;
use crate::io::error::DungeonError;

/// Semantic role of a cell in the dungeon graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    /// Unused grid position
    #[default]
    Empty,
    /// Dungeon entrance
    Entrance,
    /// Dungeon goal, hanging off the cycle end
    Goal,
    /// Plain room
    Room,
    /// First cell of the loop, joined to the entrance
    CycleEntrance,
    /// Cell on the loop
    Cycle,
    /// Loop cell the goal is attached to
    CycleEnd,
}

impl Classification {
    /// All classifications, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::Entrance,
        Self::Goal,
        Self::Room,
        Self::CycleEntrance,
        Self::Cycle,
        Self::CycleEnd,
    ];

    /// Single character used when rendering a graph
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Entrance => 'e',
            Self::Goal => 'g',
            Self::Room => 'R',
            Self::CycleEntrance => 'S',
            Self::Cycle => 'c',
            Self::CycleEnd => 'E',
        }
    }

    /// Stable name used in labeled graph exports
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Entrance => "Entrance",
            Self::Goal => "Goal",
            Self::Room => "Room",
            Self::CycleEntrance => "CycleEntrance",
            Self::Cycle => "Cycle",
            Self::CycleEnd => "CycleEnd",
        }
    }

    /// Inverse of [`Classification::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// True for `Empty`
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Classifications a caller may place directly on a cell
///
/// Loop classifications are only ever produced by the generation steps
/// themselves, so they are not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeable {
    /// Dungeon entrance
    Entrance,
    /// Dungeon goal
    Goal,
    /// Plain room
    Room,
}

impl From<Placeable> for Classification {
    fn from(placeable: Placeable) -> Self {
        match placeable {
            Placeable::Entrance => Self::Entrance,
            Placeable::Goal => Self::Goal,
            Placeable::Room => Self::Room,
        }
    }
}

impl TryFrom<Classification> for Placeable {
    type Error = DungeonError;

    fn try_from(classification: Classification) -> Result<Self, Self::Error> {
        match classification {
            Classification::Entrance => Ok(Self::Entrance),
            Classification::Goal => Ok(Self::Goal),
            Classification::Room => Ok(Self::Room),
            other => Err(DungeonError::NotPlaceable {
                classification: other,
            }),
        }
    }
}

/// A node of the grid graph
///
/// Cells live in an arena owned by [`GridGraph`](crate::graph::grid::GridGraph)
/// and refer to each other by arena index. `adjacent` holds placed connections
/// and is kept symmetric by the graph; `open_neighbors` is the static grid
/// neighbourhood fixed at construction.
#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    /// Current role of the cell
    pub classification: Classification,
    pub(crate) adjacent: Vec<usize>,
    pub(crate) open_neighbors: Vec<usize>,
    /// Manhattan distance to the start of the last search
    pub distance_from_start: u32,
    /// Manhattan distance to the target of the last search
    pub distance_to_target: u32,
    /// Sum of both distances, the frontier ordering key
    pub total_cost: u32,
    /// Cell this one was first reached from in the last search
    pub predecessor: Option<usize>,
}

impl Cell {
    /// Create an `Empty` cell
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            classification: Classification::Empty,
            adjacent: Vec::new(),
            open_neighbors: Vec::new(),
            distance_from_start: 0,
            distance_to_target: 0,
            total_cost: 0,
            predecessor: None,
        }
    }

    /// Create a cell already holding a placeable classification
    pub fn placed(position: Position, placeable: Placeable) -> Self {
        let mut cell = Self::new(position);
        cell.classification = placeable.into();
        cell
    }

    /// Grid position, fixed for the cell's lifetime
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Indices of cells joined to this one by a placed connection
    pub fn adjacent(&self) -> &[usize] {
        &self.adjacent
    }

    /// Indices of the in-bounds grid neighbours, ordered up, down, left, right
    pub fn open_neighbors(&self) -> &[usize] {
        &self.open_neighbors
    }

    /// True if a placed connection joins this cell to `index`
    pub fn is_adjacent_to(&self, index: usize) -> bool {
        self.adjacent.contains(&index)
    }

    pub(crate) fn link(&mut self, index: usize) {
        if !self.adjacent.contains(&index) {
            self.adjacent.push(index);
        }
    }

    pub(crate) fn reset_search_state(&mut self) {
        self.distance_from_start = 0;
        self.distance_to_target = 0;
        self.total_cost = 0;
        self.predecessor = None;
    }
}

/// Compare two cells by classification only
///
/// Cells are otherwise distinguished by identity (their arena index), never
/// by value.
pub fn same_kind(a: &Cell, b: &Cell) -> bool {
    a.classification == b.classification
}
