//! Integer grid coordinates shared by the graph and both tile grids

use std::fmt;
use std::ops::{Add, Sub};

/// Integer 2D coordinate
///
/// `x` grows to the right and `y` grows downwards, matching the row-major
/// rendering of every grid in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }

    /// Manhattan distance between two positions
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if `self` lies strictly above `other`
    pub const fn is_above(self, other: Self) -> bool {
        self.y < other.y
    }

    /// True if `self` lies strictly below `other`
    pub const fn is_below(self, other: Self) -> bool {
        self.y > other.y
    }

    /// True if `self` lies strictly left of `other`
    pub const fn is_left_of(self, other: Self) -> bool {
        self.x < other.x
    }

    /// True if `self` lies strictly right of `other`
    pub const fn is_right_of(self, other: Self) -> bool {
        self.x > other.x
    }

    /// Convert to `[row, col]` array indices, if both coordinates are non-negative
    pub fn to_index(self) -> Option<[usize; 2]> {
        let row = usize::try_from(self.y).ok()?;
        let col = usize::try_from(self.x).ok()?;
        Some([row, col])
    }

    /// Build a position from `(row, col)` array indices
    pub const fn from_index(row: usize, col: usize) -> Self {
        Self::new(col as i32, row as i32)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Von Neumann neighbourhood offsets in enumeration order: up, down, left, right
pub const NEIGHBOR_OFFSETS: [Position; 4] = [
    Position::new(0, -1),
    Position::new(0, 1),
    Position::new(-1, 0),
    Position::new(1, 0),
];
