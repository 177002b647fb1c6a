//! Grid graph ownership and the dungeon generation steps
//!
//! The graph owns a fixed `width x height` arena of cells. Each cell's static
//! 4-neighbourhood is computed once at construction; placed connections are
//! added as generation proceeds. Generation runs in this order:
//!
//! 1. [`GridGraph::place_entrance`]
//! 2. [`GridGraph::place_cycle_entrance`]
//! 3. [`GridGraph::carve_cycle_path`] (random walk, then closure by search)
//! 4. [`GridGraph::place_goal`]
//!
//! All stochastic choices draw from the single random source owned by the
//! graph, so a seeded graph always generates the same layout.

use std::fmt;

use bitvec::prelude::*;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::graph::cell::{Cell, Classification, Placeable};
use crate::graph::position::{NEIGHBOR_OFFSETS, Position};
use crate::graph::search::find_path;
use crate::io::error::{DungeonError, Result, invalid_parameter};

/// Fixed-size grid of cells with placed connections between them
pub struct GridGraph {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    // Arena index for each [row, col]
    index: Array2<usize>,
    rng: StdRng,
    seed: Option<u64>,
}

impl GridGraph {
    /// Create a graph whose random source is seeded from the operating system
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    /// Create a graph with a deterministic random source
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        let mut graph = Self::with_rng(width, height, StdRng::seed_from_u64(seed));
        graph.seed = Some(seed);
        graph
    }

    /// Create a graph around an existing random source
    pub fn with_rng(width: usize, height: usize, rng: StdRng) -> Self {
        let index = Array2::from_shape_fn((height, width), |(row, col)| row * width + col);
        let mut cells: Vec<Cell> = (0..height)
            .flat_map(|row| (0..width).map(move |col| Cell::new(Position::from_index(row, col))))
            .collect();

        for cell in &mut cells {
            let position = cell.position();
            cell.open_neighbors = NEIGHBOR_OFFSETS
                .iter()
                .filter_map(|&offset| {
                    let [row, col] = (position + offset).to_index()?;
                    index.get([row, col]).copied()
                })
                .collect();
        }

        Self {
            width,
            height,
            cells,
            index,
            rng,
            seed: None,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the grid has no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Seed of the random source, if the graph was built with one
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Arena index of the cell at `position`
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.index.get(position.to_index()?).copied()
    }

    /// Cell at `position`, if in bounds
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.index_of(position).and_then(|index| self.cells.get(index))
    }

    /// Cell at `position`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn cell_at(&self, position: Position) -> Result<&Cell> {
        self.get(position)
            .ok_or(DungeonError::OutOfBounds { position })
    }

    /// Cell by arena index
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True if a placed connection joins the cells at `a` and `b`
    pub fn are_connected(&self, a: Position, b: Position) -> bool {
        match (self.get(a), self.index_of(b)) {
            (Some(cell), Some(other)) => cell.is_adjacent_to(other),
            _ => false,
        }
    }

    /// Add a placed connection between two grid-adjacent cells
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for positions outside the grid, and
    /// `InvalidState` if the cells are not open neighbours
    pub fn connect_at(&mut self, a: Position, b: Position) -> Result<()> {
        let first = self
            .index_of(a)
            .ok_or(DungeonError::OutOfBounds { position: a })?;
        let second = self
            .index_of(b)
            .ok_or(DungeonError::OutOfBounds { position: b })?;
        let neighbors = self
            .cells
            .get(first)
            .is_some_and(|cell| cell.open_neighbors.contains(&second));
        if !neighbors {
            return Err(DungeonError::InvalidState {
                reason: "only grid neighbors can be connected",
            });
        }
        self.connect(first, second);
        Ok(())
    }

    /// First cell in row-major order holding `classification`
    pub fn first_of(&self, classification: Classification) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.classification == classification)
    }

    /// Every cell holding `classification`, in row-major order
    pub fn all_of(&self, classification: Classification) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.classification == classification)
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of cells holding `classification`
    pub fn count_of(&self, classification: Classification) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.classification == classification)
            .count()
    }

    /// Mark a random cell as the dungeon entrance
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the grid is empty or already has an entrance
    pub fn place_entrance(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(DungeonError::InvalidState {
                reason: "grid has no cells",
            });
        }
        self.ensure_no_entrance()?;

        let x = self.rng.random_range(0..self.width);
        let y = self.rng.random_range(0..self.height);
        let position = Position::from_index(y, x);
        log::debug!("entrance placed at {position}");
        self.classify_at(position, Classification::Entrance)
    }

    /// Place a classification on a specific empty cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for positions outside the grid, and
    /// `InvalidState` if the cell is not empty or a second entrance would be
    /// created
    pub fn place_at(&mut self, position: Position, placeable: Placeable) -> Result<()> {
        let cell = self.cell_at(position)?;
        if !cell.classification.is_empty() {
            return Err(DungeonError::InvalidState {
                reason: "cell is already classified",
            });
        }
        if placeable == Placeable::Entrance {
            self.ensure_no_entrance()?;
        }
        self.classify_at(position, placeable.into())
    }

    /// Mark a random empty neighbour of the entrance as the cycle entrance
    ///
    /// # Errors
    ///
    /// Returns `MissingEntrance` without an entrance, and `InvalidState` if a
    /// cycle entrance already exists or the entrance has no empty neighbour
    pub fn place_cycle_entrance(&mut self) -> Result<()> {
        let entrance = self
            .first_of(Classification::Entrance)
            .ok_or(DungeonError::MissingEntrance)?;
        self.ensure_no_cycle_entrance()?;

        let candidates = self.empty_neighbors(entrance);
        if candidates.is_empty() {
            return Err(DungeonError::InvalidState {
                reason: "entrance has no empty neighbor",
            });
        }
        let pick = self.rng.random_range(0..candidates.len());
        let chosen = candidates
            .get(pick)
            .copied()
            .ok_or(DungeonError::InvalidState {
                reason: "entrance has no empty neighbor",
            })?;
        self.mark_cycle_entrance(entrance, chosen);
        Ok(())
    }

    /// Mark a specific neighbour of the entrance as the cycle entrance
    ///
    /// # Errors
    ///
    /// Returns `MissingEntrance` without an entrance, `OutOfBounds` for
    /// positions outside the grid, and `InvalidState` if the position is not
    /// an empty open neighbour of the entrance or a cycle entrance exists
    pub fn place_cycle_entrance_at(&mut self, position: Position) -> Result<()> {
        let entrance = self
            .first_of(Classification::Entrance)
            .ok_or(DungeonError::MissingEntrance)?;
        self.ensure_no_cycle_entrance()?;

        let chosen = self
            .index_of(position)
            .ok_or(DungeonError::OutOfBounds { position })?;
        if !self.empty_neighbors(entrance).contains(&chosen) {
            return Err(DungeonError::InvalidState {
                reason: "cycle entrance must be an empty neighbor of the entrance",
            });
        }
        self.mark_cycle_entrance(entrance, chosen);
        Ok(())
    }

    /// Carve the dungeon loop starting and ending at the cycle entrance
    ///
    /// Runs [`GridGraph::random_walk`] for exactly `max_steps` steps and then
    /// [`GridGraph::close_cycle`] from the walk's final cell.
    ///
    /// # Errors
    ///
    /// Returns `MissingCycleEntrance`, `InvalidParameter` for a zero step
    /// count, `GenerationStuck` if the walk hits a dead end, or `NoPath` if
    /// the loop cannot be closed
    pub fn carve_cycle_path(&mut self, max_steps: usize) -> Result<()> {
        let last = self.random_walk(max_steps)?;
        log::debug!("graph before closing the cycle:\n{self}");
        self.close_cycle(last)
    }

    /// Greedy walk away from the cycle entrance, returning the final cell
    ///
    /// Each step moves to the empty open neighbour furthest (Euclidean) from
    /// the cycle entrance. Ties go to the first neighbour in up, down, left,
    /// right order. Every visited cell becomes `Cycle` and is connected to the
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns `MissingCycleEntrance`, `InvalidParameter` for a zero step
    /// count, or `GenerationStuck` if the walker has no empty neighbour
    pub fn random_walk(&mut self, max_steps: usize) -> Result<usize> {
        let origin = self
            .first_of(Classification::CycleEntrance)
            .ok_or(DungeonError::MissingCycleEntrance)?;
        if max_steps == 0 {
            return Err(invalid_parameter(
                "max_steps",
                &max_steps,
                &"the walk needs at least one step",
            ));
        }

        let origin_position = self.position_of(origin)?;
        let mut last = origin;
        for step in 0..max_steps {
            let next = self
                .furthest_empty_neighbor(last, origin_position)
                .ok_or_else(|| DungeonError::GenerationStuck {
                    position: self.position_of(last).unwrap_or_default(),
                    step,
                })?;
            self.classify(next, Classification::Cycle);
            self.connect(next, last);
            last = next;
        }

        log::debug!(
            "walked {max_steps} steps to {}",
            self.position_of(last).unwrap_or_default()
        );
        Ok(last)
    }

    /// Close the loop from `from` back to the cycle entrance
    ///
    /// Every cell on the found route except the cycle entrance becomes
    /// `Cycle`, and the route is chained with placed connections from `from`
    /// to the cycle entrance.
    ///
    /// # Errors
    ///
    /// Returns `MissingCycleEntrance`, `InvalidState` for an index outside
    /// the arena, or `NoPath` if no route exists
    pub fn close_cycle(&mut self, from: usize) -> Result<()> {
        let target = self
            .first_of(Classification::CycleEntrance)
            .ok_or(DungeonError::MissingCycleEntrance)?;
        let from_position = self.position_of(from)?;

        let route = find_path(&mut self.cells, from, target);
        if route.is_empty() {
            return Err(DungeonError::NoPath {
                from: from_position,
                to: self.position_of(target)?,
            });
        }

        let mut previous = from;
        for &index in &route {
            if index != target {
                self.classify(index, Classification::Cycle);
            }
            self.connect(previous, index);
            previous = index;
        }

        log::debug!("closed cycle with {} route cells", route.len());
        Ok(())
    }

    /// Route from `from` to `to` through empty cells, excluding `from`
    ///
    /// Uses the same search as loop closure without changing any
    /// classification or connection. An empty route means `to` is
    /// unreachable or equal to `from`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for positions outside the grid
    pub fn find_route(&mut self, from: Position, to: Position) -> Result<Vec<Position>> {
        let start = self
            .index_of(from)
            .ok_or(DungeonError::OutOfBounds { position: from })?;
        let target = self
            .index_of(to)
            .ok_or(DungeonError::OutOfBounds { position: to })?;

        let route = find_path(&mut self.cells, start, target);
        route.into_iter().map(|index| self.position_of(index)).collect()
    }

    /// Turn one loop cell into the cycle end and attach the goal to it
    ///
    /// Candidates are drawn uniformly from the remaining `Cycle` cells. A
    /// candidate next to the cycle entrance, or without an empty open
    /// neighbour, is discarded from the pool.
    ///
    /// # Errors
    ///
    /// Returns `NoValidCycleCell` once every candidate has been discarded
    pub fn place_goal(&mut self) -> Result<()> {
        let cycle_entrance = self.first_of(Classification::CycleEntrance);
        let mut pool = self.all_of(Classification::Cycle);

        while !pool.is_empty() {
            let candidate = pool.remove(self.rng.random_range(0..pool.len()));

            let touches_cycle_entrance = cycle_entrance.is_some_and(|entrance| {
                self.cells
                    .get(candidate)
                    .is_some_and(|cell| cell.open_neighbors.contains(&entrance))
            });
            if touches_cycle_entrance {
                continue;
            }

            let free = self.empty_neighbors(candidate);
            if free.is_empty() {
                log::trace!("cycle cell {candidate} has no empty neighbor");
                continue;
            }
            let Some(&goal) = free.get(self.rng.random_range(0..free.len())) else {
                continue;
            };

            self.classify(candidate, Classification::CycleEnd);
            self.classify(goal, Classification::Goal);
            self.connect(candidate, goal);
            log::debug!("goal placed at {}", self.position_of(goal)?);
            return Ok(());
        }

        Err(DungeonError::NoValidCycleCell)
    }

    /// Follow the loop from the cycle entrance back to itself
    ///
    /// Returns the loop cells in walk order starting with the cycle entrance,
    /// or `None` if the loop is missing, open, or revisits a cell.
    pub fn trace_cycle(&self) -> Option<Vec<usize>> {
        let start = self.first_of(Classification::CycleEntrance)?;
        let on_loop = |index: usize| {
            self.cells.get(index).is_some_and(|cell| {
                matches!(
                    cell.classification,
                    Classification::Cycle | Classification::CycleEnd
                )
            })
        };

        let mut seen = bitvec![0; self.cells.len()];
        seen.set(start, true);
        let mut route = vec![start];
        let mut previous = start;
        let mut current = self
            .cells
            .get(start)?
            .adjacent
            .iter()
            .copied()
            .find(|&index| on_loop(index))?;

        loop {
            if seen.get(current).as_deref() == Some(&true) {
                return None;
            }
            seen.set(current, true);
            route.push(current);

            let next = self
                .cells
                .get(current)?
                .adjacent
                .iter()
                .copied()
                .find(|&index| index != previous && (index == start || on_loop(index)))?;
            if next == start {
                return Some(route);
            }
            previous = current;
            current = next;
        }
    }

    /// Render one glyph per cell, one line per row
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.index.rows() {
            for &index in row {
                let glyph = self
                    .cells
                    .get(index)
                    .map_or(' ', |cell| cell.classification.glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    pub(crate) fn connect(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        if let Some(cell) = self.cells.get_mut(a) {
            cell.link(b);
        }
        if let Some(cell) = self.cells.get_mut(b) {
            cell.link(a);
        }
    }

    fn classify(&mut self, index: usize, classification: Classification) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.classification = classification;
        }
    }

    fn classify_at(&mut self, position: Position, classification: Classification) -> Result<()> {
        let index = self
            .index_of(position)
            .ok_or(DungeonError::OutOfBounds { position })?;
        self.classify(index, classification);
        Ok(())
    }

    fn position_of(&self, index: usize) -> Result<Position> {
        self.cells
            .get(index)
            .map(Cell::position)
            .ok_or(DungeonError::InvalidState {
                reason: "cell index outside the grid",
            })
    }

    fn empty_neighbors(&self, index: usize) -> Vec<usize> {
        self.cells
            .get(index)
            .map(|cell| {
                cell.open_neighbors
                    .iter()
                    .copied()
                    .filter(|&n| {
                        self.cells
                            .get(n)
                            .is_some_and(|other| other.classification.is_empty())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn furthest_empty_neighbor(&self, from: usize, origin: Position) -> Option<usize> {
        let mut furthest: Option<(usize, f64)> = None;
        for candidate in self.empty_neighbors(from) {
            let Some(cell) = self.cells.get(candidate) else {
                continue;
            };
            let distance = origin.distance(cell.position());
            if furthest.is_none_or(|(_, best)| distance > best) {
                furthest = Some((candidate, distance));
            }
        }
        furthest.map(|(index, _)| index)
    }

    fn mark_cycle_entrance(&mut self, entrance: usize, chosen: usize) {
        self.classify(chosen, Classification::CycleEntrance);
        self.connect(entrance, chosen);
        log::debug!(
            "cycle entrance placed at {}",
            self.position_of(chosen).unwrap_or_default()
        );
    }

    fn ensure_no_entrance(&self) -> Result<()> {
        if self.first_of(Classification::Entrance).is_some() {
            return Err(DungeonError::InvalidState {
                reason: "graph already has an entrance",
            });
        }
        Ok(())
    }

    fn ensure_no_cycle_entrance(&self) -> Result<()> {
        if self.first_of(Classification::CycleEntrance).is_some() {
            return Err(DungeonError::InvalidState {
                reason: "graph already has a cycle entrance",
            });
        }
        Ok(())
    }
}

impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridGraph")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
