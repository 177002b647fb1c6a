//! Best-first route search used to close the dungeon loop
//!
//! Every cell is scored once up front with its Manhattan distance to the
//! start plus its Manhattan distance to the target. Scores are never relaxed
//! while the search runs, so the frontier order depends only on geometry and
//! on insertion order among equal scores. This keeps the loop shapes stable
//! for a given seed.

use bitvec::prelude::*;

use crate::graph::cell::{Cell, Classification};

/// Find a route from `start` to `target` through empty cells
///
/// The returned route excludes `start` and ends with `target`. Only `Empty`
/// cells and the target itself are entered, so loop and entrance cells never
/// appear on a route. An empty route means the target is unreachable (or is
/// the start itself).
///
/// Overwrites the search fields of every cell in `cells`.
pub fn find_path(cells: &mut [Cell], start: usize, target: usize) -> Vec<usize> {
    if start == target || start >= cells.len() || target >= cells.len() {
        return Vec::new();
    }

    score_cells(cells, start, target);

    let mut visited = bitvec![0; cells.len()];
    let mut enqueued = bitvec![0; cells.len()];
    let mut frontier = vec![start];
    enqueued.set(start, true);
    let mut expansions = 0usize;

    while !frontier.is_empty() {
        let current = frontier.remove(0);
        if current == target {
            log::trace!("route found after {expansions} expansions");
            return reconstruct(cells, start, target);
        }

        visited.set(current, true);
        expansions += 1;

        let neighbors = cells
            .get(current)
            .map(|cell| cell.open_neighbors.clone())
            .unwrap_or_default();

        for neighbor in neighbors {
            if is_set(&visited, neighbor) || is_set(&enqueued, neighbor) {
                continue;
            }
            let Some(cell) = cells.get_mut(neighbor) else {
                continue;
            };
            if cell.classification != Classification::Empty && neighbor != target {
                continue;
            }
            cell.predecessor = Some(current);
            enqueued.set(neighbor, true);
            frontier.push(neighbor);
        }

        // Stable sort keeps insertion order among equal costs
        frontier.sort_by_key(|&index| cells.get(index).map_or(u32::MAX, |c| c.total_cost));
    }

    log::trace!("frontier exhausted after {expansions} expansions");
    Vec::new()
}

fn score_cells(cells: &mut [Cell], start: usize, target: usize) {
    let (Some(start_pos), Some(target_pos)) = (
        cells.get(start).map(Cell::position),
        cells.get(target).map(Cell::position),
    ) else {
        return;
    };

    for cell in cells.iter_mut() {
        cell.reset_search_state();
        cell.distance_from_start = cell.position().manhattan(start_pos);
        cell.distance_to_target = cell.position().manhattan(target_pos);
        cell.total_cost = cell.distance_from_start + cell.distance_to_target;
    }
}

fn is_set(bits: &BitVec, index: usize) -> bool {
    bits.get(index).as_deref() == Some(&true)
}

// Walks predecessor links back from the target; the start has none
fn reconstruct(cells: &[Cell], start: usize, target: usize) -> Vec<usize> {
    let mut route = Vec::new();
    let mut current = target;

    while current != start {
        route.push(current);
        match cells.get(current).and_then(|cell| cell.predecessor) {
            Some(previous) => current = previous,
            None => break,
        }
    }

    route.reverse();
    route
}
