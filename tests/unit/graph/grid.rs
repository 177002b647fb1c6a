//! Tests for grid graph construction and the generation steps

#[cfg(test)]
mod tests {
    use cyclegrid::DungeonError;
    use cyclegrid::graph::cell::{Cell, Classification, Placeable};
    use cyclegrid::graph::grid::GridGraph;
    use cyclegrid::graph::position::Position;

    fn positions(graph: &GridGraph, indices: &[usize]) -> Vec<Position> {
        indices
            .iter()
            .filter_map(|&index| graph.cell(index).map(Cell::position))
            .collect()
    }

    #[test]
    fn test_construction_lays_out_cells_row_major() {
        let graph = GridGraph::with_seed(4, 3, 0);

        assert_eq!((graph.width(), graph.height(), graph.len()), (4, 3, 12));
        assert_eq!(graph.seed(), Some(0));
        assert_eq!(graph.index_of(Position::new(1, 2)), Some(9));
        assert_eq!(graph.index_of(Position::new(4, 0)), None);
        assert!(
            graph
                .cells()
                .iter()
                .all(|cell| cell.classification.is_empty() && cell.adjacent().is_empty())
        );
    }

    // Corner cells have two grid neighbours, edge cells three
    #[test]
    fn test_open_neighbor_counts() {
        let graph = GridGraph::with_seed(3, 3, 0);
        let count = |x, y| {
            graph
                .get(Position::new(x, y))
                .map_or(0, |cell| cell.open_neighbors().len())
        };

        assert_eq!(count(0, 0), 2);
        assert_eq!(count(1, 0), 3);
        assert_eq!(count(1, 1), 4);
    }

    #[test]
    fn test_cell_at_reports_out_of_bounds() {
        let graph = GridGraph::with_seed(2, 2, 0);

        assert!(graph.cell_at(Position::new(1, 1)).is_ok());
        assert!(matches!(
            graph.cell_at(Position::new(2, 0)),
            Err(DungeonError::OutOfBounds { position }) if position == Position::new(2, 0)
        ));
    }

    #[test]
    fn test_connect_at_only_joins_grid_neighbors() {
        let mut graph = GridGraph::with_seed(3, 3, 0);

        assert!(graph.connect_at(Position::new(0, 0), Position::new(1, 0)).is_ok());
        assert!(graph.are_connected(Position::new(0, 0), Position::new(1, 0)));
        assert!(graph.are_connected(Position::new(1, 0), Position::new(0, 0)));

        assert!(matches!(
            graph.connect_at(Position::new(0, 0), Position::new(1, 1)),
            Err(DungeonError::InvalidState { .. })
        ));
        assert!(matches!(
            graph.connect_at(Position::new(0, 0), Position::new(-1, 0)),
            Err(DungeonError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_place_at_requires_empty_cell() {
        let mut graph = GridGraph::with_seed(3, 3, 0);

        assert!(graph.place_at(Position::new(2, 2), Placeable::Room).is_ok());
        assert!(matches!(
            graph.place_at(Position::new(2, 2), Placeable::Goal),
            Err(DungeonError::InvalidState { .. })
        ));
        assert_eq!(graph.count_of(Classification::Room), 1);
        assert_eq!(graph.count_of(Classification::Goal), 0);
    }

    #[test]
    fn test_seeded_entrance_is_reproducible() {
        let mut first = GridGraph::with_seed(9, 7, 1234);
        let mut second = GridGraph::with_seed(9, 7, 1234);
        assert!(first.place_entrance().is_ok());
        assert!(second.place_entrance().is_ok());

        assert_eq!(first.count_of(Classification::Entrance), 1);
        assert_eq!(
            first.first_of(Classification::Entrance),
            second.first_of(Classification::Entrance)
        );
    }

    #[test]
    fn test_cycle_entrance_is_connected_neighbor_of_entrance() {
        let mut graph = GridGraph::with_seed(5, 5, 77);
        assert!(graph.place_at(Position::new(2, 2), Placeable::Entrance).is_ok());
        assert!(graph.place_cycle_entrance().is_ok());

        let (Some(entrance), Some(cycle_entrance)) = (
            graph.first_of(Classification::Entrance),
            graph.first_of(Classification::CycleEntrance),
        ) else {
            unreachable!("both markers should be placed");
        };
        assert!(
            graph
                .cell(entrance)
                .is_some_and(|cell| cell.open_neighbors().contains(&cycle_entrance)
                    && cell.is_adjacent_to(cycle_entrance))
        );
        assert!(matches!(
            graph.place_cycle_entrance(),
            Err(DungeonError::InvalidState { .. })
        ));
    }

    // A single-cell grid leaves the entrance without any neighbour
    #[test]
    fn test_cycle_entrance_needs_an_empty_neighbor() {
        let mut graph = GridGraph::with_seed(1, 1, 0);
        assert!(graph.place_entrance().is_ok());

        assert!(matches!(
            graph.place_cycle_entrance(),
            Err(DungeonError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_cycle_entrance_at_rejects_distant_cell() {
        let mut graph = GridGraph::with_seed(4, 4, 0);
        assert!(graph.place_at(Position::new(0, 0), Placeable::Entrance).is_ok());

        assert!(matches!(
            graph.place_cycle_entrance_at(Position::new(2, 2)),
            Err(DungeonError::InvalidState { .. })
        ));
        assert!(graph.place_cycle_entrance_at(Position::new(0, 1)).is_ok());
        assert!(graph.are_connected(Position::new(0, 0), Position::new(0, 1)));
    }

    #[test]
    fn test_zero_step_walk_is_rejected() {
        let mut graph = GridGraph::with_seed(3, 3, 0);
        assert!(graph.place_at(Position::new(1, 1), Placeable::Entrance).is_ok());
        assert!(graph.place_cycle_entrance_at(Position::new(1, 0)).is_ok());

        assert!(matches!(
            graph.random_walk(0),
            Err(DungeonError::InvalidParameter { parameter: "max_steps", .. })
        ));
    }

    // From (1, 0) both side cells are equally far; the left one comes first
    #[test]
    fn test_walk_breaks_ties_in_neighbor_order() {
        let mut graph = GridGraph::with_seed(3, 3, 5);
        assert!(graph.place_at(Position::new(1, 1), Placeable::Entrance).is_ok());
        assert!(graph.place_cycle_entrance_at(Position::new(1, 0)).is_ok());

        let Ok(last) = graph.random_walk(2) else {
            unreachable!("walk on an open grid cannot get stuck");
        };
        assert_eq!(positions(&graph, &[last]), vec![Position::new(0, 1)]);
        assert_eq!(
            positions(&graph, &graph.all_of(Classification::Cycle)),
            vec![Position::new(0, 0), Position::new(0, 1)]
        );
        assert!(graph.trace_cycle().is_none());
    }

    #[test]
    fn test_full_generation_closes_single_loop() {
        let mut graph = GridGraph::with_seed(3, 3, 5);
        assert!(graph.place_at(Position::new(1, 1), Placeable::Entrance).is_ok());
        assert!(graph.place_cycle_entrance_at(Position::new(1, 0)).is_ok());
        assert!(graph.carve_cycle_path(2).is_ok());

        let Some(cycle) = graph.trace_cycle() else {
            unreachable!("loop should be closed");
        };
        assert_eq!(
            positions(&graph, &cycle),
            vec![
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(2, 0),
            ]
        );
        assert_eq!(graph.render(), "cSc\ncec\nccc\n");
        assert_eq!(graph.to_string(), graph.render());
    }

    // Connections are always recorded on both endpoints
    #[test]
    fn test_connections_stay_symmetric_after_generation() {
        let mut graph = GridGraph::with_seed(6, 6, 3);
        assert!(graph.place_at(Position::new(3, 3), Placeable::Entrance).is_ok());
        assert!(graph.place_cycle_entrance_at(Position::new(3, 2)).is_ok());
        assert!(graph.carve_cycle_path(3).is_ok());

        for (index, cell) in graph.cells().iter().enumerate() {
            for &other in cell.adjacent() {
                assert!(graph.cell(other).is_some_and(|c| c.is_adjacent_to(index)));
                assert!(cell.open_neighbors().contains(&other));
            }
        }
    }

    #[test]
    fn test_goal_without_cycle_cells_fails() {
        let mut graph = GridGraph::with_seed(3, 3, 0);

        assert!(matches!(
            graph.place_goal(),
            Err(DungeonError::NoValidCycleCell)
        ));
        assert_eq!(graph.count_of(Classification::Goal), 0);
    }

    #[test]
    fn test_debug_omits_cells() {
        let graph = GridGraph::with_seed(2, 2, 8);
        let debug = format!("{graph:?}");

        assert!(debug.starts_with("GridGraph"));
        assert!(debug.contains("seed: Some(8)"));
    }
}
