//! Tests for the best-first route search

#[cfg(test)]
mod tests {
    use cyclegrid::DungeonError;
    use cyclegrid::graph::cell::Placeable;
    use cyclegrid::graph::grid::GridGraph;
    use cyclegrid::graph::position::Position;

    // Straight line along the top row, start excluded and target included
    #[test]
    fn test_route_excludes_start_and_ends_at_target() {
        let mut graph = GridGraph::with_seed(3, 3, 0);
        let route = graph.find_route(Position::new(0, 0), Position::new(2, 0));

        assert!(matches!(
            route.as_deref(),
            Ok([first, last]) if *first == Position::new(1, 0) && *last == Position::new(2, 0)
        ));
    }

    #[test]
    fn test_route_goes_around_classified_cells() {
        let mut graph = GridGraph::with_seed(3, 3, 0);
        assert!(graph.place_at(Position::new(1, 0), Placeable::Room).is_ok());

        let Ok(route) = graph.find_route(Position::new(0, 0), Position::new(2, 0)) else {
            unreachable!("positions are in bounds");
        };
        assert_eq!(
            route,
            vec![
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 0),
            ]
        );
    }

    // The target itself may carry any classification
    #[test]
    fn test_classified_target_is_enterable() {
        let mut graph = GridGraph::with_seed(3, 1, 0);
        assert!(graph.place_at(Position::new(2, 0), Placeable::Entrance).is_ok());

        let route = graph.find_route(Position::new(0, 0), Position::new(2, 0));
        assert!(route.is_ok_and(|r| r == vec![Position::new(1, 0), Position::new(2, 0)]));
    }

    #[test]
    fn test_blocked_corridor_yields_empty_route() {
        let mut graph = GridGraph::with_seed(3, 1, 0);
        assert!(graph.place_at(Position::new(1, 0), Placeable::Room).is_ok());

        let route = graph.find_route(Position::new(0, 0), Position::new(2, 0));
        assert!(route.is_ok_and(|r| r.is_empty()));
    }

    #[test]
    fn test_start_equal_to_target_yields_empty_route() {
        let mut graph = GridGraph::with_seed(2, 2, 0);

        let route = graph.find_route(Position::new(1, 1), Position::new(1, 1));
        assert!(route.is_ok_and(|r| r.is_empty()));
    }

    #[test]
    fn test_out_of_bounds_endpoints_are_rejected() {
        let mut graph = GridGraph::with_seed(2, 2, 0);

        assert!(matches!(
            graph.find_route(Position::new(0, 0), Position::new(5, 5)),
            Err(DungeonError::OutOfBounds { .. })
        ));
    }

    // Search only touches bookkeeping fields
    #[test]
    fn test_search_leaves_graph_unchanged() {
        let mut graph = GridGraph::with_seed(4, 4, 0);
        assert!(graph.place_at(Position::new(1, 1), Placeable::Room).is_ok());
        let before = graph.render();

        let first = graph.find_route(Position::new(0, 0), Position::new(3, 3));
        let second = graph.find_route(Position::new(0, 0), Position::new(3, 3));

        assert_eq!(graph.render(), before);
        assert!(graph.cells().iter().all(|cell| cell.adjacent().is_empty()));
        assert_eq!(first.ok(), second.ok());
    }

    // Costs of the last search stay readable on the cells
    #[test]
    fn test_search_records_manhattan_costs() {
        let mut graph = GridGraph::with_seed(3, 3, 0);
        assert!(graph.find_route(Position::new(0, 0), Position::new(2, 2)).is_ok());

        let cell = graph.get(Position::new(2, 0));
        assert!(cell.is_some_and(|c| c.distance_from_start == 2
            && c.distance_to_target == 2
            && c.total_cost == 4));
    }
}
