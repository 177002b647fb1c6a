//! Tests for fine grid expansion and door compaction

#[cfg(test)]
mod tests {
    use cyclegrid::graph::cell::Placeable;
    use cyclegrid::graph::grid::GridGraph;
    use cyclegrid::graph::position::Position;
    use cyclegrid::tiles::coarse::{CoarseTileGrid, TileKind};
    use cyclegrid::tiles::fine::{AreaKind, CompactionReport, FineTileGrid};

    // Coarse grid of four rooms joined in a ring by four doors
    fn ring() -> CoarseTileGrid {
        let mut graph = GridGraph::with_seed(2, 2, 0);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(graph.place_at(Position::new(x, y), Placeable::Room).is_ok());
        }
        for (a, b) in [((0, 0), (1, 0)), ((0, 0), (0, 1)), ((1, 0), (1, 1)), ((0, 1), (1, 1))] {
            assert!(graph.connect_at(a.into(), b.into()).is_ok());
        }
        CoarseTileGrid::new(&graph)
    }

    fn non_empty(grid: &FineTileGrid) -> usize {
        grid.width() * grid.height() - grid.count_of(TileKind::Empty)
    }

    #[test]
    fn test_expansion_fills_seven_by_seven_blocks() {
        let grid = FineTileGrid::expand(&ring());

        assert_eq!((grid.width(), grid.height()), (35, 35));
        assert_eq!(grid.areas().len(), 8);
        assert!(grid.areas().iter().all(|area| area.tiles().len() == 49));
        assert_eq!(grid.count_of(TileKind::Room), 4 * 49);
        assert_eq!(grid.count_of(TileKind::Door), 4 * 49);
    }

    // Block origin is seven times the coarse position, center three tiles in
    #[test]
    fn test_area_centers_and_sources() {
        let grid = FineTileGrid::expand(&ring());
        let Some(first) = grid.area(0) else {
            unreachable!("ring has areas");
        };

        assert_eq!(first.kind(), AreaKind::Room);
        assert_eq!(first.source(), Position::new(1, 1));
        assert_eq!(first.center(), Position::new(10, 10));
        assert!(first.tiles().contains(&Position::new(7, 7)));
        assert!(first.tiles().contains(&Position::new(13, 13)));
    }

    // Areas link to every non-empty coarse neighbour, both ways
    #[test]
    fn test_areas_are_linked_symmetrically() {
        let grid = FineTileGrid::expand(&ring());

        for (index, area) in grid.areas().iter().enumerate() {
            assert_eq!(area.connections().len(), 2);
            for &other in area.connections() {
                assert!(
                    grid.area(other)
                        .is_some_and(|o| o.connections().contains(&index))
                );
                assert_ne!(grid.area(other).map(|o| o.kind()), Some(area.kind()));
            }
        }
    }

    #[test]
    fn test_compaction_keeps_door_centers_only() {
        let grid = FineTileGrid::new(&ring());

        let doors: Vec<_> = grid
            .areas()
            .iter()
            .filter(|area| area.kind() == AreaKind::Door)
            .collect();
        assert_eq!(doors.len(), 4);
        for door in doors {
            assert_eq!(door.tiles(), &[door.center()]);
            assert_eq!(grid.tile_at(door.center()), Some(TileKind::Door));
        }
        assert_eq!(grid.count_of(TileKind::Door), 4);
    }

    // A horizontal door splits its block between the rooms left and right;
    // the center column has no room in its direction and stays empty
    #[test]
    fn test_compaction_reassigns_by_direction() {
        let mut grid = FineTileGrid::expand(&ring());
        let report = grid.compact_doors();

        assert_eq!(
            report,
            CompactionReport {
                freed: 4 * 48,
                reassigned: 4 * 42,
            }
        );
        assert_eq!(report.emptied(), 24);

        assert_eq!(grid.tile_at(Position::new(14, 7)), Some(TileKind::Room));
        assert_eq!(grid.tile_at(Position::new(20, 13)), Some(TileKind::Room));
        assert_eq!(grid.tile_at(Position::new(17, 7)), Some(TileKind::Empty));
        assert_eq!(grid.tile_at(Position::new(17, 10)), Some(TileKind::Door));

        let Some(first) = grid.area(0) else {
            unreachable!("ring has areas");
        };
        assert!(first.tiles().contains(&Position::new(14, 7)));
        assert_eq!(first.tiles().len(), 49 + 21 + 21);
    }

    #[test]
    fn test_compaction_conserves_tiles() {
        let mut grid = FineTileGrid::expand(&ring());
        let before = non_empty(&grid);
        let report = grid.compact_doors();

        assert_eq!(before, non_empty(&grid) + report.emptied());
        let owned: usize = grid.areas().iter().map(|area| area.tiles().len()).sum();
        assert_eq!(owned, non_empty(&grid));
    }

    #[test]
    fn test_second_compaction_frees_nothing() {
        let mut grid = FineTileGrid::new(&ring());
        let before = grid.render();

        assert_eq!(grid.compact_doors(), CompactionReport::default());
        assert_eq!(grid.render(), before);
    }

    #[test]
    fn test_lone_room_has_no_connections() {
        let mut graph = GridGraph::with_seed(1, 1, 0);
        assert!(graph.place_at(Position::new(0, 0), Placeable::Entrance).is_ok());
        let grid = FineTileGrid::new(&CoarseTileGrid::new(&graph));

        assert_eq!((grid.width(), grid.height()), (21, 21));
        assert_eq!(grid.areas().len(), 1);
        assert!(grid.area(0).is_some_and(|area| area.connections().is_empty()));
        assert_eq!(grid.count_of(TileKind::Room), 49);
        assert_eq!(grid.to_string().lines().count(), 21);
    }
}
