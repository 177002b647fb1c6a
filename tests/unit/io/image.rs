//! Tests for PNG export of the fine tile grid

#[cfg(test)]
mod tests {
    use cyclegrid::graph::cell::Placeable;
    use cyclegrid::graph::grid::GridGraph;
    use cyclegrid::graph::position::Position;
    use cyclegrid::io::configuration::{DOOR_COLOR, EMPTY_COLOR, ROOM_COLOR};
    use cyclegrid::io::image::{export_fine_grid_as_png, fine_grid_image};
    use cyclegrid::tiles::coarse::CoarseTileGrid;
    use cyclegrid::tiles::fine::FineTileGrid;
    use tempfile::TempDir;

    // Two rooms joined by one door
    fn corridor() -> FineTileGrid {
        let mut graph = GridGraph::with_seed(2, 1, 0);
        assert!(graph.place_at(Position::new(0, 0), Placeable::Entrance).is_ok());
        assert!(graph.place_at(Position::new(1, 0), Placeable::Room).is_ok());
        assert!(graph.connect_at(Position::new(0, 0), Position::new(1, 0)).is_ok());
        FineTileGrid::new(&CoarseTileGrid::new(&graph))
    }

    // Tests one pixel per tile with the tile colour
    // Verified by swapping room and door colours
    #[test]
    fn test_image_matches_tile_grid() {
        let grid = corridor();
        let Ok(img) = fine_grid_image(&grid) else {
            unreachable!("grid has tiles");
        };

        assert_eq!((img.width(), img.height()), (35, 21));
        assert_eq!(img.get_pixel(10, 10).0, ROOM_COLOR);
        assert_eq!(img.get_pixel(17, 10).0, DOOR_COLOR);
        assert_eq!(img.get_pixel(0, 0).0, EMPTY_COLOR);
        assert_eq!(img.get_pixel(17, 7).0, EMPTY_COLOR);
    }

    #[test]
    fn test_export_creates_parent_directories() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temp dir should be creatable");
        };
        let path = dir.path().join("renders").join("fine.png");

        assert!(export_fine_grid_as_png(&corridor(), &path).is_ok());
        assert!(path.exists());

        let Ok(loaded) = image::open(&path) else {
            unreachable!("exported file should decode");
        };
        assert_eq!((loaded.width(), loaded.height()), (35, 21));
    }
}
