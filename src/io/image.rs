//! PNG export of the fine tile grid, one pixel per tile

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::graph::position::Position;
use crate::io::configuration::{DOOR_COLOR, EMPTY_COLOR, ROOM_COLOR};
use crate::io::error::{DungeonError, Result, file_system_error};
use crate::tiles::coarse::TileKind;
use crate::tiles::fine::FineTileGrid;

const fn tile_color(kind: TileKind) -> [u8; 4] {
    match kind {
        TileKind::Empty => EMPTY_COLOR,
        TileKind::Room => ROOM_COLOR,
        TileKind::Door => DOOR_COLOR,
    }
}

/// Draw the fine grid into an RGBA image with a transparent background
///
/// # Errors
///
/// Returns `InvalidState` if the grid has no tiles
pub fn fine_grid_image(grid: &FineTileGrid) -> Result<RgbaImage> {
    let (Ok(width), Ok(height)) = (u32::try_from(grid.width()), u32::try_from(grid.height()))
    else {
        return Err(DungeonError::InvalidState {
            reason: "grid is too large for an image",
        });
    };
    if width == 0 || height == 0 {
        return Err(DungeonError::InvalidState {
            reason: "grid has no tiles to draw",
        });
    }

    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let kind = grid
            .tile_at(Position::new(x as i32, y as i32))
            .unwrap_or_default();
        Rgba(tile_color(kind))
    });
    Ok(img)
}

/// Export the fine grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no tiles
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_fine_grid_as_png(grid: &FineTileGrid, output_path: &Path) -> Result<()> {
    let img = fine_grid_image(grid)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path)
        .map_err(|e| DungeonError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
