//! Renders tilesets to sprite sheets: ten 32px tiles per row.

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::formats::tileset::{Tileset, TILE_SIZE};
use crate::palette::JCS_BLUE;
use crate::render::canvas;

pub const TILES_PER_ROW: usize = 10;
pub const SHEET_WIDTH: u32 = (TILES_PER_ROW * TILE_SIZE) as u32;

fn sheet_height(tile_count: usize) -> u32 {
    (tile_count.div_ceil(TILES_PER_ROW) * TILE_SIZE) as u32
}

/// The full tileset image with index 0 left transparent.
pub fn tileset_image(tileset: &Tileset) -> Result<RgbaImage> {
    let mut sheet = canvas::empty(SHEET_WIDTH, sheet_height(tileset.tile_count));
    for tile in 0..tileset.tile_count {
        let pixels = tileset.tile_image(tile)?;
        let base_x = (tile % TILES_PER_ROW) * TILE_SIZE;
        let base_y = (tile / TILES_PER_ROW) * TILE_SIZE;
        for (i, &index) in pixels.iter().enumerate() {
            if index == 0 {
                continue;
            }
            let x = (base_x + i % TILE_SIZE) as u32;
            let y = (base_y + i / TILE_SIZE) as u32;
            sheet.put_pixel(x, y, tileset.palette.rgba(index));
        }
    }
    Ok(sheet)
}

/// The collision masks as black pixels on editor blue.
pub fn tileset_mask(tileset: &Tileset) -> Result<RgbaImage> {
    let mut sheet = canvas::filled(SHEET_WIDTH, sheet_height(tileset.tile_count), JCS_BLUE);
    let black = Rgba([0, 0, 0, 255]);
    for tile in 0..tileset.tile_count {
        let mask = tileset.tile_mask(tile)?;
        let base_x = (tile % TILES_PER_ROW) * TILE_SIZE;
        let base_y = (tile / TILES_PER_ROW) * TILE_SIZE;
        for (i, &solid) in mask.iter().enumerate() {
            if solid {
                let x = (base_x + i % TILE_SIZE) as u32;
                let y = (base_y + i / TILE_SIZE) as u32;
                sheet.put_pixel(x, y, black);
            }
        }
    }
    Ok(sheet)
}

/// The tileset image over an editor-blue background, so transparent
/// slots read as intentional rather than missing.
pub fn tileset_preview(tileset: &Tileset) -> Result<RgbaImage> {
    let tiles = tileset_image(tileset)?;
    let mut preview = canvas::filled(tiles.width(), tiles.height(), JCS_BLUE);
    canvas::blit(&mut preview, &tiles, 0, 0);
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_rows_cover_a_partial_last_row() {
        assert_eq!(sheet_height(10), 32);
        assert_eq!(sheet_height(11), 64);
        assert_eq!(sheet_height(25), 96);
    }
}
