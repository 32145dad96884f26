//! Preview images for the legacy (JJ1) file formats.

use image::{imageops, Rgba, RgbaImage};
use log::debug;

use crate::error::Result;
use crate::formats::legacy::level::{MAP_HEIGHT, MAP_WIDTH};
use crate::formats::legacy::{planet, LegacyBlocks, LegacyLevel, LegacyPlanet, TRANSPARENT_INDEX};
use crate::palette::JCS_BLUE;
use crate::render::canvas;

const TILES_PER_ROW: usize = 10;
const TILE: usize = 32;

/// Background types drawn as a palette gradient; everything else gets a
/// flat sky colour.
const GRADIENT_BACKGROUNDS: [u8; 8] = [2, 3, 4, 5, 6, 7, 10, 11];

fn rgb(color: [u8; 3]) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// The tileset as a ten-wide sheet, transparent slot left unpainted.
pub fn blocks_image(blocks: &LegacyBlocks) -> Result<RgbaImage> {
    let rows = blocks.tile_count.div_ceil(TILES_PER_ROW);
    let mut sheet = canvas::empty((TILES_PER_ROW * TILE) as u32, (rows * TILE) as u32);
    let palette = blocks.palette(0);
    for tile in 0..blocks.tile_count {
        let base_x = (tile % TILES_PER_ROW) * TILE;
        let base_y = (tile / TILES_PER_ROW) * TILE;
        for (i, &index) in blocks.tile(tile).iter().enumerate() {
            if index as usize == TRANSPARENT_INDEX {
                continue;
            }
            let color = palette.get(index as usize).copied().unwrap_or([0, 0, 0]);
            let x = (base_x + i % TILE) as u32;
            let y = (base_y + i / TILE) as u32;
            sheet.put_pixel(x, y, rgb(color));
        }
    }
    Ok(sheet)
}

/// The tileset sheet over an editor-blue background.
pub fn blocks_preview(blocks: &LegacyBlocks) -> Result<RgbaImage> {
    let sheet = blocks_image(blocks)?;
    let mut preview = canvas::filled(sheet.width(), sheet.height(), JCS_BLUE);
    canvas::blit(&mut preview, &sheet, 0, 0);
    Ok(preview)
}

/// Paints the level background: either a vertical gradient built from the
/// second and third tileset palettes, or a flat sky colour. The game
/// parallax-scrolls its background; stretching the gradient to 300%
/// vertically at a 1px offset comes close for the levels that rely on it.
fn render_background(level: &LegacyLevel, blocks: &LegacyBlocks, image: &mut RgbaImage) -> Result<()> {
    let properties = level.background_properties()?;
    let kind = properties.first().copied().unwrap_or(0);
    let palette = blocks.palette(1);

    if !GRADIENT_BACKGROUNDS.contains(&kind) {
        debug!("background type {kind}, using flat sky colour");
        let sky = palette.get(42).copied().unwrap_or([0, 0, 0]);
        for pixel in image.pixels_mut() {
            *pixel = rgb(sky);
        }
        return Ok(());
    }

    // both gradient palettes drop the transparent slot, and the second
    // starts on the first one's last row
    let strip = |palette: Vec<[u8; 3]>| -> Vec<[u8; 3]> {
        palette
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| i != TRANSPARENT_INDEX)
            .map(|(_, c)| c)
            .collect()
    };
    let first = strip(palette);
    let second = strip(blocks.palette(2));

    let mut rows = vec![[0u8; 3]; 2 * (first.len() + second.len() - 2)];
    for (i, &color) in first.iter().enumerate() {
        rows[i] = color;
    }
    let inc = first.len() - 1;
    for (i, &color) in second.iter().enumerate() {
        rows[i + inc] = color;
    }
    // repeat the gradient once below itself
    let joined = second.len() - 1 + inc;
    for i in 0..joined.saturating_sub(1) {
        rows[joined + i] = rows[i];
    }

    // stretch to 300% vertically across the full level width, 1px up
    for y in 0..image.height() {
        let source = ((y as usize) + 1) / 3;
        if source >= rows.len() {
            break;
        }
        let color = rgb(rows[source]);
        for x in 0..image.width() {
            image.put_pixel(x, y, color);
        }
    }
    Ok(())
}

/// The full level image: background, then the column-major tile map, with
/// tiles carrying an event id of 128 or up backed by a dark rectangle.
pub fn level_image(level: &LegacyLevel, blocks: &LegacyBlocks) -> Result<RgbaImage> {
    let mut image = canvas::filled(
        (MAP_WIDTH * TILE) as u32,
        (MAP_HEIGHT * TILE) as u32,
        Rgba([0, 0, 0, 255]),
    );
    render_background(level, blocks, &mut image)?;

    let palette = blocks.palette(0);
    let sheet = blocks_image(blocks)?;
    let shade = rgb(palette.get(31).copied().unwrap_or([0, 0, 0]));

    for (i, &(tile, event)) in level.tile_map()?.iter().enumerate() {
        let set_x = (tile as usize % TILES_PER_ROW * TILE) as u32;
        let set_y = (tile as usize / TILES_PER_ROW * TILE) as u32;
        let level_x = (i / MAP_HEIGHT * TILE) as i64;
        let level_y = (i % MAP_HEIGHT * TILE) as i64;

        if event >= 128 {
            for dy in 0..TILE as i64 {
                for dx in 0..TILE as i64 {
                    let x = (level_x + dx) as u32;
                    let y = (level_y + dy) as u32;
                    if x < image.width() && y < image.height() {
                        image.put_pixel(x, y, shade);
                    }
                }
            }
        }

        if set_x + TILE as u32 <= sheet.width() && set_y + TILE as u32 <= sheet.height() {
            let cell = imageops::crop_imm(&sheet, set_x, set_y, TILE as u32, TILE as u32).to_image();
            canvas::blit(&mut image, &cell, level_x, level_y);
        }
    }
    Ok(image)
}

/// The 64x55 planet graphic.
pub fn planet_image(file: &LegacyPlanet) -> RgbaImage {
    let mut image = canvas::empty(planet::WIDTH as u32, planet::HEIGHT as u32);
    for (i, &index) in file.image.iter().enumerate() {
        let [r, g, b] = file.palette.rgb(index);
        image.put_pixel(
            (i % planet::WIDTH) as u32,
            (i / planet::WIDTH) as u32,
            Rgba([r, g, b, 255]),
        );
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_rows_repeat_below_themselves() {
        // exercised through render_background by a full level fixture in
        // the format tests; here just the palette strip arithmetic
        let palette: Vec<[u8; 3]> = (0..128).map(|i| [i as u8, 0, 0]).collect();
        let kept: Vec<[u8; 3]> = palette
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| i != TRANSPARENT_INDEX)
            .map(|(_, c)| c)
            .collect();
        assert_eq!(kept.len(), 127);
        assert_eq!(kept[126], [126, 0, 0]);
    }

    #[test]
    fn planet_pixels_come_from_the_palette() {
        let mut file = vec![0u8; 2];
        file.push(1);
        file.push(b'P');
        let mut palette = vec![0u8; 768];
        palette[3] = 63; // entry 1 full red
        file.extend(palette);
        file.extend(vec![1u8; planet::WIDTH * planet::HEIGHT]);
        let planet = LegacyPlanet::parse(file).unwrap();
        let image = planet_image(&planet);
        assert_eq!(image.get_pixel(0, 0).0, [252, 0, 0, 255]);
        assert_eq!(
            (image.width(), image.height()),
            (planet::WIDTH as u32, planet::HEIGHT as u32)
        );
    }
}
