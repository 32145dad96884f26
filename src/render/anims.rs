//! Turns animation-library sprites into RGBA images.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::Result;
use crate::formats::anims::{AnimLibrary, Sprite};
use crate::palette::{Palette, JCS_BLUE};
use crate::render::canvas;

/// Target width of the library preview sheet.
const SHEET_WIDTH: u32 = 480;

/// Alpha applied to LUT-translated pixels (gems render semi-opaque).
const LUT_ALPHA: u8 = 191;

/// Rasterizes a sprite through the palette. A colour look-up table maps
/// index groups of eight onto replacement entries and makes the result
/// semi-transparent; gems are drawn this way.
pub fn render_sprite(sprite: &Sprite, palette: &Palette, lut: Option<&[u8]>) -> RgbaImage {
    let mut image = canvas::empty(sprite.width as u32, sprite.height as u32);
    for y in 0..sprite.height {
        for x in 0..sprite.width {
            let mut index = sprite.index(x, y);
            let mut alpha = 255;
            if let Some(lut) = lut {
                if index > 0 {
                    index = lut[((index >> 3) & 15) as usize];
                    alpha = LUT_ALPHA;
                }
            }
            if index > 0 {
                image.put_pixel(x as u32, y as u32, palette.rgba_with_alpha(index, alpha));
            }
        }
    }
    image
}

/// Shrinks a sprite to the 13x13 emblem printed on ammo crates: whites
/// drop out and everything else is darkened to near-black ink.
pub fn crate_emblem(source: &RgbaImage) -> RgbaImage {
    let mut emblem = imageops::resize(source, 13, 13, FilterType::Triangle);
    for pixel in emblem.pixels_mut() {
        if pixel.0[3] != 255 {
            continue;
        }
        let [r, g, b, _] = pixel.0;
        if r as u32 + g as u32 + b as u32 > 750 {
            pixel.0 = [0, 0, 0, 0];
        } else {
            pixel.0 = [
                (r as u32 * 16 / 255) as u8,
                (g as u32 * 16 / 255) as u8,
                (b as u32 * 16 / 255) as u8,
                255,
            ];
        }
    }
    emblem
}

/// Shrinks a sprite to the 12x14 emblem shown on a powerup monitor screen.
pub fn monitor_emblem(source: &RgbaImage) -> RgbaImage {
    imageops::resize(source, 12, 14, FilterType::Triangle)
}

/// Contact sheet of every animation's first frame, packed into rows over
/// the editor blue.
pub fn library_preview(library: &AnimLibrary, palette: &Palette) -> Result<RgbaImage> {
    let mut frames = Vec::new();
    let mut row_heights = Vec::new();
    let (mut row_w, mut row_h) = (0u32, 0u32);
    for set in 0..library.set_count() {
        for anim in 0..library.anim_count(set) {
            let frame = match library.frame(set, anim, 0)? {
                Some(f) => f,
                None => continue,
            };
            let (w, h) = (frame.info.width as u32, frame.info.height as u32);
            row_w += w;
            if row_w > SHEET_WIDTH {
                row_w = w;
                row_heights.push(row_h);
                row_h = 0;
            }
            row_h = row_h.max(h);
            frames.push(frame);
        }
    }

    let width = if row_heights.is_empty() { row_w } else { SHEET_WIDTH };
    let height = row_heights.iter().sum::<u32>() + row_h;
    let mut sheet = canvas::filled(width, height, JCS_BLUE);

    let (mut x, mut y) = (0u32, 0u32);
    let mut remaining_rows = row_heights.into_iter();
    for frame in &frames {
        let w = frame.info.width as u32;
        if x + w > SHEET_WIDTH {
            x = 0;
            y += remaining_rows.next().unwrap_or(0);
        }
        let sprite = render_sprite(&frame.sprite, palette, None);
        canvas::blit(&mut sheet, &sprite, x as i64, y as i64);
        x += w;
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray_palette() -> Palette {
        let mut blob = vec![0u8; 1024];
        for i in 0..256 {
            blob[i * 4] = i as u8;
            blob[i * 4 + 1] = i as u8;
            blob[i * 4 + 2] = i as u8;
        }
        Palette::from_rgbx(&blob).unwrap()
    }

    #[test]
    fn index_zero_stays_transparent() {
        let sprite = Sprite {
            width: 2,
            height: 1,
            pixels: vec![0, 200],
        };
        let image = render_sprite(&sprite, &gray_palette(), None);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(1, 0).0, [200, 200, 200, 255]);
    }

    #[test]
    fn lut_translates_and_fades() {
        let lut = [40u8; 32];
        let sprite = Sprite {
            width: 1,
            height: 1,
            pixels: vec![200],
        };
        let image = render_sprite(&sprite, &gray_palette(), Some(&lut));
        assert_eq!(image.get_pixel(0, 0).0, [40, 40, 40, LUT_ALPHA]);
    }

    #[test]
    fn crate_emblem_drops_whites() {
        let white = canvas::filled(13, 13, Rgba([255, 255, 255, 255]));
        assert!(crate_emblem(&white).pixels().all(|p| p.0[3] == 0));

        let red = canvas::filled(13, 13, Rgba([255, 0, 0, 255]));
        let inked = crate_emblem(&red);
        assert_eq!(inked.get_pixel(6, 6).0, [16, 0, 0, 255]);
    }
}
