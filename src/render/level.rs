//! Composites level layers, masks and event sprites into preview images.

use image::imageops;
use image::RgbaImage;
use log::{debug, warn};
use rand::Rng;

use crate::error::{Error, Result};
use crate::events::{event_param, EventResolver, GENERATOR, START_EVENTS};
use crate::formats::level::{expand_map, Level, LAYER_COUNT, SPRITE_LAYER};
use crate::formats::tileset::Tileset;
use crate::palette::JCS_BLUE;
use crate::render::canvas;
use crate::render::tileset::{tileset_image, tileset_mask, SHEET_WIDTH};

/// Largest preview the renderer will produce; bigger levels get cropped
/// to a window of this many pixels around a start position.
pub const DEFAULT_PIXEL_BUDGET: i64 = 20_000_000;

/// Layer speed value meaning "moves 1:1 with the sprite layer".
const SPEED_ONE: i32 = 65536;

/// Pixel crop window within the level, `[x0, y0)..[x1, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropBox {
    pub fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i64 {
        self.y1 - self.y0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rabbit {
    Jazz,
    Spaz,
    Lori,
}

impl Rabbit {
    pub fn name(&self) -> &'static str {
        match self {
            Rabbit::Jazz => "jazz",
            Rabbit::Spaz => "spaz",
            Rabbit::Lori => "lori",
        }
    }
}

/// True when the mask sheet is solid (black) at the given level pixel.
/// Anything outside the mask counts as open air.
fn mask_solid(mask: &RgbaImage, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= mask.width() as i64 || y >= mask.height() as i64 {
        return false;
    }
    let p = mask.get_pixel(x as u32, y as u32).0;
    p[0] == 0 && p[1] == 0 && p[2] == 0
}

/// Draws a level the way it roughly looks in-game: layers back to front,
/// then event sprites placed against the collision mask.
pub struct LevelRenderer<'a> {
    level: &'a Level,
    events: &'a EventResolver,
    tiles: RgbaImage,
    masks: RgbaImage,
    pixel_budget: i64,
}

impl<'a> LevelRenderer<'a> {
    pub fn new(level: &'a Level, tileset: &'a Tileset, events: &'a EventResolver) -> Result<Self> {
        Ok(LevelRenderer {
            level,
            events,
            tiles: tileset_image(tileset)?,
            masks: tileset_mask(tileset)?,
            pixel_budget: DEFAULT_PIXEL_BUDGET,
        })
    }

    pub fn set_pixel_budget(&mut self, budget: i64) {
        self.pixel_budget = budget.max(1);
    }

    /// The part of the level that actually has tiles in it, with a 64px
    /// margin. A completely empty sprite layer falls back to the top-left
    /// screenful.
    pub fn visible_box(&self) -> Result<CropBox> {
        let sprite = self.level.sprite_layer();
        let level_w = sprite.width as i64 * 32;
        let level_h = sprite.height as i64 * 32;
        let row = sprite.word_width() as i64 * 4;

        let mut start_x = i64::MAX;
        let mut start_y = i64::MAX;
        let mut end_x = 0;
        let mut end_y = 0;
        let mut any = false;
        for (i, tile) in self.level.layer_map(SPRITE_LAYER)?.iter().enumerate() {
            if tile.id == 0 {
                continue;
            }
            let x = (i as i64 % row) * 32;
            let y = (i as i64 / row) * 32;
            any = true;
            start_x = start_x.min(x);
            start_y = start_y.min(y);
            end_x = end_x.max(x + 128);
            end_y = end_y.max(y + 32);
        }

        if !any {
            return Ok(CropBox {
                x0: 0,
                y0: 0,
                x1: level_w.min(800),
                y1: level_h.min(600),
            });
        }

        let margin = 64;
        Ok(CropBox {
            x0: (start_x - margin).max(0),
            y0: (start_y - margin).max(0),
            x1: (end_x + margin).min(level_w),
            y1: (end_y + margin).min(level_h),
        })
    }

    /// A random level start position, in pixels, with the rabbit that
    /// starts there. No starts at all gives the conventional spot near
    /// the top-left corner.
    pub fn start_pos(&self) -> Result<((i64, i64), Rabbit)> {
        let width = self.level.sprite_layer().width as i64;
        let mut rng = rand::thread_rng();
        let mut positions = Vec::new();
        for (i, &word) in self.level.event_words()?.iter().enumerate() {
            let code = (word & 0xFF) as u16;
            if !START_EVENTS.contains(&code) {
                continue;
            }
            let rabbit = match code {
                29 => Rabbit::Jazz,
                30 => Rabbit::Spaz,
                32 => Rabbit::Lori,
                _ => [Rabbit::Jazz, Rabbit::Spaz, Rabbit::Lori][rng.gen_range(0..3)],
            };
            positions.push((((i % width as usize) as i64 * 32, (i / width as usize) as i64 * 32), rabbit));
        }
        Ok(if positions.is_empty() {
            ((96, 32), Rabbit::Jazz)
        } else {
            positions[rng.gen_range(0..positions.len())]
        })
    }

    /// Renders one layer into `image`. In mask mode the mask sheet is the
    /// tile source and empty tiles paint opaque editor blue, so the
    /// result doubles as a collision map.
    fn render_layer(
        &self,
        image: &mut RgbaImage,
        layer_index: usize,
        crop: &CropBox,
        mask_mode: bool,
    ) -> Result<()> {
        let layer = &self.level.layers[layer_index];
        let sprite = self.level.sprite_layer();
        let mut map = self.level.layer_map(layer_index)?;
        if map.is_empty() {
            return Ok(());
        }

        let stored_width = if layer.tile_width {
            layer.width_real
        } else {
            layer.width
        };

        // layers tiling in some direction expand around the level centre,
        // so the drift stays symmetric
        let expand_h = if layer.tile_width && stored_width < sprite.width && layer.speed_x != SPEED_ONE
        {
            (sprite.width - stored_width) as usize
        } else {
            0
        };
        let expand_v = if layer.tile_height && layer.height < sprite.height && layer.speed_y != SPEED_ONE
        {
            (sprite.height - layer.height) as usize
        } else {
            0
        };

        let real_width: i64;
        if expand_h > 0 || expand_v > 0 {
            let left = expand_h / 2;
            let top = expand_v / 2;
            map = expand_map(
                &map,
                layer.width_real as usize,
                layer.height as usize,
                top,
                expand_h - left,
                expand_v - top,
                left,
            )?;
            real_width = (layer.width_real as usize + expand_h) as i64 * 32;
        } else {
            real_width = stored_width.div_ceil(4) as i64 * 4 * 32;
        }

        let offset_x = -crop.x0;
        let offset_y = -crop.y0;
        let empty_tile = canvas::filled(32, 32, JCS_BLUE);
        let sheet = if mask_mode { &self.masks } else { &self.tiles };

        let mut i: i64 = 0;
        for tile in &map {
            let x = i % real_width + offset_x;
            let y = i / real_width * 32 + offset_y;
            i += 32;
            if x + 32 < 0 || y + 32 < 0 || x - 32 > crop.width() {
                continue;
            }
            if y - 32 > crop.height() {
                break;
            }

            if tile.id != 0 && !tile.invisible {
                let tile_x = (tile.id as u32 * 32) % SHEET_WIDTH;
                let tile_y = tile.id as u32 / 10 * 32;
                if tile_y + 32 > sheet.height() {
                    warn!("tile {} points past the tileset sheet, skipping", tile.id);
                    continue;
                }
                let mut cell = imageops::crop_imm(sheet, tile_x, tile_y, 32, 32).to_image();
                if tile.flipped {
                    cell = imageops::flip_horizontal(&cell);
                }
                if tile.v_flipped {
                    cell = imageops::flip_vertical(&cell);
                }
                if tile.translucent && !mask_mode {
                    canvas::blit_with_opacity(image, &cell, x, y, 66);
                } else {
                    canvas::blit(image, &cell, x, y);
                }
            } else if mask_mode {
                canvas::blit(image, &empty_tile, x, y);
            }
        }
        Ok(())
    }

    /// The whole level's collision mask at full size.
    fn level_mask(&self) -> Result<RgbaImage> {
        let sprite = self.level.sprite_layer();
        let full = CropBox {
            x0: 0,
            y0: 0,
            x1: sprite.width as i64 * 32,
            y1: sprite.height as i64 * 32,
        };
        let mut mask = canvas::empty(full.x1 as u32, full.y1 as u32);
        self.render_layer(&mut mask, SPRITE_LAYER, &full, true)?;
        Ok(mask)
    }

    /// Places event sprites over the rendered sprite layer. Only events
    /// visible in normal and multiplayer difficulty are drawn; pickups
    /// bob in a checkerboard, gravity-bound events drop to the mask.
    fn render_events(&self, image: &mut RgbaImage, mask: &RgbaImage, crop: &CropBox) -> Result<()> {
        let sprite = self.level.sprite_layer();
        let tiles_x = sprite.width as i64;
        let offset_x = -crop.x0;
        let offset_y = -crop.y0;
        let margin = 64;
        let bob = [0i64, -3, -6, -3];

        for (i, &stored_word) in self.level.event_words()?.iter().enumerate() {
            let tile_x = i as i64 % tiles_x;
            let tile_y = i as i64 / tiles_x;
            let real_x = tile_x * 32;
            let mut real_y = tile_y * 32;

            if real_x < crop.x0 - margin || real_x > crop.x1 + margin || real_y < crop.y0 - margin
            {
                continue;
            }
            if real_y + margin > crop.y1 {
                break;
            }

            let mut word = stored_word;
            let mut code = (word & 0xFF) as u16;
            if code == 0 {
                continue;
            }
            // generators spawn the event packed into their params
            if code == GENERATOR {
                code = event_param(word >> 12, 0, 8) as u16;
                word = code as u32;
            }
            if !self.events.is_visible(code) {
                continue;
            }

            let on_ground = mask_solid(mask, real_x, (real_y + 48).max(0));
            let mut event = match self.events.resolve(word, on_ground) {
                Ok(event) => event,
                Err(
                    e @ (Error::Io(_)
                    | Error::MissingAnimationFrame { .. }
                    | Error::UnknownEventCode(_)),
                ) => {
                    warn!("skipping event {code}: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if event.difficulty != 0 && event.difficulty != 3 {
                continue;
            }

            let mut pos_x = real_x + offset_x;
            let mut pos_y = real_y + offset_y;

            if event.is_pickup {
                pos_y += bob[(tile_x % 4) as usize];
                if (tile_x - tile_y) % 2 == 0 {
                    event.flip_x = true;
                }
            }

            // horizontal springs face away from the nearest wall
            if (91..=93).contains(&code) {
                let mut check_x = real_x + 16;
                let mut left = 0;
                let mut right = 0;
                while mask_solid(mask, check_x, real_y) && left < 32 {
                    check_x -= 1;
                    left += 1;
                }
                check_x += left;
                while mask_solid(mask, check_x, real_y) && right < 32 {
                    check_x += 1;
                    right += 1;
                }
                if left > right {
                    event.flip_x = true;
                    pos_x += event.width() as i64 + 10;
                }
            }

            if event.flip_x {
                event.sprite = imageops::flip_horizontal(&event.sprite);
            }
            if event.flip_y {
                event.sprite = imageops::flip_vertical(&event.sprite);
            }

            if event.feels_gravity {
                let test_x = (real_x - event.coldspot_x as i64).clamp(0, tiles_x * 32);
                while real_y < mask.height() as i64 && !mask_solid(mask, test_x, real_y) {
                    real_y += 1;
                }
                let anchor = if event.use_hotspot {
                    event.hotspot_y
                } else {
                    event.coldspot_y
                } as i64;
                if anchor != 0 {
                    real_y += anchor;
                } else {
                    real_y -= event.height() as i64;
                }
                pos_y = real_y + offset_y;
            } else if event.is_pickup || event.always_adjust {
                // floating events centre on their tile
                pos_x += 16 + event.hotspot_x as i64;
                pos_y += 16 + event.hotspot_y as i64;
            }

            pos_x += event.offset_x as i64;
            pos_y += event.offset_y as i64;

            if event.opacity != 100 {
                canvas::blit_with_opacity(image, &event.sprite, pos_x, pos_y, event.opacity);
            } else {
                canvas::blit(image, &event.sprite, pos_x, pos_y);
            }
        }
        Ok(())
    }

    /// Renders the crop window: layers in reverse order, the collision
    /// mask and events after the sprite layer. Only layers that move 1:1
    /// with the view or tile in both directions are drawn, since others
    /// have no fixed position on a still image.
    pub fn image(&self, crop: &CropBox, with_events: bool) -> Result<RgbaImage> {
        if crop.width() <= 0 || crop.height() <= 0 {
            return Err(Error::EmptyCrop);
        }
        if crop.width() * crop.height() > self.pixel_budget {
            return Err(Error::PreviewTooLarge {
                width: crop.width(),
                height: crop.height(),
                budget: self.pixel_budget,
            });
        }

        let mut image = canvas::empty(crop.width() as u32, crop.height() as u32);
        let mut rendered_any = false;
        let mut rendered_sprite = false;
        for layer_index in (0..LAYER_COUNT).rev() {
            let layer = &self.level.layers[layer_index];
            if !layer.has_tiles {
                continue;
            }
            let draws = (layer.texture_mode > 0 && !rendered_sprite)
                || !rendered_any
                || (layer.speed_x == SPEED_ONE && layer.speed_y == SPEED_ONE)
                || (layer.tile_width
                    && layer.tile_height
                    && !(rendered_sprite && layer.speed_x == 0 && layer.speed_y == 0));
            if !draws {
                continue;
            }
            debug!("rendering layer {}", layer_index + 1);
            self.render_layer(&mut image, layer_index, crop, false)?;
            rendered_any = true;
            if layer_index == SPRITE_LAYER {
                rendered_sprite = true;
                if with_events {
                    let mask = self.level_mask()?;
                    self.render_events(&mut image, &mask, crop)?;
                }
            }
        }
        Ok(image)
    }

    /// The whole visible part of the level; levels too large for the
    /// pixel budget get a budget-sized window centred on a start
    /// position instead.
    pub fn preview(&self) -> Result<RgbaImage> {
        let mut crop = self.visible_box()?;
        let width = crop.width();
        let height = crop.height();
        let ((start_x, start_y), _) = self.start_pos()?;

        if width * height > self.pixel_budget {
            let ratio = height as f64 / width as f64;
            let fit_w = (self.pixel_budget as f64 / ratio).sqrt().floor() as i64;
            let half_w = fit_w / 2;
            if start_x + half_w > width {
                crop.x0 = width - fit_w;
                crop.x1 = width;
            } else if start_x - half_w < 0 {
                crop.x0 = 0;
                crop.x1 = fit_w;
            } else {
                crop.x0 = start_x - half_w;
                crop.x1 = start_x + half_w;
            }
            let fit_h = (fit_w as f64 * ratio).floor() as i64;
            let half_h = fit_h / 2;
            if start_y + half_h > height {
                crop.y0 = height - fit_h;
                crop.y1 = height;
            } else if start_y - half_h < 0 {
                crop.y0 = 0;
                crop.y1 = fit_h;
            } else {
                crop.y0 = start_y - half_h;
                crop.y1 = start_y + half_h;
            }
        }

        self.image(&crop, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::level::tests::tiny_level;
    use crate::formats::tileset::tests::tiny_tileset;
    use crate::palette::Palette;
    use image::Rgba;
    use std::path::Path;

    fn resolver() -> EventResolver {
        let palette = Palette::from_rgbx(&vec![0u8; 1024]).unwrap();
        EventResolver::new(palette, Path::new("/nonexistent"))
    }

    #[test]
    fn mask_lookups_outside_the_sheet_are_air() {
        let mask = canvas::filled(2, 2, Rgba([0, 0, 0, 255]));
        assert!(mask_solid(&mask, 1, 1));
        assert!(!mask_solid(&mask, -1, 0));
        assert!(!mask_solid(&mask, 0, 2));
    }

    #[test]
    fn visible_box_covers_placed_tiles() {
        let level = tiny_level();
        let tileset = tiny_tileset();
        let events = resolver();
        let renderer = LevelRenderer::new(&level, &tileset, &events).unwrap();
        let crop = renderer.visible_box().unwrap();
        // 4x1 sprite layer with tiles in it, clamped to the level edges
        assert_eq!(crop, CropBox { x0: 0, y0: 0, x1: 128, y1: 32 });
    }

    #[test]
    fn default_start_is_near_the_corner() {
        let level = tiny_level();
        let tileset = tiny_tileset();
        let events = resolver();
        let renderer = LevelRenderer::new(&level, &tileset, &events).unwrap();
        let ((x, y), rabbit) = renderer.start_pos().unwrap();
        assert_eq!((x, y), (96, 32));
        assert_eq!(rabbit, Rabbit::Jazz);
    }

    #[test]
    fn oversized_crop_is_rejected() {
        let level = tiny_level();
        let tileset = tiny_tileset();
        let events = resolver();
        let mut renderer = LevelRenderer::new(&level, &tileset, &events).unwrap();
        renderer.set_pixel_budget(16);
        let crop = CropBox { x0: 0, y0: 0, x1: 32, y1: 32 };
        assert!(matches!(
            renderer.image(&crop, false),
            Err(Error::PreviewTooLarge { .. })
        ));
    }

    #[test]
    fn layers_render_tiles_into_the_crop() {
        let level = tiny_level();
        let tileset = tiny_tileset();
        let events = resolver();
        let renderer = LevelRenderer::new(&level, &tileset, &events).unwrap();
        let crop = CropBox { x0: 0, y0: 0, x1: 128, y1: 32 };
        // no events in range that resolve, so skip event rendering
        let image = renderer.image(&crop, false).unwrap();
        assert_eq!((image.width(), image.height()), (128, 32));
        // tile 1 is solid colour 1 in the test tileset
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
    }
}
