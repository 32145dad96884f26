//! Resolves packed event words into positioned, ready-to-draw sprites.
//!
//! Most events map straight onto one animation frame, but a fair number
//! are drawn in-game as composites of several sprites (platforms and
//! their chains, CTF bases, bridges, gem rings). This module does that
//! compositing and reports how the result should be placed: gravity,
//! pickup bobbing, spot offsets and flips.

pub mod table;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::imageops;
use image::RgbaImage;
use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::formats::anims::AnimLibrary;
use crate::palette::Palette;
use crate::render::{anims as sprites, canvas};

pub use table::{descriptor, DrawFlag, EventInfo};

/// Event ID that spawns another event; the wrapped ID sits in its params.
pub const GENERATOR: u16 = 216;

/// Level start positions, one per playable character plus the shared
/// multiplayer start.
pub const START_EVENTS: [u16; 4] = [29, 30, 31, 32];

/// Events whose appearance depends on their surroundings (starts pick a
/// random pose, springs flip against nearby walls), so their resolved
/// form is never cached.
const UNCACHEABLE: [u16; 10] = [29, 30, 31, 32, 85, 86, 87, 91, 92, 93];

/// Colour look-up table for the green gem; other gem colours shift the
/// translated entries up by a fixed amount.
const GEM_LUT: [u8; 32] = [
    23, 23, 22, 21, 20, 19, 18, 17, 16, 15, 16, 15, 15, 16, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 0, 0, 0,
];

/// Extracts a parameter of `len` bits starting `offset` bits into `bits`.
pub fn event_param(bits: u32, offset: u32, len: u32) -> u32 {
    (bits >> offset) & ((1u32 << len) - 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Normal,
    Crate,
    Monitor,
}

/// An event resolved to pixels plus placement rules.
#[derive(Clone)]
pub struct ResolvedEvent {
    pub sprite: RgbaImage,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
    pub coldspot_x: i32,
    pub coldspot_y: i32,
    pub is_pickup: bool,
    pub feels_gravity: bool,
    pub use_hotspot: bool,
    pub always_adjust: bool,
    /// 0 = normal, 1 = easy, 2 = hard, 3 = multiplayer only.
    pub difficulty: u8,
    /// Percent; below 100 the level shines through.
    pub opacity: u8,
    pub draw_mode: DrawMode,
    pub offset_x: i32,
    pub offset_y: i32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl ResolvedEvent {
    pub fn width(&self) -> u32 {
        self.sprite.width()
    }

    pub fn height(&self) -> u32 {
        self.sprite.height()
    }
}

/// One rendered frame with its placement spots, the working unit the
/// composite builders pass around.
struct EventFrame {
    image: RgbaImage,
    hotspot_x: i32,
    hotspot_y: i32,
    coldspot_x: i32,
    coldspot_y: i32,
}

impl EventFrame {
    /// Composite images anchor at their own top-left corner.
    fn anchored(image: RgbaImage) -> Self {
        EventFrame {
            image,
            hotspot_x: 0,
            hotspot_y: 0,
            coldspot_x: 0,
            coldspot_y: 0,
        }
    }

    fn w(&self) -> i64 {
        self.image.width() as i64
    }

    fn h(&self) -> i64 {
        self.image.height() as i64
    }
}

/// Loads sprites out of animation libraries and assembles them per event.
/// Libraries and resolved events are cached across calls.
pub struct EventResolver {
    resource_dir: PathBuf,
    palette: Palette,
    redirects: HashMap<u16, u16>,
    libraries: RefCell<HashMap<String, Rc<AnimLibrary>>>,
    cache: RefCell<HashMap<u32, ResolvedEvent>>,
}

impl EventResolver {
    pub fn new(palette: Palette, resource_dir: &Path) -> Self {
        EventResolver {
            resource_dir: resource_dir.to_path_buf(),
            palette,
            redirects: HashMap::new(),
            libraries: RefCell::new(HashMap::new()),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Renders `from` with `to`'s mapping from now on. Levels with custom
    /// weapons use this to point stock ammo events at weapon sprites.
    pub fn redirect(&mut self, from: u16, to: u16) {
        self.redirects.insert(from, to);
    }

    /// Follows the redirect chain to its end. A chain that revisits a
    /// code loops forever and is rejected instead.
    pub fn resolve_redirect(&self, mut code: u16) -> Result<u16> {
        let mut visited = HashSet::new();
        while let Some(&next) = self.redirects.get(&code) {
            if !visited.insert(code) {
                return Err(Error::RedirectCycle(code));
            }
            code = next;
        }
        if table::descriptor(code).is_none() {
            return Err(Error::UnknownEventCode(code));
        }
        Ok(code)
    }

    /// Whether an event ID has a sprite mapping at all.
    pub fn is_visible(&self, code: u16) -> bool {
        table::descriptor(code).is_some()
    }

    fn library(&self, name: &str) -> Result<Rc<AnimLibrary>> {
        if let Some(lib) = self.libraries.borrow().get(name) {
            return Ok(Rc::clone(lib));
        }
        let path = self.resource_dir.join(name);
        debug!("loading animation library {}", path.display());
        let lib = Rc::new(AnimLibrary::parse(fs::read(&path)?)?);
        self.libraries
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&lib));
        Ok(lib)
    }

    fn frame(
        &self,
        library: &str,
        set: usize,
        anim: usize,
        frame: usize,
        lut: Option<&[u8]>,
    ) -> Result<EventFrame> {
        let lib = self.library(library)?;
        let data = lib
            .frame(set, anim, frame)?
            .ok_or_else(|| Error::MissingAnimationFrame {
                library: library.to_string(),
                set,
                anim,
                frame,
            })?;
        Ok(EventFrame {
            image: sprites::render_sprite(&data.sprite, &self.palette, lut),
            hotspot_x: data.info.hotspot_x as i32,
            hotspot_y: data.info.hotspot_y as i32,
            coldspot_x: data.info.coldspot_x as i32,
            coldspot_y: data.info.coldspot_y as i32,
        })
    }

    /// The sprite shrunk onto an empty 15-ammo crate; used for custom
    /// weapons that ship no crate sprite of their own.
    fn crate_frame(
        &self,
        library: &str,
        set: usize,
        anim: usize,
        frame: usize,
        lut: Option<&[u8]>,
    ) -> Result<EventFrame> {
        let mut base = self.frame("crate.j2a", 0, 0, 0, None)?;
        let source = self.frame(library, set, anim, frame, lut)?;
        canvas::blit(&mut base.image, &sprites::crate_emblem(&source.image), 6, 7);
        Ok(base)
    }

    /// The sprite shrunk onto an empty powerup monitor.
    fn monitor_frame(
        &self,
        library: &str,
        set: usize,
        anim: usize,
        frame: usize,
        lut: Option<&[u8]>,
    ) -> Result<EventFrame> {
        let mut base = self.frame("Plus.j2a", 2, 4, 0, None)?;
        let source = self.frame(library, set, anim, frame, lut)?;
        canvas::blit(&mut base.image, &sprites::monitor_emblem(&source.image), 3, 4);
        Ok(base)
    }

    /// Resolves a full packed event word to a drawable sprite. `on_ground`
    /// tells start positions whether to pick a standing or an airborne
    /// pose.
    pub fn resolve(&self, event_word: u32, on_ground: bool) -> Result<ResolvedEvent> {
        let code = self.resolve_redirect((event_word & 0xFF) as u16)?;
        let params = event_word >> 12;

        if !UNCACHEABLE.contains(&code) {
            if let Some(hit) = self.cache.borrow().get(&event_word) {
                return Ok(hit.clone());
            }
        }

        let info = table::descriptor(code).ok_or(Error::UnknownEventCode(code))?;
        let mut set = info.set;
        let mut anim = info.anim;
        let mut frame_id = 0usize;
        let mut lut: Option<[u8; 32]> = None;

        let (draw_mode, opacity) = match info.draw {
            DrawFlag::Opacity(o) => (DrawMode::Normal, o),
            DrawFlag::Crate => (DrawMode::Crate, 100),
            DrawFlag::Monitor => (DrawMode::Monitor, 100),
        };

        let mut feels_gravity = info.feels_gravity;
        let mut offset_x = 0i32;
        let mut offset_y = 0i32;
        let mut flip_x = false;
        let mut flip_y = false;
        let mut composite: Option<EventFrame> = None;

        match code {
            // swinging platforms and spike bolls: a platform sprite under
            // a chain of links
            209 | 210 | 211 | 212 | 213 | 214 | 215 | 223 => {
                let length = event_param(params, 8, 4) as i64;
                let spike_boll = code == 215 || code == 223;
                let platform = self.frame(info.library, set, 0, 0, None)?;
                let chain = self.frame(info.library, set, 0, 1, None)?;

                let chain_links = (length - 2).max(0);
                // metal chain links overlap, other "chain" sprites don't
                let overlap = if spike_boll || code == 210 { 2 } else { 0 };
                let height = if length > 0 {
                    if !spike_boll {
                        offset_y += 11;
                    }
                    (chain.h() - overlap) * (2 + chain_links) + platform.h()
                } else {
                    platform.h()
                };

                let mut image = canvas::empty(platform.image.width(), height.max(1) as u32);
                let platform_top = image.height() as i64 - platform.h();
                if spike_boll {
                    canvas::blit(&mut image, &platform.image, 0, platform_top);
                }
                let x = (platform.hotspot_x as i64).abs() - (chain.hotspot_x as i64).abs();
                let mut y = platform_top - platform.hotspot_y as i64 + chain.hotspot_y as i64;
                for _ in 0..=length {
                    canvas::blit(&mut image, &chain.image, x, y);
                    y -= chain.h() - overlap;
                }
                if !spike_boll {
                    canvas::blit(&mut image, &platform.image, 0, platform_top);
                }
                offset_x -= 11;
                composite = Some(EventFrame::anchored(image));
            }

            // CTF base: machine, Eva, beepboop and the team flag
            244 => {
                let team = event_param(params, 0, 1);
                let flipped = event_param(params, 1, 1) == 0;
                let machine =
                    self.frame(info.library, set, 1, if team > 0 { 1 } else { 0 }, None)?;
                let eva = self.frame(info.library, set, 5, 0, None)?;
                let flag =
                    self.frame(info.library, set, if team > 0 { 7 } else { 3 }, 0, None)?;
                let beepboop = self.frame(info.library, set, 2, 0, None)?;

                let mut image = canvas::empty(130, 101);
                canvas::blit(&mut image, &machine.image, 45, 0);
                // Eva always faces away from the base
                canvas::blit(&mut image, &imageops::flip_horizontal(&eva.image), 0, 40);
                canvas::blit(&mut image, &beepboop.image, 102, 42);
                let flag_image = if flipped {
                    imageops::flip_horizontal(&flag.image)
                } else {
                    flag.image
                };
                canvas::blit(&mut image, &flag_image, if flipped { 33 } else { 78 }, 54);

                let hotspot_x = -(machine.w() as i32 + machine.hotspot_x) - 12;
                offset_x += hotspot_x;
                flip_x = flipped;
                composite = Some(EventFrame {
                    image,
                    hotspot_x,
                    hotspot_y: machine.hotspot_y,
                    coldspot_x: -(machine.w() as i32 + machine.coldspot_x) - 12,
                    coldspot_y: machine.coldspot_y,
                });
            }

            // vertical springs mount on ceilings when their first param
            // says so
            85 | 86 | 87 => {
                if event_param(params, 0, 1) != 0 {
                    feels_gravity = false;
                    flip_y = true;
                }
            }

            91 | 92 | 93 => {
                offset_y = -1;
            }

            // bridges repeat their segment frames until the span is full
            153 => {
                let tiles = event_param(params, 0, 4) as i64;
                if tiles > 0 {
                    let kind = event_param(params, 4, 3).min(6) as usize;
                    let frame_count = self
                        .library(info.library)?
                        .anim_info(set, anim + kind)?
                        .map(|a| a.frame_count as usize)
                        .filter(|&c| c > 0)
                        .ok_or_else(|| Error::MissingAnimationFrame {
                            library: info.library.to_string(),
                            set,
                            anim: anim + kind,
                            frame: 0,
                        })?;

                    let mut length = tiles * 32;
                    let mut image = canvas::empty(length as u32, 32);
                    let mut width = 0i64;
                    let mut current = 0usize;
                    let mut widened = false;
                    while width < length {
                        let segment = self.frame(info.library, set, anim + kind, current, None)?;
                        if segment.w() == 0 {
                            break;
                        }
                        if width + segment.w() > length && !widened {
                            let mut larger = canvas::empty((width + segment.w()) as u32, 32);
                            canvas::blit(&mut larger, &image, 0, 0);
                            image = larger;
                            length = width + segment.w();
                            widened = true;
                        }
                        canvas::blit(
                            &mut image,
                            &segment.image,
                            width,
                            10 + segment.hotspot_y as i64,
                        );
                        width += segment.w();
                        current = (current + 1) % frame_count;
                    }
                    offset_x -= 1;
                    composite = Some(EventFrame::anchored(image));
                }
            }

            // level starts draw a rabbit in a random pose
            29 | 30 | 31 | 32 => {
                const RABBIT_SETS: [usize; 3] = [55, 89, 61];
                const GROUND_POSES: [usize; 6] = [6, 10, 14, 15, 30, 34];
                const AIR_POSES: [usize; 6] = [11, 12, 25, 27, 51, 60];
                let mut rng = rand::thread_rng();
                flip_x = rng.gen_range(0..5) < 2;
                if code == 31 {
                    set = RABBIT_SETS[rng.gen_range(0..RABBIT_SETS.len())];
                }
                anim = if on_ground {
                    feels_gravity = true;
                    GROUND_POSES[rng.gen_range(0..GROUND_POSES.len())]
                } else {
                    AIR_POSES[rng.gen_range(0..AIR_POSES.len())]
                };
            }

            // gems share one sprite and get their colour from a LUT
            63 | 64 | 65 | 66 | 67 | 97 | 98 | 99 => {
                let shift = match code {
                    63 | 67 | 97 => 32,
                    65 | 99 => 16,
                    66 => 72,
                    _ => 0,
                };
                let mut gem_lut = GEM_LUT;
                for entry in gem_lut.iter_mut() {
                    if *entry > 15 {
                        *entry += shift;
                    }
                }
                lut = Some(gem_lut);
            }

            // a ring of some other event's sprites, rotated around a
            // common centre
            192 => {
                let target = event_param(params, 10, 8) as u16;
                let target = self.resolve_redirect(if target == 0 { 63 } else { target })?;
                if target != 192 {
                    let length = match event_param(params, 0, 5) {
                        0 => 8,
                        n => n as i64,
                    };
                    let ring_event = self.resolve(target as u32, false)?;

                    // give the sprite 50% margin so rotating doesn't clip it
                    let sprite = &ring_event.sprite;
                    let mut rotatable =
                        canvas::empty(sprite.width() * 2, sprite.height() * 2);
                    canvas::blit(
                        &mut rotatable,
                        sprite,
                        sprite.width() as i64 / 2,
                        sprite.height() as i64 / 2,
                    );

                    let mut image = canvas::empty(256, 256);
                    let mut angle = 25.0f64;
                    let step = (360.0 / length as f64).to_radians();
                    let radius = 45.0;
                    for _ in 0..length {
                        let x_off = angle.cos() * radius;
                        let y_off = angle.tan() * x_off;
                        let degrees = (angle.to_degrees() as i64 - 90) % 360;
                        let turned = canvas::rotate_about_center(&rotatable, degrees as f64);
                        let x = 128.0 + x_off - turned.width() as f64 / 2.0;
                        let y = 128.0 - y_off - turned.height() as f64 / 2.0;
                        canvas::blit(&mut image, &turned, x as i64, y as i64);
                        angle += step;
                    }
                    composite = Some(EventFrame {
                        image,
                        hotspot_x: -128,
                        hotspot_y: -128,
                        coldspot_x: 0,
                        coldspot_y: 0,
                    });
                }
            }

            // moths come in several colours, picked by the first param
            128 => {
                anim = match event_param(params, 0, 3) {
                    1 | 5 => 1,
                    2 | 6 => 0,
                    3 | 7 => 2,
                    _ => 3,
                };
            }

            129 => {
                frame_id = 5;
            }

            110 => {
                flip_x = true;
            }

            // the uterus boss hangs sideways
            195 => {
                let frame = self.frame(info.library, set, anim, frame_id, None)?;
                let image = imageops::rotate90(&frame.image);
                composite = Some(EventFrame {
                    hotspot_x: -(image.width() as i32 / 2),
                    hotspot_y: -(image.height() as i32 / 2),
                    coldspot_x: 0,
                    coldspot_y: 0,
                    image,
                });
            }

            // the bee boy event is really a small swarm
            237 => {
                let boy = self.frame(info.library, set, 0, 0, None)?;
                let mirrored = imageops::flip_horizontal(&boy.image);
                let mut image = canvas::empty(96, 64);
                canvas::blit(&mut image, &boy.image, 26, 19);
                canvas::blit(&mut image, &mirrored, 62, 23);
                canvas::blit(&mut image, &boy.image, 18, 52);
                canvas::blit(&mut image, &mirrored, 44, 47);
                canvas::blit(&mut image, &boy.image, 61, 43);
                composite = Some(EventFrame {
                    image,
                    hotspot_x: -48,
                    hotspot_y: -48,
                    coldspot_x: 0,
                    coldspot_y: 0,
                });
            }

            // Bolly: turret top, body bottom, gun barrel; the chain is
            // not drawn
            235 => {
                let top = self.frame(info.library, set, 3, 0, None)?;
                let bottom = self.frame(info.library, set, 2, 0, None)?;
                let gun = self.frame(info.library, set, 6, 0, None)?;
                let mut image = canvas::empty(
                    top.image.width().max(bottom.image.width()),
                    (top.h() + bottom.h()) as u32,
                );
                let top_x = (bottom.hotspot_x as i64).abs() - (top.hotspot_x as i64).abs();
                canvas::blit(&mut image, &top.image, top_x, 0);
                canvas::blit(&mut image, &bottom.image, 0, top.h());
                canvas::blit(&mut image, &gun.image, 17, top.h() + 14);
                flip_x = true;
                composite = Some(EventFrame::anchored(image));
            }

            // lizards dangling from a copter
            183 | 250 => {
                let copter = self.frame(info.library, set, 3, 0, None)?;
                let lizard = self.frame(info.library, set, 2, 0, None)?;
                let mut image =
                    canvas::empty(lizard.image.width(), (copter.h() + lizard.h()) as u32);
                let copter_x = (lizard.hotspot_x as i64 - copter.hotspot_x as i64).abs();
                canvas::blit(&mut image, &copter.image, copter_x, 0);
                canvas::blit(&mut image, &lizard.image, 0, 23);
                offset_x += 3;
                composite = Some(EventFrame {
                    image,
                    hotspot_x: copter.hotspot_x,
                    hotspot_y: copter.hotspot_y,
                    coldspot_x: 0,
                    coldspot_y: 0,
                });
            }

            _ => {}
        }

        let lut = lut.as_ref().map(|l| &l[..]);
        let frame = match composite {
            Some(frame) => frame,
            None => match draw_mode {
                DrawMode::Crate => self.crate_frame(info.library, set, anim, frame_id, lut)?,
                DrawMode::Monitor => self.monitor_frame(info.library, set, anim, frame_id, lut)?,
                DrawMode::Normal => self.frame(info.library, set, anim, frame_id, lut)?,
            },
        };

        let event = ResolvedEvent {
            sprite: frame.image,
            hotspot_x: frame.hotspot_x,
            hotspot_y: frame.hotspot_y,
            coldspot_x: frame.coldspot_x,
            coldspot_y: frame.coldspot_y,
            is_pickup: info.is_pickup,
            feels_gravity,
            use_hotspot: info.use_hotspot,
            always_adjust: info.always_adjust,
            difficulty: event_param(event_word, 8, 2) as u8,
            opacity,
            draw_mode,
            offset_x,
            offset_y,
            flip_x,
            flip_y,
        };
        self.cache.borrow_mut().insert(event_word, event.clone());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::container::tests::deflate;

    fn resolver() -> EventResolver {
        let palette = Palette::from_rgbx(&vec![0u8; 1024]).unwrap();
        EventResolver::new(palette, Path::new("/nonexistent"))
    }

    /// A library where every set holds `anims_per_set` one-frame 1x1
    /// animations, enough to satisfy any table entry pointed at it.
    fn library_bytes(set_count: usize, anims_per_set: usize) -> Vec<u8> {
        let mut anim_info = Vec::new();
        let mut frame_info = Vec::new();
        for _ in 0..anims_per_set {
            anim_info.extend_from_slice(&1u16.to_le_bytes()); // frame count
            anim_info.extend_from_slice(&10u16.to_le_bytes()); // fps
            anim_info.extend_from_slice(&0u32.to_le_bytes());
            frame_info.extend_from_slice(&1u16.to_le_bytes()); // width
            frame_info.extend_from_slice(&1u16.to_le_bytes()); // height
            frame_info.extend_from_slice(&[0u8; 12]); // spots
            frame_info.extend_from_slice(&0u32.to_le_bytes()); // image offset
            frame_info.extend_from_slice(&0u32.to_le_bytes()); // mask offset
        }
        let pixel_data = vec![1, 0, 1, 0, 129, 42, 128];
        let samples: Vec<u8> = Vec::new();
        let streams = [&anim_info[..], &frame_info[..], &pixel_data[..], &samples[..]];
        let packed: Vec<Vec<u8>> = streams.iter().map(|s| deflate(s)).collect();

        let mut set_blob = Vec::new();
        set_blob.extend_from_slice(b"ANIM");
        set_blob.push(anims_per_set as u8);
        set_blob.push(0); // sample count
        set_blob.extend_from_slice(&(anims_per_set as u16).to_le_bytes());
        set_blob.extend_from_slice(&0u32.to_le_bytes()); // prior samples
        for (packed, raw) in packed.iter().zip(streams.iter()) {
            set_blob.extend_from_slice(&(packed.len() as u32).to_le_bytes());
            set_blob.extend_from_slice(&(raw.len() as u32).to_le_bytes());
        }
        for packed in &packed {
            set_blob.extend_from_slice(packed);
        }

        let header_len = 28 + 4 * set_count;
        let mut file = vec![0u8; 12];
        file.extend_from_slice(&0x200u16.to_le_bytes()); // version
        file.resize(24, 0);
        file.extend_from_slice(&(set_count as u32).to_le_bytes());
        for i in 0..set_count {
            let offset = header_len + i * set_blob.len();
            file.extend_from_slice(&(offset as u32).to_le_bytes());
        }
        for _ in 0..set_count {
            file.extend_from_slice(&set_blob);
        }
        file
    }

    fn resolver_with_library(label: &str) -> (EventResolver, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "jjrender-events-{label}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Anims.j2a"), library_bytes(97, 10)).unwrap();
        let palette = Palette::from_rgbx(&vec![0u8; 1024]).unwrap();
        (EventResolver::new(palette, &dir), dir)
    }

    #[test]
    fn ceiling_springs_hang_upside_down() {
        let (resolver, _dir) = resolver_with_library("ceiling");
        let ceiling = resolver.resolve(85 | (1 << 12), false).unwrap();
        assert!(!ceiling.feels_gravity);
        assert!(ceiling.flip_y);
        let floor = resolver.resolve(85, false).unwrap();
        assert!(floor.feels_gravity);
        assert!(!floor.flip_y);
    }

    #[test]
    fn horizontal_springs_sit_one_pixel_up() {
        let (resolver, _dir) = resolver_with_library("horizontal");
        let spring = resolver.resolve(92, false).unwrap();
        assert_eq!(spring.offset_y, -1);
        assert_eq!((spring.width(), spring.height()), (1, 1));
    }

    #[test]
    fn params_are_bit_slices() {
        let word = 216 | (59 << 12);
        assert_eq!(word & 0xFF, 216);
        assert_eq!(event_param(word >> 12, 0, 8), 59);
        assert_eq!(event_param(0b11_0000_0000, 8, 2), 3);
    }

    #[test]
    fn redirects_chain() {
        let mut resolver = resolver();
        resolver.redirect(53, 300);
        assert_eq!(resolver.resolve_redirect(53).unwrap(), 300);
        resolver.redirect(300, 57);
        assert_eq!(resolver.resolve_redirect(53).unwrap(), 57);
    }

    #[test]
    fn redirect_cycles_are_rejected() {
        let mut resolver = resolver();
        resolver.redirect(53, 300);
        resolver.redirect(300, 53);
        assert!(matches!(
            resolver.resolve_redirect(53),
            Err(Error::RedirectCycle(_))
        ));
    }

    #[test]
    fn redirect_to_unknown_code_fails() {
        let mut resolver = resolver();
        resolver.redirect(53, 1);
        assert!(matches!(
            resolver.resolve_redirect(53),
            Err(Error::UnknownEventCode(1))
        ));
    }

    #[test]
    fn visibility_follows_the_table() {
        let resolver = resolver();
        assert!(resolver.is_visible(33));
        assert!(!resolver.is_visible(0));
        assert!(!resolver.is_visible(GENERATOR));
    }
}
