use log::debug;

use crate::binary::ByteCursor;
use crate::error::{Error, Result};
use crate::formats::container::{SubstreamTable, Substreams, HEADER_SIZE};

pub const LAYER_COUNT: usize = 8;
/// The sprite layer: the one the game plays on and events attach to.
pub const SPRITE_LAYER: usize = 3;
/// Customary animated-tile table size; files declare their own count.
pub const ANIM_TILES: usize = 128;

const VERSION_TSF: u16 = 515;
/// Deepest allowed animated-tile chain before giving up on a code.
const ANIM_CHAIN_LIMIT: usize = 8;

/// Per-layer settings, stored struct-of-arrays in the file.
#[derive(Clone, Debug, Default)]
pub struct LayerInfo {
    pub tile_width: bool,
    pub tile_height: bool,
    pub limit_visible: bool,
    pub textured: bool,
    pub texture_stars: bool,
    pub kind: u8,
    pub has_tiles: bool,
    pub width: u32,
    pub width_real: u32,
    pub height: u32,
    pub z: i32,
    pub detail: u8,
    pub wave_x: i32,
    pub wave_y: i32,
    pub speed_x: i32,
    pub speed_y: i32,
    pub auto_speed_x: i32,
    pub auto_speed_y: i32,
    pub texture_mode: u8,
    pub texture_rgb: [u8; 3],
}

impl LayerInfo {
    /// Tiles per map row: the stored width rounded up to a whole
    /// four-tile word.
    pub fn word_width(&self) -> u32 {
        let width = if self.tile_width {
            self.width_real
        } else {
            self.width
        };
        width.div_ceil(4)
    }
}

#[derive(Clone, Debug)]
pub struct AnimatedTile {
    pub wait: u16,
    pub random_wait: u16,
    pub pingpong_wait: u16,
    pub pingpong: bool,
    pub speed: u8,
    pub frames: Vec<u16>,
}

/// A fully resolved tile reference out of the word dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileRef {
    pub id: u16,
    pub flipped: bool,
    pub v_flipped: bool,
    pub animated: bool,
    pub translucent: bool,
    pub invisible: bool,
}

impl TileRef {
    pub fn is_blank(&self) -> bool {
        self.id == 0 && !self.animated
    }
}

/// A level file (.j2l): settings, layers, animated tiles, the word
/// dictionary and per-layer tile maps, and the event word grid.
pub struct Level {
    streams: Substreams,
    pub name: String,
    pub version: u16,
    pub max_tiles: usize,
    pub title: String,
    pub tileset_file: String,
    pub bonus_level: String,
    pub next_level: String,
    pub secret_level: String,
    pub music_file: String,
    pub help_strings: Vec<String>,
    pub is_multiplayer: bool,
    pub layers: Vec<LayerInfo>,
    pub static_tiles: u16,
    pub tile_events: Vec<u32>,
    pub tile_types: Vec<u8>,
    pub animated_tiles: Vec<AnimatedTile>,
    dictionary: Vec<[TileRef; 4]>,
}

impl Level {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::CorruptHeader(format!(
                "level file is {} bytes, header needs {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        if !data[..HEADER_SIZE]
            .windows(9)
            .any(|w| w == b"MegaGames")
        {
            return Err(Error::CorruptHeader(
                "level header lacks the MegaGames signature".into(),
            ));
        }

        let mut cursor = ByteCursor::new(data);
        cursor.seek(188)?;
        let name = cursor.string(32)?;
        cursor.seek(220)?;
        let version = cursor.u16()?;
        let max_tiles = if version >= VERSION_TSF { 4096 } else { 1024 };
        cursor.seek(230)?;
        let table = SubstreamTable::read(&mut cursor, HEADER_SIZE)?;
        let streams = Substreams::new(cursor.into_inner(), table);

        let mut info = streams.substream(1)?;
        info.u16()?; // editor X offset
        info.u16()?; // security word
        info.u16()?; // editor Y offset
        info.u16()?; // security word
        info.u8()?; // editor layer (low nibble)
        info.u8()?; // minimum light
        info.u8()?; // starting light
        let anim_count = info.u16()? as usize;
        info.bool()?; // split-screen
        let is_multiplayer = info.bool()?;
        info.u32()?; // stream buffer size
        let title = info.string(32)?;
        let tileset_file = info.string(32)?;
        let bonus_level = info.string(32)?;
        let next_level = info.string(32)?;
        let secret_level = info.string(32)?;
        let music_file = info.string(32)?;
        let help_strings = info.string_n(512, 16)?;

        let mut layers = vec![LayerInfo::default(); LAYER_COUNT];
        for layer in layers.iter_mut() {
            let properties = info.u32()?;
            layer.tile_width = properties & 1 != 0;
            layer.tile_height = properties & 2 != 0;
            layer.limit_visible = properties & 4 != 0;
            layer.textured = properties & 8 != 0;
            layer.texture_stars = properties & 16 != 0;
        }
        for layer in layers.iter_mut() {
            layer.kind = info.u8()?;
        }
        for layer in layers.iter_mut() {
            layer.has_tiles = info.bool()?;
        }
        for layer in layers.iter_mut() {
            layer.width = info.u32()?;
        }
        for layer in layers.iter_mut() {
            layer.width_real = info.u32()?;
        }
        for layer in layers.iter_mut() {
            layer.height = info.u32()?;
        }
        for layer in layers.iter_mut() {
            layer.z = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.detail = info.u8()?;
        }
        for layer in layers.iter_mut() {
            layer.wave_x = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.wave_y = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.speed_x = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.speed_y = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.auto_speed_x = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.auto_speed_y = info.i32()?;
        }
        for layer in layers.iter_mut() {
            layer.texture_mode = info.u8()?;
        }
        for layer in layers.iter_mut() {
            let rgb = info.bytes(3)?;
            layer.texture_rgb = [rgb[0], rgb[1], rgb[2]];
        }

        let static_tiles = info.u16()?;
        let tile_events = info.u32_n(max_tiles)?;
        info.skip(max_tiles as isize)?; // per-tile flipped flags
        let tile_types = info.u8_n(max_tiles)?;
        info.skip(max_tiles as isize)?; // per-tile used flags

        if anim_count > max_tiles {
            return Err(Error::CorruptHeader(format!(
                "level declares {anim_count} animated tiles, tile space holds {max_tiles}"
            )));
        }
        let mut animated_tiles = Vec::with_capacity(anim_count);
        for _ in 0..anim_count {
            let wait = info.u16()?;
            let random_wait = info.u16()?;
            let pingpong_wait = info.u16()?;
            let pingpong = info.bool()?;
            let speed = info.u8()?;
            let frame_count = info.u8()? as usize;
            let mut frames = info.u16_n(64)?;
            frames.truncate(frame_count);
            animated_tiles.push(AnimatedTile {
                wait,
                random_wait,
                pingpong_wait,
                pingpong,
                speed,
                frames,
            });
        }

        let mut level = Level {
            streams,
            name,
            version,
            max_tiles,
            title,
            tileset_file,
            bonus_level,
            next_level,
            secret_level,
            music_file,
            help_strings,
            is_multiplayer,
            layers,
            static_tiles,
            tile_events,
            tile_types,
            animated_tiles,
            dictionary: Vec::new(),
        };
        level.dictionary = level.read_dictionary()?;
        debug!(
            "parsed level '{}' ({} dictionary words, {} static tiles)",
            level.title,
            level.dictionary.len(),
            level.static_tiles
        );
        Ok(level)
    }

    /// Decodes one raw tile code: flip bits come off first, then the id is
    /// reduced modulo the tile space, then animated ids chase the
    /// animation's first frame (bounded).
    pub fn parse_tile_code(&self, code: u16) -> Result<TileRef> {
        self.parse_tile_code_depth(code, 0)
    }

    fn parse_tile_code_depth(&self, code: u16, depth: usize) -> Result<TileRef> {
        if depth > ANIM_CHAIN_LIMIT {
            return Err(Error::AnimationResolutionOverflow {
                tile_id: code as u32,
                limit: ANIM_CHAIN_LIMIT,
            });
        }
        let flipped = code as usize & self.max_tiles != 0;
        let v_flipped = code & 0x2000 != 0;
        let id = code as usize % self.max_tiles;
        if id >= self.static_tiles as usize {
            let index = id - self.static_tiles as usize;
            let anim = self
                .animated_tiles
                .get(index)
                .ok_or(Error::UnknownAnimatedTile {
                    tile_id: code as u32,
                    index,
                    count: self.animated_tiles.len(),
                })?;
            let first = anim.frames.first().copied().unwrap_or(0);
            let mut resolved = self.parse_tile_code_depth(first, depth + 1)?;
            resolved.animated = true;
            return Ok(resolved);
        }
        Ok(TileRef {
            id: id as u16,
            flipped,
            v_flipped,
            animated: false,
            translucent: false,
            invisible: false,
        })
    }

    /// Word dictionary: 8-byte groups of four tile codes, read while a full
    /// group remains. Each entry also picks up its render tags from the
    /// tile type table.
    fn read_dictionary(&self) -> Result<Vec<[TileRef; 4]>> {
        let mut cursor = self.streams.substream(3)?;
        let mut words = Vec::with_capacity(cursor.len() / 8);
        while cursor.remaining() >= 8 {
            let mut word = [TileRef::default(); 4];
            for entry in word.iter_mut() {
                let mut tile = self.parse_tile_code(cursor.u16()?)?;
                tile.translucent = self.tile_types[tile.id as usize] == 1;
                tile.invisible = self.tile_types[tile.id as usize] == 3;
                *entry = tile;
            }
            words.push(word);
        }
        Ok(words)
    }

    pub fn dictionary(&self) -> &[[TileRef; 4]] {
        &self.dictionary
    }

    /// Byte offset of a layer's words inside the map substream: layers
    /// without tiles store nothing.
    fn layer_map_offset(&self, layer: usize) -> usize {
        self.layers[..layer]
            .iter()
            .filter(|l| l.has_tiles)
            .map(|l| 2 * (l.word_width() * l.height) as usize)
            .sum()
    }

    /// Inflates a layer's tile map: each stored word index expands to its
    /// dictionary word's four tiles. Rows are `4 * word_width()` tiles.
    pub fn layer_map(&self, layer: usize) -> Result<Vec<TileRef>> {
        let info = &self.layers[layer];
        if !info.has_tiles {
            return Ok(Vec::new());
        }
        let word_count = (info.word_width() * info.height) as usize;
        let mut cursor = self.streams.substream(4)?;
        cursor.seek(self.layer_map_offset(layer))?;
        let mut map = Vec::with_capacity(word_count * 4);
        for _ in 0..word_count {
            let index = cursor.u16()? as usize;
            let word = self.dictionary.get(index).ok_or(Error::UnknownWordIndex {
                index,
                dictionary_len: self.dictionary.len(),
            })?;
            map.extend_from_slice(word);
        }
        Ok(map)
    }

    pub fn sprite_layer(&self) -> &LayerInfo {
        &self.layers[SPRITE_LAYER]
    }

    /// The packed event word for a sprite-layer tile.
    pub fn event_word(&self, x: u32, y: u32) -> Result<u32> {
        let width = self.sprite_layer().width;
        let mut events = self.streams.substream(2)?;
        events.seek(4 * (y * width + x) as usize)?;
        events.u32()
    }

    /// All event words of the sprite layer, row-major.
    pub fn event_words(&self) -> Result<Vec<u32>> {
        let info = self.sprite_layer();
        let mut events = self.streams.substream(2)?;
        events.u32_n((info.width * info.height) as usize)
    }
}

/// Grows a row-major map by wrapping its own rows and columns, so tiling
/// layers can draw seamlessly past their stored extent. Appended columns
/// wrap from the left edge, prepended columns from the right edge, and
/// likewise for rows.
pub fn expand_map<T: Clone>(
    map: &[T],
    width: usize,
    height: usize,
    top: usize,
    right: usize,
    bottom: usize,
    left: usize,
) -> Result<Vec<T>> {
    if width * height != map.len() {
        return Err(Error::DimensionMismatch {
            width,
            height,
            len: map.len(),
        });
    }
    let mut rows: Vec<Vec<T>> = map.chunks(width).map(|r| r.to_vec()).collect();
    for row in rows.iter_mut() {
        for i in 0..right {
            row.push(row[i % width].clone());
        }
        for _ in 0..left {
            row.insert(0, row[width - 1].clone());
        }
    }
    for i in 0..bottom {
        rows.push(rows[i % height].clone());
    }
    for _ in 0..top {
        rows.insert(0, rows[height - 1].clone());
    }
    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::formats::container::tests::build_container;

    /// Minimal well-formed level: 4 static tiles, one animated tile whose
    /// first frame is tile 2, a 2-word dictionary, a 4x1 sprite layer.
    pub(crate) fn tiny_level() -> Level {
        Level::parse(level_file(ANIM_TILES as u16)).unwrap()
    }

    /// Raw level bytes with `anim_count` declared in the header and that many
    /// records in the body (capped at the usual table size).
    fn level_file(anim_count: u16) -> Vec<u8> {
        let mut info = Vec::new();
        info.extend_from_slice(&[0u8; 11]); // editor state, security, light
        info.extend_from_slice(&anim_count.to_le_bytes());
        info.push(0); // split-screen
        info.push(1); // multiplayer
        info.extend_from_slice(&0u32.to_le_bytes());
        let pad_string = |s: &str, len: usize, out: &mut Vec<u8>| {
            let mut b = s.as_bytes().to_vec();
            b.resize(len, 0);
            out.extend_from_slice(&b);
        };
        pad_string("Test Level", 32, &mut info);
        pad_string("Castle1.j2t", 32, &mut info);
        for _ in 0..4 {
            pad_string("", 32, &mut info);
        }
        info.extend_from_slice(&vec![0u8; 512 * 16]);
        // layer property arrays
        info.extend_from_slice(&[0u8; 4 * 8]); // property bits
        info.extend_from_slice(&[0u8; 8]); // kinds
        let mut has_tiles = [0u8; 8];
        has_tiles[SPRITE_LAYER] = 1;
        info.extend_from_slice(&has_tiles);
        for arr in 0..3 {
            // width, width_real, height
            for layer in 0..8u32 {
                let v: u32 = if layer as usize == SPRITE_LAYER {
                    if arr == 2 {
                        1
                    } else {
                        4
                    }
                } else {
                    0
                };
                info.extend_from_slice(&v.to_le_bytes());
            }
        }
        info.extend_from_slice(&[0u8; 4 * 8]); // z
        info.extend_from_slice(&[0u8; 8]); // detail
        info.extend_from_slice(&[0u8; 4 * 8 * 6]); // wave + speeds
        info.extend_from_slice(&[0u8; 8]); // texture mode
        info.extend_from_slice(&[0u8; 3 * 8]); // texture rgb
        info.extend_from_slice(&4u16.to_le_bytes()); // static tiles
        info.extend_from_slice(&vec![0u8; 4 * 1024]); // tile events
        info.extend_from_slice(&vec![0u8; 1024]); // flipped flags
        let mut tile_types = vec![0u8; 1024];
        tile_types[3] = 1; // translucent
        info.extend_from_slice(&tile_types);
        info.extend_from_slice(&vec![0u8; 1024]); // used flags
        for i in 0..(anim_count as usize).min(ANIM_TILES) {
            info.extend_from_slice(&[0u8; 7]); // waits, pingpong
            info.push(1); // speed
            info.push(1); // frame count
            let mut frames = [0u8; 128];
            if i == 0 {
                frames[..2].copy_from_slice(&2u16.to_le_bytes());
            }
            info.extend_from_slice(&frames);
        }

        let events: Vec<u8> = [
            0u32,
            33 | (2 << 12), // event 33 with a parameter
            0,
            216 | (59 << 12), // generator wrapping event 59
        ]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();

        let mut dictionary = Vec::new();
        for code in [0u16, 0, 0, 0] {
            dictionary.extend_from_slice(&code.to_le_bytes());
        }
        let animated_code = if anim_count > 0 { 4u16 } else { 2 };
        for code in [1u16, 3 | 0x2000, animated_code, 1 | 1024] {
            dictionary.extend_from_slice(&code.to_le_bytes());
        }

        let map: Vec<u8> = 1u16.to_le_bytes().to_vec();

        let mut file = build_container([&info, &events, &dictionary, &map], 262, 230);
        file[180..189].copy_from_slice(b"MegaGames");
        file[220..222].copy_from_slice(&514u16.to_le_bytes());
        file
    }

    #[test]
    fn settings_parse() {
        let level = tiny_level();
        assert_eq!(level.title, "Test Level");
        assert_eq!(level.tileset_file, "Castle1.j2t");
        assert!(level.is_multiplayer);
        assert_eq!(level.max_tiles, 1024);
        assert_eq!(level.sprite_layer().width, 4);
        assert_eq!(level.static_tiles, 4);
    }

    #[test]
    fn missing_signature_is_corrupt() {
        let info = [0u8; 4];
        let file = build_container([&info, &info, &info, &info], 262, 230);
        assert!(matches!(
            Level::parse(file),
            Err(Error::CorruptHeader(_))
        ));
    }

    #[test]
    fn tile_codes_take_flips_before_modulus() {
        let level = tiny_level();
        let plain = level.parse_tile_code(3).unwrap();
        assert_eq!((plain.id, plain.flipped, plain.v_flipped), (3, false, false));
        let h = level.parse_tile_code(1 | 1024).unwrap();
        assert_eq!((h.id, h.flipped), (1, true));
        let v = level.parse_tile_code(2 | 0x2000).unwrap();
        assert_eq!((v.id, v.v_flipped), (2, true));
    }

    #[test]
    fn animated_codes_resolve_to_first_frame() {
        let level = tiny_level();
        // static_tiles = 4, so code 4 is animated tile 0 -> frame code 2
        let tile = level.parse_tile_code(4).unwrap();
        assert_eq!((tile.id, tile.animated), (2, true));
    }

    #[test]
    fn animated_record_table_follows_the_declared_count() {
        let level = Level::parse(level_file(0)).unwrap();
        assert!(level.animated_tiles.is_empty());
        assert_eq!(level.static_tiles, 4);
    }

    #[test]
    fn animated_code_past_the_table_is_rejected() {
        // 128 animations: code 4 + 128 lands one entry past the table
        let level = tiny_level();
        assert!(matches!(
            level.parse_tile_code(4 + ANIM_TILES as u16),
            Err(Error::UnknownAnimatedTile { index: 128, .. })
        ));
        let empty = Level::parse(level_file(0)).unwrap();
        assert!(matches!(
            empty.parse_tile_code(4),
            Err(Error::UnknownAnimatedTile { index: 0, .. })
        ));
    }

    #[test]
    fn oversized_animated_count_is_corrupt() {
        assert!(matches!(
            Level::parse(level_file(u16::MAX)),
            Err(Error::CorruptHeader(_))
        ));
    }

    #[test]
    fn self_referencing_animation_overflows() {
        let mut level = tiny_level();
        level.animated_tiles[0].frames = vec![4];
        assert!(matches!(
            level.parse_tile_code(4),
            Err(Error::AnimationResolutionOverflow { .. })
        ));
    }

    #[test]
    fn dictionary_tags_translucency() {
        let level = tiny_level();
        let word = level.dictionary()[1];
        assert_eq!(word[0].id, 1);
        assert!(word[1].translucent && word[1].v_flipped);
        assert!(word[2].animated);
        assert!(word[3].flipped);
    }

    #[test]
    fn layer_map_inflates_words() {
        let level = tiny_level();
        let map = level.layer_map(SPRITE_LAYER).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map[0].id, 1);
    }

    #[test]
    fn event_words_read_per_tile() {
        let level = tiny_level();
        assert_eq!(level.event_word(1, 0).unwrap() & 255, 33);
        assert_eq!(level.event_words().unwrap().len(), 4);
    }

    #[test]
    fn expand_map_identity_when_margins_zero() {
        let map = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(expand_map(&map, 3, 2, 0, 0, 0, 0).unwrap(), map);
    }

    #[test]
    fn expand_map_wraps_all_four_edges() {
        let map = vec![1, 2, 3, 4];
        let out = expand_map(&map, 2, 2, 1, 1, 1, 1).unwrap();
        assert_eq!(out.len(), 4 * 4);
        // top row wraps from the bottom, left column from the right
        assert_eq!(
            out,
            vec![4, 3, 4, 3, 2, 1, 2, 1, 4, 3, 4, 3, 2, 1, 2, 1]
        );
    }

    #[test]
    fn expand_map_rejects_bad_dimensions() {
        assert!(matches!(
            expand_map(&[1, 2, 3], 2, 2, 0, 0, 0, 0),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
