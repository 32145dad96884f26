use std::cell::RefCell;
use std::collections::HashMap;

use crate::binary::ByteCursor;
use crate::error::{Error, Result};
use crate::formats::container::SubstreamTable;

/// Bytes from a set's offset to its first compressed substream byte.
const SET_HEADER_SIZE: usize = 44;

/// A decoded sprite frame: palette indices, row-major, index 0 transparent.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

impl Sprite {
    pub fn index(&self, x: u16, y: u16) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Decoder for the run/skip encoded pixel maps inside animation libraries.
///
/// Two u16 words give width (with the top bit masked off) and height, then
/// control bytes: above 128 emit that many minus 128 literal palette
/// indices, below 128 skip that many columns, exactly 128 ends the row.
/// Cells never written stay index 0.
pub struct SpriteSheetDecoder;

impl SpriteSheetDecoder {
    pub fn decode(cursor: &mut ByteCursor) -> Result<Sprite> {
        let width = cursor.u16()? & 0x7FFF;
        let height = cursor.u16()?;
        let mut pixels = vec![0u8; width as usize * height as usize];
        let mut x = 0usize;
        let mut y = 0u16;
        while y < height {
            let truncated = move |_| Error::TruncatedSpriteData { row: y, height };
            let control = cursor.u8().map_err(truncated)?;
            if control > 128 {
                for _ in 0..control - 128 {
                    let index = cursor.u8().map_err(truncated)?;
                    if x < width as usize {
                        pixels[y as usize * width as usize + x] = index;
                    }
                    x += 1;
                }
            } else if control < 128 {
                x += control as usize;
            } else {
                x = 0;
                y += 1;
            }
        }
        Ok(Sprite {
            width,
            height,
            pixels,
        })
    }
}

/// Per-animation directory entry.
#[derive(Clone, Copy, Debug)]
pub struct AnimInfo {
    pub frame_count: u16,
    pub fps: u16,
}

/// Per-frame metadata (24 bytes on disk).
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
    pub width: u16,
    pub height: u16,
    pub coldspot_x: i16,
    pub coldspot_y: i16,
    pub hotspot_x: i16,
    pub hotspot_y: i16,
    pub gunspot_x: i16,
    pub gunspot_y: i16,
    pub image_offset: u32,
    pub mask_offset: u32,
}

/// A frame resolved all the way to pixels.
#[derive(Clone, Debug)]
pub struct AnimFrame {
    pub info: FrameInfo,
    pub sprite: Sprite,
}

struct SetHeader {
    anim_count: u8,
    frame_count: u16,
    table: SubstreamTable,
}

/// An animation library (.j2a): a directory of sets, each set holding four
/// zlib substreams (animation infos, frame infos, frame pixel data, sample
/// data). Substreams inflate lazily and are cached per set.
pub struct AnimLibrary {
    file: Vec<u8>,
    pub version: u16,
    sets: Vec<SetHeader>,
    cache: RefCell<HashMap<(usize, usize), Vec<u8>>>,
}

impl AnimLibrary {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.seek(12)?;
        let version = cursor.u16()?;
        cursor.seek(24)?;
        let set_count = cursor.u32()? as usize;
        let set_offsets = cursor.u32_n(set_count)?;

        let mut sets = Vec::with_capacity(set_count);
        for offset in set_offsets {
            let offset = offset as usize;
            cursor.seek(offset)?;
            cursor.skip(4)?; // set magic
            let anim_count = cursor.u8()?;
            let _sample_count = cursor.u8()?;
            let frame_count = cursor.u16()?;
            let _prior_samples = cursor.u32()?;
            let table = SubstreamTable::read(&mut cursor, offset + SET_HEADER_SIZE)?;
            sets.push(SetHeader {
                anim_count,
                frame_count,
                table,
            });
        }

        Ok(AnimLibrary {
            file: cursor.into_inner(),
            version,
            sets,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn anim_count(&self, set: usize) -> usize {
        self.sets.get(set).map_or(0, |s| s.anim_count as usize)
    }

    fn substream(&self, set: usize, index: usize) -> Result<ByteCursor> {
        let key = (set, index);
        let mut cache = self.cache.borrow_mut();
        if !cache.contains_key(&key) {
            cache.insert(key, self.sets[set].table.inflate(&self.file, index)?);
        }
        Ok(ByteCursor::new(cache[&key].clone()))
    }

    pub fn anim_info(&self, set: usize, anim: usize) -> Result<Option<AnimInfo>> {
        match self.sets.get(set) {
            Some(s) if anim < s.anim_count as usize => {}
            _ => return Ok(None),
        }
        let mut info = self.substream(set, 1)?;
        info.seek(anim * 8)?;
        Ok(Some(AnimInfo {
            frame_count: info.u16()?,
            fps: info.u16()?,
        }))
    }

    /// Absolute frame index of `frame` within `anim`: the animation's own
    /// frames come after every earlier animation's in the set.
    fn frame_index(&self, set: usize, anim: usize, frame: usize) -> Result<Option<usize>> {
        let mut info = self.substream(set, 1)?;
        let mut base = 0usize;
        for i in 0..anim {
            info.seek(i * 8)?;
            base += info.u16()? as usize;
        }
        info.seek(anim * 8)?;
        let count = info.u16()? as usize;
        if count == 0 || frame >= count {
            return Ok(None);
        }
        Ok(Some(base + frame))
    }

    pub fn frame_info(&self, set: usize, anim: usize, frame: usize) -> Result<Option<FrameInfo>> {
        match self.sets.get(set) {
            Some(s) if anim < s.anim_count as usize => {}
            _ => return Ok(None),
        }
        let index = match self.frame_index(set, anim, frame)? {
            Some(i) => i,
            None => return Ok(None),
        };
        if index >= self.sets[set].frame_count as usize {
            return Ok(None);
        }
        let mut frames = self.substream(set, 2)?;
        frames.seek(index * 24)?;
        Ok(Some(FrameInfo {
            width: frames.u16()?,
            height: frames.u16()?,
            coldspot_x: frames.i16()?,
            coldspot_y: frames.i16()?,
            hotspot_x: frames.i16()?,
            hotspot_y: frames.i16()?,
            gunspot_x: frames.i16()?,
            gunspot_y: frames.i16()?,
            image_offset: frames.u32()?,
            mask_offset: frames.u32()?,
        }))
    }

    /// Fetches and decodes one frame. `Ok(None)` when the set, animation or
    /// frame does not exist (empty animations included).
    pub fn frame(&self, set: usize, anim: usize, frame: usize) -> Result<Option<AnimFrame>> {
        let info = match self.frame_info(set, anim, frame)? {
            Some(i) => i,
            None => return Ok(None),
        };
        let mut pixels = self.substream(set, 3)?;
        pixels.seek(info.image_offset as usize)?;
        let sprite = SpriteSheetDecoder::decode(&mut pixels)?;
        Ok(Some(AnimFrame { info, sprite }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::container::tests::deflate;

    #[test]
    fn decode_runs_skips_and_rows() {
        // 3x2: row 0 = skip 1, two literals; row 1 = one literal
        let data = vec![
            3, 0, 2, 0, // width, height
            1, 130, 7, 9, 128, // row 0
            129, 5, 128, // row 1
        ];
        let s = SpriteSheetDecoder::decode(&mut ByteCursor::new(data)).unwrap();
        assert_eq!(s.pixels, vec![0, 7, 9, 5, 0, 0]);
    }

    #[test]
    fn decode_masks_width_top_bit() {
        let data = vec![2, 0x80, 1, 0, 128];
        let s = SpriteSheetDecoder::decode(&mut ByteCursor::new(data)).unwrap();
        assert_eq!((s.width, s.height), (2, 1));
    }

    #[test]
    fn decode_fails_on_exhausted_input() {
        let data = vec![2, 0, 2, 0, 128];
        assert!(matches!(
            SpriteSheetDecoder::decode(&mut ByteCursor::new(data)),
            Err(Error::TruncatedSpriteData { row: 1, height: 2 })
        ));
    }

    /// One set, two animations (1 frame and 0 frames), one 1x1 frame.
    fn tiny_library() -> AnimLibrary {
        let anim_info: Vec<u8> = [
            1u16.to_le_bytes().to_vec(),
            10u16.to_le_bytes().to_vec(),
            0u32.to_le_bytes().to_vec(),
            0u16.to_le_bytes().to_vec(),
            10u16.to_le_bytes().to_vec(),
            0u32.to_le_bytes().to_vec(),
        ]
        .concat();
        let mut frame_info = Vec::new();
        for v in [1u16, 1] {
            frame_info.extend_from_slice(&v.to_le_bytes()); // width, height
        }
        for _ in 0..6 {
            frame_info.extend_from_slice(&0i16.to_le_bytes()); // spots
        }
        frame_info.extend_from_slice(&0u32.to_le_bytes()); // image offset
        frame_info.extend_from_slice(&0u32.to_le_bytes()); // mask offset
        let pixel_data = vec![1, 0, 1, 0, 129, 42, 128];
        let samples: Vec<u8> = Vec::new();

        let streams = [&anim_info[..], &frame_info[..], &pixel_data[..], &samples[..]];
        let packed: Vec<Vec<u8>> = streams.iter().map(|s| deflate(s)).collect();

        let set_offset = 32u32;
        let mut file = vec![0u8; 12];
        file.extend_from_slice(&0x200u16.to_le_bytes()); // version
        file.resize(24, 0);
        file.extend_from_slice(&1u32.to_le_bytes()); // set count
        file.extend_from_slice(&set_offset.to_le_bytes());
        file.extend_from_slice(b"ANIM");
        file.push(2); // anim count
        file.push(0); // sample count
        file.extend_from_slice(&1u16.to_le_bytes()); // frame count
        file.extend_from_slice(&0u32.to_le_bytes()); // prior samples
        for (packed, raw) in packed.iter().zip(streams.iter()) {
            file.extend_from_slice(&(packed.len() as u32).to_le_bytes());
            file.extend_from_slice(&(raw.len() as u32).to_le_bytes());
        }
        for packed in &packed {
            file.extend_from_slice(packed);
        }
        AnimLibrary::parse(file).unwrap()
    }

    #[test]
    fn frame_lookup_decodes_pixels() {
        let lib = tiny_library();
        let frame = lib.frame(0, 0, 0).unwrap().unwrap();
        assert_eq!((frame.info.width, frame.info.height), (1, 1));
        assert_eq!(frame.sprite.pixels, vec![42]);
    }

    #[test]
    fn empty_animation_yields_none() {
        let lib = tiny_library();
        assert!(lib.frame(0, 1, 0).unwrap().is_none());
        assert!(lib.frame(0, 5, 0).unwrap().is_none());
        assert!(lib.frame(3, 0, 0).unwrap().is_none());
    }
}
