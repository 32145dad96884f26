use crate::binary::ByteCursor;
use crate::error::{Error, Result};
use crate::formats::container::{SubstreamTable, Substreams, HEADER_SIZE};
use crate::palette::Palette;

pub const TILE_SIZE: usize = 32;
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;
const MASK_BYTES: usize = TILE_PIXELS / 8;

const VERSION_TSF: u16 = 513;

/// A tileset file (.j2t): palette, per-tile image/mask offset tables, and
/// the pixel and mask substreams they point into.
pub struct Tileset {
    streams: Substreams,
    pub name: String,
    pub version: u16,
    pub max_tiles: usize,
    pub tile_count: usize,
    pub palette: Palette,
    pub opaque: Vec<bool>,
    image_offsets: Vec<u32>,
    transparency_offsets: Vec<u32>,
    mask_offsets: Vec<u32>,
    flipped_mask_offsets: Vec<u32>,
}

impl Tileset {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::CorruptHeader(format!(
                "tileset file is {} bytes, header needs {}",
                data.len(),
                HEADER_SIZE
            )));
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
        let palette = Palette::from_rgbx(&info.bytes(1024)?)?;
        let tile_count = info.u32()? as usize;
        let opaque = info.bool_n(max_tiles)?;
        info.skip(max_tiles as isize)?; // unknown flags
        let image_offsets = info.u32_n(max_tiles)?;
        info.skip(4 * max_tiles as isize)?; // unknown
        let transparency_offsets = info.u32_n(max_tiles)?;
        info.skip(4 * max_tiles as isize)?; // unknown
        let mask_offsets = info.u32_n(max_tiles)?;
        let flipped_mask_offsets = info.u32_n(max_tiles)?;

        Ok(Tileset {
            streams,
            name,
            version,
            max_tiles,
            tile_count,
            palette,
            opaque,
            image_offsets,
            transparency_offsets,
            mask_offsets,
            flipped_mask_offsets,
        })
    }

    /// 1024 palette indices for a tile, row-major.
    pub fn tile_image(&self, tile: usize) -> Result<Vec<u8>> {
        let mut pixels = self.streams.substream(2)?;
        pixels.seek(self.image_offsets[tile] as usize)?;
        pixels.bytes(TILE_PIXELS)
    }

    pub fn transparency_offset(&self, tile: usize) -> u32 {
        self.transparency_offsets[tile]
    }

    /// Collision mask for a tile, one bool per pixel, unpacked LSB-first
    /// from the 128 mask bytes.
    pub fn tile_mask(&self, tile: usize) -> Result<Vec<bool>> {
        let mut masks = self.streams.substream(4)?;
        masks.seek(self.mask_offsets[tile] as usize)?;
        Ok(Self::unpack_mask(&masks.bytes(MASK_BYTES)?))
    }

    pub fn tile_mask_flipped(&self, tile: usize) -> Result<Vec<bool>> {
        let mut masks = self.streams.substream(4)?;
        masks.seek(self.flipped_mask_offsets[tile] as usize)?;
        Ok(Self::unpack_mask(&masks.bytes(MASK_BYTES)?))
    }

    fn unpack_mask(bytes: &[u8]) -> Vec<bool> {
        let mut mask = Vec::with_capacity(TILE_PIXELS);
        for &byte in bytes {
            for bit in 0..8 {
                mask.push(byte & (1 << bit) != 0);
            }
        }
        mask
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::formats::container::tests::build_container;

    /// Minimal well-formed tileset: 8 tiles, tile `t` filled with palette
    /// index 5, empty collision masks, greyscale-ish palette.
    pub(crate) fn tiny_tileset() -> Tileset {
        let tile_count = 8usize;
        let max_tiles = 1024usize;

        let mut info = Vec::new();
        for i in 0..256u32 {
            info.extend_from_slice(&[i as u8, i as u8, i as u8, 0]);
        }
        info.extend_from_slice(&(tile_count as u32).to_le_bytes());
        info.extend_from_slice(&vec![0u8; max_tiles]); // opaque flags
        info.extend_from_slice(&vec![0u8; max_tiles]); // unknown
        for tile in 0..max_tiles as u32 {
            // image offsets, one tile-sized slot each
            let offset = if (tile as usize) < tile_count { tile * 1024 } else { 0 };
            info.extend_from_slice(&offset.to_le_bytes());
        }
        info.extend_from_slice(&vec![0u8; 4 * max_tiles]); // unknown
        info.extend_from_slice(&vec![0u8; 4 * max_tiles]); // transparency offsets
        info.extend_from_slice(&vec![0u8; 4 * max_tiles]); // unknown
        info.extend_from_slice(&vec![0u8; 4 * max_tiles]); // mask offsets
        info.extend_from_slice(&vec![0u8; 4 * max_tiles]); // flipped mask offsets

        let mut images = vec![0u8; tile_count * TILE_PIXELS];
        for pixel in images[TILE_PIXELS..].iter_mut() {
            *pixel = 5;
        }
        let transparency = vec![0u8; 4];
        let masks = vec![0u8; MASK_BYTES];

        let mut file = build_container([&info, &images, &transparency, &masks], 262, 230);
        file[188..195].copy_from_slice(b"Test T\0");
        file[220..222].copy_from_slice(&512u16.to_le_bytes());
        Tileset::parse(file).unwrap()
    }

    #[test]
    fn tiny_tileset_parses() {
        let tileset = tiny_tileset();
        assert_eq!(tileset.tile_count, 8);
        assert_eq!(tileset.max_tiles, 1024);
        assert_eq!(tileset.tile_image(1).unwrap()[0], 5);
        assert!(!tileset.tile_mask(0).unwrap()[0]);
    }

    #[test]
    fn mask_unpacks_lsb_first() {
        let mut bytes = vec![0u8; MASK_BYTES];
        bytes[0] = 0b0000_0101;
        let mask = Tileset::unpack_mask(&bytes);
        assert_eq!(&mask[..4], &[true, false, true, false]);
        assert_eq!(mask.len(), TILE_PIXELS);
    }
}
