use std::cell::RefCell;
use std::collections::HashMap;

use crate::binary::ByteCursor;
use crate::error::Result;
use crate::formats::legacy::RunLengthDecoder;

pub const SUBSTREAM_COUNT: usize = 17;
/// Substreams stored as plain blobs instead of RLE blocks, with their
/// fixed sizes.
const RAW_SIZES: [(usize, usize); 4] = [(9, 598), (11, 4), (14, 25), (16, 3)];

/// Width and height of a level in tiles.
pub const MAP_WIDTH: usize = 256;
pub const MAP_HEIGHT: usize = 64;

/// A legacy level file (LEVEL.nnn). The substream directory stores no
/// uncompressed sizes, so the header walk records each block's stored size
/// by reading its length word in place.
pub struct LegacyLevel {
    data: Vec<u8>,
    sizes: [usize; SUBSTREAM_COUNT],
    pub level_number: u8,
    pub world_number: u8,
    /// Three-character number of the tileset file (BLOCKS.nnn) to use.
    pub blocks_number: String,
    cache: RefCell<HashMap<usize, Vec<u8>>>,
}

impl LegacyLevel {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.seek(39)?; // signature block
        let mut sizes = [0usize; SUBSTREAM_COUNT];
        sizes[0] = 39;
        for (i, size) in sizes.iter_mut().enumerate().skip(1) {
            if let Some(&(_, raw)) = RAW_SIZES.iter().find(|&&(idx, _)| idx == i) {
                *size = raw;
                cursor.skip(raw as isize)?;
            } else {
                *size = cursor.u16()? as usize + 2;
                cursor.skip(*size as isize - 2)?;
            }
        }

        let level_number = cursor.u8()? ^ 210;
        let world_number = cursor.u8()? ^ 4;
        cursor.skip(9)?;
        let mut blocks_number = cursor.string(3)?;
        if blocks_number == "999" {
            blocks_number = format!("{:03}", world_number);
        }

        Ok(LegacyLevel {
            data: cursor.into_inner(),
            sizes,
            level_number,
            world_number,
            blocks_number,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Decoded substream `index`; raw-blob indices come back verbatim,
    /// everything else is an RLE block.
    pub fn substream(&self, index: usize) -> Result<Vec<u8>> {
        let mut cache = self.cache.borrow_mut();
        if !cache.contains_key(&index) {
            let mut cursor = ByteCursor::new(self.data.clone());
            cursor.seek(self.sizes[..index].iter().sum())?;
            let result = if RAW_SIZES.iter().any(|&(idx, _)| idx == index) {
                cursor.bytes(self.sizes[index])?
            } else {
                let block = cursor.bytes(self.sizes[index])?;
                RunLengthDecoder::decode(&mut ByteCursor::new(block))?
            };
            cache.insert(index, result);
        }
        Ok(cache[&index].clone())
    }

    /// The tile map: (tile, event) byte pairs, one per map cell, in the
    /// file's column-major order.
    pub fn tile_map(&self) -> Result<Vec<(u8, u8)>> {
        let map = self.substream(1)?;
        Ok(map.chunks_exact(2).map(|p| (p[0], p[1])).collect())
    }

    /// The raw background-properties blob (substream 14); byte 0 selects
    /// the background type.
    pub fn background_properties(&self) -> Result<Vec<u8>> {
        self.substream(14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rle_block(payload: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        for chunk in payload.chunks(127) {
            body.push(chunk.len() as u8);
            body.extend_from_slice(chunk);
        }
        let mut out = (body.len() as u16).to_le_bytes().to_vec();
        out.extend(body);
        out
    }

    fn tiny_level(blocks_number: &[u8; 3]) -> LegacyLevel {
        let mut file = vec![0u8; 39];
        for i in 1..SUBSTREAM_COUNT {
            match i {
                9 => file.extend(vec![0u8; 598]),
                11 => file.extend(vec![0u8; 4]),
                14 => file.extend(vec![2u8; 25]),
                16 => file.extend(vec![0u8; 3]),
                1 => file.extend(rle_block(&[7, 130, 3, 131])),
                _ => file.extend(rle_block(&[0u8; 4])),
            }
        }
        file.push(5 ^ 210); // level number
        file.push(3 ^ 4); // world number
        file.extend(vec![0u8; 9]);
        file.extend_from_slice(blocks_number);
        LegacyLevel::parse(file).unwrap()
    }

    #[test]
    fn header_walk_decodes_settings() {
        let level = tiny_level(b"002");
        assert_eq!(level.level_number, 5);
        assert_eq!(level.world_number, 3);
        assert_eq!(level.blocks_number, "002");
    }

    #[test]
    fn shared_blocks_marker_falls_back_to_world() {
        let level = tiny_level(b"999");
        assert_eq!(level.blocks_number, "003");
    }

    #[test]
    fn raw_and_rle_substreams_decode() {
        let level = tiny_level(b"002");
        assert_eq!(level.background_properties().unwrap().len(), 25);
        assert_eq!(level.tile_map().unwrap(), vec![(7, 130), (3, 131)]);
    }
}
