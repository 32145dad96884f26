use crate::binary::ByteCursor;
use crate::error::Result;
use crate::formats::legacy::{RunLengthDecoder, TRANSPARENT_INDEX};
use crate::palette::JCS_BLUE;

pub const TILE_BYTES: usize = 1024;
/// Tiles per `ok` section in the file.
const SECTION_TILES: usize = 60;

/// A legacy tileset file (BLOCKS.nnn): three RLE palette substreams, then
/// sections of 60 RLE tiles each, introduced by an ASCII `ok` sentinel.
/// All tile sections concatenate into one buffer of 1024-byte tiles.
pub struct LegacyBlocks {
    palettes: [Vec<u8>; 3],
    tiles: Vec<u8>,
    pub tile_count: usize,
}

impl LegacyBlocks {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let mut palettes: [Vec<u8>; 3] = Default::default();
        for palette in palettes.iter_mut() {
            let size = cursor.u16()? as usize + 2;
            cursor.skip(-2)?;
            let block = cursor.bytes(size)?;
            *palette = RunLengthDecoder::decode(&mut ByteCursor::new(block))?;
        }

        let mut tiles = Vec::new();
        loop {
            if cursor.remaining() <= 1 || cursor.bytes(2)? != b"ok" {
                break;
            }
            for _ in 0..SECTION_TILES {
                tiles.extend(RunLengthDecoder::decode(&mut cursor)?);
            }
        }

        let tile_count = tiles.len() / TILE_BYTES;
        Ok(LegacyBlocks {
            palettes,
            tiles,
            tile_count,
        })
    }

    /// One of the file's three palettes: 6-bit triples scaled to 8 bits,
    /// with the transparent slot forced to the editor blue.
    pub fn palette(&self, index: usize) -> Vec<[u8; 3]> {
        let bytes = &self.palettes[index];
        let mut colors: Vec<[u8; 3]> = bytes
            .chunks_exact(3)
            .map(|c| [c[0] << 2, c[1] << 2, c[2] << 2])
            .collect();
        if colors.len() <= TRANSPARENT_INDEX {
            colors.resize(TRANSPARENT_INDEX + 1, [0, 0, 0]);
        }
        colors[TRANSPARENT_INDEX] = [JCS_BLUE[0], JCS_BLUE[1], JCS_BLUE[2]];
        colors
    }

    /// 1024 palette indices of one tile, row-major.
    pub fn tile(&self, index: usize) -> &[u8] {
        &self.tiles[index * TILE_BYTES..(index + 1) * TILE_BYTES]
    }
}
