use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::binary::ByteCursor;
use crate::error::{Error, Result};

/// Fixed header size shared by the level and tileset formats.
pub const HEADER_SIZE: usize = 262;

/// Size table for the four zlib substreams of a container: interleaved
/// (compressed, uncompressed) u32 pairs, in file order.
#[derive(Clone, Copy, Debug)]
pub struct SubstreamTable {
    sizes: [(usize, usize); 4],
    data_start: usize,
}

impl SubstreamTable {
    /// Reads the four size pairs at the cursor. `data_start` is the file
    /// offset where substream 1's compressed bytes begin.
    pub fn read(cursor: &mut ByteCursor, data_start: usize) -> Result<Self> {
        let mut sizes = [(0, 0); 4];
        for pair in sizes.iter_mut() {
            pair.0 = cursor.u32()? as usize;
            pair.1 = cursor.u32()? as usize;
        }
        Ok(SubstreamTable { sizes, data_start })
    }

    pub fn compressed_len(&self, index: usize) -> usize {
        self.sizes[index - 1].0
    }

    pub fn uncompressed_len(&self, index: usize) -> usize {
        self.sizes[index - 1].1
    }

    /// File offset of substream `index` (1-based): the data start plus the
    /// compressed sizes of every earlier substream.
    pub fn offset_of(&self, index: usize) -> usize {
        self.data_start + self.sizes[..index - 1].iter().map(|s| s.0).sum::<usize>()
    }

    /// Inflates substream `index` out of `file`, enforcing the declared
    /// uncompressed size exactly.
    pub fn inflate(&self, file: &[u8], index: usize) -> Result<Vec<u8>> {
        let start = self.offset_of(index);
        let (compressed, expected) = (self.compressed_len(index), self.uncompressed_len(index));
        let end = start.checked_add(compressed).filter(|&e| e <= file.len()).ok_or(
            Error::OutOfBounds {
                offset: start,
                len: compressed,
                buffer_len: file.len(),
            },
        )?;

        let mut out = Vec::with_capacity(expected);
        let mut decoder = ZlibDecoder::new(&file[start..end]);
        decoder
            .read_to_end(&mut out)
            .map_err(|e| Error::CorruptHeader(format!("substream {index}: {e}")))?;
        if out.len() != expected {
            return Err(Error::DecompressionMismatch {
                index,
                expected,
                actual: out.len(),
            });
        }
        Ok(out)
    }
}

/// A file (or file region) holding four zlib substreams, inflated lazily
/// and cached after first access.
pub struct Substreams {
    file: Vec<u8>,
    table: SubstreamTable,
    cache: RefCell<HashMap<usize, Vec<u8>>>,
}

impl Substreams {
    pub fn new(file: Vec<u8>, table: SubstreamTable) -> Self {
        Substreams {
            file,
            table,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn table(&self) -> &SubstreamTable {
        &self.table
    }

    pub fn file(&self) -> &[u8] {
        &self.file
    }

    /// A cursor over substream `index` (1-based).
    pub fn substream(&self, index: usize) -> Result<ByteCursor> {
        let mut cache = self.cache.borrow_mut();
        if !cache.contains_key(&index) {
            cache.insert(index, self.table.inflate(&self.file, index)?);
        }
        Ok(ByteCursor::new(cache[&index].clone()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    pub fn deflate(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    /// Builds a file with a size table at `table_offset` and the compressed
    /// streams immediately after `data_start` bytes of header.
    pub fn build_container(streams: [&[u8]; 4], data_start: usize, table_offset: usize) -> Vec<u8> {
        let packed: Vec<Vec<u8>> = streams.iter().map(|s| deflate(s)).collect();
        let mut file = vec![0u8; data_start];
        let mut table = table_offset;
        for (packed, raw) in packed.iter().zip(streams.iter()) {
            file[table..table + 4].copy_from_slice(&(packed.len() as u32).to_le_bytes());
            file[table + 4..table + 8].copy_from_slice(&(raw.len() as u32).to_le_bytes());
            table += 8;
        }
        for packed in &packed {
            file.extend_from_slice(packed);
        }
        file
    }

    #[test]
    fn offsets_accumulate_compressed_sizes() {
        let file = build_container([b"one", b"twotwo", b"3", b"elevenbytes"], 262, 230);
        let mut cursor = ByteCursor::new(file.clone());
        cursor.seek(230).unwrap();
        let table = SubstreamTable::read(&mut cursor, HEADER_SIZE).unwrap();
        assert_eq!(table.offset_of(1), 262);
        assert_eq!(
            table.offset_of(3),
            262 + table.compressed_len(1) + table.compressed_len(2)
        );
    }

    #[test]
    fn substreams_inflate_to_declared_sizes() {
        let file = build_container([b"one", b"twotwo", b"3", b"elevenbytes"], 262, 230);
        let mut cursor = ByteCursor::new(file.clone());
        cursor.seek(230).unwrap();
        let table = SubstreamTable::read(&mut cursor, HEADER_SIZE).unwrap();
        let streams = Substreams::new(file, table);
        assert_eq!(streams.substream(2).unwrap().into_inner(), b"twotwo");
        assert_eq!(streams.substream(4).unwrap().into_inner(), b"elevenbytes");
        // cached path
        assert_eq!(streams.substream(2).unwrap().into_inner(), b"twotwo");
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let mut file = build_container([b"one", b"twotwo", b"3", b"elevenbytes"], 262, 230);
        // lie about substream 1's uncompressed size
        file[234..238].copy_from_slice(&9u32.to_le_bytes());
        let mut cursor = ByteCursor::new(file.clone());
        cursor.seek(230).unwrap();
        let table = SubstreamTable::read(&mut cursor, HEADER_SIZE).unwrap();
        let streams = Substreams::new(file, table);
        assert!(matches!(
            streams.substream(1),
            Err(Error::DecompressionMismatch {
                index: 1,
                expected: 9,
                actual: 3
            })
        ));
    }
}
