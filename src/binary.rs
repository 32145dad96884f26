use crate::error::{Error, Result};

/// Bounds-checked little-endian reader over an owned byte buffer.
///
/// Every read either succeeds and advances the offset, or fails with
/// `Error::OutOfBounds` and leaves the offset where it was. All of the
/// file formats in this crate are little-endian throughout.
pub struct ByteCursor {
    data: Vec<u8>,
    offset: usize,
}

impl ByteCursor {
    pub fn new(data: Vec<u8>) -> Self {
        ByteCursor { data, offset: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Absolute reposition. Seeking to `len()` exactly is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::OutOfBounds {
                offset,
                len: 0,
                buffer_len: self.data.len(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// Relative reposition; negative deltas move backwards.
    pub fn skip(&mut self, delta: isize) -> Result<()> {
        let target = self.offset as isize + delta;
        if target < 0 || target as usize > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: self.offset,
                len: delta.unsigned_abs(),
                buffer_len: self.data.len(),
            });
        }
        self.offset = target as usize;
        Ok(())
    }

    fn take(&mut self, len: usize) -> Result<&[u8]> {
        let end = self.offset.checked_add(len).filter(|&e| e <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.offset..end];
                self.offset = end;
                Ok(slice)
            }
            None => Err(Error::OutOfBounds {
                offset: self.offset,
                len,
                buffer_len: self.data.len(),
            }),
        }
    }

    pub fn bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Any nonzero byte reads as true.
    pub fn bool(&mut self) -> Result<bool> {
        Ok(self.u8()? != 0)
    }

    /// Fixed-length field, trimmed at the first NUL.
    pub fn string(&mut self, len: usize) -> Result<String> {
        let raw = self.take(len)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// NUL-terminated string; consumes the terminator.
    pub fn cstring(&mut self) -> Result<String> {
        let start = self.offset;
        let end = self.data[start..]
            .iter()
            .position(|&b| b == 0)
            .map(|p| start + p)
            .ok_or(Error::OutOfBounds {
                offset: start,
                len: self.data.len() - start + 1,
                buffer_len: self.data.len(),
            })?;
        let s = String::from_utf8_lossy(&self.data[start..end]).into_owned();
        self.offset = end + 1;
        Ok(s)
    }

    /// Length-prefixed string, the length encoded 7 bits per byte with the
    /// top bit as a continuation flag.
    pub fn vstring(&mut self) -> Result<String> {
        let start = self.offset;
        let mut len = 0usize;
        let mut shift = 0;
        loop {
            let byte = match self.u8() {
                Ok(b) => b,
                Err(e) => {
                    self.offset = start;
                    return Err(e);
                }
            };
            len |= ((byte & 0x7F) as usize) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        match self.take(len) {
            Ok(raw) => Ok(String::from_utf8_lossy(raw).into_owned()),
            Err(e) => {
                self.offset = start;
                Err(e)
            }
        }
    }

    pub fn u8_n(&mut self, count: usize) -> Result<Vec<u8>> {
        self.bytes(count)
    }

    pub fn u16_n(&mut self, count: usize) -> Result<Vec<u16>> {
        self.counted(count, Self::u16)
    }

    pub fn u32_n(&mut self, count: usize) -> Result<Vec<u32>> {
        self.counted(count, Self::u32)
    }

    pub fn i32_n(&mut self, count: usize) -> Result<Vec<i32>> {
        self.counted(count, Self::i32)
    }

    pub fn bool_n(&mut self, count: usize) -> Result<Vec<bool>> {
        self.counted(count, Self::bool)
    }

    pub fn string_n(&mut self, len: usize, count: usize) -> Result<Vec<String>> {
        self.counted(count, |c| c.string(len))
    }

    // A failed element rewinds past the ones already read, so counted reads
    // keep the same position guarantee as the scalar reads.
    fn counted<T>(
        &mut self,
        count: usize,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let start = self.offset;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            match read(self) {
                Ok(value) => out.push(value),
                Err(e) => {
                    self.offset = start;
                    return Err(e);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reads_advance_in_order() {
        let mut c = ByteCursor::new(vec![0x2A, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(c.u8().unwrap(), 0x2A);
        assert_eq!(c.u16().unwrap(), 0x1234);
        assert_eq!(c.u32().unwrap(), 0x12345678);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn failed_read_leaves_offset_untouched() {
        let mut c = ByteCursor::new(vec![1, 2, 3]);
        c.seek(2).unwrap();
        assert!(c.u16().is_err());
        assert_eq!(c.offset(), 2);
        assert_eq!(c.u8().unwrap(), 3);
    }

    #[test]
    fn failed_counted_read_rewinds_past_partial_elements() {
        let mut c = ByteCursor::new(vec![0x10, 0x00, 0x20]);
        assert!(c.u16_n(2).is_err());
        assert_eq!(c.offset(), 0);
        assert_eq!(c.u16().unwrap(), 0x0010);
    }

    #[test]
    fn seek_and_replay_is_idempotent() {
        let mut c = ByteCursor::new(vec![9, 8, 7, 6]);
        c.seek(1).unwrap();
        let first = c.u16().unwrap();
        c.seek(1).unwrap();
        assert_eq!(c.u16().unwrap(), first);
    }

    #[test]
    fn skip_accepts_negative_deltas() {
        let mut c = ByteCursor::new(vec![1, 2, 3, 4]);
        c.skip(3).unwrap();
        c.skip(-2).unwrap();
        assert_eq!(c.u8().unwrap(), 2);
        assert!(c.skip(-5).is_err());
    }

    #[test]
    fn fixed_string_trims_at_nul() {
        let mut c = ByteCursor::new(b"Diamondus\0\0\0rest".to_vec());
        assert_eq!(c.string(12).unwrap(), "Diamondus");
        assert_eq!(c.offset(), 12);
    }

    #[test]
    fn cstring_consumes_terminator() {
        let mut c = ByteCursor::new(b"abc\0d".to_vec());
        assert_eq!(c.cstring().unwrap(), "abc");
        assert_eq!(c.u8().unwrap(), b'd');
    }

    #[test]
    fn vstring_reads_seven_bit_length() {
        let mut c = ByteCursor::new(b"\x05hello!".to_vec());
        assert_eq!(c.vstring().unwrap(), "hello");
        assert_eq!(c.u8().unwrap(), b'!');
    }

    #[test]
    fn counted_reads_collect() {
        let mut c = ByteCursor::new(vec![1, 0, 2, 0, 3, 0]);
        assert_eq!(c.u16_n(3).unwrap(), vec![1, 2, 3]);
    }
}
