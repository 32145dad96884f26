use crate::binary::ByteCursor;
use crate::error::{Error, Result};

/// Decoder for the run-length blocks used by the 1994-era file family.
///
/// A block is a u16 payload length followed by control bytes:
///   - top bit set: the low 7 bits repeat the next literal byte
///   - nonzero below 0x80: copy that many literal bytes
///   - zero: copy one literal byte, then the block is over
/// Decoding also ends once the declared payload length has been consumed.
/// A declared length of zero is a valid empty block.
pub struct RunLengthDecoder;

impl RunLengthDecoder {
    /// Reads one block at the cursor. The cursor is left wherever decoding
    /// stopped; chained blocks continue from there.
    pub fn decode(cursor: &mut ByteCursor) -> Result<Vec<u8>> {
        let length = cursor.u16()? as usize;
        let block_start = cursor.offset();
        let mut out = Vec::new();
        while cursor.offset() < block_start + length {
            let control = Self::literal(cursor, length)?;
            if control & 0x80 != 0 {
                let repeat = (control & 0x7F) as usize;
                let value = Self::literal(cursor, length)?;
                out.extend(std::iter::repeat(value).take(repeat));
            } else if control > 0 {
                for _ in 0..control {
                    out.push(Self::literal(cursor, length)?);
                }
            } else {
                out.push(Self::literal(cursor, length)?);
                break;
            }
        }
        Ok(out)
    }

    fn literal(cursor: &mut ByteCursor, expected: usize) -> Result<u8> {
        cursor.u8().map_err(|_| Error::TruncatedInput { expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
        RunLengthDecoder::decode(&mut ByteCursor::new(bytes.to_vec()))
    }

    #[test]
    fn repeat_and_copy_runs() {
        // 0x83 = repeat next byte 3x, 0x02 = copy 2 literals
        let out = decode(&[5, 0, 0x83, 0xAA, 0x02, 0x10, 0x20]).unwrap();
        assert_eq!(out, vec![0xAA, 0xAA, 0xAA, 0x10, 0x20]);
    }

    #[test]
    fn zero_control_copies_one_and_stops() {
        let out = decode(&[5, 0, 0x00, 0x42, 0x01, 0x99, 0xFF]).unwrap();
        assert_eq!(out, vec![0x42]);
    }

    #[test]
    fn zero_length_block_is_empty() {
        assert_eq!(decode(&[0, 0]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn cursor_rests_where_decoding_stopped() {
        let mut c = ByteCursor::new(vec![5, 0, 0x00, 0x42, 0x01, 0x99, 0xFF, 0x7E]);
        RunLengthDecoder::decode(&mut c).unwrap();
        // zero control byte ended the block after its literal
        assert_eq!(c.offset(), 4);
    }

    #[test]
    fn missing_literal_is_truncated_input() {
        assert!(matches!(
            decode(&[2, 0, 0x83]),
            Err(Error::TruncatedInput { .. })
        ));
    }
}
