use crate::error::{Error, Result};
use image::Rgba;

/// The editor's canonical "nothing here" blue, used behind masks and
/// transparent tileset slots.
pub const JCS_BLUE: Rgba<u8> = Rgba([87, 0, 203, 255]);

/// A 256-entry RGB palette. Index 0 is transparent by convention in every
/// format this crate reads.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: [[u8; 3]; 256],
}

impl Palette {
    /// 256 x 4-byte RGBX entries, as stored in tileset files. The fourth
    /// byte is padding, not alpha.
    pub fn from_rgbx(data: &[u8]) -> Result<Self> {
        if data.len() < 1024 {
            return Err(Error::CorruptHeader(format!(
                "palette blob is {} bytes, need 1024",
                data.len()
            )));
        }
        let mut colors = [[0u8; 3]; 256];
        for (i, entry) in data.chunks_exact(4).take(256).enumerate() {
            colors[i] = [entry[0], entry[1], entry[2]];
        }
        Ok(Palette { colors })
    }

    /// 256 x 3-byte VGA triples with 6-bit components, scaled up to 8 bits.
    pub fn from_vga(data: &[u8]) -> Result<Self> {
        if data.len() < 768 {
            return Err(Error::CorruptHeader(format!(
                "VGA palette blob is {} bytes, need 768",
                data.len()
            )));
        }
        let mut colors = [[0u8; 3]; 256];
        for (i, entry) in data.chunks_exact(3).take(256).enumerate() {
            colors[i] = [entry[0] << 2, entry[1] << 2, entry[2] << 2];
        }
        Ok(Palette { colors })
    }

    /// JASC-PAL text format: two header lines, a count line, then one
    /// "r g b" line per entry.
    pub fn from_jasc(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        if lines.next().map(str::trim) != Some("JASC-PAL") {
            return Err(Error::CorruptHeader("not a JASC-PAL file".into()));
        }
        lines.next(); // version
        lines.next(); // count
        let mut colors = [[0u8; 3]; 256];
        for (i, line) in lines.take(256).enumerate() {
            let mut parts = line.split_whitespace();
            for c in 0..3 {
                colors[i][c] = parts
                    .next()
                    .and_then(|p| p.parse().ok())
                    .ok_or_else(|| {
                        Error::CorruptHeader(format!("bad JASC-PAL entry on line {}", i + 4))
                    })?;
            }
        }
        Ok(Palette { colors })
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }

    /// Opaque colour for an index; index 0 maps to fully transparent.
    pub fn rgba(&self, index: u8) -> Rgba<u8> {
        if index == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let [r, g, b] = self.colors[index as usize];
        Rgba([r, g, b, 255])
    }

    /// Same as `rgba` but with an explicit alpha for nonzero indices.
    pub fn rgba_with_alpha(&self, index: u8, alpha: u8) -> Rgba<u8> {
        if index == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let [r, g, b] = self.colors[index as usize];
        Rgba([r, g, b, alpha])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgbx_drops_padding_byte() {
        let mut blob = vec![0u8; 1024];
        blob[4] = 10;
        blob[5] = 20;
        blob[6] = 30;
        blob[7] = 99; // padding
        let pal = Palette::from_rgbx(&blob).unwrap();
        assert_eq!(pal.rgb(1), [10, 20, 30]);
        assert_eq!(pal.rgba(1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn vga_scales_six_bit_components() {
        let mut blob = vec![0u8; 768];
        blob[3] = 63;
        blob[4] = 1;
        let pal = Palette::from_vga(&blob).unwrap();
        assert_eq!(pal.rgb(1), [252, 4, 0]);
    }

    #[test]
    fn index_zero_is_transparent() {
        let pal = Palette::from_vga(&vec![63u8; 768]).unwrap();
        assert_eq!(pal.rgba(0)[3], 0);
        assert_eq!(pal.rgba(1)[3], 255);
    }

    #[test]
    fn jasc_text_parses() {
        let text = "JASC-PAL\n0100\n256\n0 0 0\n255 128 64\n";
        let pal = Palette::from_jasc(text).unwrap();
        assert_eq!(pal.rgb(1), [255, 128, 64]);
    }
}
