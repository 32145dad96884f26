use crate::binary::ByteCursor;
use crate::error::Result;
use crate::palette::Palette;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 55;

/// A legacy planet graphic (PLANET.nnn): a name, a VGA palette and one
/// uncompressed 64x55 indexed image.
pub struct LegacyPlanet {
    pub name: String,
    pub palette: Palette,
    pub image: Vec<u8>,
}

impl LegacyPlanet {
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.skip(2)?;
        let name_length = cursor.u8()? as usize;
        let name = cursor.string(name_length)?;
        let palette = Palette::from_vga(&cursor.bytes(768)?)?;
        let image = cursor.bytes(WIDTH * HEIGHT)?;
        Ok(LegacyPlanet {
            name,
            palette,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_palette_and_image() {
        let mut file = vec![0u8; 2];
        file.push(6);
        file.extend_from_slice(b"Orbitu");
        let mut palette = vec![0u8; 768];
        palette[30] = 63; // entry 10 red
        file.extend(palette);
        file.extend(vec![10u8; WIDTH * HEIGHT]);
        let planet = LegacyPlanet::parse(file).unwrap();
        assert_eq!(planet.name, "Orbitu");
        assert_eq!(planet.palette.rgb(10), [252, 0, 0]);
        assert_eq!(planet.image.len(), WIDTH * HEIGHT);
    }
}
