/// One palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A full 256 color palette, as stored at the end of 16-bit archive bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
}

impl Palette {
    /// Size of a palette on disk: 256 R, G, B triples.
    pub const SIZE: usize = 768;

    /// The palette used for pictures that inherit their parent's palette: entry `i` is the
    /// gray `(i, i, i)`.
    pub fn gray_ramp() -> Self {
        let mut colors = [Rgb::default(); 256];
        for (i, color) in colors.iter_mut().enumerate() {
            let level = i as u8;
            *color = Rgb {
                r: level,
                g: level,
                b: level,
            };
        }
        Self { colors }
    }

    /// Read a palette from R, G, B triples. Missing entries are black.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        let mut colors = [Rgb::default(); 256];
        for (color, rgb) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            *color = Rgb {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            };
        }
        Self { colors }
    }

    pub fn from_colors(colors: [Rgb; 256]) -> Self {
        Self { colors }
    }

    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|color| [color.r, color.g, color.b])
            .collect()
    }

    pub fn colors(&self) -> &[Rgb; 256] {
        &self.colors
    }
}
