//! Flat RGB colors shared by the simulation and every surface backend.

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Lime text color, also used for the background dots.
    pub const FOREGROUND: Rgb = Rgb::from_hex(0x9ade00);
    /// Brighter lime for particles pushed away by the pointer.
    pub const SCATTERED: Rgb = Rgb::from_hex(0xc4ff00);
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// CSS hex notation, e.g. `#9ade00`.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_components() {
        let c = Rgb::from_hex(0x9ade00);
        assert_eq!(c, Rgb::new(0x9a, 0xde, 0x00));
    }

    #[test]
    fn css_is_lowercase_hex() {
        assert_eq!(Rgb::SCATTERED.to_css(), "#c4ff00");
        assert_eq!(Rgb::BLACK.to_css(), "#000000");
    }
}
