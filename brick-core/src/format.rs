use std::collections::HashMap;
use std::fmt;

/// A 24-bit color from the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse exactly six hex digits (no leading `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// What a palette code resolves to: a solid color, or no pixel at all.
/// Transparent cells separate runs and are never drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Solid(Rgb),
    None,
}

/// Longest run a single block may span.
pub const MAX_RUN: usize = 4;

/// One horizontal run of same-colored cells, 1 to MAX_RUN long.
/// `pins[i]` says whether cell `left + i` gets a stud on its top edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub left: usize,
    pub row: usize,
    pub length: usize,
    pub pins: Vec<bool>,
    pub color: Rgb,
}

/// A parsed pixmap: palette plus grid of fixed-width codes, row-major.
/// Built once by the parser and read-only afterward.
#[derive(Clone, Debug)]
pub struct Pixmap {
    pub width: usize,
    pub height: usize,
    pub colormap: HashMap<String, Color>,
    pub rows: Vec<Vec<String>>,
}

impl Pixmap {
    /// Resolve the color of one cell. The parser guarantees every stored
    /// code has a colormap entry.
    pub fn color_at(&self, row: usize, col: usize) -> Color {
        self.colormap[self.rows[row][col].as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("FF0000"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(Rgb::from_hex("00ff7f"), Some(Rgb { r: 0, g: 255, b: 127 }));
        assert_eq!(Rgb::from_hex("FF000"), None);
        assert_eq!(Rgb::from_hex("FF00000"), None);
        assert_eq!(Rgb::from_hex("GG0000"), None);
    }

    #[test]
    fn hex_display_roundtrip() {
        let c = Rgb::from_hex("1a2b3c").unwrap();
        assert_eq!(c.to_string(), "#1A2B3C");
    }
}
