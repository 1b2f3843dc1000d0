//! Color parsing for text elements.
//!
//! Accepts a small set of names, `#RRGGBB`, and `#AARRGGBB` (alpha is dropped).

use std::fmt;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: [(&str, Color); 8] = [
    ("Black", Color::rgb(0x00, 0x00, 0x00)),
    ("White", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("Red", Color::rgb(0xFF, 0x00, 0x00)),
    ("Green", Color::rgb(0x00, 0x80, 0x00)),
    ("Blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("Orange", Color::rgb(0xFF, 0xA5, 0x00)),
    ("Yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("Purple", Color::rgb(0x80, 0x00, 0x80)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color name or hex string. Names are matched case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, color)| *color)
    }

    /// Parse, or fall back to black with a warning.
    pub fn parse_or_black(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            tracing::warn!("Unrecognised color '{}', using #000000", value);
            Self::BLACK
        })
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let rgb = match hex.len() {
            6 => hex,
            8 => hex.get(2..)?,
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(rgb.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Name from the known set, if this color has one.
    pub fn name(&self) -> Option<&'static str> {
        NAMED_COLORS
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }

    /// `#RRGGBB` form
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.to_hex()),
        }
    }
}
