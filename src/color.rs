use std::str::FromStr;

use palette::white_point::D65;
use palette::{FromColor, IntoColor, Srgb};

use crate::error::{Error, Result};

/// CIELAB under D65, the space all perceptual distances are computed in.
pub type Lab = palette::Lab<D65, f64>;

/// An 8-bit sRGB color as found in sprite escape codes and pywal schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    ///
    /// The leading `#` is required and exactly six hex digits must follow.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColorFormat(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB: sRGB gamma decoding, linear RGB to XYZ, XYZ to Lab.
    pub fn to_lab(self) -> Lab {
        let srgb: Srgb<f64> = self.to_srgb_u8().into_format();
        srgb.into_color()
    }

    /// Create from CIELAB, clamping out-of-gamut results.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb: Srgb<f64> = Srgb::from_color(lab);
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(srgb.red),
            g: channel(srgb.green),
            b: channel(srgb.blue),
        }
    }
}

/// Parse `hex` and convert it straight to Lab.
pub fn hex_to_lab(hex: &str) -> Result<Lab> {
    Color::from_hex(hex).map(Color::to_lab)
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
