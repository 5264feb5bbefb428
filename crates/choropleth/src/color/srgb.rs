//! sRGB color type
//!
//! sRGB is the color space of style attributes and image files. Parsing
//! from and formatting to `#RRGGBB` hex notation lives here.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::{linear_to_srgb, LinearRgb};
use crate::ramp::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use choropleth::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Format as an uppercase `#RRGGBB` hex string.
    ///
    /// # Example
    /// ```
    /// use choropleth::Srgb;
    /// assert_eq!(Srgb::from_u8(255, 165, 0).to_hex(), "#FFA500");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r.clamp(0.0, 1.0)),
            g: linear_to_srgb(linear.g.clamp(0.0, 1.0)),
            b: linear_to_srgb(linear.b.clamp(0.0, 1.0)),
        }
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use choropleth::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.r, 1.0);
    ///
    /// let red: Srgb = "f00".parse().unwrap();
    /// assert_eq!(red.to_hex(), "#FF0000");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        // from_str_radix alone would accept a leading sign
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
