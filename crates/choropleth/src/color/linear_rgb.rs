//! Linear RGB color type
//!
//! Linear RGB is proportional to light intensity. It sits between sRGB and
//! Oklab in the conversion chain.

use super::srgb::Srgb;

/// IEC 61966-2-1: sRGB to linear
#[inline]
pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1: linear to sRGB
#[inline]
pub(crate) fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0 but are not clamped, so
/// out-of-gamut results of Oklab interpolation survive until encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_gamma_values() {
        assert!(srgb_to_linear(0.0).abs() < 1e-6);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // ((0.5 + 0.055) / 1.055)^2.4 = 0.214041...
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 0.001);
        // 1.055 * 0.5^(1/2.4) - 0.055 = 0.735356...
        assert!((linear_to_srgb(0.5) - 0.735).abs() < 0.001);
    }

    #[test]
    fn test_round_trip_all_bytes() {
        for i in 0..=255u8 {
            let srgb = Srgb::from_u8(i, i, i);
            let back = Srgb::from(LinearRgb::from(srgb));
            assert_eq!(back.to_bytes(), [i, i, i], "round trip failed for {i}");
        }
    }
}
