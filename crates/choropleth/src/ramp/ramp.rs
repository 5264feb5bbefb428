//! Color ramps
//!
//! A ramp is an ordered list of color stops. Each threshold gets one
//! anchor color sampled evenly along the ramp, and a value inside a
//! bucket is colored by interpolating between the anchors of the
//! thresholds that bound it.

use std::str::FromStr;

use super::thresholds::{Bucket, Thresholds};
use super::RampError;
use crate::color::{LinearRgb, Oklab, Srgb};

/// Color space used to blend between two colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Per-channel linear blend of 8-bit sRGB values, truncated toward zero
    #[default]
    Srgb,
    /// Linear blend in Oklab
    Oklab,
}

impl FromStr for Interpolation {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(Interpolation::Srgb),
            "oklab" => Ok(Interpolation::Oklab),
            other => Err(RampError::UnknownInterpolation(other.to_string())),
        }
    }
}

impl Interpolation {
    /// Blend `from` towards `to` by `t` (0.0..=1.0).
    pub fn mix(self, from: Srgb, to: Srgb, t: f64) -> Srgb {
        match self {
            Interpolation::Srgb => {
                let a = from.to_bytes();
                let b = to.to_bytes();
                let channel = |i: usize| {
                    let start = a[i] as f64;
                    let end = b[i] as f64;
                    (start + (end - start) * t).floor().clamp(0.0, 255.0) as u8
                };
                Srgb::from_u8(channel(0), channel(1), channel(2))
            }
            Interpolation::Oklab => {
                let a = Oklab::from(LinearRgb::from(from));
                let b = Oklab::from(LinearRgb::from(to));
                Srgb::from(LinearRgb::from(a.lerp(b, t as f32)))
            }
        }
    }
}

/// An ordered list of at least two color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<Srgb>,
    interpolation: Interpolation,
}

impl ColorRamp {
    pub fn new(stops: Vec<Srgb>) -> Result<Self, RampError> {
        if stops.len() < 2 {
            return Err(RampError::TooFewStops { found: stops.len() });
        }
        Ok(Self {
            stops,
            interpolation: Interpolation::default(),
        })
    }

    /// Build a ramp from hex color strings.
    ///
    /// ```
    /// use choropleth::ColorRamp;
    ///
    /// let ramp = ColorRamp::from_hex(&["#FFFFFF", "#FFFF00", "#FFA500"]).unwrap();
    /// assert_eq!(ramp.stops().len(), 3);
    /// assert!(ColorRamp::from_hex(&["#FFFFFF"]).is_err());
    /// ```
    pub fn from_hex<S: AsRef<str>>(stops: &[S]) -> Result<Self, RampError> {
        let parsed = stops
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<Srgb>()
                    .map_err(|source| RampError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn stops(&self) -> &[Srgb] {
        &self.stops
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn start(&self) -> Srgb {
        self.stops[0]
    }

    pub fn end(&self) -> Srgb {
        self.stops[self.stops.len() - 1]
    }

    /// Color at `position` along the whole ramp (0.0 = start, 1.0 = end).
    ///
    /// Multi-stop ramps are piecewise linear between neighbouring stops.
    pub fn sample(&self, position: f64) -> Srgb {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        let segments = self.stops.len() - 1;
        let scaled = position * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;
        self.interpolation
            .mix(self.stops[index], self.stops[index + 1], local)
    }

    /// Anchor color of threshold `index` out of `count`.
    fn anchor(&self, index: usize, count: usize) -> Srgb {
        if count < 2 {
            return self.start();
        }
        self.sample(index as f64 / (count - 1) as f64)
    }

    /// One anchor color per threshold, first = ramp start, last = ramp end.
    pub fn anchors(&self, thresholds: &Thresholds) -> Vec<Srgb> {
        (0..thresholds.len())
            .map(|i| self.anchor(i, thresholds.len()))
            .collect()
    }

    /// Map a metric value to its choropleth color.
    ///
    /// Values below the first threshold take the ramp start color, values at
    /// or beyond the last threshold take the ramp end color. Anything in
    /// between is interpolated inside its bucket.
    ///
    /// ```
    /// use choropleth::{ColorRamp, Thresholds};
    ///
    /// let thresholds = Thresholds::new(vec![0.0, 100.0]).unwrap();
    /// let ramp = ColorRamp::from_hex(&["#000000", "#C8C8C8"]).unwrap();
    /// assert_eq!(ramp.color_for(50.0, &thresholds).to_hex(), "#646464");
    /// ```
    pub fn color_for(&self, value: f64, thresholds: &Thresholds) -> Srgb {
        match thresholds.bucket_of(value) {
            Bucket::BelowFirst => self.start(),
            Bucket::AtOrAboveLast => self.end(),
            Bucket::Between(index) => {
                let count = thresholds.len();
                let from = self.anchor(index, count);
                let to = self.anchor(index + 1, count);
                let t = thresholds.fraction_within(index, value);
                self.interpolation.mix(from, to, t)
            }
        }
    }
}
