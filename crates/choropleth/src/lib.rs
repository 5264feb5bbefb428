//! choropleth: color ramps and threshold bucketing for thematic maps
//!
//! A choropleth map fills each region with a color that represents a scalar
//! metric. This crate turns a metric value into that color:
//!
//! 1. [`Thresholds`] partition the value domain into ordered buckets.
//! 2. A [`ColorRamp`] provides one anchor color per threshold.
//! 3. [`ColorRamp::color_for()`] finds the bucket containing a value and
//!    interpolates between the two anchors bounding it.
//!
//! # Quick Start
//!
//! ```
//! use choropleth::{ColorRamp, Srgb, Thresholds};
//!
//! let thresholds = Thresholds::new(vec![75.0, 750.0, 7500.0, 50000.0, 500000.0]).unwrap();
//! let ramp = ColorRamp::from_hex(&["#FFFFFF", "#FF0000"]).unwrap();
//!
//! // Below the first threshold clamps to the ramp start
//! assert_eq!(ramp.color_for(10.0, &thresholds).to_hex(), "#FFFFFF");
//!
//! // Beyond the last threshold clamps to the ramp end
//! assert_eq!(ramp.color_for(1e9, &thresholds), Srgb::from_u8(255, 0, 0));
//! ```
//!
//! # Color Spaces
//!
//! - [`Srgb`]: gamma-encoded color as written into documents (`#RRGGBB`)
//! - [`LinearRgb`]: linear light, the bridge into Oklab
//! - [`Oklab`]: perceptually uniform; used for perceptual interpolation and
//!   for measuring lightness
//!
//! Interpolation happens on 8-bit sRGB channels by default, which is what
//! most web map styling does. [`Interpolation::Oklab`] interpolates in Oklab
//! instead and gives evenly spaced perceived steps.

pub mod color;
pub mod ramp;

pub use color::{LinearRgb, Oklab, Srgb};
pub use ramp::{ColorRamp, Interpolation, ParseColorError, RampError, Thresholds};
