//! Color types and conversion utilities
//!
//! - **Srgb**: gamma-encoded, used for parsing and writing colors.
//! - **LinearRgb**: linear light intensity.
//! - **Oklab**: perceptual color space.
//!
//! # Example
//!
//! ```
//! use choropleth::{LinearRgb, Oklab, Srgb};
//!
//! let orange: Srgb = "#FFA500".parse().unwrap();
//! let lab = Oklab::from(LinearRgb::from(orange));
//! let back = Srgb::from(LinearRgb::from(lab));
//! assert_eq!(back.to_bytes(), orange.to_bytes());
//! ```

mod linear_rgb;
mod oklab;
mod srgb;

pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use srgb::Srgb;
