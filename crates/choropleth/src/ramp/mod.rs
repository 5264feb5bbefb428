//! Threshold bucketing and color ramps
//!
//! [`Thresholds`] validates and searches the bucket boundaries,
//! [`ColorRamp`] maps a position in a bucket to a color.

mod error;
mod ramp;
mod thresholds;

pub use error::{ParseColorError, RampError};
pub use ramp::{ColorRamp, Interpolation};
pub use thresholds::{Bucket, Thresholds};
