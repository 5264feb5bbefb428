//! Ascending bucket boundaries for a metric

use super::RampError;

/// Where a value falls relative to a set of thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Smaller than the first threshold (or NaN)
    BelowFirst,
    /// In `[thresholds[i], thresholds[i + 1])`
    Between(usize),
    /// Greater than or equal to the last threshold
    AtOrAboveLast,
}

/// A validated, strictly ascending, non-empty list of finite thresholds.
///
/// # Example
///
/// ```
/// use choropleth::ramp::{Bucket, Thresholds};
///
/// let t = Thresholds::new(vec![75.0, 750.0, 7500.0]).unwrap();
/// assert_eq!(t.bucket_of(100.0), Bucket::Between(0));
/// assert_eq!(t.bucket_of(750.0), Bucket::Between(1));
/// assert_eq!(t.bucket_of(9000.0), Bucket::AtOrAboveLast);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    values: Vec<f64>,
}

impl Thresholds {
    pub fn new(values: Vec<f64>) -> Result<Self, RampError> {
        if values.is_empty() {
            return Err(RampError::EmptyThresholds);
        }
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(RampError::NonFiniteThreshold { index });
            }
            if index > 0 && *value <= values[index - 1] {
                return Err(RampError::NotAscending { index });
            }
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Locate the bucket for `value`.
    ///
    /// The bucket index is derived from the first threshold strictly greater
    /// than `value`.
    pub fn bucket_of(&self, value: f64) -> Bucket {
        // Count of thresholds <= value; NaN compares false everywhere.
        let upper = self.values.partition_point(|&t| t <= value);
        if upper == 0 {
            Bucket::BelowFirst
        } else if upper == self.values.len() {
            Bucket::AtOrAboveLast
        } else {
            Bucket::Between(upper - 1)
        }
    }

    /// Fractional position of `value` inside bucket `index`, in 0.0..1.0.
    pub fn fraction_within(&self, index: usize, value: f64) -> f64 {
        let lo = self.values[index];
        let hi = self.values[index + 1];
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

impl TryFrom<Vec<f64>> for Thresholds {
    type Error = RampError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
