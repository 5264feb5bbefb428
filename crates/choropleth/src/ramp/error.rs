//! Error types for color parsing and ramp construction

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Character that is not a hexadecimal digit
    InvalidDigit(char),
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidDigit(c) => {
                write!(f, "invalid hex digit: {:?}", c)
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for ramp and threshold validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RampError {
    /// A ramp needs a start and an end color
    TooFewStops {
        /// Number of stops supplied
        found: usize,
    },
    /// No thresholds supplied
    EmptyThresholds,
    /// Threshold at `index` is NaN or infinite
    NonFiniteThreshold {
        index: usize,
    },
    /// Threshold at `index` is not strictly greater than its predecessor
    NotAscending {
        index: usize,
    },
    /// Interpolation space name not recognised
    UnknownInterpolation(String),
    /// Invalid hex color string for the stop at `index`
    ParseColor {
        index: usize,
        source: ParseColorError,
    },
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RampError::TooFewStops { found } => {
                write!(f, "color ramp needs at least 2 stops, got {}", found)
            }
            RampError::EmptyThresholds => write!(f, "threshold list cannot be empty"),
            RampError::NonFiniteThreshold { index } => {
                write!(f, "threshold at index {} is not a finite number", index)
            }
            RampError::NotAscending { index } => {
                write!(
                    f,
                    "thresholds must be strictly ascending (index {} is not greater than index {})",
                    index,
                    index - 1
                )
            }
            RampError::UnknownInterpolation(name) => {
                write!(
                    f,
                    "unknown interpolation '{}' (expected 'srgb' or 'oklab')",
                    name
                )
            }
            RampError::ParseColor { index, source } => {
                write!(f, "invalid color at stop {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for RampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RampError::ParseColor { source, .. } => Some(source),
            _ => None,
        }
    }
}
