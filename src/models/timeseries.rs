//! Time-series metric data driving choropleth styling and video export.
//!
//! The JSON shape is the one the video service consumes:
//!
//! ```json
//! {
//!   "meta": {
//!     "name": "Population", "minYear": 1990, "maxYear": 2020,
//!     "minValue": 90, "maxValue": 650000,
//!     "choropleth_tresholds": [75, 750, 7500, 50000, 500000]
//!   },
//!   "regiondata": { "KU091": { "1990": 492400, "1991": 497542 } }
//! }
//! ```
//!
//! Unknown fields are kept and sent along untouched.

use choropleth::{RampError, Thresholds};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Year-string → metric value (null for missing observations)
pub type YearValues = BTreeMap<String, Option<f64>>;

/// Prefixed region code → yearly values
pub type RegionData = BTreeMap<String, YearValues>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesMeta {
    pub name: String,

    #[serde(rename = "minYear")]
    pub min_year: i32,

    #[serde(rename = "maxYear")]
    pub max_year: i32,

    #[serde(rename = "minValue")]
    pub min_value: f64,

    #[serde(rename = "maxValue")]
    pub max_value: f64,

    /// Ascending bucket boundaries; the wire name keeps its historic spelling
    #[serde(rename = "choropleth_tresholds", alias = "thresholds", default)]
    pub thresholds: Vec<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub meta: TimeSeriesMeta,

    #[serde(default)]
    pub regiondata: RegionData,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Build the region-data key for a feature natcode, e.g. `KU` + `091`.
pub fn region_key(prefix: &str, natcode: &str) -> String {
    format!("{prefix}{natcode}")
}

impl TimeSeriesData {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            name = %data.meta.name,
            regions = data.regiondata.len(),
            "Loaded time series"
        );
        Ok(data)
    }

    /// Metric value of a region (full, prefixed key) in a year.
    pub fn value_for(&self, region: &str, year: i32) -> Option<f64> {
        self.regiondata
            .get(region)
            .and_then(|years| years.get(&year.to_string()))
            .copied()
            .flatten()
    }

    /// Metric value for a feature natcode, applying the region prefix.
    pub fn value_for_natcode(&self, prefix: &str, natcode: &str, year: i32) -> Option<f64> {
        self.value_for(&region_key(prefix, natcode), year)
    }

    pub fn thresholds(&self) -> Result<Thresholds, RampError> {
        Thresholds::new(self.meta.thresholds.clone())
    }

    /// Inclusive year span covered by the series; empty when min > max.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.meta.min_year..=self.meta.max_year
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
