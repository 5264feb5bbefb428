//! Scene files: a map view frozen into JSON or YAML.
//!
//! A scene carries the view state (center, resolution, rotation), the
//! viewport size and the layers, which is everything a snapshot needs
//! when there is no live map component around.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::document::Viewport;
use super::geometry::Coordinate;
use super::map::{Layer, MapView, Projection};
use crate::error::ConfigError;

/// Center/resolution/rotation of a map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Map coordinate shown at the middle of the viewport
    pub center: Coordinate,
    /// Map units per pixel
    pub resolution: f64,
    /// Clockwise view rotation in radians
    #[serde(default)]
    pub rotation: f64,
}

impl ViewState {
    /// Map coordinate to pixel, with y growing downwards.
    ///
    /// Returns `None` while the resolution is not usable or when the result
    /// is not a finite number.
    pub fn pixel_from_coordinate(
        &self,
        coordinate: Coordinate,
        viewport: Viewport,
    ) -> Option<Coordinate> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) || !coordinate.is_finite() {
            return None;
        }

        let dx = coordinate.x - self.center.x;
        let dy = coordinate.y - self.center.y;
        let (sin, cos) = self.rotation.sin_cos();
        let rx = dx * cos + dy * sin;
        let ry = -dx * sin + dy * cos;

        let pixel = Coordinate::new(
            rx / self.resolution + viewport.width as f64 / 2.0,
            -ry / self.resolution + viewport.height as f64 / 2.0,
        );
        pixel.is_finite().then_some(pixel)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub view: ViewState,
    pub viewport: Viewport,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Scene {
    /// Load a scene from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let scene: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("geojson") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(
            path = %path.display(),
            layers = scene.layers.len(),
            features = scene.layers.iter().map(|l| l.features.len()).sum::<usize>(),
            "Loaded scene"
        );
        Ok(scene)
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}

impl Projection for Scene {
    fn pixel_from_coordinate(&self, coordinate: Coordinate) -> Option<Coordinate> {
        self.view.pixel_from_coordinate(coordinate, self.viewport)
    }
}

impl MapView for Scene {
    fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
