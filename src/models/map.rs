//! Map layers, features and the read-only capability surface the
//! snapshot pipeline needs from a map display.

use serde::{Deserialize, Serialize};

use super::geometry::{Coordinate, Geometry};

/// Default stroke width when a style leaves it unset
pub const DEFAULT_STROKE_WIDTH: f64 = 0.2;

/// Presentation attributes shared by the features of a layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    #[serde(
        default,
        alias = "strokeWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_width: Option<f64>,
}

impl Style {
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Feature layer; contributes paths to snapshots
    #[default]
    Vector,
    /// Raster basemap; never part of a vector snapshot
    Tile,
}

/// A region (or line) on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Natcode or other stable identifier
    #[serde(alias = "natcode")]
    pub id: String,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// Per-feature override set by choropleth styling; the layer style
    /// applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry: Some(geometry),
            style: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub kind: LayerKind,

    #[serde(default)]
    pub features: Vec<Feature>,

    #[serde(default)]
    pub style: Style,
}

impl Layer {
    pub fn vector(name: impl Into<String>, features: Vec<Feature>, style: Style) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Vector,
            features,
            style,
        }
    }

    pub fn is_vector(&self) -> bool {
        self.kind == LayerKind::Vector
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut [Feature] {
        &mut self.features
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Maps a map-space coordinate to a pixel coordinate of the current view.
///
/// Returns `None` when the coordinate cannot be projected (outside the
/// valid range, or the view is not ready yet).
pub trait Projection {
    fn pixel_from_coordinate(&self, coordinate: Coordinate) -> Option<Coordinate>;
}

impl<F> Projection for F
where
    F: Fn(Coordinate) -> Option<Coordinate>,
{
    fn pixel_from_coordinate(&self, coordinate: Coordinate) -> Option<Coordinate> {
        self(coordinate)
    }
}

/// Read-only view of a rendered map: its layers plus the live projection.
pub trait MapView: Projection {
    fn layers(&self) -> &[Layer];
}

/// A fixed set of layers paired with a projection.
///
/// Handy when the layers are not owned by a long-lived map component.
pub struct StaticMap<P> {
    pub layers: Vec<Layer>,
    pub projection: P,
}

impl<P: Projection> StaticMap<P> {
    pub fn new(layers: Vec<Layer>, projection: P) -> Self {
        Self { layers, projection }
    }
}

impl<P: Projection> Projection for StaticMap<P> {
    fn pixel_from_coordinate(&self, coordinate: Coordinate) -> Option<Coordinate> {
        self.projection.pixel_from_coordinate(coordinate)
    }
}

impl<P: Projection> MapView for StaticMap<P> {
    fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
