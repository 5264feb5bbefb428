//! Test fixtures: small maps, scenes and time series.

use serde_json::json;

use statmap::models::{
    Coordinate, Feature, Geometry, Layer, Polygon, StaticMap, Style, TimeSeriesData,
};

/// Projection that uses map coordinates as pixels
pub fn identity(c: Coordinate) -> Option<Coordinate> {
    Some(c)
}

pub type IdentityMap = StaticMap<fn(Coordinate) -> Option<Coordinate>>;

pub fn map_with(layers: Vec<Layer>) -> IdentityMap {
    StaticMap::new(layers, identity as fn(Coordinate) -> Option<Coordinate>)
}

/// One triangular region, all points inside an 800x450 viewport
pub fn triangle(id: &str) -> Feature {
    Feature::new(
        id,
        Geometry::Polygon(Polygon::new(vec![vec![
            Coordinate::new(100.0, 50.0),
            Coordinate::new(700.0, 50.0),
            Coordinate::new(400.0, 400.5),
        ]])),
    )
}

pub fn regions_layer(features: Vec<Feature>) -> Layer {
    Layer::vector(
        "regions",
        features,
        Style::default().with_stroke("#333333", 0.5),
    )
}

/// Population series with the census thresholds
pub fn population() -> TimeSeriesData {
    serde_json::from_value(population_json()).expect("valid fixture")
}

pub fn population_json() -> serde_json::Value {
    json!({
        "meta": {
            "name": "Population",
            "minYear": 1990,
            "maxYear": 1992,
            "minValue": 90,
            "maxValue": 650000,
            "choropleth_tresholds": [75, 750, 7500, 50000, 500000]
        },
        "regiondata": {
            "KU091": { "1990": 492400, "1991": 497542, "1992": 501514 },
            "KU049": { "1990": 172000, "1991": 175000, "1992": 179000 },
            "KU005": { "1990": 100, "1991": 95, "1992": 90 }
        }
    })
}

/// Scene YAML with one vector layer (two regions) and a tile basemap
pub const SCENE_YAML: &str = r##"
view:
  center: [25.0, 62.0]
  resolution: 0.01
viewport:
  width: 800
  height: 450
layers:
  - name: basemap
    kind: tile
  - name: municipalities
    style:
      stroke: "#333333"
      strokeWidth: 0.5
    features:
      - natcode: "091"
        geometry:
          type: Polygon
          coordinates: [[[24.9, 62.1], [25.1, 62.1], [25.0, 61.9]]]
      - natcode: "049"
        geometry:
          type: MultiPolygon
          coordinates:
            - [[[23.0, 62.0], [23.5, 62.0], [23.5, 62.5]]]
            - [[[26.0, 61.0], [26.5, 61.0], [26.5, 61.5], [26.0, 61.5]]]
"##;
