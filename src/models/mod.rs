pub mod config;
pub mod document;
pub mod export;
pub mod geometry;
pub mod map;
pub mod resolution;
pub mod scene;
pub mod timeseries;

pub use config::{AppConfig, ChoroplethConfig, ConfigSource, ServiceConfig};
pub use document::{Document, PathElement, Viewport};
pub use export::{ExportRequest, RemoteResponse, WireContract};
pub use geometry::{Coordinate, Geometry, GeometryKind, Polygon};
pub use map::{Feature, Layer, LayerKind, MapView, Projection, StaticMap, Style};
pub use resolution::{Dimensions, ResolutionTable, ResolutionTier};
pub use scene::{Scene, ViewState};
pub use timeseries::{RegionData, TimeSeriesData, TimeSeriesMeta, YearValues};
