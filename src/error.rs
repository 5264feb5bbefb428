use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Feature {feature_id} has no geometry")]
    GeometryMissing { feature_id: String },

    #[error("Unsupported geometry type: {kind}")]
    UnsupportedGeometry { kind: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),

    #[error("Snapshot serialized to an empty document")]
    EmptySerialization,

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Failed to encode time series: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Video service error: {0}")]
    RemoteService(#[from] RemoteServiceError),
}

#[derive(Debug, Error)]
pub enum RemoteServiceError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response body is not valid JSON: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color ramp: {0}")]
    Ramp(#[from] choropleth::RampError),

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
