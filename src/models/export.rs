use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::resolution::Dimensions;

/// Everything the video service needs to render one video.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Serialized SVG snapshot
    pub document_text: String,
    /// Time-series payload, passed through as-is
    pub time_series: Value,
    pub target: Dimensions,
}

/// Field naming of the `POST /api/video` body.
///
/// The video service has been addressed with two spellings; the contract
/// version is also sent in the `X-Statmap-Contract` header so the service
/// can tell them apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireContract {
    /// `{ svg, tsdata, videoWidth, videoHeight }`
    #[default]
    V1,
    /// `{ map_svg, ts_data, videoWidth, videoHeight }`
    Legacy,
}

impl WireContract {
    pub fn version(&self) -> &'static str {
        match self {
            WireContract::V1 => "1",
            WireContract::Legacy => "0",
        }
    }

    pub fn body(&self, request: &ExportRequest) -> Value {
        let (svg_field, ts_field) = match self {
            WireContract::V1 => ("svg", "tsdata"),
            WireContract::Legacy => ("map_svg", "ts_data"),
        };
        let mut body = Map::new();
        body.insert(
            svg_field.to_string(),
            Value::String(request.document_text.clone()),
        );
        body.insert(ts_field.to_string(), request.time_series.clone());
        body.insert("videoWidth".to_string(), json!(request.target.width));
        body.insert("videoHeight".to_string(), json!(request.target.height));
        Value::Object(body)
    }
}

/// Response body of the video service; its content is opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteResponse(pub Value);

impl RemoteResponse {
    pub fn into_inner(self) -> Value {
        self.0
    }
}
