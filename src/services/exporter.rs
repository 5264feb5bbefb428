//! Export orchestration: snapshot the map, then hand it to the video service.

use std::sync::Arc;

use crate::error::ExportError;
use crate::models::{
    Dimensions, ExportRequest, MapView, RemoteResponse, ResolutionTable, ResolutionTier,
    TimeSeriesData, Viewport,
};
use crate::rendering::{DocumentBuilder, Snapshot};

use super::video_client::VideoService;

/// Builds snapshots and submits video exports.
///
/// Every structural problem (missing or unsupported geometry, an empty
/// document) is reported before any request leaves the process. Overlapping
/// exports of the same map are not guarded against; callers trigger one at
/// a time.
pub struct Exporter {
    service: Arc<dyn VideoService>,
    resolutions: ResolutionTable,
}

impl Exporter {
    pub fn new(service: Arc<dyn VideoService>, resolutions: ResolutionTable) -> Self {
        Self {
            service,
            resolutions,
        }
    }

    pub fn resolutions(&self) -> &ResolutionTable {
        &self.resolutions
    }

    pub fn dimensions(&self, tier: ResolutionTier) -> Dimensions {
        self.resolutions.resolve(tier)
    }

    /// Serialize the current map view as a standalone SVG document.
    pub fn snapshot_svg<M>(&self, map: &M, viewport: Viewport) -> Result<String, ExportError>
    where
        M: MapView + ?Sized,
    {
        let Snapshot { document, .. } = DocumentBuilder::build(map, viewport)?;
        let svg = document.to_svg();
        if svg.trim().is_empty() {
            return Err(ExportError::EmptySerialization);
        }
        Ok(svg)
    }

    /// Build the request for a video export without sending it.
    pub fn prepare<M>(
        &self,
        map: &M,
        viewport: Viewport,
        time_series: &TimeSeriesData,
        tier: ResolutionTier,
    ) -> Result<ExportRequest, ExportError>
    where
        M: MapView + ?Sized,
    {
        let document_text = self.snapshot_svg(map, viewport)?;
        let target = self.resolutions.resolve(tier);

        Ok(ExportRequest {
            document_text,
            time_series: time_series.to_json_value()?,
            target,
        })
    }

    /// Snapshot `map` and submit it with `time_series` for rendering at `tier`.
    pub async fn export_video<M>(
        &self,
        map: &M,
        viewport: Viewport,
        time_series: &TimeSeriesData,
        tier: ResolutionTier,
    ) -> Result<RemoteResponse, ExportError>
    where
        M: MapView + ?Sized,
    {
        let request = self.prepare(map, viewport, time_series, tier)?;

        tracing::info!(
            tier = %tier,
            target = %request.target,
            series = %time_series.meta.name,
            "Exporting video"
        );

        match self.service.submit(&request).await {
            Ok(response) => {
                tracing::info!(tier = %tier, "Video export accepted");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(error = %e, tier = %tier, "Video export failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RemoteServiceError, SnapshotError};
    use crate::models::{Coordinate, Feature, Geometry, Layer, Polygon, StaticMap, Style};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records submitted requests and answers with a fixed result.
    struct FakeVideoService {
        requests: Mutex<Vec<ExportRequest>>,
        fail_with_status: Option<u16>,
    }

    impl FakeVideoService {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail_with_status: None,
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail_with_status: Some(status),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VideoService for FakeVideoService {
        async fn submit(
            &self,
            request: &ExportRequest,
        ) -> Result<RemoteResponse, RemoteServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.fail_with_status {
                Some(status) => Err(RemoteServiceError::Status {
                    status,
                    body: "boom".to_string(),
                }),
                None => Ok(RemoteResponse(json!({ "video": "out.mp4" }))),
            }
        }
    }

    fn identity(c: Coordinate) -> Option<Coordinate> {
        Some(c)
    }

    fn series() -> TimeSeriesData {
        serde_json::from_value(json!({
            "meta": {
                "name": "Population", "minYear": 2000, "maxYear": 2001,
                "minValue": 0, "maxValue": 100,
                "choropleth_tresholds": [10, 50, 100]
            },
            "regiondata": { "KU001": { "2000": 20 } }
        }))
        .unwrap()
    }

    fn triangle_layer() -> Layer {
        Layer::vector(
            "regions",
            vec![Feature::new(
                "001",
                Geometry::Polygon(Polygon::new(vec![vec![
                    Coordinate::new(10.0, 10.0),
                    Coordinate::new(90.0, 10.0),
                    Coordinate::new(50.0, 80.0),
                ]])),
            )],
            Style::default().with_fill("#FFFF00"),
        )
    }

    #[tokio::test]
    async fn test_export_submits_request() {
        let service = FakeVideoService::ok();
        let exporter = Exporter::new(service.clone(), ResolutionTable::default());
        let map = StaticMap::new(vec![triangle_layer()], identity);

        let response = exporter
            .export_video(&map, Viewport::new(800, 450), &series(), ResolutionTier::FourK)
            .await
            .unwrap();

        assert_eq!(response.into_inner(), json!({ "video": "out.mp4" }));
        let requests = service.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, Dimensions::new(2160, 3840));
        assert!(requests[0].document_text.starts_with("<svg"));
        assert!(requests[0].document_text.contains(r#"width="800""#));
        assert_eq!(requests[0].time_series["meta"]["name"], json!("Population"));
    }

    #[tokio::test]
    async fn test_structural_error_stops_before_submit() {
        let service = FakeVideoService::ok();
        let exporter = Exporter::new(service.clone(), ResolutionTable::default());
        let point_layer = Layer::vector(
            "points",
            vec![Feature::new("p", Geometry::Point(Coordinate::new(1.0, 1.0)))],
            Style::default(),
        );
        let map = StaticMap::new(vec![point_layer], identity);

        let err = exporter
            .export_video(&map, Viewport::new(10, 10), &series(), ResolutionTier::FullHd)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::Snapshot(SnapshotError::UnsupportedGeometry { .. })
        ));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_map_still_reaches_service() {
        let service = FakeVideoService::ok();
        let exporter = Exporter::new(service.clone(), ResolutionTable::default());
        let map = StaticMap::new(Vec::new(), identity);

        exporter
            .export_video(&map, Viewport::new(10, 10), &series(), ResolutionTier::TwoK)
            .await
            .unwrap();

        assert_eq!(service.calls(), 1);
        let requests = service.requests.lock().unwrap();
        assert!(requests[0].document_text.contains("<g/>"));
    }

    #[tokio::test]
    async fn test_remote_failure_is_returned() {
        let service = FakeVideoService::failing(503);
        let exporter = Exporter::new(service.clone(), ResolutionTable::default());
        let map = StaticMap::new(vec![triangle_layer()], identity);

        let err = exporter
            .export_video(&map, Viewport::new(10, 10), &series(), ResolutionTier::FullHd)
            .await
            .unwrap_err();

        match err {
            ExportError::RemoteService(RemoteServiceError::Status { status, .. }) => {
                assert_eq!(status, 503)
            }
            other => panic!("expected RemoteService error, got {other:?}"),
        }
        assert_eq!(service.calls(), 1);
    }

    #[test]
    fn test_snapshot_svg() {
        let exporter = Exporter::new(FakeVideoService::ok(), ResolutionTable::landscape());
        let map = StaticMap::new(vec![triangle_layer()], identity);

        let svg = exporter.snapshot_svg(&map, Viewport::new(100, 100)).unwrap();
        assert!(svg.contains(r#"d="M10,10 L90,10 L50,80 Z""#));
        assert!(svg.contains(r##"fill="#FFFF00""##));
        assert_eq!(
            exporter.dimensions(ResolutionTier::FullHd),
            Dimensions::new(1920, 1080)
        );
    }
}
