use choropleth::{ColorRamp, RampError, Srgb, Thresholds};
use std::collections::BTreeMap;

use crate::models::{ChoroplethConfig, Layer, TimeSeriesData};

/// Outcome of styling a set of layers for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StylingSummary {
    /// Features that received a data-driven fill
    pub styled: usize,
    /// Features left on the layer style (no value for the year)
    pub unstyled: usize,
}

/// Fills map features with the ramp color of their metric value.
pub struct ChoroplethStyler {
    ramp: ColorRamp,
    region_prefix: String,
}

impl ChoroplethStyler {
    pub fn new(ramp: ColorRamp, region_prefix: impl Into<String>) -> Self {
        Self {
            ramp,
            region_prefix: region_prefix.into(),
        }
    }

    pub fn from_config(config: &ChoroplethConfig) -> Result<Self, RampError> {
        Ok(Self::new(config.color_ramp()?, config.region_prefix.clone()))
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn region_prefix(&self) -> &str {
        &self.region_prefix
    }

    /// Color of every region that has a value in `year`, keyed by region code.
    pub fn region_colors(
        &self,
        data: &TimeSeriesData,
        year: i32,
    ) -> Result<BTreeMap<String, (f64, Srgb)>, RampError> {
        let thresholds = data.thresholds()?;
        Ok(data
            .regiondata
            .keys()
            .filter_map(|region| {
                let value = data.value_for(region, year)?;
                Some((region.clone(), (value, self.ramp.color_for(value, &thresholds))))
            })
            .collect())
    }

    /// Set the fill of every vector feature for `year`.
    ///
    /// Features without a value drop any previous override and fall back to
    /// their layer style.
    pub fn apply(
        &self,
        layers: &mut [Layer],
        data: &TimeSeriesData,
        year: i32,
    ) -> Result<StylingSummary, RampError> {
        let thresholds = data.thresholds()?;
        let mut summary = StylingSummary::default();

        for layer in layers.iter_mut().filter(|l| l.is_vector()) {
            let base = &layer.style;
            for feature in layer.features.iter_mut() {
                match data.value_for_natcode(&self.region_prefix, &feature.id, year) {
                    Some(value) => {
                        let color = self.fill_for(value, &thresholds);
                        feature.style = Some(base.clone().with_fill(color.to_hex()));
                        summary.styled += 1;
                    }
                    None => {
                        feature.style = None;
                        summary.unstyled += 1;
                    }
                }
            }
        }

        tracing::debug!(
            year,
            styled = summary.styled,
            unstyled = summary.unstyled,
            "Applied choropleth styling"
        );
        Ok(summary)
    }

    fn fill_for(&self, value: f64, thresholds: &Thresholds) -> Srgb {
        self.ramp.color_for(value, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Feature, Geometry, LayerKind, Polygon, Style};
    use serde_json::json;

    fn series() -> TimeSeriesData {
        serde_json::from_value(json!({
            "meta": {
                "name": "Population", "minYear": 1990, "maxYear": 1991,
                "minValue": 0, "maxValue": 600000,
                "choropleth_tresholds": [75, 750, 7500, 50000, 500000]
            },
            "regiondata": {
                "KU001": { "1990": 50 },
                "KU002": { "1990": 600000 },
                "KU003": { "1991": 1000 }
            }
        }))
        .unwrap()
    }

    fn region(id: &str) -> Feature {
        Feature::new(
            id,
            Geometry::Polygon(Polygon::new(vec![vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(1.0, 0.0),
                Coordinate::new(1.0, 1.0),
            ]])),
        )
    }

    fn styler() -> ChoroplethStyler {
        ChoroplethStyler::from_config(&ChoroplethConfig::default()).unwrap()
    }

    #[test]
    fn test_apply_sets_fills_and_keeps_stroke() {
        let mut layers = vec![Layer::vector(
            "regions",
            vec![region("001"), region("002"), region("003")],
            Style::default().with_stroke("#333333", 0.5),
        )];

        let summary = styler().apply(&mut layers, &series(), 1990).unwrap();
        assert_eq!(summary, StylingSummary { styled: 2, unstyled: 1 });

        let features = layers[0].features();
        let below = features[0].style().unwrap();
        assert_eq!(below.fill.as_deref(), Some("#FFFFFF"));
        assert_eq!(below.stroke.as_deref(), Some("#333333"));
        assert_eq!(features[1].style().unwrap().fill.as_deref(), Some("#8B0000"));
        assert!(features[2].style().is_none());
    }

    #[test]
    fn test_apply_clears_stale_overrides() {
        let mut layers = vec![Layer::vector("regions", vec![region("001")], Style::default())];
        let styler = styler();

        styler.apply(&mut layers, &series(), 1990).unwrap();
        assert!(layers[0].features()[0].style().is_some());

        styler.apply(&mut layers, &series(), 1991).unwrap();
        assert!(layers[0].features()[0].style().is_none());
    }

    #[test]
    fn test_tile_layers_untouched() {
        let mut tiles = Layer::vector("basemap", vec![region("001")], Style::default());
        tiles.kind = LayerKind::Tile;
        let mut layers = vec![tiles];

        let summary = styler().apply(&mut layers, &series(), 1990).unwrap();
        assert_eq!(summary, StylingSummary::default());
        assert!(layers[0].features()[0].style().is_none());
    }

    #[test]
    fn test_region_colors() {
        let colors = styler().region_colors(&series(), 1990).unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["KU001"].0, 50.0);
        assert_eq!(colors["KU002"].1.to_hex(), "#8B0000");
    }

    #[test]
    fn test_invalid_thresholds() {
        let mut data = series();
        data.meta.thresholds = vec![10.0, 5.0];
        let mut layers = vec![Layer::vector("regions", vec![region("001")], Style::default())];
        assert!(styler().apply(&mut layers, &data, 1990).is_err());
    }
}
