//! Snapshot of a map view as a standalone SVG document.

use std::fmt::Write;

use crate::error::SnapshotError;
use crate::models::{Document, MapView, PathElement, Viewport};

use super::path_encoder::{encode, ProjectionGap};
use super::style::resolve_style;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A projection gap together with the feature it occurred in.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGap {
    pub feature_id: String,
    pub gap: ProjectionGap,
}

/// Built document plus the points that had to be left out.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub gaps: Vec<FeatureGap>,
}

/// Walks the vector layers of a map and turns every feature into a path.
pub struct DocumentBuilder;

impl DocumentBuilder {
    /// Build a document sized to `viewport`.
    ///
    /// Elements follow layer order, then feature order within each layer.
    /// The first feature without geometry or with an unsupported geometry
    /// aborts the build.
    pub fn build<M>(map: &M, viewport: Viewport) -> Result<Snapshot, SnapshotError>
    where
        M: MapView + ?Sized,
    {
        let mut document = Document::new(viewport);
        let mut gaps = Vec::new();

        for layer in map.layers() {
            if !layer.is_vector() {
                tracing::debug!(layer = %layer.name, "Skipping non-vector layer");
                continue;
            }

            for feature in layer.features() {
                let geometry = feature.geometry().ok_or_else(|| SnapshotError::GeometryMissing {
                    feature_id: feature.id().to_string(),
                })?;

                let encoded = encode(geometry, map)?;
                let style = feature.style().unwrap_or_else(|| layer.style());
                let resolved = resolve_style(geometry, style);

                gaps.extend(encoded.gaps.into_iter().map(|gap| FeatureGap {
                    feature_id: feature.id().to_string(),
                    gap,
                }));

                document.elements.push(PathElement {
                    d: encoded.d,
                    fill: resolved.fill,
                    stroke: resolved.stroke,
                    stroke_width: resolved.stroke_width,
                });
            }
        }

        tracing::info!(
            elements = document.elements.len(),
            gaps = gaps.len(),
            width = document.width,
            height = document.height,
            "Built map snapshot"
        );

        Ok(Snapshot { document, gaps })
    }
}

impl Document {
    /// Serialize to SVG markup.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(128 + self.elements.len() * 256);
        // Writing to a String cannot fail
        let _ = write!(
            svg,
            r#"<svg xmlns="{}" width="{}" height="{}">"#,
            SVG_NS, self.width, self.height
        );

        if self.elements.is_empty() {
            svg.push_str("<g/>");
        } else {
            svg.push_str("<g>");
            for element in &self.elements {
                let _ = write!(
                    svg,
                    r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                    escape_attr(&element.d),
                    escape_attr(&element.fill),
                    escape_attr(&element.stroke),
                    escape_attr(&element.stroke_width),
                );
            }
            svg.push_str("</g>");
        }

        svg.push_str("</svg>");
        svg
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
