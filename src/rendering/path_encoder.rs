//! Projection of feature geometry into SVG path-description syntax.
//!
//! Every ring that emits at least one point is closed with `Z`, whether or
//! not its last point repeats the first. A ring with no projectable point
//! writes nothing, so the path always opens with a move.
//! Coordinates are rounded to two decimals and printed in their
//! shortest form, so `10.00` becomes `10` and `10.50` becomes `10.5`.

use std::fmt::Write;

use crate::error::SnapshotError;
use crate::models::{Coordinate, Geometry, Polygon, Projection};

/// A point that could not be projected and was left out of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionGap {
    /// Part index within a MultiPolygon (0 otherwise)
    pub part: usize,
    /// Ring index within the polygon (0 for line strings)
    pub ring: usize,
    /// Point index within the ring
    pub point: usize,
    /// The map-space coordinate that failed to project
    pub coordinate: Coordinate,
}

/// Encoded `d` attribute plus the points that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedPath {
    pub d: String,
    pub gaps: Vec<ProjectionGap>,
}

/// Encode `geometry` using `projection` for map → pixel conversion.
///
/// Only Polygon, MultiPolygon and LineString can be encoded. Any other kind
/// fails before a single command is written.
pub fn encode<P>(geometry: &Geometry, projection: &P) -> Result<EncodedPath, SnapshotError>
where
    P: Projection + ?Sized,
{
    let mut writer = PathWriter::new(projection);

    match geometry {
        Geometry::Polygon(polygon) => writer.polygon(0, polygon),
        Geometry::MultiPolygon(parts) => {
            for (part, polygon) in parts.iter().enumerate() {
                writer.polygon(part, polygon);
            }
        }
        Geometry::LineString(points) => {
            writer.line(0, 0, points);
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) => {
            return Err(SnapshotError::UnsupportedGeometry {
                kind: geometry.kind().to_string(),
            });
        }
    }

    Ok(writer.finish())
}

struct PathWriter<'a, P: ?Sized> {
    projection: &'a P,
    d: String,
    gaps: Vec<ProjectionGap>,
}

impl<'a, P: Projection + ?Sized> PathWriter<'a, P> {
    fn new(projection: &'a P) -> Self {
        Self {
            projection,
            d: String::new(),
            gaps: Vec::new(),
        }
    }

    fn polygon(&mut self, part: usize, polygon: &Polygon) {
        for (ring, points) in polygon.rings.iter().enumerate() {
            if self.line(part, ring, points) {
                self.d.push_str(" Z ");
            }
        }
    }

    /// Write `M` for the first projectable point and `L` for the rest.
    ///
    /// Returns whether any point was written.
    fn line(&mut self, part: usize, ring: usize, points: &[Coordinate]) -> bool {
        let mut started = false;

        for (point, &coordinate) in points.iter().enumerate() {
            let Some(pixel) = self
                .projection
                .pixel_from_coordinate(coordinate)
                .filter(Coordinate::is_finite)
            else {
                tracing::warn!(
                    part,
                    ring,
                    point,
                    coordinate = %coordinate,
                    "Skipping point that could not be projected"
                );
                self.gaps.push(ProjectionGap {
                    part,
                    ring,
                    point,
                    coordinate,
                });
                continue;
            };

            let command = if started { 'L' } else { 'M' };
            started = true;

            if !self.d.is_empty() && !self.d.ends_with(' ') {
                self.d.push(' ');
            }
            // Writing to a String cannot fail
            let _ = write!(
                self.d,
                "{}{},{}",
                command,
                format_number(pixel.x),
                format_number(pixel.y)
            );
        }

        started
    }

    fn finish(self) -> EncodedPath {
        EncodedPath {
            d: self.d.trim().to_string(),
            gaps: self.gaps,
        }
    }
}

/// Round to two decimals (halves toward +∞) without printing `-0`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0 + 0.5).floor() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest decimal form of `value` rounded to two decimals.
pub fn format_number(value: f64) -> String {
    round2(value).to_string()
}
