use crate::models::map::DEFAULT_STROKE_WIDTH;
use crate::models::{Geometry, Style};

use super::path_encoder::format_number;

const NONE: &str = "none";

/// Final presentation attributes of one path element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: String,
}

/// Resolve the attributes for `geometry` drawn with `style`.
///
/// Line strings never take a fill, whatever the style says.
pub fn resolve_style(geometry: &Geometry, style: &Style) -> ResolvedStyle {
    let fill = if geometry.is_area() {
        style.fill.clone().unwrap_or_else(|| NONE.to_string())
    } else {
        NONE.to_string()
    };

    ResolvedStyle {
        fill,
        stroke: style.stroke.clone().unwrap_or_else(|| NONE.to_string()),
        stroke_width: format_number(style.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)),
    }
}
