use serde::{Deserialize, Serialize};

/// Pixel size of the map surface at capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One `<path>` of the snapshot; all attribute values are final strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    pub d: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: String,
}

/// Vector snapshot of the map.
///
/// `elements` are ordered by layer, then by feature within the layer; later
/// elements paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub elements: Vec<PathElement>,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
