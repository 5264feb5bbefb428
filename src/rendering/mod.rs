pub mod path_encoder;
pub mod style;
pub mod svg_document;
pub mod svg_to_png;

pub use path_encoder::{encode, EncodedPath, ProjectionGap};
pub use style::{resolve_style, ResolvedStyle};
pub use svg_document::{DocumentBuilder, FeatureGap, Snapshot};
pub use svg_to_png::SvgRenderer;
