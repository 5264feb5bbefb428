pub mod choropleth_styler;
pub mod exporter;
pub mod playback;
pub mod video_client;

pub use choropleth_styler::{ChoroplethStyler, StylingSummary};
pub use exporter::Exporter;
pub use playback::{interpolate_by_elapsed, year_range, Playback};
pub use video_client::{HttpVideoService, VideoService, CONTRACT_HEADER, VIDEO_ENDPOINT};
