//! statmap - statistical map snapshots and video export
//!
//! Turns the vector layers of a thematic map into an SVG snapshot and hands
//! it, together with the time series behind the map, to a video rendering
//! service. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
