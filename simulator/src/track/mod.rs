//! Particle track model and rasterization
//!
//! - **model**: Sampling of track geometry and brightness
//! - **raster**: Anti-aliased drawing with a stepped brightness fade

pub mod model;
pub mod raster;

pub use model::{
    project_end_position, Gaussian, Interval, PixelPosition, TrackGeometry, TrackModel,
    TrackModelConfig, TrackModelError,
};
pub use raster::{render_track, render_track_layer, BrightnessFade, FadeConfig};
