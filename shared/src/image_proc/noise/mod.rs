//! Noise processing module
//!
//! - **generate**: Poisson counting noise fields
//! - **quantify**: Summary statistics over frames

pub mod generate;
pub mod quantify;

pub use generate::{poisson_distribution, poisson_frame, NoiseError};
pub use quantify::{frame_statistics, FrameStatistics};
