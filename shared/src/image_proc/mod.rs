//! Image processing primitives for synthetic frame generation.
//!
//! # Module Organization
//!
//! - **draw**: Anti-aliased line rasterization with fractional coverage
//! - **noise**: Poisson counting noise and frame statistics
//! - **image**: Conversions between ndarray frames and image crate types
//! - **io**: Saving 8-bit images to standard formats

pub mod draw;
pub mod image;
pub mod io;
pub mod noise;

pub use draw::{line_aa, AaPixel};
pub use self::image::{array2_to_gray_image, u16_to_u8_auto_scale};
pub use io::save_u8_image;
pub use noise::{
    frame_statistics, poisson_distribution, poisson_frame, FrameStatistics, NoiseError,
};
