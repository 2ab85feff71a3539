//! Shared components and utilities for the track frame simulator.
//!
//! Holds the image-processing primitives that do not know anything about
//! particle tracks: noise fields, line rasterization, grayscale conversion
//! and seeded parallel generation.

pub mod algo;
pub mod image_proc;
