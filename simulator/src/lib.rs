//! Synthetic particle-track frame generation
//!
//! This crate produces labeled training frames for a track classifier:
//! frames of pure Poisson background, and frames with a simulated particle
//! track (an anti-aliased streak of fading brightness) composited over the
//! same kind of noise.

pub mod io;
pub mod preview;
pub mod shared_args;
pub mod synth;
pub mod track;

// Re-exports for easier access
pub use io::{ArchiveError, FrameArchive, SaveReport};
pub use preview::{preview_grid_shape, save_preview, PreviewError, PreviewGrid};
pub use synth::{
    ExportedFrames, Frame, FrameKind, FrameSynthesizer, SimulationConfig, SynthesisError,
    SynthesizerConfig,
};
pub use track::{TrackGeometry, TrackModel, TrackModelConfig};
