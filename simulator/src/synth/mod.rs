//! Labeled frame synthesis
//!
//! `FrameSynthesizer` produces two ordered frame sequences for classifier
//! training: background-only frames of Poisson noise, and track frames where
//! a freshly sampled track is drawn and composited with independent noise.
//!
//! Each generation pass replaces the previous contents of its sequence, so
//! repeated calls never accumulate frames.

pub mod config;

use std::fmt;

use ndarray::Array2;
use rand::Rng;
use rand_distr::Poisson;
use serde::{Deserialize, Serialize};
use shared::algo::generate_seeded_in_parallel;
use shared::image_proc::{poisson_distribution, poisson_frame, NoiseError};
use thiserror::Error;

use crate::track::{render_track, TrackGeometry, TrackModel, TrackModelError};

pub use config::{ConfigError, SimulationConfig, SynthesizerConfig};

/// One exposure: photon counts per pixel, indexed `[row, col]`
pub type Frame = Array2<u16>;

/// The two labeled frame populations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Background,
    Track,
}

impl FrameKind {
    pub const ALL: [FrameKind; 2] = [FrameKind::Background, FrameKind::Track];

    /// Classifier label: 0 for background, 1 for track
    pub fn label(self) -> u8 {
        match self {
            FrameKind::Background => 0,
            FrameKind::Track => 1,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Background => write!(f, "background"),
            FrameKind::Track => write!(f, "track"),
        }
    }
}

/// Errors from synthesizer construction and export
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("Grid dimensions must be positive, got {rows}x{cols}")]
    InvalidGridSize { rows: usize, cols: usize },
    #[error("Frame count must be positive")]
    InvalidFrameCount,
    #[error("Brightness fade step must be at least one pixel")]
    InvalidFadeStep,
    #[error("Invalid {which} rate: {source}")]
    InvalidNoise {
        which: &'static str,
        source: NoiseError,
    },
    #[error("Track {name} range [{min}, {max}] does not fit a {rows}x{cols} grid")]
    TrackOutsideGrid {
        name: &'static str,
        min: f64,
        max: f64,
        rows: usize,
        cols: usize,
    },
    #[error("Invalid track model: {0}")]
    TrackModel(#[from] TrackModelError),
    #[error("Have not generated any {0} frames")]
    NothingGenerated(FrameKind),
}

/// Both frame sequences, in generation order
#[derive(Debug, Clone, Copy)]
pub struct ExportedFrames<'a> {
    pub background: &'a [Frame],
    pub tracks: &'a [Frame],
    /// Geometry drawn into each track frame, same order as `tracks`
    pub track_geometries: &'a [TrackGeometry],
}

/// Generator for labeled background and track frames.
///
/// Owns its track model and both frame sequences. All randomness comes from
/// the RNG handed to each generation call; the synthesizer keeps no random
/// state of its own.
#[derive(Debug, Clone)]
pub struct FrameSynthesizer {
    config: SynthesizerConfig,
    track_model: TrackModel,
    background_noise: Poisson<f64>,
    track_noise: Poisson<f64>,
    background_frames: Vec<Frame>,
    track_frames: Vec<Frame>,
    track_geometries: Vec<TrackGeometry>,
}

impl FrameSynthesizer {
    /// Validate configuration and build a synthesizer.
    ///
    /// When `track_model` is `None` the default model is used. The model's
    /// start and end ranges must lie inside the configured grid.
    pub fn new(
        config: SynthesizerConfig,
        track_model: Option<TrackModel>,
    ) -> Result<Self, SynthesisError> {
        if config.n_row == 0 || config.n_col == 0 {
            return Err(SynthesisError::InvalidGridSize {
                rows: config.n_row,
                cols: config.n_col,
            });
        }
        if config.n_frames == 0 {
            return Err(SynthesisError::InvalidFrameCount);
        }
        if config.fade.step_pixels == 0 {
            return Err(SynthesisError::InvalidFadeStep);
        }

        let background_noise = poisson_distribution(config.mu_bg)
            .map_err(|source| SynthesisError::InvalidNoise {
                which: "background",
                source,
            })?;
        let track_noise = poisson_distribution(config.track_noise_mu)
            .map_err(|source| SynthesisError::InvalidNoise {
                which: "track background",
                source,
            })?;

        let track_model = track_model.unwrap_or_default();
        check_track_fits_grid(&track_model, config.n_row, config.n_col)?;

        Ok(Self {
            config,
            track_model,
            background_noise,
            track_noise,
            background_frames: Vec::new(),
            track_frames: Vec::new(),
            track_geometries: Vec::new(),
        })
    }

    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    pub fn track_model(&self) -> &TrackModel {
        &self.track_model
    }

    /// `(rows, cols)` of every produced frame
    pub fn frame_shape(&self) -> (usize, usize) {
        (self.config.n_row, self.config.n_col)
    }

    /// Replace the background sequence with `n_frames` Poisson noise frames.
    pub fn generate_background<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let shape = self.frame_shape();
        self.background_frames = (0..self.config.n_frames)
            .map(|_| poisson_frame(shape, &self.background_noise, rng))
            .collect();

        log::info!(
            "Generated {} frames of background",
            self.background_frames.len()
        );
    }

    /// Replace the track sequence with `n_frames` track-plus-noise frames.
    pub fn generate_tracks<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (frames, geometries): (Vec<Frame>, Vec<TrackGeometry>) = (0..self.config.n_frames)
            .map(|_| self.synthesize_track_frame(rng))
            .unzip();
        self.track_frames = frames;
        self.track_geometries = geometries;

        log::info!("Generated {} frames of tracks", self.track_frames.len());
    }

    /// Parallel variant of [`generate_background`](Self::generate_background).
    ///
    /// Frame `i` uses an RNG seeded with `seed + i`, so the result depends
    /// only on `seed`, not on the number of threads.
    pub fn generate_background_parallel(&mut self, seed: u64) {
        let shape = self.frame_shape();
        let noise = &self.background_noise;
        self.background_frames =
            generate_seeded_in_parallel(self.config.n_frames, seed, |_, rng| {
                poisson_frame(shape, noise, rng)
            });

        log::info!(
            "Generated {} frames of background (parallel, seed {})",
            self.background_frames.len(),
            seed
        );
    }

    /// Parallel variant of [`generate_tracks`](Self::generate_tracks), seeded per frame.
    pub fn generate_tracks_parallel(&mut self, seed: u64) {
        let this = &*self;
        let (frames, geometries): (Vec<Frame>, Vec<TrackGeometry>) =
            generate_seeded_in_parallel(this.config.n_frames, seed, |_, rng| {
                this.synthesize_track_frame(rng)
            })
            .into_iter()
            .unzip();
        self.track_frames = frames;
        self.track_geometries = geometries;

        log::info!(
            "Generated {} frames of tracks (parallel, seed {})",
            self.track_frames.len(),
            seed
        );
    }

    /// Sample a track, draw it into an empty frame and add fresh noise.
    fn synthesize_track_frame<R: Rng + ?Sized>(&self, rng: &mut R) -> (Frame, TrackGeometry) {
        let shape = self.frame_shape();
        let mut frame = Frame::zeros(shape);

        let geometry = self.track_model.generate(rng);
        log::debug!("Sampled track: {geometry:?}");
        render_track(&mut frame, &geometry, &self.config.fade);

        let noise = poisson_frame(shape, &self.track_noise, rng);
        frame.zip_mut_with(&noise, |pixel, &n| *pixel = pixel.saturating_add(n));

        (frame, geometry)
    }

    /// Read access to one frame sequence (possibly empty)
    pub fn frames(&self, kind: FrameKind) -> &[Frame] {
        match kind {
            FrameKind::Background => &self.background_frames,
            FrameKind::Track => &self.track_frames,
        }
    }

    pub fn background_frames(&self) -> &[Frame] {
        &self.background_frames
    }

    pub fn track_frames(&self) -> &[Frame] {
        &self.track_frames
    }

    pub fn track_geometries(&self) -> &[TrackGeometry] {
        &self.track_geometries
    }

    /// One frame sequence, or `NothingGenerated` if it is empty
    pub fn export_kind(&self, kind: FrameKind) -> Result<&[Frame], SynthesisError> {
        let frames = self.frames(kind);
        if frames.is_empty() {
            return Err(SynthesisError::NothingGenerated(kind));
        }
        Ok(frames)
    }

    /// Both sequences for a persistence layer.
    ///
    /// Fails with `NothingGenerated` naming the first empty sequence.
    pub fn export(&self) -> Result<ExportedFrames<'_>, SynthesisError> {
        Ok(ExportedFrames {
            background: self.export_kind(FrameKind::Background)?,
            tracks: self.export_kind(FrameKind::Track)?,
            track_geometries: &self.track_geometries,
        })
    }

    /// `(label, frame)` pairs over background then track frames
    pub fn labeled_frames(&self) -> impl Iterator<Item = (u8, &Frame)> + '_ {
        FrameKind::ALL.into_iter().flat_map(move |kind| {
            self.frames(kind)
                .iter()
                .map(move |frame| (kind.label(), frame))
        })
    }

    /// Drop all generated frames
    pub fn clear(&mut self) {
        self.background_frames.clear();
        self.track_frames.clear();
        self.track_geometries.clear();
    }
}

fn check_track_fits_grid(
    model: &TrackModel,
    rows: usize,
    cols: usize,
) -> Result<(), SynthesisError> {
    let limit = (rows.min(cols) - 1) as f64;
    let config = model.config();

    for (name, range) in [
        ("start position", config.start_position),
        ("end clamp", config.end_clamp),
    ] {
        if range.max > limit {
            return Err(SynthesisError::TrackOutsideGrid {
                name,
                min: range.min,
                max: range.max,
                rows,
                cols,
            });
        }
    }

    Ok(())
}
