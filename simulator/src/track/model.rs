//! Randomized particle-track geometry
//!
//! A track is a straight streak across the sensor: a start pixel, a signed
//! length along direction `theta`, and a peak brightness (`counts`) at the
//! start pixel. Width and incidence angle `phi` are sampled so that the full
//! parameter set is recorded with each frame, but the rasterizer draws a
//! single-pixel-wide 2D projection and ignores both.

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in track model configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackModelError {
    #[error("Invalid {name} distribution: mean {mean}, std dev {std_dev}")]
    InvalidGaussian {
        name: &'static str,
        mean: f64,
        std_dev: f64,
    },
    #[error("Invalid {name} range [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

/// Gaussian distribution parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f64,
    pub std_dev: f64,
}

impl Gaussian {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    fn distribution(&self, name: &'static str) -> Result<Normal<f64>, TrackModelError> {
        let invalid = || TrackModelError::InvalidGaussian {
            name,
            mean: self.mean,
            std_dev: self.std_dev,
        };
        if !self.mean.is_finite() || !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(invalid());
        }
        Normal::new(self.mean, self.std_dev).map_err(|_| invalid())
    }
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str, non_negative: bool) -> Result<(), TrackModelError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
            && (!non_negative || self.min >= 0.0);
        if ok {
            Ok(())
        } else {
            Err(TrackModelError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Uniform draw from `[min, max)`; a degenerate interval always yields `min`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Sampling distributions for every track parameter.
///
/// Defaults describe a 48x48 sensor: starts well inside the frame, ends
/// clamped to `[0, 45]`, lengths around 20 pixels, peak counts around 15.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackModelConfig {
    /// Range for both start pixel coordinates
    pub start_position: Interval,
    /// Per-axis clamp applied to the projected end position
    pub end_clamp: Interval,
    /// Track length in pixels
    pub length: Gaussian,
    /// Track width in pixels (recorded, not drawn)
    pub width: Gaussian,
    /// In-plane rotation angle in radians
    pub theta: Interval,
    /// Incidence angle in radians (recorded, not drawn)
    pub phi: Interval,
    /// Peak counts at the start pixel
    pub counts: Gaussian,
}

impl Default for TrackModelConfig {
    fn default() -> Self {
        Self {
            start_position: Interval::new(5.0, 43.0),
            end_clamp: Interval::new(0.0, 45.0),
            length: Gaussian::new(20.0, 4.0),
            width: Gaussian::new(3.0, 1.0),
            theta: Interval::new(0.0, 2.0 * PI),
            phi: Interval::new(0.0, PI / 2.0),
            counts: Gaussian::new(15.0, 3.0),
        }
    }
}

impl TrackModelConfig {
    pub fn with_start_position(mut self, min: f64, max: f64) -> Self {
        self.start_position = Interval::new(min, max);
        self
    }

    pub fn with_end_clamp(mut self, min: f64, max: f64) -> Self {
        self.end_clamp = Interval::new(min, max);
        self
    }

    pub fn with_length(mut self, mean: f64, std_dev: f64) -> Self {
        self.length = Gaussian::new(mean, std_dev);
        self
    }

    pub fn with_width(mut self, mean: f64, std_dev: f64) -> Self {
        self.width = Gaussian::new(mean, std_dev);
        self
    }

    pub fn with_theta(mut self, min: f64, max: f64) -> Self {
        self.theta = Interval::new(min, max);
        self
    }

    pub fn with_phi(mut self, min: f64, max: f64) -> Self {
        self.phi = Interval::new(min, max);
        self
    }

    pub fn with_counts(mut self, mean: f64, std_dev: f64) -> Self {
        self.counts = Gaussian::new(mean, std_dev);
        self
    }
}

/// Integer pixel coordinate, `row` first as in ndarray indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    pub row: usize,
    pub col: usize,
}

impl PixelPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One sampled track. Immutable; a fresh value is drawn per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub start_position: PixelPosition,
    pub end_position: PixelPosition,
    /// Signed length in pixels; zero or negative values are kept as drawn
    pub length: i64,
    pub width: i64,
    pub theta: f64,
    pub phi: f64,
    /// Peak counts at the start pixel; may be negative, rasterization clamps
    pub counts: i64,
}

/// Project the end pixel of a track from its start, length and direction.
///
/// Rows advance with `cos(theta)` and columns with `sin(theta)`. Each axis is
/// clamped to `clamp` and then rounded half-to-even.
pub fn project_end_position(
    start: PixelPosition,
    length: i64,
    theta: f64,
    clamp: Interval,
) -> PixelPosition {
    let axis = |origin: usize, direction: f64| -> usize {
        let raw = origin as f64 + length as f64 * direction;
        raw.clamp(clamp.min, clamp.max).round_ties_even() as usize
    };

    PixelPosition::new(axis(start.row, theta.cos()), axis(start.col, theta.sin()))
}

/// Track geometry sampler.
///
/// Holds validated configuration only; `generate` is a pure function of the
/// configuration and the supplied RNG, so one model can serve any number of
/// frames or worker threads.
#[derive(Debug, Clone)]
pub struct TrackModel {
    config: TrackModelConfig,
    length_dist: Normal<f64>,
    width_dist: Normal<f64>,
    counts_dist: Normal<f64>,
}

impl TrackModel {
    /// Validate `config` and build the sampling distributions.
    pub fn new(config: TrackModelConfig) -> Result<Self, TrackModelError> {
        config.start_position.validate("start position", true)?;
        config.end_clamp.validate("end clamp", true)?;
        config.theta.validate("theta", false)?;
        config.phi.validate("phi", false)?;

        Ok(Self {
            length_dist: config.length.distribution("length")?,
            width_dist: config.width.distribution("width")?,
            counts_dist: config.counts.distribution("counts")?,
            config,
        })
    }

    pub fn config(&self) -> &TrackModelConfig {
        &self.config
    }

    /// Draw a new track.
    ///
    /// Draw order is fixed (start row, start col, length, width, theta, phi,
    /// counts) so a seeded RNG always reproduces the same sequence of tracks.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TrackGeometry {
        let c = &self.config;

        let start_row = c.start_position.sample(rng).round_ties_even() as usize;
        let start_col = c.start_position.sample(rng).round_ties_even() as usize;
        let start_position = PixelPosition::new(start_row, start_col);

        let length = self.length_dist.sample(rng).round_ties_even() as i64;
        let width = self.width_dist.sample(rng).round_ties_even() as i64;
        let theta = c.theta.sample(rng);
        let phi = c.phi.sample(rng);
        let counts = self.counts_dist.sample(rng).round_ties_even() as i64;

        let end_position = project_end_position(start_position, length, theta, c.end_clamp);

        TrackGeometry {
            start_position,
            end_position,
            length,
            width,
            theta,
            phi,
            counts,
        }
    }
}

impl Default for TrackModel {
    fn default() -> Self {
        Self::new(TrackModelConfig::default()).expect("default track model configuration is valid")
    }
}
