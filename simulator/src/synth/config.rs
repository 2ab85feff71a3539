//! Frame synthesizer configuration
//!
//! Configuration structs are plain serde types with defaults for every
//! field, so a JSON file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::track::{FadeConfig, TrackModelConfig};

/// Errors loading or saving a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Frame grid, noise and frame count settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Frame height in pixels
    pub n_row: usize,
    /// Frame width in pixels
    pub n_col: usize,
    /// Mean background rate for background-only frames (photons/pixel/exposure)
    pub mu_bg: f64,
    /// Mean background rate composited under track frames
    pub track_noise_mu: f64,
    /// Frames produced per generation pass
    pub n_frames: usize,
    /// Brightness fade along tracks
    pub fade: FadeConfig,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            n_row: 48,
            n_col: 48,
            mu_bg: 1.0,
            track_noise_mu: 1.0,
            n_frames: 100,
            fade: FadeConfig::default(),
        }
    }
}

impl SynthesizerConfig {
    pub fn with_dimensions(mut self, n_row: usize, n_col: usize) -> Self {
        self.n_row = n_row;
        self.n_col = n_col;
        self
    }

    pub fn with_background_rate(mut self, mu_bg: f64) -> Self {
        self.mu_bg = mu_bg;
        self
    }

    pub fn with_track_noise_rate(mut self, track_noise_mu: f64) -> Self {
        self.track_noise_mu = track_noise_mu;
        self
    }

    pub fn with_frame_count(mut self, n_frames: usize) -> Self {
        self.n_frames = n_frames;
        self
    }

    pub fn with_fade(mut self, fade: FadeConfig) -> Self {
        self.fade = fade;
        self
    }
}

/// Complete simulation setup as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub synthesizer: SynthesizerConfig,
    pub track_model: TrackModelConfig,
}

impl SimulationConfig {
    /// Load from JSON; fields absent from the file keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
