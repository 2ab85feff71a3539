//! Command-line overrides shared by frame generation binaries.
//!
//! Every flag is optional. Unset flags leave the value from the config file
//! (or the built-in default) untouched.

use clap::Args;

use crate::synth::SynthesizerConfig;
use crate::track::{FadeConfig, Gaussian, Interval, TrackModelConfig};

/// Parse an interval in format "min,max"
fn parse_interval(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err("Range must be in format 'min,max'".to_string());
    }

    let min = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid min value".to_string())?;
    let max = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid max value".to_string())?;

    if min > max {
        return Err("min must not exceed max".to_string());
    }

    Ok((min, max))
}

/// Frame grid and noise overrides
#[derive(Args, Debug, Clone, Default)]
pub struct SynthesizerArgs {
    /// Number of frames per kind
    #[arg(short = 'n', long)]
    pub frames: Option<usize>,

    /// Frame height in pixels
    #[arg(long)]
    pub rows: Option<usize>,

    /// Frame width in pixels
    #[arg(long)]
    pub cols: Option<usize>,

    /// Mean background level for background frames (photons/pixel)
    #[arg(long)]
    pub mu_bg: Option<f64>,

    /// Mean background level added under tracks (photons/pixel)
    #[arg(long)]
    pub track_noise_mu: Option<f64>,

    /// Pixels per one-count step of the brightness fade
    #[arg(long)]
    pub fade_step: Option<usize>,
}

impl SynthesizerArgs {
    pub fn apply(&self, mut config: SynthesizerConfig) -> SynthesizerConfig {
        if let Some(n) = self.frames {
            config.n_frames = n;
        }
        if let Some(rows) = self.rows {
            config.n_row = rows;
        }
        if let Some(cols) = self.cols {
            config.n_col = cols;
        }
        if let Some(mu) = self.mu_bg {
            config.mu_bg = mu;
        }
        if let Some(mu) = self.track_noise_mu {
            config.track_noise_mu = mu;
        }
        if let Some(step) = self.fade_step {
            config.fade = FadeConfig {
                step_pixels: step,
                ..config.fade
            };
        }
        config
    }
}

/// Track distribution overrides
#[derive(Args, Debug, Clone, Default)]
pub struct TrackModelArgs {
    /// Start pixel range for both axes (format: "min,max")
    #[arg(long, value_parser = parse_interval)]
    pub start_position: Option<(f64, f64)>,

    /// Clamp range for the end pixel (format: "min,max")
    #[arg(long, value_parser = parse_interval)]
    pub end_clamp: Option<(f64, f64)>,

    /// Mean track length in pixels
    #[arg(long)]
    pub mu_length: Option<f64>,

    /// Standard deviation of track length
    #[arg(long)]
    pub sigma_length: Option<f64>,

    /// Mean track width in pixels
    #[arg(long)]
    pub mu_width: Option<f64>,

    /// Standard deviation of track width
    #[arg(long)]
    pub sigma_width: Option<f64>,

    /// Rotation angle range in radians (format: "min,max")
    #[arg(long, value_parser = parse_interval)]
    pub theta: Option<(f64, f64)>,

    /// Incidence angle range in radians (format: "min,max")
    #[arg(long, value_parser = parse_interval)]
    pub phi: Option<(f64, f64)>,

    /// Mean peak counts at the track start
    #[arg(long)]
    pub mu_counts: Option<f64>,

    /// Standard deviation of peak counts
    #[arg(long)]
    pub sigma_counts: Option<f64>,
}

fn override_gaussian(base: Gaussian, mean: Option<f64>, std_dev: Option<f64>) -> Gaussian {
    Gaussian::new(mean.unwrap_or(base.mean), std_dev.unwrap_or(base.std_dev))
}

fn override_interval(base: Interval, range: Option<(f64, f64)>) -> Interval {
    range.map_or(base, |(min, max)| Interval::new(min, max))
}

impl TrackModelArgs {
    pub fn apply(&self, config: TrackModelConfig) -> TrackModelConfig {
        TrackModelConfig {
            start_position: override_interval(config.start_position, self.start_position),
            end_clamp: override_interval(config.end_clamp, self.end_clamp),
            length: override_gaussian(config.length, self.mu_length, self.sigma_length),
            width: override_gaussian(config.width, self.mu_width, self.sigma_width),
            theta: override_interval(config.theta, self.theta),
            phi: override_interval(config.phi, self.phi),
            counts: override_gaussian(config.counts, self.mu_counts, self.sigma_counts),
        }
    }
}
