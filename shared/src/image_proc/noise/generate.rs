//! Noise generation utilities for synthetic frame simulation.
//!
//! Photon arrival at each pixel is modeled as an independent Poisson draw
//! at a fixed mean rate. Frames are filled in row-major order from the
//! caller's RNG, so a seeded RNG reproduces the same frame bit for bit.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use thiserror::Error;

/// Errors raised while configuring a noise source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    #[error("Poisson mean must be finite and positive, got {0}")]
    InvalidMean(f64),
}

/// Build a Poisson distribution after validating its mean.
///
/// `rand_distr` rejects non-positive means as well; checking up front keeps
/// the error type ours and catches NaN/inf.
pub fn poisson_distribution(mean: f64) -> Result<Poisson<f64>, NoiseError> {
    if !mean.is_finite() || mean <= 0.0 {
        return Err(NoiseError::InvalidMean(mean));
    }
    Poisson::new(mean).map_err(|_| NoiseError::InvalidMean(mean))
}

/// Fill a `(rows, cols)` frame with independent Poisson counts.
///
/// # Arguments
/// * `size` - Tuple of (rows, cols) for the output frame
/// * `poisson` - Per-pixel count distribution
/// * `rng` - Random source; pixels are drawn in row-major order
///
/// # Returns
/// Frame of non-negative photon counts. Draws above `u16::MAX` saturate.
pub fn poisson_frame<R: Rng + ?Sized>(
    size: (usize, usize),
    poisson: &Poisson<f64>,
    rng: &mut R,
) -> Array2<u16> {
    Array2::from_shape_fn(size, |_| poisson.sample(rng) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_helpers::seeded_rng;

    #[test]
    fn test_poisson_frame_dimensions() {
        let poisson = poisson_distribution(1.0).unwrap();
        let frame = poisson_frame((10, 20), &poisson, &mut seeded_rng(1));
        assert_eq!(frame.dim(), (10, 20));
    }

    #[test]
    fn test_poisson_frame_deterministic() {
        let poisson = poisson_distribution(2.5).unwrap();
        let a = poisson_frame((16, 16), &poisson, &mut seeded_rng(5));
        let b = poisson_frame((16, 16), &poisson, &mut seeded_rng(5));
        assert_eq!(a, b);

        let c = poisson_frame((16, 16), &poisson, &mut seeded_rng(6));
        assert_ne!(a, c);
    }

    #[test]
    fn test_poisson_frame_mean_converges() {
        let poisson = poisson_distribution(1.0).unwrap();
        let mut rng = seeded_rng(42);
        let frames: Vec<_> = (0..200)
            .map(|_| poisson_frame((48, 48), &poisson, &mut rng))
            .collect();

        let total: u64 = frames.iter().flat_map(|f| f.iter()).map(|&v| v as u64).sum();
        let mean = total as f64 / (200.0 * 48.0 * 48.0);
        assert_relative_eq!(mean, 1.0, epsilon = 0.05);
    }

    #[test]
    fn test_invalid_means_rejected() {
        for mean in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(poisson_distribution(mean).is_err(), "mean {mean} accepted");
        }
    }
}
