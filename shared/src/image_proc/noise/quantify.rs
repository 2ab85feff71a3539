//! Summary statistics over sequences of count frames.
//!
//! Used to check generated background against its configured rate and to
//! report what a generation pass produced.

use ndarray::Array2;

/// Pixel statistics pooled over one or more frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatistics {
    /// Mean pixel value
    pub mean: f64,
    /// Population variance of pixel values
    pub variance: f64,
    /// Smallest pixel value seen
    pub min: u16,
    /// Largest pixel value seen
    pub max: u16,
    /// Number of pixels pooled
    pub pixel_count: usize,
}

/// Pool every pixel of `frames` and compute mean, variance and range.
///
/// Returns `None` when there are no pixels at all.
pub fn frame_statistics<'a, I>(frames: I) -> Option<FrameStatistics>
where
    I: IntoIterator<Item = &'a Array2<u16>>,
{
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut min = u16::MAX;
    let mut max = u16::MIN;
    let mut pixel_count = 0usize;

    for frame in frames {
        for &value in frame.iter() {
            let v = value as f64;
            sum += v;
            sum_sq += v * v;
            min = min.min(value);
            max = max.max(value);
            pixel_count += 1;
        }
    }

    if pixel_count == 0 {
        return None;
    }

    let n = pixel_count as f64;
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);

    Some(FrameStatistics {
        mean,
        variance,
        min,
        max,
        pixel_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_statistics_of_known_frames() {
        let a = array![[0u16, 2], [4, 6]];
        let b = array![[1u16, 1], [1, 1]];
        let stats = frame_statistics([&a, &b]).unwrap();

        assert_eq!(stats.pixel_count, 8);
        assert_relative_eq!(stats.mean, 2.0);
        // values: 0,2,4,6,1,1,1,1 -> E[x^2] = 60/8
        assert_relative_eq!(stats.variance, 60.0 / 8.0 - 4.0);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 6);
    }

    #[test]
    fn test_statistics_empty() {
        let frames: Vec<Array2<u16>> = Vec::new();
        assert!(frame_statistics(&frames).is_none());
    }
}
