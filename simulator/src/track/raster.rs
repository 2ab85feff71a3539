//! Track rasterization with a stepped brightness fade
//!
//! The segment between a track's start and end pixels is rasterized with
//! anti-aliasing. Walking the emitted pixels from the start, each pixel is
//! set to `round(coverage * counter)`, where the counter starts at the
//! track's peak counts and drops by one on pixel index 0, 6, 12, ... The
//! fade is therefore per emitted pixel, not per unit of track length.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use shared::image_proc::line_aa;

use super::model::TrackGeometry;

/// Brightness fade parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Counter decrements on every pixel index divisible by this
    pub step_pixels: usize,
    /// Ceiling for a single track pixel before background is added
    pub max_value: u16,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            step_pixels: 6,
            max_value: u8::MAX as u16,
        }
    }
}

/// Brightness counter along the rasterized pixel sequence.
///
/// Yields the counter value to apply to each successive pixel. The sequence
/// is non-increasing and never negative; a negative peak starts at zero.
#[derive(Debug, Clone)]
pub struct BrightnessFade {
    counter: i64,
    index: usize,
    step_pixels: usize,
}

impl BrightnessFade {
    pub fn new(peak_counts: i64, step_pixels: usize) -> Self {
        Self {
            counter: peak_counts.max(0),
            index: 0,
            step_pixels: step_pixels.max(1),
        }
    }
}

impl Iterator for BrightnessFade {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.counter;
        if self.index % self.step_pixels == 0 {
            self.counter = (self.counter - 1).max(0);
        }
        self.index += 1;
        Some(current)
    }
}

/// Draw `track` into `frame`, overwriting the pixels it covers.
///
/// Pixels that fall outside the frame (a track sampled for a larger grid)
/// are skipped but still advance the fade. Later pixels overwrite earlier ones at the same
/// coordinate.
///
/// # Returns
/// Number of pixels written into the frame
pub fn render_track(frame: &mut Array2<u16>, track: &TrackGeometry, fade: &FadeConfig) -> usize {
    let (rows, cols) = frame.dim();
    let start = track.start_position;
    let end = track.end_position;

    let pixels = line_aa(
        start.row as i64,
        start.col as i64,
        end.row as i64,
        end.col as i64,
    );

    let mut written = 0;
    for (pixel, counter) in pixels
        .iter()
        .zip(BrightnessFade::new(track.counts, fade.step_pixels))
    {
        if pixel.row < 0 || pixel.col < 0 {
            continue;
        }
        let (r, c) = (pixel.row as usize, pixel.col as usize);
        if r >= rows || c >= cols {
            continue;
        }

        let value = (pixel.coverage * counter as f64)
            .round_ties_even()
            .clamp(0.0, fade.max_value as f64);
        frame[[r, c]] = value as u16;
        written += 1;
    }

    written
}

/// Render `track` alone into a zeroed frame of the given shape.
pub fn render_track_layer(
    shape: (usize, usize),
    track: &TrackGeometry,
    fade: &FadeConfig,
) -> Array2<u16> {
    let mut layer = Array2::zeros(shape);
    render_track(&mut layer, track, fade);
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::model::PixelPosition;

    fn geometry(start: (usize, usize), end: (usize, usize), counts: i64) -> TrackGeometry {
        TrackGeometry {
            start_position: PixelPosition::new(start.0, start.1),
            end_position: PixelPosition::new(end.0, end.1),
            length: 0,
            width: 3,
            theta: 0.0,
            phi: 0.0,
            counts,
        }
    }

    #[test]
    fn test_fade_sequence() {
        let values: Vec<i64> = BrightnessFade::new(3, 6).take(20).collect();
        // index 0 at peak, 1..=6 one lower, 7..=12 two lower, then floor at zero
        let mut expected = vec![3];
        expected.extend([2; 6]);
        expected.extend([1; 6]);
        expected.extend([0; 7]);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_fade_monotone_and_non_negative() {
        for peak in [-5, 0, 1, 15, 40] {
            let values: Vec<i64> = BrightnessFade::new(peak, 6).take(300).collect();
            assert!(values.windows(2).all(|w| w[1] <= w[0]));
            assert!(values.iter().all(|&v| v >= 0));
        }
    }

    #[test]
    fn test_negative_peak_starts_at_zero() {
        assert_eq!(BrightnessFade::new(-4, 6).next(), Some(0));
    }

    #[test]
    fn test_zero_length_track_is_single_pixel() {
        let track = geometry((12, 30), (12, 30), 17);
        let layer = render_track_layer((48, 48), &track, &FadeConfig::default());

        assert_eq!(layer[[12, 30]], 17);
        assert_eq!(layer.iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_horizontal_track_fades_along_columns() {
        let track = geometry((10, 5), (10, 20), 15);
        let layer = render_track_layer((48, 48), &track, &FadeConfig::default());

        let row: Vec<u16> = (5..=20).map(|c| layer[[10, c]]).collect();
        let mut expected = vec![15];
        expected.extend([14; 6]);
        expected.extend([13; 6]);
        expected.extend([12; 3]);
        assert_eq!(row, expected);

        // nothing off the line
        assert_eq!(layer.iter().filter(|&&v| v != 0).count(), 16);
    }

    #[test]
    fn test_diagonal_side_pixels_round_and_advance_fade() {
        let track = geometry((10, 10), (13, 13), 15);
        let layer = render_track_layer((48, 48), &track, &FadeConfig::default());

        // side pixels sit 1/sqrt(2) off the ideal line
        let side = 1.0 - std::f64::consts::FRAC_1_SQRT_2;
        // emission order with the counter in effect at each index
        let expected = [
            ((10, 10), 1.0, 15),
            ((11, 10), side, 14),
            ((10, 11), side, 14),
            ((11, 11), 1.0, 14),
            ((12, 11), side, 14),
            ((11, 12), side, 14),
            ((12, 12), 1.0, 14),
            ((13, 12), side, 13),
            ((12, 13), side, 13),
            ((13, 13), 1.0, 13),
        ];
        for ((r, c), coverage, counter) in expected {
            let value = (coverage * counter as f64).round_ties_even() as u16;
            assert_eq!(layer[[r, c]], value, "pixel ({r}, {c})");
        }

        // 14 * side = 4.10 and 13 * side = 3.81 both round to 4
        assert_eq!(layer[[11, 10]], 4);
        assert_eq!(layer[[13, 12]], 4);
        assert_eq!(layer.iter().filter(|&&v| v != 0).count(), expected.len());
    }

    #[test]
    fn test_track_pixels_clamped_to_max_value() {
        let track = geometry((4, 4), (4, 8), 1000);
        let layer = render_track_layer((16, 16), &track, &FadeConfig::default());
        assert_eq!(layer[[4, 4]], 255);
        assert!(layer.iter().all(|&v| v <= 255));
    }

    #[test]
    fn test_negative_counts_draw_nothing() {
        let track = geometry((20, 20), (30, 35), -3);
        let layer = render_track_layer((48, 48), &track, &FadeConfig::default());
        assert!(layer.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pixels_outside_frame_are_skipped() {
        let track = geometry((2, 2), (2, 12), 20);
        let mut frame = Array2::zeros((6, 6));
        let written = render_track(&mut frame, &track, &FadeConfig::default());

        // columns 2..=5 land in the frame, fading from the start pixel
        assert_eq!(written, 4);
        assert_eq!(frame[[2, 2]], 20);
        assert_eq!(frame[[2, 5]], 19);
    }

    #[test]
    fn test_reversed_track_starts_bright_at_start() {
        let track = geometry((30, 30), (30, 10), 12);
        let layer = render_track_layer((48, 48), &track, &FadeConfig::default());
        assert_eq!(layer[[30, 30]], 12);
        assert!(layer[[30, 10]] < 12);
    }
}
