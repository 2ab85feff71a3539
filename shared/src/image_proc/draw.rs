//! Anti-aliased line rasterization.
//!
//! Implements Zingl's integer formulation of Wu's anti-aliased line. For each
//! step along the major axis the algorithm emits the pixel on the ideal line
//! plus, where the line passes between two pixels, the neighbour on the
//! minor axis. Every emitted pixel carries a coverage weight in `[0, 1]`.
//!
//! Pixels are emitted in walk order from the first endpoint towards the
//! second. Every pixel lies inside the bounding box of the two endpoints and
//! no pixel is emitted twice.

/// One rasterized pixel with its fractional coverage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaPixel {
    pub row: i64,
    pub col: i64,
    /// Fraction of the pixel covered by the line, 1.0 on the ideal line
    pub coverage: f64,
}

impl AaPixel {
    fn from_distance(row: i64, col: i64, distance: f64) -> Self {
        Self {
            row,
            col,
            coverage: (1.0 - distance).clamp(0.0, 1.0),
        }
    }
}

/// Rasterize the segment from `(r0, c0)` to `(r1, c1)` with anti-aliasing.
///
/// Both endpoints are always emitted with full coverage. A zero-length
/// segment yields exactly one pixel.
///
/// # Returns
/// Pixels in emission order, starting at `(r0, c0)`
pub fn line_aa(r0: i64, c0: i64, r1: i64, c1: i64) -> Vec<AaPixel> {
    let dc = (c0 - c1).abs();
    let dr = (r0 - r1).abs();
    let sign_c = if c0 < c1 { 1 } else { -1 };
    let sign_r = if r0 < r1 { 1 } else { -1 };

    let dc_f = dc as f64;
    let dr_f = dr as f64;
    let ed = if dc + dr == 0 {
        1.0
    } else {
        (dc_f * dc_f + dr_f * dr_f).sqrt()
    };

    let mut pixels = Vec::with_capacity(2 * (dc.max(dr) as usize + 1));
    let mut err = dc_f - dr_f;
    let (mut r, mut c) = (r0, c0);

    loop {
        pixels.push(AaPixel::from_distance(r, c, (err - dc_f + dr_f).abs() / ed));

        let err_prime = err;
        let c_prime = c;

        // Step along columns
        if 2.0 * err_prime >= -dc_f {
            if c == c1 {
                break;
            }
            if err_prime + dr_f < ed {
                pixels.push(AaPixel::from_distance(
                    r + sign_r,
                    c,
                    (err_prime + dr_f).abs() / ed,
                ));
            }
            err -= dr_f;
            c += sign_c;
        }

        // Step along rows
        if 2.0 * err_prime <= dr_f {
            if r == r1 {
                break;
            }
            if dc_f - err_prime < ed {
                pixels.push(AaPixel::from_distance(
                    r,
                    c_prime + sign_c,
                    (dc_f - err_prime).abs() / ed,
                ));
            }
            err += dc_f;
            r += sign_r;
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coords(pixels: &[AaPixel]) -> Vec<(i64, i64)> {
        pixels.iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn test_single_point() {
        let pixels = line_aa(7, 9, 7, 9);
        assert_eq!(coords(&pixels), vec![(7, 9)]);
        assert_relative_eq!(pixels[0].coverage, 1.0);
    }

    #[test]
    fn test_horizontal_line_full_coverage() {
        let pixels = line_aa(2, 0, 2, 3);
        assert_eq!(coords(&pixels), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
        for p in &pixels {
            assert_relative_eq!(p.coverage, 1.0);
        }
    }

    #[test]
    fn test_vertical_line_reversed() {
        let pixels = line_aa(5, 1, 2, 1);
        assert_eq!(coords(&pixels), vec![(5, 1), (4, 1), (3, 1), (2, 1)]);
    }

    #[test]
    fn test_diagonal_has_partial_neighbours() {
        let pixels = line_aa(0, 0, 2, 2);
        assert_eq!(
            coords(&pixels),
            vec![(0, 0), (1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (2, 2)]
        );

        let side = 1.0 - 2.0 / 8f64.sqrt();
        let expected = [1.0, side, side, 1.0, side, side, 1.0];
        for (p, e) in pixels.iter().zip(expected) {
            assert_relative_eq!(p.coverage, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_endpoints_emitted_first_and_last() {
        let pixels = line_aa(10, 4, 3, 17);
        let first = pixels.first().unwrap();
        let last = pixels.last().unwrap();
        assert_eq!((first.row, first.col), (10, 4));
        assert_eq!((last.row, last.col), (3, 17));
        assert_relative_eq!(first.coverage, 1.0);
        assert_relative_eq!(last.coverage, 1.0);
    }

    #[test]
    fn test_pixels_stay_in_bounding_box() {
        for &(r1, c1) in &[(0, 45), (45, 0), (13, 40), (40, 13), (21, 22), (45, 45)] {
            let pixels = line_aa(22, 22, r1, c1);
            for p in &pixels {
                assert!(p.row >= 22.min(r1) && p.row <= 22.max(r1));
                assert!(p.col >= 22.min(c1) && p.col <= 22.max(c1));
            }

            let mut seen: Vec<_> = coords(&pixels);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), pixels.len());
        }
    }

    #[test]
    fn test_coverage_in_unit_interval() {
        for &(r1, c1) in &[(0, 45), (45, 0), (13, 40), (40, 13), (0, 0), (45, 45)] {
            for p in line_aa(22, 22, r1, c1) {
                assert!((0.0..=1.0).contains(&p.coverage));
            }
        }
    }
}
