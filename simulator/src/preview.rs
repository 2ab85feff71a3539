//! Preview mosaics of randomly chosen frames
//!
//! Picks a random sample of frames, lays them out on a roughly square grid
//! and renders one 8-bit image for visual inspection. Each tile is scaled to
//! its own maximum and drawn with row 0 at the bottom, the usual orientation
//! for sensor images.

use std::path::Path;

use ndarray::{s, Array2};
use rand::Rng;
use shared::image_proc::{save_u8_image, u16_to_u8_auto_scale};
use thiserror::Error;

use crate::synth::Frame;

/// Value of the separator lines between tiles
const GAP_VALUE: u8 = u8::MAX;

/// Errors that can occur while building a preview
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("No frames have been generated, nothing to preview")]
    NothingGenerated,
    #[error("Preview needs at least one frame")]
    ZeroSamples,
    #[error("Frames have mixed shapes")]
    MixedShapes,
    #[error("{tiles} tiles do not fit a {rows}x{cols} grid")]
    GridMismatch {
        tiles: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Failed to write preview image: {0}")]
    Image(#[from] image::ImageError),
}

/// Frames chosen for a preview and their arrangement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewGrid {
    pub rows: usize,
    pub cols: usize,
    /// Frame index for each tile in row-major tile order
    pub indices: Vec<usize>,
}

/// Most square `(rows, cols)` with `rows * cols == n` and `rows <= cols`.
///
/// Prime counts end up as a single row.
pub fn preview_grid_shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut rows = (n as f64).sqrt() as usize;
    while rows > 1 && n % rows != 0 {
        rows -= 1;
    }
    let rows = rows.max(1);
    (rows, n / rows)
}

/// Choose `number` frames uniformly at random (with replacement).
pub fn sample_preview<R: Rng + ?Sized>(
    frame_count: usize,
    number: usize,
    rng: &mut R,
) -> Result<PreviewGrid, PreviewError> {
    if frame_count == 0 {
        return Err(PreviewError::NothingGenerated);
    }
    if number == 0 {
        return Err(PreviewError::ZeroSamples);
    }

    let (rows, cols) = preview_grid_shape(number);
    let indices = (0..number).map(|_| rng.gen_range(0..frame_count)).collect();

    Ok(PreviewGrid {
        rows,
        cols,
        indices,
    })
}

/// Tile the frames selected by `grid` into one image with 1-pixel gaps.
pub fn render_mosaic(frames: &[Frame], grid: &PreviewGrid) -> Result<Array2<u8>, PreviewError> {
    let capacity = grid.rows.checked_mul(grid.cols).unwrap_or(usize::MAX);
    if capacity == 0 || grid.indices.len() > capacity {
        return Err(PreviewError::GridMismatch {
            tiles: grid.indices.len(),
            rows: grid.rows,
            cols: grid.cols,
        });
    }

    let first = frames.first().ok_or(PreviewError::NothingGenerated)?;
    let (tile_h, tile_w) = first.dim();
    if frames.iter().any(|f| f.dim() != (tile_h, tile_w)) {
        return Err(PreviewError::MixedShapes);
    }

    let height = grid.rows * (tile_h + 1) - 1;
    let width = grid.cols * (tile_w + 1) - 1;
    let mut mosaic = Array2::from_elem((height, width), GAP_VALUE);

    for (tile, &frame_idx) in grid.indices.iter().enumerate() {
        let Some(frame) = frames.get(frame_idx) else {
            continue;
        };
        let top = (tile / grid.cols) * (tile_h + 1);
        let left = (tile % grid.cols) * (tile_w + 1);

        let scaled = u16_to_u8_auto_scale(frame);
        mosaic
            .slice_mut(s![top..top + tile_h, left..left + tile_w])
            .assign(&scaled.slice(s![..;-1, ..]));
    }

    Ok(mosaic)
}

/// Sample `number` frames, render the mosaic and save it to `path`.
pub fn save_preview<R: Rng + ?Sized>(
    frames: &[Frame],
    number: usize,
    path: &Path,
    rng: &mut R,
) -> Result<PreviewGrid, PreviewError> {
    let grid = sample_preview(frames.len(), number, rng)?;
    log::info!(
        "Displaying a random sample of {} frames ({}x{}) in {}",
        number,
        grid.rows,
        grid.cols,
        path.display()
    );

    let mosaic = render_mosaic(frames, &grid)?;
    save_u8_image(&mosaic, path)?;
    Ok(grid)
}
