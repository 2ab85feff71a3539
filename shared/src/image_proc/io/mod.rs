//! Image output for frame inspection.
//!
//! The file format is chosen by the image crate from the path extension;
//! this workspace builds it with PNG support.

use ndarray::Array2;
use std::path::Path;

use super::image::array2_to_gray_image;

/// Save an 8-bit grayscale frame to `path`.
///
/// Parent directories are not created; callers own the output layout.
pub fn save_u8_image<P: AsRef<Path>>(image: &Array2<u8>, path: P) -> Result<(), image::ImageError> {
    let path = path.as_ref();
    array2_to_gray_image(image).save(path)?;
    log::debug!("Saved {}x{} image to {}", image.ncols(), image.nrows(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_helpers::scratch_dir;

    #[test]
    fn test_save_png_round_trip_dimensions() {
        let dir = scratch_dir("shared_save_u8_image");
        let path = dir.join("gradient.png");

        let arr = Array2::from_shape_fn((12, 30), |(r, c)| (r * 8 + c) as u8);
        save_u8_image(&arr, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded.dimensions(), (30, 12));
        assert_eq!(loaded.get_pixel(29, 11)[0], arr[[11, 29]]);
    }
}
