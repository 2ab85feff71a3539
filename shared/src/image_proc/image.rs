//! Conversions between ndarray frames and image crate types.
//!
//! ndarray indexes frames as `[row, col]` with `(height, width)` dimensions;
//! the image crate uses `(x, y)` with `(width, height)`. These helpers keep
//! the orientation consistent when exporting frames for viewing.

use image::{GrayImage, Luma};
use ndarray::Array2;

/// Convert `Array2<u8>` to a `GrayImage`, mapping `[row, col]` to pixel `(col, row)`.
pub fn array2_to_gray_image(arr: &Array2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut img = GrayImage::new(width as u32, height as u32);

    for ((y, x), &value) in arr.indexed_iter() {
        img.put_pixel(x as u32, y as u32, Luma([value]));
    }

    img
}

/// Convert count data to 8-bit display range by scaling `[0, max]` to `[0, 255]`.
///
/// An all-zero frame maps to an all-zero image.
pub fn u16_to_u8_auto_scale(image: &Array2<u16>) -> Array2<u8> {
    let max_value = image.iter().copied().max().unwrap_or(0);

    if max_value == 0 {
        return Array2::zeros(image.dim());
    }

    image.mapv(|x| ((x as f32 * 255.0) / max_value as f32) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_gray_image_orientation() {
        let arr = array![[1u8, 2, 3], [4, 5, 6]];
        let img = array2_to_gray_image(&arr);

        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 0)[0], 3);
        assert_eq!(img.get_pixel(0, 1)[0], 4);
    }

    #[test]
    fn test_auto_scale() {
        let arr = array![[0u16, 5], [10, 20]];
        let scaled = u16_to_u8_auto_scale(&arr);
        assert_eq!(scaled, array![[0u8, 63], [127, 255]]);
    }

    #[test]
    fn test_auto_scale_blank() {
        let arr = Array2::<u16>::zeros((4, 4));
        assert!(u16_to_u8_auto_scale(&arr).iter().all(|&v| v == 0));
    }
}
