//! Pixel-exact tile cropping.

use crate::decode::DecodedImage;
use crate::geometry::BoundingBox;

/// Crop the region covered by a normalized box.
///
/// The box is scaled to the image's pixel grid and snapped to whole pixels
/// with [`PixelBox::crop_rect`](crate::geometry::PixelBox::crop_rect). The
/// result is never smaller than 1x1 for a non-empty source.
pub fn crop_box(image: &DecodedImage, bbox: &BoundingBox) -> DecodedImage {
    let (x, y, w, h) = bbox
        .to_pixels(image.width, image.height)
        .crop_rect(image.width, image.height);
    crop_pixels(image, x, y, w, h)
}

/// Copy a pixel rectangle out of `image`.
///
/// The rectangle is clamped to the image bounds, with a minimum of 1x1. An
/// empty source yields an empty image.
pub fn crop_pixels(image: &DecodedImage, x: u32, y: u32, width: u32, height: u32) -> DecodedImage {
    if image.is_empty() {
        return DecodedImage::new(0, 0, Vec::new());
    }

    if x == 0 && y == 0 && width >= image.width && height >= image.height {
        return image.clone();
    }

    let left = x.min(image.width - 1);
    let top = y.min(image.height - 1);
    let out_width = width.min(image.width - left).max(1);
    let out_height = height.min(image.height - top).max(1);

    let src_stride = image.width as usize * 3;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for row in top..top + out_height {
        let start = row as usize * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pixel carries its own position: R = x, G = y.
    fn coordinate_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_crop_full_box_is_identity() {
        let img = coordinate_image(40, 30);
        let result = crop_box(&img, &BoundingBox::new(0.0, 0.0, 1000.0, 1000.0));
        assert_eq!(result, img);
    }

    #[test]
    fn test_crop_box_quadrant() {
        let img = coordinate_image(100, 80);
        let result = crop_box(&img, &BoundingBox::new(500.0, 500.0, 1000.0, 1000.0));

        assert_eq!((result.width, result.height), (50, 40));
        assert_eq!(result.pixel(0, 0), Some([50, 40, 0]));
        assert_eq!(result.pixel(49, 39), Some([99, 79, 0]));
    }

    #[test]
    fn test_crop_box_center_region() {
        let img = coordinate_image(200, 200);
        let result = crop_box(&img, &BoundingBox::new(250.0, 250.0, 750.0, 750.0));

        assert_eq!((result.width, result.height), (100, 100));
        assert_eq!(result.pixel(0, 0), Some([50, 50, 0]));
        assert_eq!(result.pixel(99, 99), Some([149, 149, 0]));
    }

    #[test]
    fn test_crop_pixels_clamps_to_bounds() {
        let img = coordinate_image(10, 10);
        let result = crop_pixels(&img, 8, 8, 5, 5);
        assert_eq!((result.width, result.height), (2, 2));
        assert_eq!(result.pixel(1, 1), Some([9, 9, 0]));
    }

    #[test]
    fn test_crop_pixels_origin_past_edge() {
        let img = coordinate_image(10, 10);
        let result = crop_pixels(&img, 50, 50, 5, 5);
        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixel(0, 0), Some([9, 9, 0]));
    }

    #[test]
    fn test_crop_pixels_minimum_size() {
        let img = coordinate_image(10, 10);
        let result = crop_pixels(&img, 3, 3, 0, 0);
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_crop_empty_source() {
        let img = DecodedImage::new(0, 0, Vec::new());
        assert!(crop_pixels(&img, 0, 0, 10, 10).is_empty());
    }
}
