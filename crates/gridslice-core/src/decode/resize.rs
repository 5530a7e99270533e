//! Image rescaling.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidTargetSize` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer doesn't match the image
/// dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidTargetSize { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Scale an image by an integer `factor`, capping the longest edge at
/// `max_edge` while preserving aspect ratio.
///
/// An image whose longest edge already reaches `max_edge` is returned
/// unchanged; it is never shrunk.
pub fn scale_to_fit(
    image: &DecodedImage,
    factor: u32,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let factor = factor.max(1);
    let target_w = image.width.saturating_mul(factor);
    let target_h = image.height.saturating_mul(factor);

    let (width, height) = if target_w.max(target_h) > max_edge {
        calculate_fit_dimensions(target_w, target_h, max_edge)
    } else {
        (target_w, target_h)
    };

    if width <= image.width || height <= image.height {
        return Ok(image.clone());
    }

    resize(image, width, height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let resized = resize(&gradient(100, 50), 50, 25, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions_is_clone() {
        let img = gradient(40, 30);
        assert_eq!(resize(&img, 40, 30, FilterType::Lanczos3).unwrap(), img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(10, 10);
        assert!(matches!(
            resize(&img, 0, 5, FilterType::Nearest),
            Err(DecodeError::InvalidTargetSize { .. })
        ));
    }

    #[test]
    fn test_resize_bad_buffer_error() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Nearest),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_scale_to_fit_doubles() {
        let scaled = scale_to_fit(&gradient(60, 40), 2, 4096, FilterType::Lanczos3).unwrap();
        assert_eq!((scaled.width, scaled.height), (120, 80));
    }

    #[test]
    fn test_scale_to_fit_caps_long_edge() {
        let scaled = scale_to_fit(&gradient(300, 200), 4, 600, FilterType::Bilinear).unwrap();
        assert_eq!((scaled.width, scaled.height), (600, 400));
    }

    #[test]
    fn test_scale_to_fit_never_shrinks() {
        let img = gradient(800, 600);
        let scaled = scale_to_fit(&img, 2, 500, FilterType::Bilinear).unwrap();
        assert_eq!((scaled.width, scaled.height), (800, 600));
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
    }
}
