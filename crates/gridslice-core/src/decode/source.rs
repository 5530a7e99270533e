//! Decoding of the uploaded source image with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content, so the mime type reported by the
/// caller is not trusted.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input or an unrecognized
/// format, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let decoded = DecodedImage::from_rgb_image(apply_orientation(img, orientation).into_rgb8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(decoded)
}

/// Mime type of the encoded image, judged from its magic bytes.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// EXIF orientation of the image (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    fn two_pixel_image() -> DynamicImage {
        // Red on the left, green on the right
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_decode_png() {
        let pixels: Vec<u8> = (0..6 * 4 * 3).map(|i| (i % 256) as u8).collect();
        let png = encode_png(&pixels, 6, 4).unwrap();

        let img = decode_image(&png).unwrap();
        assert_eq!((img.width, img.height), (6, 4));
        // PNG is lossless
        assert_eq!(img.pixels, pixels);
    }

    #[test]
    fn test_decode_jpeg() {
        let jpeg = encode_jpeg(&vec![200u8; 16 * 8 * 3], 16, 8, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_unknown_format() {
        assert!(matches!(
            decode_image(&[0x00, 0x01, 0x02, 0x03]),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&vec![0u8; 8 * 8 * 3], 8, 8).unwrap();
        let truncated = &png[..png.len() / 2];
        assert!(matches!(
            decode_image(truncated),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_sniff_mime_type() {
        let png = encode_png(&[0u8; 3], 1, 1).unwrap();
        let jpeg = encode_jpeg(&[0u8; 3], 1, 1, 90).unwrap();
        assert_eq!(sniff_mime_type(&png), Some("image/png"));
        assert_eq!(sniff_mime_type(&jpeg), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(b"not an image"), None);
    }

    #[test]
    fn test_orientation_without_exif() {
        let png = encode_png(&[0u8; 3], 1, 1).unwrap();
        assert_eq!(get_orientation(&png), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps() {
        let rotated = apply_orientation(two_pixel_image(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
        // Rotating clockwise puts the left pixel on top
        assert_eq!(rotated.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_mirrors() {
        let flipped = apply_orientation(two_pixel_image(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);

        let turned = apply_orientation(two_pixel_image(), Orientation::Rotate180).into_rgb8();
        assert_eq!(turned.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let same = apply_orientation(two_pixel_image(), Orientation::Normal).into_rgb8();
        assert_eq!(same.get_pixel(0, 0).0, [255, 0, 0]);
    }
}
