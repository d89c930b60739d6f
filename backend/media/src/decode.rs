use image::DynamicImage;
use tracing::debug;

use glowcheck_core::ScanError;

/// Decode an uploaded or captured image.
///
/// Runs at upload time so an undecodable payload is rejected before any
/// analysis is triggered.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ScanError> {
    let img = image::load_from_memory(bytes).map_err(|e| ScanError::Decode(e.to_string()))?;
    debug!(width = img.width(), height = img.height(), "decoded input image");
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_well_formed_png() {
        let bytes = png_bytes(12, 8);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (12, 8));
    }

    #[test]
    fn rejects_garbage_with_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ScanError::Decode(_)));
    }

    #[test]
    fn rejects_truncated_image() {
        let mut bytes = png_bytes(12, 8);
        bytes.truncate(20);
        assert!(decode_image(&bytes).is_err());
    }
}
