use std::io::Cursor;

use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, ImageFormat};

/// Display width for preview thumbnails.
pub const MAX_PREVIEW_WIDTH: u32 = 300;

/// Resize an image to the preview width, preserving aspect ratio, and
/// re-encode it as PNG for display.
pub fn resize_for_display(img: &DynamicImage) -> Result<Vec<u8>> {
    let aspect_ratio = img.height() as f64 / img.width() as f64;
    let new_height = ((MAX_PREVIEW_WIDTH as f64 * aspect_ratio).round() as u32).max(1);

    let resized = img.resize_exact(MAX_PREVIEW_WIDTH, new_height, FilterType::Lanczos3);

    let mut buf = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("failed to encode preview PNG")?;
    Ok(buf)
}
