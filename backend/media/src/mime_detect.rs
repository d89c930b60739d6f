//! MIME type detection for uploaded files.
//!
//! Used by the upload path to label files and reject unsupported types
//! before decoding.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _              => "application/octet-stream",
    }
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether a MIME type is one the ingredient-label upload accepts.
pub fn is_supported_upload(mime: &str) -> bool {
    matches!(
        mime,
        "image/png" | "image/jpeg" | "image/gif" | "image/webp"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_mime_type(&PathBuf::from("label.jpg")), "image/jpeg");
    }

    #[test]
    fn detects_uppercase_extension() {
        assert_eq!(detect_mime_type(&PathBuf::from("label.PNG")), "image/png");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(
            detect_mime_type(&PathBuf::from("file.xyz")),
            "application/octet-stream"
        );
    }

    #[test]
    fn supported_uploads() {
        assert!(is_supported_upload("image/png"));
        assert!(is_supported_upload("image/gif"));
        assert!(!is_supported_upload("image/tiff"));
        assert!(!is_supported_upload("application/pdf"));
    }
}
