//! Image handling for the upload/capture path: decode validation, preview
//! resizing, and MIME detection.

pub mod decode;
pub mod mime_detect;
pub mod resize;

pub use decode::decode_image;
pub use mime_detect::{detect_mime_type, is_image, is_supported_upload};
pub use resize::{resize_for_display, MAX_PREVIEW_WIDTH};
