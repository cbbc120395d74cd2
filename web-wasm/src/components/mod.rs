pub mod detect_button;
pub mod error_banner;
pub mod header;
pub mod image_preview;
pub mod upload_zone;
