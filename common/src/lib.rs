//! sar-detect Common Library
//!
//! CLI・デスクトップ・Web(WASM)で共有される状態とルール

pub mod download;
pub mod endpoint;
pub mod error;
pub mod image;
pub mod messages;
pub mod session;

pub use download::{original_download_name, result_download_name, RESULT_FILE_NAME};
pub use endpoint::{ApiEndpoint, DEFAULT_API_URL, DETECT_PATH, FILE_FIELD};
pub use error::{Error, Result};
pub use image::{extension_for_mime, is_image_mime, is_image_response, mime_from_file_name};
pub use session::{DetectionSession, DetectionTicket, Selection};
