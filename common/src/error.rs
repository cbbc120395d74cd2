//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("No image selected")]
    NoSelection,

    #[error("Detection already in progress")]
    Busy,

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
