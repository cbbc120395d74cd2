use thiserror::Error;

#[derive(Error, Debug)]
pub enum SarDetectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIのURLが不正です: {0}（`sar-detect config --set-api-url URL` で設定してください）")]
    InvalidApiUrl(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("Detection failed (HTTP {0})")]
    DetectionFailed(u16),

    #[error("検出サービスが画像以外を返しました: {0}")]
    UnexpectedContent(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(sar_detect_common::Error),
}

impl From<sar_detect_common::Error> for SarDetectError {
    fn from(err: sar_detect_common::Error) -> Self {
        match err {
            sar_detect_common::Error::InvalidApiUrl(url) => SarDetectError::InvalidApiUrl(url),
            sar_detect_common::Error::NotAnImage(name) => SarDetectError::NotAnImage(name),
            other => SarDetectError::Common(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, SarDetectError>;
