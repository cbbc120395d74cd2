//! 検出サービスのエンドポイント
//!
//! `POST {api_url}/detect` に multipart の `file` フィールドで画像を送る。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// APIのベースURL（未設定時）
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 検出エンドポイントのパス
pub const DETECT_PATH: &str = "/detect";

/// multipartフィールド名
pub const FILE_FIELD: &str = "file";

/// 検証済みのAPIベースURL（末尾スラッシュなし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    pub fn parse(base: &str) -> Result<Self> {
        let trimmed = base.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| Error::InvalidApiUrl(base.to_string()))?;

        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(Error::InvalidApiUrl(base.to_string()));
        }

        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/detect`
    pub fn detect_url(&self) -> String {
        format!("{}{}", self.base, DETECT_PATH)
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_URL.to_string(),
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl TryFrom<String> for ApiEndpoint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ApiEndpoint> for String {
    fn from(endpoint: ApiEndpoint) -> Self {
        endpoint.base
    }
}
