//! 検出サービスのHTTPクライアント
//!
//! `POST {api_url}/detect` に multipart の `file` フィールドで画像を送る。
//! 成功ステータスかつ画像のレスポンスだけを成功とみなす。

use crate::error::{Result, SarDetectError};
use crate::input::InputImage;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use sar_detect_common::{extension_for_mime, is_image_response, ApiEndpoint, FILE_FIELD};
use std::time::Duration;

/// 検出結果（注釈付き画像）
#[derive(Debug, Clone)]
pub struct DetectedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl DetectedImage {
    /// 保存用の拡張子
    ///
    /// 画像のシグネチャを優先し、判定できなければContent-Typeから決める。
    pub fn file_extension(&self) -> &'static str {
        image::guess_format(&self.bytes)
            .ok()
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or_else(|| extension_for_mime(self.content_type.as_deref().unwrap_or_default()))
    }
}

pub struct DetectClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl DetectClient {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    pub async fn detect(&self, image: &InputImage) -> Result<DetectedImage> {
        self.detect_bytes(&image.file_name, image.mime_type, image.bytes.clone())
            .await
    }

    pub async fn detect_bytes(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<DetectedImage> {
        let url = self.endpoint.detect_url();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(%url, file = file_name, "sending detection request");
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "detection request failed");
            return Err(SarDetectError::DetectionFailed(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !is_image_response(content_type.as_deref()) {
            return Err(SarDetectError::UnexpectedContent(
                content_type.unwrap_or_default(),
            ));
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(size = bytes.len(), content_type = ?content_type, "detection result received");

        Ok(DetectedImage {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_extension_from_signature() {
        let image = DetectedImage {
            bytes: PNG_SIGNATURE.to_vec(),
            content_type: Some("image/jpeg".to_string()),
        };
        assert_eq!(image.file_extension(), "png");
    }

    #[test]
    fn test_extension_from_content_type() {
        let image = DetectedImage {
            bytes: b"not-a-known-signature".to_vec(),
            content_type: Some("image/webp".to_string()),
        };
        assert_eq!(image.file_extension(), "webp");
    }

    #[test]
    fn test_extension_default() {
        let image = DetectedImage {
            bytes: Vec::new(),
            content_type: None,
        };
        assert_eq!(image.file_extension(), "jpg");
    }
}
