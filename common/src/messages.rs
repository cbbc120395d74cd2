//! ユーザーに表示するメッセージ
//!
//! Web・CLI・デスクトップで同じ文言を使う。

/// 検出サービスが成功以外のステータスを返した
pub const DETECTION_FAILED: &str = "Detection failed";

/// メッセージを持たない失敗
pub const GENERIC_FAILURE: &str = "An error occurred";

/// 画像の保存・ダウンロードに失敗した
pub const DOWNLOAD_FAILED: &str = "Failed to download image";

/// 画像以外のファイルが選択された
pub const NOT_AN_IMAGE: &str = "Please select an image file (JPG, PNG)";

/// 失敗メッセージを正規化（空ならGENERIC_FAILURE）
pub fn failure_message(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        trimmed.to_string()
    }
}
