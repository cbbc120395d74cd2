//! ダウンロード時のファイル名

use crate::image::extension_for_mime;

/// 結果画像の既定ファイル名
pub const RESULT_FILE_NAME: &str = "detection-result.jpg";

const RESULT_FILE_STEM: &str = "detection-result";

/// 元画像のダウンロード名（選択ファイル名をそのまま使う）
pub fn original_download_name(file_name: &str) -> String {
    let name = file_name.trim();
    if name.is_empty() {
        "image.jpg".to_string()
    } else {
        name.to_string()
    }
}

/// 結果画像のダウンロード名（レスポンスのContent-Typeから拡張子を決める）
pub fn result_download_name(content_type: Option<&str>) -> String {
    match content_type {
        Some(ct) => format!("{}.{}", RESULT_FILE_STEM, extension_for_mime(ct)),
        None => RESULT_FILE_NAME.to_string(),
    }
}
