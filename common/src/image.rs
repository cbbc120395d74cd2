//! 画像形式の判定
//!
//! - 選択ファイルが画像かどうか（MIMEタイプ / 拡張子）
//! - 検出サービスのレスポンスが画像かどうか
//! - 結果ファイルの拡張子

/// 拡張子 → MIMEタイプ
const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// MIMEタイプのパラメータ（"; charset=..."）を除いた本体を小文字で返す
fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// `image/*` かどうか
pub fn is_image_mime(mime: &str) -> bool {
    let essence = essence(mime);
    essence
        .strip_prefix("image/")
        .map(|subtype| !subtype.is_empty())
        .unwrap_or(false)
}

/// ファイル名の拡張子からMIMEタイプを推定
pub fn mime_from_file_name(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// MIMEタイプから結果ファイルの拡張子を決める（不明ならjpg）
pub fn extension_for_mime(mime: &str) -> &'static str {
    match essence(mime).as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "jpg",
    }
}

/// 成功レスポンスの本文を画像として受け入れるか
///
/// Content-Typeが無い場合と `application/octet-stream` は受け入れる。
pub fn is_image_response(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(ct) if ct.trim().is_empty() => true,
        Some(ct) => is_image_mime(ct) || essence(ct) == "application/octet-stream",
    }
}
