//! 入力画像の読み込み

use crate::error::{Result, SarDetectError};
use sar_detect_common::mime_from_file_name;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InputImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// 画像ファイルを読み込む（拡張子からMIMEタイプを決める）
pub fn load_image(path: &Path) -> Result<InputImage> {
    if !path.is_file() {
        return Err(SarDetectError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mime_type = mime_from_file_name(&file_name)
        .ok_or_else(|| SarDetectError::NotAnImage(file_name.clone()))?;

    let bytes = std::fs::read(path)?;
    tracing::debug!(file = %file_name, mime = mime_type, size = bytes.len(), "image loaded");

    Ok(InputImage {
        path: path.to_path_buf(),
        file_name,
        mime_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("uav_0001.JPG");
        fs::write(&path, b"jpeg-bytes").unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.file_name, "uav_0001.JPG");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, b"jpeg-bytes");
        assert_eq!(image.path, path);
    }

    #[test]
    fn test_load_image_not_found() {
        let result = load_image(Path::new("/nonexistent/uav.jpg"));
        assert!(matches!(result, Err(SarDetectError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = load_image(dir.path());
        assert!(matches!(result, Err(SarDetectError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_rejects_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flight-log.csv");
        fs::write(&path, "lat,lon").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(SarDetectError::NotAnImage(name)) if name == "flight-log.csv"));
    }
}
