//! 結果画像の保存先

use crate::error::Result;
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = "-detection";

/// `<stem>-detection.<ext>`
pub fn result_file_name(input: &Path, extension: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string());
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, extension)
}

/// 保存先を決める
///
/// - 指定なし: 入力と同じフォルダ
/// - ディレクトリ指定: その中に `<stem>-detection.<ext>`
/// - ファイル指定: そのまま
pub fn resolve_output_path(input: &Path, output: Option<&Path>, extension: &str) -> PathBuf {
    let file_name = result_file_name(input, extension);
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .unwrap_or(Path::new("."))
            .join(file_name),
    }
}

pub fn write_result(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
