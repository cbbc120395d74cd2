//! ビルド済みバイナリのテスト（HOMEを一時ディレクトリに向ける）

use std::process::Command;
use tempfile::tempdir;

fn sar_detect(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sar-detect"));
    cmd.env("HOME", home)
        .env_remove("SAR_DETECT_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_set_api_url_repairs_broken_file() {
    let home = tempdir().unwrap();
    let config_dir = home.path().join(".config").join("sar-detect");
    std::fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("config.json");
    std::fs::write(&config_path, r#"{"api_url": "localhost:8000"}"#).unwrap();

    let output = sar_detect(home.path())
        .args(["config", "--set-api-url", "http://gpu-box:8000"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let saved = std::fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("http://gpu-box:8000"));
}

#[test]
fn test_detect_reports_broken_config() {
    let home = tempdir().unwrap();
    let config_dir = home.path().join(".config").join("sar-detect");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), r#"{"api_url": "localhost:8000"}"#).unwrap();

    let output = sar_detect(home.path())
        .args(["detect", "uav.jpg"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().any(|l| l.starts_with("✖ ")));
}
