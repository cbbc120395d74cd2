use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use sar_detect_common::DetectionTicket;
use sar_detect_common::messages::{GENERIC_FAILURE, failure_message};

use crate::io::{DecodedImage, decode_image, temp_result_path};

/// Prefix the CLI puts on its final error line.
const CLI_FAILURE_PREFIX: &str = "✖ ";

pub struct DetectedResult {
    pub bytes: Vec<u8>,
    pub image: DecodedImage,
}

pub struct DetectOutcome {
    pub ticket: DetectionTicket,
    pub result: Result<DetectedResult, String>,
}

/// A detection running on the worker thread.
pub struct PendingDetection {
    ticket: DetectionTicket,
    rx: Receiver<DetectOutcome>,
}

impl PendingDetection {
    /// `None` while the worker is still running.
    ///
    /// A worker that exits without reporting still completes the request.
    pub fn poll(&self) -> Option<DetectOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(DetectOutcome {
                ticket: self.ticket,
                result: Err(GENERIC_FAILURE.to_string()),
            }),
        }
    }
}

/// Runs `sar-detect detect` on a background thread.
pub fn spawn_detection(cli: PathBuf, image: PathBuf, ticket: DetectionTicket) -> PendingDetection {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = run_detection(&cli, &image);
        let _ = tx.send(DetectOutcome { ticket, result });
    });
    PendingDetection { ticket, rx }
}

fn run_detection(cli: &Path, image: &Path) -> Result<DetectedResult, String> {
    let output_path = temp_result_path();
    let output = std::process::Command::new(cli)
        .args(cli_args(image, &output_path))
        .output()
        .map_err(|err| format!("Failed to start {}: {err}", cli.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(cli_failure_message(&stderr));
    }

    let bytes = std::fs::read(&output_path).map_err(|err| format!("Read result failed: {err}"));
    let _ = std::fs::remove_file(&output_path);
    let bytes = bytes?;

    let image = decode_image(&bytes).map_err(|err| format!("{err:#}"))?;
    Ok(DetectedResult { bytes, image })
}

pub fn cli_args(image: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "detect".into(),
        image.as_os_str().to_os_string(),
        "--output".into(),
        output.as_os_str().to_os_string(),
    ]
}

/// Picks the message to show from the CLI's stderr.
pub fn cli_failure_message(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let line = lines
        .iter()
        .rev()
        .find_map(|l| l.strip_prefix(CLI_FAILURE_PREFIX.trim_end()))
        .or_else(|| lines.last().copied())
        .unwrap_or_default();
    failure_message(line)
}

pub fn resolve_cli_binary() -> PathBuf {
    let binary = format!("sar-detect{}", std::env::consts::EXE_SUFFIX);
    let exe = std::env::current_exe().ok();
    if let Some(base_dir) = exe.as_ref().and_then(|p| p.parent()) {
        let local = base_dir.join(&binary);
        if local.exists() {
            return local;
        }
        if let Some(target_dir) = base_dir.parent() {
            let sibling = target_dir.join("debug").join(&binary);
            if sibling.exists() {
                return sibling;
            }
            let release = target_dir.join("release").join(&binary);
            if release.exists() {
                return release;
            }
        }
    }
    PathBuf::from(binary)
}
