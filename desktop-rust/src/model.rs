use std::path::PathBuf;

use eframe::egui::TextureHandle;
use sar_detect_common::DetectionSession;

/// Image shown in one of the two panes.
pub struct Preview {
    pub texture: TextureHandle,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub size: [usize; 2],
}

pub type DesktopSession = DetectionSession<PathBuf, Preview>;
