use anyhow::{Context, Result};
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Decoded RGBA pixels ready for upload as a texture.
pub struct DecodedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
    pub mime_type: String,
}

pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let mime_type = image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| ImageFormat::Jpeg.to_mime_type().to_string());
    let image = image::load_from_memory(bytes).context("decode image")?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(DecodedImage {
        size,
        pixels: rgba.into_raw(),
        mime_type,
    })
}

pub fn read_image_file(path: &Path) -> Result<(Vec<u8>, DecodedImage)> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let decoded = decode_image(&bytes).with_context(|| format!("decode {}", path.display()))?;
    Ok((bytes, decoded))
}

pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Unique scratch file for one detection run.
pub fn temp_result_path() -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("sar-detect-{}-{}.img", std::process::id(), n))
}
