//! Usage: Load the tray icon asset from disk (PNG decode + resize) as an `IconSource`.

use crate::domain::tray_icon::{IconSource, RgbaIcon};
use image::imageops::FilterType;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileIconSource {
    path: PathBuf,
}

impl FileIconSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IconSource for FileIconSource {
    fn load(&self, size: u32) -> Result<Option<RgbaIcon>, String> {
        if !self.path.exists() {
            return Ok(None);
        }

        let decoded = image::open(&self.path)
            .map_err(|e| format!("failed to decode {}: {e}", self.path.display()))?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Ok(Some(RgbaIcon::transparent(0, 0)));
        }

        let resized = decoded.resize_exact(size, size, FilterType::Triangle).into_rgba8();
        let (width, height) = resized.dimensions();
        RgbaIcon::new(width, height, resized.into_raw()).map(Some)
    }
}
