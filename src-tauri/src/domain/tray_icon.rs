//! Usage: Tray icon bitmaps as plain RGBA buffers (asset loading policy + procedural fallback).
//!
//! Nothing here touches the windowing toolkit: the host converts an [`RgbaIcon`] into a native
//! image only at the very edge, which keeps the sourcing rules testable.

/// Edge length the tray icon is normalized to.
pub const TRAY_ICON_SIZE: u32 = 16;

const FALLBACK_RGB: [u8; 3] = [102, 126, 234];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaIcon {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RgbaIcon {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, String> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(format!(
                "rgba buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            ));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// A fully transparent bitmap, used as the "off" frame while flashing.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = &self.rgba[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Where the "normal" tray bitmap comes from. `Ok(None)` means the asset does not exist.
pub trait IconSource {
    fn load(&self, size: u32) -> Result<Option<RgbaIcon>, String>;
}

/// Filled circle: opaque when the distance to the canvas center is strictly below `size/2 - 1`.
pub fn synthesize_fallback(size: u32) -> RgbaIcon {
    let mut rgba = vec![0u8; (size as usize) * (size as usize) * 4];
    let center = f64::from(size) / 2.0;
    let radius = center - 1.0;

    for y in 0..size {
        for x in 0..size {
            let dx = f64::from(x) - center;
            let dy = f64::from(y) - center;
            if (dx * dx + dy * dy).sqrt() < radius {
                let offset = ((y * size + x) * 4) as usize;
                rgba[offset..offset + 3].copy_from_slice(&FALLBACK_RGB);
                rgba[offset + 3] = 255;
            }
        }
    }

    RgbaIcon {
        width: size,
        height: size,
        rgba,
    }
}

/// Pick the canonical tray bitmap: the asset when it loads and is non-empty, the fallback otherwise.
pub fn resolve_normal_icon(source: &dyn IconSource) -> RgbaIcon {
    match source.load(TRAY_ICON_SIZE) {
        Ok(Some(icon)) if !icon.is_empty() => {
            tracing::debug!(
                width = icon.width(),
                height = icon.height(),
                "托盘图标资源已加载"
            );
            return icon;
        }
        Ok(Some(_)) => tracing::debug!("托盘图标资源为空，使用生成的图标"),
        Ok(None) => tracing::debug!("未找到托盘图标资源，使用生成的图标"),
        Err(err) => tracing::warn!("托盘图标资源加载失败，使用生成的图标: {err}"),
    }
    synthesize_fallback(TRAY_ICON_SIZE)
}
