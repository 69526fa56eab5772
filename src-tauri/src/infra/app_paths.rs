//! Usage: Resolve per-user app data directory and related path helpers.

use std::path::{Path, PathBuf};
use tauri::Manager;

pub const APP_DOTDIR_NAME: &str = ".tray-todo";
const APP_DOTDIR_NAME_ENV: &str = "TRAY_TODO_DOTDIR_NAME";
const TRAY_ICON_RESOURCE: &str = "assets/icon.png";

fn is_safe_dotdir_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if !name.starts_with('.') {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

fn dotdir_name() -> String {
    std::env::var(APP_DOTDIR_NAME_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| is_safe_dotdir_name(v))
        .unwrap_or_else(|| APP_DOTDIR_NAME.to_string())
}

pub fn app_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let home_dir = app
        .path()
        .home_dir()
        .map_err(|e| format!("failed to resolve home dir: {e}"))?;

    let dir = home_dir.join(dotdir_name());
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}

pub fn logs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Bundled tray/notification icon. Falls back to the dev tree when the resource dir lacks it.
pub fn tray_icon_asset(app: &tauri::AppHandle) -> PathBuf {
    match app
        .path()
        .resolve(TRAY_ICON_RESOURCE, tauri::path::BaseDirectory::Resource)
    {
        Ok(path) if path.exists() => path,
        Ok(path) => {
            let dev_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(TRAY_ICON_RESOURCE);
            if dev_path.exists() {
                dev_path
            } else {
                path
            }
        }
        Err(err) => {
            tracing::debug!("托盘图标资源路径解析失败: {err}");
            Path::new(env!("CARGO_MANIFEST_DIR")).join(TRAY_ICON_RESOURCE)
        }
    }
}
