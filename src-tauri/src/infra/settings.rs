//! Usage: Persisted application settings (schema + read/write helpers).

use crate::app_paths;
use crate::shared::fs::read_optional_file;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 7;
const MAX_LOG_RETENTION_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    pub notifications_enabled: bool,
    pub notification_silent: bool,
    // Hide the window to the tray right after startup.
    pub start_minimized: bool,
    pub log_retention_days: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            notifications_enabled: true,
            notification_silent: false,
            start_minimized: false,
            log_retention_days: DEFAULT_LOG_RETENTION_DAYS,
        }
    }
}

pub(crate) fn validate(settings: &AppSettings) -> Result<(), String> {
    if settings.log_retention_days == 0 {
        return Err("log_retention_days must be >= 1".to_string());
    }
    if settings.log_retention_days > MAX_LOG_RETENTION_DAYS {
        return Err(format!(
            "log_retention_days must be <= {MAX_LOG_RETENTION_DAYS}"
        ));
    }
    Ok(())
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    read_from(&settings_path(app)?)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    write_to(&settings_path(app)?, settings)
}

pub(crate) fn read_from(path: &Path) -> Result<AppSettings, String> {
    let Some(bytes) = read_optional_file(path)? else {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write_to(path, &settings);
        return Ok(settings);
    };

    let mut settings: AppSettings = serde_json::from_slice(&bytes)
        .map_err(|e| format!("failed to parse settings.json: {e}"))?;

    if let Err(err) = validate(&settings) {
        return Err(format!("invalid settings.json: {err}"));
    }

    if settings.schema_version != SCHEMA_VERSION {
        settings.schema_version = SCHEMA_VERSION;
        // Best-effort: persist the current schema_version so the file stays in sync.
        let _ = write_to(path, &settings);
    }

    Ok(settings)
}

pub(crate) fn write_to(path: &Path, settings: &AppSettings) -> Result<AppSettings, String> {
    validate(settings)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create settings dir: {e}"))?;
    }

    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::rename(&backup_path, path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings.clone())
}
