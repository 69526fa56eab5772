//! Usage: Settings and autostart commands.

use crate::{autostart, blocking, settings};

#[tauri::command]
pub(crate) async fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    blocking::run("settings_get", move || settings::read(&app)).await
}

#[tauri::command]
pub(crate) async fn settings_set(
    app: tauri::AppHandle,
    notifications_enabled: bool,
    notification_silent: bool,
    start_minimized: bool,
    log_retention_days: u32,
) -> Result<settings::AppSettings, String> {
    blocking::run("settings_set", move || {
        let current = settings::read(&app).unwrap_or_default();
        let next = settings::AppSettings {
            schema_version: current.schema_version,
            notifications_enabled,
            notification_silent,
            start_minimized,
            log_retention_days,
        };
        settings::validate(&next).map_err(|e| format!("SEC_INVALID_INPUT: {e}"))?;
        settings::write(&app, &next)
    })
    .await
}

#[tauri::command]
pub(crate) async fn autostart_get(app: tauri::AppHandle) -> Result<bool, String> {
    blocking::run("autostart_get", move || autostart::is_enabled(&app)).await
}

#[tauri::command]
pub(crate) async fn autostart_set(app: tauri::AppHandle, enabled: bool) -> Result<bool, String> {
    blocking::run("autostart_set", move || autostart::set_enabled(&app, enabled)).await
}
