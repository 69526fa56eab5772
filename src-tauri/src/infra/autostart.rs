//! Usage: OS login-item ("开机自启动") state through the autostart plugin.

#[cfg(desktop)]
pub fn is_enabled(app: &tauri::AppHandle) -> Result<bool, String> {
    use tauri_plugin_autostart::ManagerExt;

    app.autolaunch()
        .is_enabled()
        .map_err(|e| format!("failed to check autostart status: {e}"))
}

/// Returns the state actually in effect after the change.
#[cfg(desktop)]
pub fn set_enabled(app: &tauri::AppHandle, enabled: bool) -> Result<bool, String> {
    use tauri_plugin_autostart::ManagerExt;

    let manager = app.autolaunch();
    if enabled {
        manager
            .enable()
            .map_err(|e| format!("failed to enable autostart: {e}"))?;
    } else {
        manager
            .disable()
            .map_err(|e| format!("failed to disable autostart: {e}"))?;
    }

    let now = is_enabled(app)?;
    tracing::info!(enabled = now, "开机自启动设置已更新");
    Ok(now)
}

#[cfg(not(desktop))]
pub fn is_enabled(_app: &tauri::AppHandle) -> Result<bool, String> {
    Ok(false)
}

#[cfg(not(desktop))]
pub fn set_enabled(_app: &tauri::AppHandle, _enabled: bool) -> Result<bool, String> {
    Err("SEC_INVALID_INPUT: autostart is only available on desktop".to_string())
}
