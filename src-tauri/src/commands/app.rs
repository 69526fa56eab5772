//! Usage: App-level Tauri commands (window title, exit).

use crate::app::channel::InboundTopic;

/// `set-title`: retitles the window the message came from.
#[tauri::command]
pub(crate) fn set_title(window: tauri::WebviewWindow, title: String) -> Result<(), String> {
    tracing::debug!(
        topic = InboundTopic::SetTitle.as_str(),
        window = window.label(),
        title = %title,
        "前端消息"
    );
    window
        .set_title(&title)
        .map_err(|e| format!("failed to set window title: {e}"))
}

#[tauri::command]
pub(crate) fn app_exit(app: tauri::AppHandle) -> Result<bool, String> {
    #[cfg(desktop)]
    {
        use tauri::Manager;
        app.state::<crate::app::resident::ResidentState>()
            .mark_quitting();
    }

    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(200));
        app.exit(0);
    });
    Ok(true)
}
