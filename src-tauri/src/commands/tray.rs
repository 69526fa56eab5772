//! Usage: Attention indicator commands (fire-and-forget; applied on the main thread).

use crate::app::channel::InboundTopic;

#[tauri::command]
pub(crate) fn tray_start_flashing(app: tauri::AppHandle) {
    tracing::debug!(topic = InboundTopic::TrayStartFlashing.as_str(), "前端消息");

    #[cfg(desktop)]
    {
        use crate::app::resident::{self, Shell};
        resident::on_main_thread(&app, |app| {
            resident::with_resident(app, |r, shell| {
                r.start_flashing(shell.ticker());
            });
        });
    }
    #[cfg(not(desktop))]
    let _ = app;
}

#[tauri::command]
pub(crate) fn tray_stop_flashing(app: tauri::AppHandle) {
    tracing::debug!(topic = InboundTopic::TrayStopFlashing.as_str(), "前端消息");

    #[cfg(desktop)]
    {
        use crate::app::resident;
        resident::on_main_thread(&app, |app| {
            resident::with_resident(app, |r, _| {
                r.stop_flashing();
            });
        });
    }
    #[cfg(not(desktop))]
    let _ = app;
}
