//! Usage: Best-effort teardown on app exit (quitting flag, flasher, tray icon).

use crate::app::resident::{Resident, TrayHandle};
use std::sync::atomic::{AtomicBool, Ordering};

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

/// Runs at most once per process. Must be called on the main thread.
#[cfg(desktop)]
pub(crate) fn cleanup_before_exit(app: &tauri::AppHandle) {
    use tauri::Manager;

    if CLEANUP_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    tracing::info!("退出清理：开始");
    release_resident(app.state::<crate::app::resident::ResidentState>().inner());
}

pub(crate) fn release_resident<T: TrayHandle>(resident: &Resident<T>) {
    resident.mark_quitting();
    if resident.stop_flashing() {
        tracing::info!("退出清理：已停止托盘闪烁");
    }
    if resident.destroy_tray() {
        tracing::info!("退出清理：已移除托盘图标");
    }
}
