//! Usage: Desktop resident mode (tray icon + window lifecycle hooks + attention flashing).
//!
//! `Resident` is the application context shared by the window coordinator, the tray controller
//! and the flasher. The Tauri glue routes every mutation onto the main thread, so the locks below
//! are never contended in practice; they exist to make the state `Sync` for Tauri's state store.

mod flasher;
mod shell;
#[cfg(desktop)]
mod tauri_shell;
mod tray;
mod window;

pub use shell::{MainWindow, Shell, Ticker, TimerGuard, TrayHandle};
pub use window::CloseDecision;

#[cfg(desktop)]
pub use tauri_shell::{
    on_main_thread, on_window_event, show_main_window, with_resident, ResidentState, TauriShell,
};

#[cfg(not(desktop))]
pub fn show_main_window(_app: &tauri::AppHandle) {}

#[cfg(not(desktop))]
pub fn on_window_event(_window: &tauri::Window, _event: &tauri::WindowEvent) {}

use crate::domain::tray_icon::RgbaIcon;
use crate::shared::mutex_ext::MutexExt;
use flasher::Flasher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const MAIN_WINDOW_LABEL: &str = "main";

pub struct Resident<T> {
    quitting: AtomicBool,
    tray: Mutex<Option<T>>,
    normal_icon: Mutex<Option<RgbaIcon>>,
    flasher: Mutex<Flasher>,
}

impl<T> Default for Resident<T> {
    fn default() -> Self {
        Self {
            quitting: AtomicBool::new(false),
            tray: Mutex::new(None),
            normal_icon: Mutex::new(None),
            flasher: Mutex::new(Flasher::default()),
        }
    }
}

impl<T: TrayHandle> Resident<T> {
    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::SeqCst)
    }

    /// Once set, close requests are no longer turned into hide-to-tray.
    pub fn mark_quitting(&self) {
        if !self.quitting.swap(true, Ordering::SeqCst) {
            tracing::info!("已设置退出标记");
        }
    }

    /// Whether the process should stay alive after its last window went away.
    pub fn keeps_running_without_windows(&self, always_resident_platform: bool) -> bool {
        if self.is_quitting() {
            return false;
        }
        always_resident_platform || self.has_tray()
    }
}
