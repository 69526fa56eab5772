//! Usage: Host capabilities the resident core drives (window, tray, ticker, icon asset).
//!
//! The Tauri implementation lives in `tauri_shell`; tests use in-process doubles.

use crate::domain::tray_icon::{IconSource, RgbaIcon};
use std::time::Duration;

pub trait MainWindow {
    fn is_visible(&self) -> bool;
    fn is_minimized(&self) -> bool;
    fn show(&self) -> Result<(), String>;
    fn hide(&self) -> Result<(), String>;
    fn unminimize(&self) -> Result<(), String>;
    fn set_focus(&self) -> Result<(), String>;
}

pub trait TrayHandle: Send {
    fn set_image(&self, icon: &RgbaIcon) -> Result<(), String>;
    fn destroy(self) -> Result<(), String>;
}

/// A live periodic timer. Dropping it without `cancel` leaves the timer running.
pub trait TimerGuard: Send {
    fn cancel(self: Box<Self>);
}

pub trait Ticker {
    fn start(&self, interval: Duration) -> Box<dyn TimerGuard>;
}

pub trait Shell {
    type Tray: TrayHandle;
    type Window: MainWindow;

    /// `None` once the window has been destroyed.
    fn main_window(&self) -> Option<Self::Window>;
    fn icon_source(&self) -> &dyn IconSource;
    fn build_tray(&self, icon: &RgbaIcon) -> Result<Self::Tray, String>;
    fn ticker(&self) -> &dyn Ticker;
}
