//! Usage: Tauri command handlers exposed to the webview via `invoke(...)`.

mod app;
mod dialogs;
mod notice;
mod settings;
mod tray;

pub(crate) use app::*;
pub(crate) use dialogs::*;
pub(crate) use notice::*;
pub(crate) use settings::*;
pub(crate) use tray::*;
