//! Usage: Pure domain logic (task file format, task notices, tray icon bitmaps).

pub(crate) mod task_notice;
pub(crate) mod tasks;
pub(crate) mod tray_icon;
