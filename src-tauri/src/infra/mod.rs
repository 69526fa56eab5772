//! Usage: Infrastructure adapters (filesystem paths, persistence, OS integration).

pub(crate) mod app_paths;
pub(crate) mod autostart;
pub(crate) mod icon_file;
pub(crate) mod settings;
pub(crate) mod task_files;
