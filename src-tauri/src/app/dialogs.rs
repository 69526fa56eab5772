//! Usage: Native open/save dialogs for task files, run off the main thread.

use crate::app::channel::{push_load_tasks, TauriChannel};
use crate::blocking;
use crate::task_files::{self, DialogResult, DEFAULT_SAVE_FILE_NAME};
use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, FileDialogBuilder, FilePath};

fn task_file_dialog(app: &AppHandle, title: &str) -> FileDialogBuilder<tauri::Wry> {
    app.dialog()
        .file()
        .add_filter("JSON 文件", &["json"])
        .add_filter("所有文件", &["*"])
        .set_title(title)
}

fn into_local_path(picked: Option<FilePath>) -> Option<PathBuf> {
    match picked?.into_path() {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!("对话框返回了非本地路径: {err}");
            None
        }
    }
}

pub async fn open_task_file(app: &AppHandle) -> Result<DialogResult, String> {
    let app = app.clone();
    blocking::run("dialog_open_file", move || {
        let picked = task_file_dialog(&app, "选择任务文件").blocking_pick_file();
        Ok(task_files::open(into_local_path(picked).as_deref()))
    })
    .await
}

pub async fn save_task_file(
    app: &AppHandle,
    data: serde_json::Value,
) -> Result<DialogResult, String> {
    let app = app.clone();
    blocking::run("dialog_save_file", move || {
        let picked = task_file_dialog(&app, "保存任务文件")
            .set_file_name(DEFAULT_SAVE_FILE_NAME)
            .blocking_save_file();
        Ok(task_files::save(into_local_path(picked).as_deref(), &data))
    })
    .await
}

/// 文件 → 打开任务文件: on success the loaded tasks are pushed to the UI.
pub async fn open_and_push(app: &AppHandle) {
    let result = match open_task_file(app).await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("从菜单打开任务文件失败: {err}");
            return;
        }
    };

    let Some(data) = result.data.as_ref().filter(|_| result.success) else {
        return;
    };
    if let Err(err) = push_load_tasks(&TauriChannel::new(app), data) {
        tracing::warn!("推送已加载任务失败: {err}");
    }
}
