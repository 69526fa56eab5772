//! Usage: Task file open/save dialog commands (request/response).

use crate::app::channel::InboundTopic;
use crate::app::dialogs;
use crate::task_files::DialogResult;

#[tauri::command]
pub(crate) async fn dialog_open_file(app: tauri::AppHandle) -> Result<DialogResult, String> {
    tracing::debug!(topic = InboundTopic::DialogOpenFile.as_str(), "前端请求");
    dialogs::open_task_file(&app).await
}

#[tauri::command]
pub(crate) async fn dialog_save_file(
    app: tauri::AppHandle,
    data: serde_json::Value,
) -> Result<DialogResult, String> {
    tracing::debug!(topic = InboundTopic::DialogSaveFile.as_str(), "前端请求");
    dialogs::save_task_file(&app, data).await
}
