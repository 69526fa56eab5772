//! Usage: Read/write task files chosen through the open/save dialogs, reported as `DialogResult`.

use crate::domain::tasks::{parse_task_file, TaskFile};
use crate::shared::fs::write_file_atomic;
use serde::Serialize;
use std::path::Path;

pub const DEFAULT_SAVE_FILE_NAME: &str = "tasks.json";

/// Response of `dialog:openFile` / `dialog:saveFile`. Absent fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TaskFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canceled: Option<bool>,
}

impl DialogResult {
    pub fn canceled() -> Self {
        Self {
            success: false,
            data: None,
            file_path: None,
            error: None,
            canceled: Some(true),
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            data: None,
            file_path: None,
            error: Some(error),
            canceled: None,
        }
    }

    fn opened(data: TaskFile, path: &Path) -> Self {
        Self {
            success: true,
            data: Some(data),
            file_path: Some(path.display().to_string()),
            error: None,
            canceled: None,
        }
    }

    fn saved(path: &Path) -> Self {
        Self {
            success: true,
            data: None,
            file_path: Some(path.display().to_string()),
            error: None,
            canceled: None,
        }
    }
}

fn load(path: &Path) -> Result<TaskFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    parse_task_file(value)
}

/// `picked` is the dialog outcome; `None` means the user dismissed it.
pub fn open(picked: Option<&Path>) -> DialogResult {
    let Some(path) = picked else {
        tracing::info!("打开任务文件：用户取消");
        return DialogResult::canceled();
    };

    match load(path) {
        Ok(file) => {
            let stats = file.stats();
            tracing::info!(
                path = %path.display(),
                total = stats.total,
                completed = stats.completed,
                "任务文件已加载"
            );
            DialogResult::opened(file, path)
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "任务文件加载失败: {err}");
            DialogResult::failed(err)
        }
    }
}

pub fn save(picked: Option<&Path>, data: &serde_json::Value) -> DialogResult {
    let Some(path) = picked else {
        tracing::info!("保存任务文件：用户取消");
        return DialogResult::canceled();
    };

    let written = serde_json::to_vec_pretty(data)
        .map_err(|e| format!("failed to serialize tasks: {e}"))
        .and_then(|bytes| write_file_atomic(path, &bytes));

    match written {
        Ok(()) => {
            tracing::info!(path = %path.display(), "任务文件已保存");
            DialogResult::saved(path)
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "任务文件保存失败: {err}");
            DialogResult::failed(err)
        }
    }
}
