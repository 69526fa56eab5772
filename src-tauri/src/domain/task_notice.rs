//! Usage: Task-action descriptors sent by the UI and their fixed notification wording.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Added,
    Completed,
    Deleted,
    Cleared,
    Loaded,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActionNotice {
    pub action: TaskAction,
    #[serde(default)]
    pub task_text: Option<String>,
    #[serde(default)]
    pub task_count: Option<u64>,
}

impl TaskActionNotice {
    /// `(title, body)` for the native notification.
    pub fn render(&self) -> (String, String) {
        let text = self.task_text.as_deref().unwrap_or_default();
        let count = self.task_count.unwrap_or(0);

        match self.action {
            TaskAction::Added => ("✅ 任务已添加".to_string(), format!("新任务：{text}")),
            TaskAction::Completed => ("🎉 任务已完成".to_string(), format!("已完成：{text}")),
            TaskAction::Deleted => ("🗑️ 任务已删除".to_string(), format!("已删除：{text}")),
            TaskAction::Cleared => ("🧹 任务已清空".to_string(), format!("已清空 {count} 个任务")),
            TaskAction::Loaded => ("📂 任务已加载".to_string(), format!("已加载 {count} 个任务")),
            TaskAction::Other => {
                let body = if text.is_empty() {
                    "任务状态已更新".to_string()
                } else {
                    text.to_string()
                };
                ("📝 任务更新".to_string(), body)
            }
        }
    }
}
