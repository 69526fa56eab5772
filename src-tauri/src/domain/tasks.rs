//! Usage: Task list snapshot schema (the JSON file exchanged through open/save dialogs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const TASK_FILE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFile {
    pub tasks: Vec<Task>,
    pub task_id_counter: u64,
    pub saved_at: Option<DateTime<Utc>>,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskFile {
    pub fn snapshot(tasks: Vec<Task>, task_id_counter: u64, saved_at: DateTime<Utc>) -> Self {
        Self {
            task_id_counter: task_id_counter.max(next_task_id(&tasks).unwrap_or(u64::MAX)),
            tasks,
            saved_at: Some(saved_at),
            version: TASK_FILE_VERSION.to_string(),
        }
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskStats {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// `None` when the largest id leaves no room for another task.
fn next_task_id(tasks: &[Task]) -> Option<u64> {
    tasks.iter().map(|t| t.id).max().map_or(Some(1), |id| id.checked_add(1))
}

fn invalid(detail: impl std::fmt::Display) -> String {
    format!("无效的文件格式: {detail}")
}

/// Validate loosely-typed task file JSON. Errors carry a human-readable reason for the UI.
pub fn parse_task_file(value: serde_json::Value) -> Result<TaskFile, String> {
    let serde_json::Value::Object(mut obj) = value else {
        return Err(invalid("top-level value must be an object"));
    };

    let tasks = match obj.remove("tasks") {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => return Err(invalid("`tasks` must be an array")),
        None => return Err(invalid("missing `tasks`")),
    };

    let mut parsed = Vec::with_capacity(tasks.len());
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, item) in tasks.into_iter().enumerate() {
        let task: Task =
            serde_json::from_value(item).map_err(|e| invalid(format!("tasks[{index}]: {e}")))?;
        if !seen.insert(task.id) {
            return Err(invalid(format!("tasks[{index}]: duplicate id {}", task.id)));
        }
        parsed.push(task);
    }

    let declared_counter = match obj.get("taskIdCounter") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            v.as_u64()
                .ok_or_else(|| invalid("`taskIdCounter` must be a non-negative integer"))?,
        ),
    };
    let next_id = next_task_id(&parsed)
        .ok_or_else(|| invalid(format!("task id {} leaves no room for new tasks", u64::MAX)))?;
    let task_id_counter = declared_counter.unwrap_or(0).max(next_id);

    let saved_at = match obj.get("savedAt") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(raw)) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| invalid(format!("`savedAt`: {e}")))?
                .with_timezone(&Utc),
        ),
        Some(_) => return Err(invalid("`savedAt` must be an ISO-8601 string")),
    };

    let version = match obj.get("version") {
        Some(serde_json::Value::String(v)) if !v.trim().is_empty() => v.trim().to_string(),
        _ => TASK_FILE_VERSION.to_string(),
    };

    Ok(TaskFile {
        tasks: parsed,
        task_id_counter,
        saved_at,
        version,
    })
}
