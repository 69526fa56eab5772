//! Usage: Typed topics between the host and the webview, plus the push side of the bridge.
//!
//! Inbound topics arrive as Tauri commands (see `commands/*`); their names are only used in logs.
//! Push topics are emitted to the main window through a `UiChannel`.

use crate::app::resident::MAIN_WINDOW_LABEL;
use crate::domain::task_notice::TaskActionNotice;
use crate::domain::tasks::TaskFile;
use serde::Serialize;
use tauri::Emitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundTopic {
    SetTitle,
    DialogOpenFile,
    DialogSaveFile,
    TrayStartFlashing,
    TrayStopFlashing,
    ShowNotification,
    ShowTaskNotification,
}

impl InboundTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetTitle => "set-title",
            Self::DialogOpenFile => "dialog:openFile",
            Self::DialogSaveFile => "dialog:saveFile",
            Self::TrayStartFlashing => "tray:start-flashing",
            Self::TrayStopFlashing => "tray:stop-flashing",
            Self::ShowNotification => "show-notification",
            Self::ShowTaskNotification => "show-task-notification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushTopic {
    LoadTasks,
    RequestSaveTasks,
    ClearAllTasks,
    ShowTaskStats,
    CompleteAllTasks,
    UncompleteAllTasks,
    FocusTask,
}

impl PushTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadTasks => "load-tasks",
            Self::RequestSaveTasks => "request-save-tasks",
            Self::ClearAllTasks => "clear-all-tasks",
            Self::ShowTaskStats => "show-task-stats",
            Self::CompleteAllTasks => "complete-all-tasks",
            Self::UncompleteAllTasks => "uncomplete-all-tasks",
            Self::FocusTask => "focus-task",
        }
    }

    /// Topics that carry no payload (the UI only reacts to the signal).
    pub fn is_signal(self) -> bool {
        !matches!(self, Self::LoadTasks | Self::FocusTask)
    }
}

pub trait UiChannel {
    fn push(&self, topic: PushTopic, payload: serde_json::Value) -> Result<(), String>;
}

fn push_json<T: Serialize>(
    channel: &dyn UiChannel,
    topic: PushTopic,
    payload: &T,
) -> Result<(), String> {
    let value = serde_json::to_value(payload)
        .map_err(|e| format!("failed to serialize {} payload: {e}", topic.as_str()))?;
    channel.push(topic, value)
}

pub fn push_signal(channel: &dyn UiChannel, topic: PushTopic) -> Result<(), String> {
    debug_assert!(topic.is_signal(), "{} carries a payload", topic.as_str());
    channel.push(topic, serde_json::Value::Null)
}

pub fn push_load_tasks(channel: &dyn UiChannel, file: &TaskFile) -> Result<(), String> {
    push_json(channel, PushTopic::LoadTasks, file)
}

pub fn push_focus_task(channel: &dyn UiChannel, notice: &TaskActionNotice) -> Result<(), String> {
    push_json(channel, PushTopic::FocusTask, notice)
}

/// Emits push topics to the main webview window.
pub struct TauriChannel<'a> {
    app: &'a tauri::AppHandle,
}

impl<'a> TauriChannel<'a> {
    pub fn new(app: &'a tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl UiChannel for TauriChannel<'_> {
    fn push(&self, topic: PushTopic, payload: serde_json::Value) -> Result<(), String> {
        self.app
            .emit_to(MAIN_WINDOW_LABEL, topic.as_str(), payload)
            .map_err(|e| format!("PUSH_EMIT: {}: {e}", topic.as_str()))?;
        tracing::debug!(topic = topic.as_str(), "已推送到前端");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::RecordingChannel;
    use crate::domain::task_notice::TaskAction;
    use crate::domain::tasks::Task;

    #[test]
    fn topic_names_match_the_ui_contract() {
        assert_eq!(InboundTopic::DialogOpenFile.as_str(), "dialog:openFile");
        assert_eq!(InboundTopic::TrayStopFlashing.as_str(), "tray:stop-flashing");
        assert_eq!(PushTopic::RequestSaveTasks.as_str(), "request-save-tasks");
        assert_eq!(PushTopic::UncompleteAllTasks.as_str(), "uncomplete-all-tasks");
    }

    #[test]
    fn signals_carry_null_payload() {
        let channel = RecordingChannel::default();
        push_signal(&channel, PushTopic::ShowTaskStats).expect("push");
        push_signal(&channel, PushTopic::RequestSaveTasks).expect("push");
        assert_eq!(
            channel.topics(),
            vec![PushTopic::ShowTaskStats, PushTopic::RequestSaveTasks]
        );
        assert_eq!(
            channel.pushed()[0],
            (PushTopic::ShowTaskStats, serde_json::Value::Null)
        );
    }

    #[test]
    fn load_tasks_pushes_camel_case_task_file() {
        let channel = RecordingChannel::default();
        let file = TaskFile::snapshot(
            vec![Task {
                id: 3,
                text: "买牛奶".to_string(),
                completed: false,
                created_at: "2024/5/1 10:00:00".to_string(),
            }],
            4,
            chrono::Utc::now(),
        );

        push_load_tasks(&channel, &file).expect("push");

        let pushed = channel.pushed();
        assert_eq!(pushed.len(), 1);
        let (topic, payload) = &pushed[0];
        assert_eq!(*topic, PushTopic::LoadTasks);
        assert_eq!(payload["taskIdCounter"], 4);
        assert_eq!(payload["tasks"][0]["createdAt"], "2024/5/1 10:00:00");
        assert_eq!(payload["version"], "1.0");
    }

    #[test]
    fn focus_task_forwards_descriptor() {
        let channel = RecordingChannel::default();
        let notice = TaskActionNotice {
            action: TaskAction::Completed,
            task_text: Some("写周报".to_string()),
            task_count: None,
        };

        push_focus_task(&channel, &notice).expect("push");

        let (_, payload) = &channel.pushed()[0];
        assert_eq!(payload["action"], "completed");
        assert_eq!(payload["taskText"], "写周报");
    }
}
