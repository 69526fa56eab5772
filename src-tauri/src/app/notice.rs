//! Notice（系统通知）模块。
//!
//! 用法：
//! - 前端：`invoke("show_notification", { title, body, options? })` 或
//!   `invoke("show_task_notification", { notice })` 触发系统通知
//! - Rust 后台：`Notifier::notify(...)` 发送通知并登记点击回调；
//!   通知生命周期事件经 `Notifier::handle_event` 分发（点击 = 显示窗口 + 停止闪烁 + 回调）
//! - 桌面通知插件不回报点击事件：`TauriNoticeBackend::reports_clicks` 为 false，回调不会登记

use crate::app::resident::{Resident, Shell, TrayHandle};
use crate::settings::AppSettings;
use crate::shared::mutex_ext::MutexExt;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Oldest click callbacks are dropped beyond this many pending notifications.
pub const MAX_PENDING_CLICKS: usize = 64;

pub type NoticeId = u64;
pub type ClickCallback = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeOptions {
    pub icon: Option<String>,
    pub silent: Option<bool>,
}

/// Values applied when the caller leaves an option unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeDefaults {
    pub enabled: bool,
    pub silent: bool,
    pub icon: Option<String>,
}

impl NoticeDefaults {
    pub fn from_settings(settings: &AppSettings, icon: Option<&Path>) -> Self {
        Self {
            enabled: settings.notifications_enabled,
            silent: settings.notification_silent,
            icon: icon.map(|p| p.display().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeRequest {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
    pub silent: bool,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn build_request(
    title: String,
    body: String,
    options: NoticeOptions,
    defaults: &NoticeDefaults,
) -> NoticeRequest {
    NoticeRequest {
        title,
        body,
        icon: normalize_optional(options.icon).or_else(|| defaults.icon.clone()),
        silent: options.silent.unwrap_or(defaults.silent),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeHandle {
    id: NoticeId,
}

impl NoticeHandle {
    pub fn id(&self) -> NoticeId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeEvent {
    Shown,
    Clicked,
    Closed,
}

pub trait NoticeBackend {
    fn is_supported(&self) -> bool;
    /// Whether a `Clicked` event can ever arrive for notifications shown by this backend.
    fn reports_clicks(&self) -> bool;
    fn show(&self, id: NoticeId, request: &NoticeRequest) -> Result<(), String>;
}

#[derive(Default)]
pub struct Notifier {
    next_id: AtomicU64,
    pending: Mutex<VecDeque<(NoticeId, ClickCallback)>>,
    clicks_unsupported_logged: AtomicBool,
}

impl Notifier {
    /// `None` when the platform cannot show notifications, they are disabled, or showing failed.
    pub fn notify(
        &self,
        backend: &dyn NoticeBackend,
        defaults: &NoticeDefaults,
        title: String,
        body: String,
        options: NoticeOptions,
        on_click: Option<ClickCallback>,
    ) -> Option<NoticeHandle> {
        if !backend.is_supported() {
            tracing::warn!("当前平台不支持系统通知");
            return None;
        }
        if !defaults.enabled {
            tracing::info!(title = %title, "通知已在设置中关闭，跳过");
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let request = build_request(title, body, options, defaults);
        if let Err(err) = backend.show(id, &request) {
            tracing::warn!(id, "系统通知发送失败: {err}");
            return None;
        }
        tracing::info!(id, title = %request.title, "系统通知已发送");

        let on_click = on_click.filter(|_| {
            let reported = backend.reports_clicks();
            if !reported && !self.clicks_unsupported_logged.swap(true, Ordering::Relaxed) {
                tracing::warn!("当前平台不回报通知点击事件，点击回调将被忽略");
            }
            reported
        });
        if let Some(callback) = on_click {
            let mut pending = self.pending.lock_or_recover();
            pending.push_back((id, callback));
            while pending.len() > MAX_PENDING_CLICKS {
                if let Some((dropped, _)) = pending.pop_front() {
                    tracing::debug!(id = dropped, "通知点击回调过多，丢弃最早的回调");
                }
            }
        }

        Some(NoticeHandle { id })
    }

    pub fn pending_clicks(&self) -> usize {
        self.pending.lock_or_recover().len()
    }

    fn take_callback(&self, id: NoticeId) -> Option<ClickCallback> {
        let mut pending = self.pending.lock_or_recover();
        let index = pending.iter().position(|(pending_id, _)| *pending_id == id)?;
        pending.remove(index).map(|(_, callback)| callback)
    }

    pub fn handle_event<T, S>(
        &self,
        id: NoticeId,
        event: NoticeEvent,
        resident: &Resident<T>,
        shell: &S,
    ) where
        T: TrayHandle,
        S: Shell<Tray = T>,
    {
        match event {
            NoticeEvent::Shown => tracing::debug!(id, "系统通知已显示"),
            NoticeEvent::Closed => {
                tracing::debug!(id, "系统通知已关闭");
                self.take_callback(id);
            }
            NoticeEvent::Clicked => {
                tracing::info!(id, "系统通知被点击");
                resident.show_window(shell);
                // Callback runs outside the pending lock.
                if let Some(callback) = self.take_callback(id) {
                    callback();
                }
            }
        }
    }
}

#[cfg(desktop)]
pub use tauri_backend::TauriNoticeBackend;

#[cfg(desktop)]
mod tauri_backend {
    use super::{NoticeBackend, NoticeId, NoticeRequest};
    use tauri::plugin::PermissionState;
    use tauri_plugin_notification::NotificationExt;

    pub struct TauriNoticeBackend<'a> {
        app: &'a tauri::AppHandle,
    }

    impl<'a> TauriNoticeBackend<'a> {
        pub fn new(app: &'a tauri::AppHandle) -> Self {
            Self { app }
        }
    }

    impl NoticeBackend for TauriNoticeBackend<'_> {
        fn is_supported(&self) -> bool {
            match self.app.notification().permission_state() {
                Ok(PermissionState::Denied) => false,
                Ok(_) => true,
                Err(err) => {
                    tracing::debug!("通知权限查询失败: {err}");
                    false
                }
            }
        }

        // The desktop plugin only reports delivery; clicks never come back.
        fn reports_clicks(&self) -> bool {
            false
        }

        fn show(&self, id: NoticeId, request: &NoticeRequest) -> Result<(), String> {
            let mut builder = self
                .app
                .notification()
                .builder()
                .id(i32::try_from(id % i32::MAX as u64).unwrap_or_default())
                .title(request.title.clone())
                .body(request.body.clone());
            if let Some(icon) = request.icon.clone() {
                builder = builder.icon(icon);
            }
            if request.silent {
                builder = builder.silent();
            }
            builder.show().map_err(|e| format!("NOTICE_SHOW: {e}"))
        }
    }
}
