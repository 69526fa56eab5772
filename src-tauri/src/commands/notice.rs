//! Usage: Native notification commands (`show-notification`, `show-task-notification`).

use crate::app::channel::{push_focus_task, InboundTopic, TauriChannel};
use crate::app::notice::{ClickCallback, NoticeDefaults, NoticeOptions};
use crate::domain::task_notice::TaskActionNotice;
use crate::{app_paths, blocking, settings};

/// Settings-derived defaults; falls back to built-in defaults when settings cannot be read.
async fn notice_defaults(app: &tauri::AppHandle) -> NoticeDefaults {
    let app = app.clone();
    let read = blocking::run("notice_read_settings", move || {
        let settings = settings::read(&app).unwrap_or_else(|err| {
            tracing::warn!("配置读取失败，使用默认值: {err}");
            settings::AppSettings::default()
        });
        let icon = app_paths::tray_icon_asset(&app);
        let icon = icon.exists().then_some(icon);
        Ok(NoticeDefaults::from_settings(&settings, icon.as_deref()))
    })
    .await;

    read.unwrap_or_else(|err| {
        tracing::warn!("{err}");
        NoticeDefaults::from_settings(&settings::AppSettings::default(), None)
    })
}

#[cfg(desktop)]
fn send(
    app: &tauri::AppHandle,
    defaults: &NoticeDefaults,
    title: String,
    body: String,
    options: NoticeOptions,
    on_click: Option<ClickCallback>,
) {
    use crate::app::notice::{NoticeEvent, Notifier, TauriNoticeBackend};
    use crate::app::resident;
    use tauri::Manager;

    let notifier = app.state::<Notifier>();
    let Some(handle) = notifier.notify(
        &TauriNoticeBackend::new(app),
        defaults,
        title,
        body,
        options,
        on_click,
    ) else {
        return;
    };

    resident::on_main_thread(app, move |app| {
        resident::with_resident(app, |r, shell| {
            app.state::<Notifier>()
                .handle_event(handle.id(), NoticeEvent::Shown, r, shell);
        });
    });
}

#[cfg(not(desktop))]
fn send(
    _app: &tauri::AppHandle,
    _defaults: &NoticeDefaults,
    title: String,
    _body: String,
    _options: NoticeOptions,
    _on_click: Option<ClickCallback>,
) {
    tracing::warn!(title = %title, "当前平台不支持系统通知");
}

#[tauri::command]
pub(crate) async fn show_notification(
    app: tauri::AppHandle,
    title: String,
    body: String,
    options: Option<NoticeOptions>,
) -> Result<(), String> {
    tracing::debug!(topic = InboundTopic::ShowNotification.as_str(), "前端消息");

    let defaults = notice_defaults(&app).await;
    send(&app, &defaults, title, body, options.unwrap_or_default(), None);
    Ok(())
}

/// Clicking a task notification asks the UI to focus the task it describes, on backends that report clicks.
#[tauri::command]
pub(crate) async fn show_task_notification(
    app: tauri::AppHandle,
    notice: TaskActionNotice,
) -> Result<(), String> {
    tracing::debug!(
        topic = InboundTopic::ShowTaskNotification.as_str(),
        action = ?notice.action,
        "前端消息"
    );

    let (title, body) = notice.render();
    let on_click: ClickCallback = {
        let app = app.clone();
        Box::new(move || {
            if let Err(err) = push_focus_task(&TauriChannel::new(&app), &notice) {
                tracing::warn!("推送 focus-task 失败: {err}");
            }
        })
    };

    let defaults = notice_defaults(&app).await;
    send(&app, &defaults, title, body, NoticeOptions::default(), Some(on_click));
    Ok(())
}
