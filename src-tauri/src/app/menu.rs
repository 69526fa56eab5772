//! Usage: Application menu (文件 / 任务 / 帮助) and the shared "about" dialog.

use crate::app::channel::{push_signal, PushTopic, TauriChannel};
use crate::app::dialogs;
use crate::app::resident::ResidentState;
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::{AppHandle, Manager, Wry};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;

const DOCS_URL: &str = "https://v2.tauri.app/zh-cn/start/";

mod menu_ids {
    pub const FILE_OPEN: &str = "menu.file.open";
    pub const FILE_SAVE: &str = "menu.file.save";
    pub const FILE_QUIT: &str = "menu.file.quit";
    pub const TASKS_CLEAR: &str = "menu.tasks.clear";
    pub const TASKS_STATS: &str = "menu.tasks.stats";
    pub const TASKS_COMPLETE_ALL: &str = "menu.tasks.complete_all";
    pub const TASKS_UNCOMPLETE_ALL: &str = "menu.tasks.uncomplete_all";
    pub const HELP_ABOUT: &str = "menu.help.about";
    pub const HELP_DOCS: &str = "menu.help.docs";
}

pub fn build_app_menu(app: &AppHandle) -> tauri::Result<Menu<Wry>> {
    let item = |id: &str, text: &str, accelerator: Option<&str>| {
        MenuItem::with_id(app, id, text, true, accelerator)
    };

    let file_menu = Submenu::with_items(
        app,
        "文件",
        true,
        &[
            &item(menu_ids::FILE_OPEN, "打开任务文件...", Some("CmdOrCtrl+O"))?,
            &item(menu_ids::FILE_SAVE, "保存任务文件...", Some("CmdOrCtrl+S"))?,
            &PredefinedMenuItem::separator(app)?,
            &item(menu_ids::FILE_QUIT, "退出", Some("CmdOrCtrl+Q"))?,
        ],
    )?;

    let tasks_menu = Submenu::with_items(
        app,
        "任务",
        true,
        &[
            &item(menu_ids::TASKS_CLEAR, "清空所有任务", Some("CmdOrCtrl+Shift+D"))?,
            &item(menu_ids::TASKS_STATS, "显示任务统计", Some("CmdOrCtrl+I"))?,
            &PredefinedMenuItem::separator(app)?,
            &item(menu_ids::TASKS_COMPLETE_ALL, "标记所有为已完成", None)?,
            &item(menu_ids::TASKS_UNCOMPLETE_ALL, "标记所有为未完成", None)?,
        ],
    )?;

    let help_menu = Submenu::with_items(
        app,
        "帮助",
        true,
        &[
            &item(menu_ids::HELP_ABOUT, "关于", None)?,
            &item(menu_ids::HELP_DOCS, "学习文档", None)?,
        ],
    )?;

    Menu::with_items(app, &[&file_menu, &tasks_menu, &help_menu])
}

fn push(app: &AppHandle, topic: PushTopic) {
    if let Err(err) = push_signal(&TauriChannel::new(app), topic) {
        tracing::warn!("菜单操作推送到前端失败: {err}");
    }
}

/// Tray menu events arrive here as well; ids outside `menu.*` are ignored.
pub fn on_menu_event(app: &AppHandle, event: tauri::menu::MenuEvent) {
    match event.id().as_ref() {
        menu_ids::FILE_OPEN => {
            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                dialogs::open_and_push(&app).await;
            });
        }
        menu_ids::FILE_SAVE => push(app, PushTopic::RequestSaveTasks),
        menu_ids::FILE_QUIT => {
            tracing::info!("应用菜单请求退出");
            app.state::<ResidentState>().mark_quitting();
            app.exit(0);
        }
        menu_ids::TASKS_CLEAR => push(app, PushTopic::ClearAllTasks),
        menu_ids::TASKS_STATS => push(app, PushTopic::ShowTaskStats),
        menu_ids::TASKS_COMPLETE_ALL => push(app, PushTopic::CompleteAllTasks),
        menu_ids::TASKS_UNCOMPLETE_ALL => push(app, PushTopic::UncompleteAllTasks),
        menu_ids::HELP_ABOUT => show_about_dialog(app),
        menu_ids::HELP_DOCS => {
            if let Err(err) = app.opener().open_url(DOCS_URL, None::<&str>) {
                tracing::warn!("打开学习文档失败: {err}");
            }
        }
        _ => {}
    }
}

fn about_text() -> String {
    format!(
        "Tray To-Do 任务管理器\n\n版本 {}\n\n一个用于学习 Tauri 的实践项目\n支持 IPC 通信、系统托盘等功能",
        env!("CARGO_PKG_VERSION")
    )
}

/// Non-blocking info box; safe to call from a menu handler on the main thread.
pub fn show_about_dialog(app: &AppHandle) {
    let mut builder = app
        .dialog()
        .message(about_text())
        .title("关于 任务管理器")
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCustom("确定".to_string()));
    if let Some(window) = app.get_webview_window(crate::app::resident::MAIN_WINDOW_LABEL) {
        builder = builder.parent(&window);
    }
    builder.show(|_| {});
}
