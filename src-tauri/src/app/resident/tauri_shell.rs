//! Usage: Tauri bindings for the resident core (tray icon + menu, main window, flash ticker, hooks).
//!
//! Tray and window events arrive on the main thread. Everything else (commands, timer ticks,
//! second-instance launches) hops there through `on_main_thread` before touching `ResidentState`.

use super::shell::{MainWindow, Shell, Ticker, TimerGuard, TrayHandle};
use super::{CloseDecision, Resident, MAIN_WINDOW_LABEL};
use crate::app::channel::{push_signal, PushTopic, TauriChannel};
use crate::app::menu::show_about_dialog;
use crate::app_paths;
use crate::autostart;
use crate::domain::tray_icon::{IconSource, RgbaIcon};
use crate::infra::icon_file::FileIconSource;
use std::time::Duration;
use tauri::image::Image;
use tauri::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Manager, WebviewWindow};

pub type ResidentState = Resident<TrayIcon>;

const TRAY_ID: &str = "main-tray";
const TRAY_TOOLTIP: &str = "任务管理器 - 点击显示窗口";

mod menu_ids {
    pub const SHOW: &str = "tray.show";
    pub const HIDE: &str = "tray.hide";
    pub const STATS: &str = "tray.stats";
    pub const SAVE: &str = "tray.save";
    pub const AUTOSTART: &str = "tray.autostart";
    pub const MINIMIZE_TO_TRAY: &str = "tray.minimize_to_tray";
    pub const ABOUT: &str = "tray.about";
    pub const QUIT: &str = "tray.quit";
}

impl TrayHandle for TrayIcon {
    fn set_image(&self, icon: &RgbaIcon) -> Result<(), String> {
        let image = Image::new_owned(icon.rgba().to_vec(), icon.width(), icon.height());
        self.set_icon(Some(image))
            .map_err(|e| format!("failed to set tray icon: {e}"))
    }

    fn destroy(self) -> Result<(), String> {
        let app = self.app_handle().clone();
        drop(self);
        if app.remove_tray_by_id(TRAY_ID).is_none() {
            return Err(format!("tray {TRAY_ID} was not registered"));
        }
        Ok(())
    }
}

impl MainWindow for WebviewWindow {
    fn is_visible(&self) -> bool {
        WebviewWindow::is_visible(self).unwrap_or(false)
    }

    fn is_minimized(&self) -> bool {
        WebviewWindow::is_minimized(self).unwrap_or(false)
    }

    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|e| format!("failed to show window: {e}"))
    }

    fn hide(&self) -> Result<(), String> {
        WebviewWindow::hide(self).map_err(|e| format!("failed to hide window: {e}"))
    }

    fn unminimize(&self) -> Result<(), String> {
        WebviewWindow::unminimize(self).map_err(|e| format!("failed to unminimize window: {e}"))
    }

    fn set_focus(&self) -> Result<(), String> {
        WebviewWindow::set_focus(self).map_err(|e| format!("failed to focus window: {e}"))
    }
}

/// Periodic ticks on the async runtime; each tick is replayed on the main thread.
pub struct AsyncTicker {
    app: AppHandle,
}

struct AsyncTimer(tauri::async_runtime::JoinHandle<()>);

impl TimerGuard for AsyncTimer {
    fn cancel(self: Box<Self>) {
        self.0.abort();
    }
}

impl Ticker for AsyncTicker {
    fn start(&self, interval: Duration) -> Box<dyn TimerGuard> {
        let app = self.app.clone();
        let task = tauri::async_runtime::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                on_main_thread(&app, |app| app.state::<ResidentState>().flash_tick());
            }
        });
        Box::new(AsyncTimer(task))
    }
}

pub struct TauriShell {
    app: AppHandle,
    icons: FileIconSource,
    ticker: AsyncTicker,
}

impl TauriShell {
    pub fn new(app: &AppHandle) -> Self {
        Self {
            app: app.clone(),
            icons: FileIconSource::new(app_paths::tray_icon_asset(app)),
            ticker: AsyncTicker { app: app.clone() },
        }
    }
}

impl Shell for TauriShell {
    type Tray = TrayIcon;
    type Window = WebviewWindow;

    fn main_window(&self) -> Option<WebviewWindow> {
        self.app.get_webview_window(MAIN_WINDOW_LABEL)
    }

    fn icon_source(&self) -> &dyn IconSource {
        &self.icons
    }

    fn build_tray(&self, icon: &RgbaIcon) -> Result<TrayIcon, String> {
        build_tray(&self.app, icon)
    }

    fn ticker(&self) -> &dyn Ticker {
        &self.ticker
    }
}

/// Run `f` on the main thread with the app handle. Dispatch failures are logged and dropped.
pub fn on_main_thread<F>(app: &AppHandle, f: F)
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let handle = app.clone();
    if let Err(err) = app.run_on_main_thread(move || f(&handle)) {
        tracing::warn!("派发到主线程失败: {err}");
    }
}

/// Main thread only.
pub fn with_resident<R>(app: &AppHandle, f: impl FnOnce(&ResidentState, &TauriShell) -> R) -> R {
    let shell = TauriShell::new(app);
    let resident = app.state::<ResidentState>();
    f(resident.inner(), &shell)
}

pub fn show_main_window(app: &AppHandle) {
    on_main_thread(app, |app| with_resident(app, |r, shell| r.show_window(shell)));
}

/// Show the window, then push a signal the UI reacts to (stats panel, save request).
fn show_and_push(app: &AppHandle, topic: PushTopic) {
    with_resident(app, |r, shell| r.show_window(shell));
    if let Err(err) = push_signal(&TauriChannel::new(app), topic) {
        tracing::warn!("托盘操作推送到前端失败: {err}");
    }
}

fn toggle_autostart(app: &AppHandle, item: &CheckMenuItem<tauri::Wry>) {
    let wanted = !autostart::is_enabled(app).unwrap_or(false);
    let actual = match autostart::set_enabled(app, wanted) {
        Ok(actual) => actual,
        Err(err) => {
            tracing::error!("开机自启动设置失败: {err}");
            !wanted
        }
    };
    if let Err(err) = item.set_checked(actual) {
        tracing::debug!("同步开机自启动勾选状态失败: {err}");
    }
}

fn build_tray(app: &AppHandle, icon: &RgbaIcon) -> Result<TrayIcon, String> {
    let item = |id: &str, text: &str| {
        MenuItem::with_id(app, id, text, true, None::<&str>)
            .map_err(|e| format!("failed to create tray menu item {id}: {e}"))
    };
    let separator = || {
        PredefinedMenuItem::separator(app)
            .map_err(|e| format!("failed to create tray menu separator: {e}"))
    };

    let show_item = item(menu_ids::SHOW, "📋 显示窗口")?;
    let hide_item = item(menu_ids::HIDE, "🔒 隐藏窗口")?;
    let stats_item = item(menu_ids::STATS, "📊 任务统计")?;
    let save_item = item(menu_ids::SAVE, "💾 保存任务")?;
    let about_item = item(menu_ids::ABOUT, "ℹ️ 关于")?;
    let quit_item = item(menu_ids::QUIT, "🚪 退出")?;

    let autostart_enabled = autostart::is_enabled(app).unwrap_or_else(|err| {
        tracing::warn!("{err}");
        false
    });
    let autostart_item = CheckMenuItem::with_id(
        app,
        menu_ids::AUTOSTART,
        "开机自启动",
        true,
        autostart_enabled,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create autostart menu item: {e}"))?;
    // Always on: rendered checked and disabled.
    let minimize_item = CheckMenuItem::with_id(
        app,
        menu_ids::MINIMIZE_TO_TRAY,
        "关闭时最小化到托盘",
        false,
        true,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create minimize-to-tray menu item: {e}"))?;
    let settings_menu = Submenu::with_items(app, "⚙️ 设置", true, &[&autostart_item, &minimize_item])
        .map_err(|e| format!("failed to create settings submenu: {e}"))?;

    let menu = Menu::with_items(
        app,
        &[
            &show_item,
            &hide_item,
            &separator()?,
            &stats_item,
            &save_item,
            &separator()?,
            &settings_menu,
            &separator()?,
            &about_item,
            &separator()?,
            &quit_item,
        ],
    )
    .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let image = Image::new_owned(icon.rgba().to_vec(), icon.width(), icon.height());

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(image)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| match event.id.as_ref() {
            menu_ids::SHOW => with_resident(app, |r, shell| r.show_window(shell)),
            menu_ids::HIDE => with_resident(app, |r, shell| r.hide_window(shell)),
            menu_ids::STATS => show_and_push(app, PushTopic::ShowTaskStats),
            menu_ids::SAVE => show_and_push(app, PushTopic::RequestSaveTasks),
            menu_ids::AUTOSTART => toggle_autostart(app, &autostart_item),
            menu_ids::ABOUT => show_about_dialog(app),
            menu_ids::QUIT => {
                tracing::info!("托盘菜单请求退出");
                app.state::<ResidentState>().mark_quitting();
                app.exit(0);
            }
            // Application menu events are delivered here too; `app::menu` owns them.
            _ => {}
        })
        .on_tray_icon_event(|tray, event| match event {
            TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } => with_resident(tray.app_handle(), |r, shell| r.toggle_window(shell)),
            TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } => with_resident(tray.app_handle(), |r, shell| r.show_window(shell)),
            _ => {}
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))
}

pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        tauri::WindowEvent::CloseRequested { api, .. } => {
            let decision = with_resident(window.app_handle(), |r, shell| {
                r.handle_close_requested(shell)
            });
            if decision == CloseDecision::HideToTray {
                api.prevent_close();
            }
        }
        // No cancellable minimize event: react once the window reports it.
        tauri::WindowEvent::Resized(_) => {
            if window.is_minimized().unwrap_or(false) {
                with_resident(window.app_handle(), |r, shell| r.handle_minimize(shell));
            }
        }
        _ => {}
    }
}
