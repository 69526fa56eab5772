mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{notice, resident};
pub(crate) use infra::{app_paths, autostart, settings, task_files};
pub(crate) use shared::blocking;

use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            resident::show_main_window(app);
        }))
        .plugin(tauri_plugin_autostart::Builder::new().build())
        .plugin(tauri_plugin_notification::init())
        .manage(resident::ResidentState::default())
        .menu(app::menu::build_app_menu)
        .on_menu_event(app::menu::on_menu_event);

    let app = builder
        .manage(notice::Notifier::default())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .on_window_event(resident::on_window_event)
        .setup(|app| {
            crate::app::logging::init(app.handle());
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Tray To-Do 启动");

            #[cfg(desktop)]
            {
                let settings = settings::read(app.handle()).unwrap_or_else(|err| {
                    tracing::warn!("配置读取失败，使用默认值: {}", err);
                    settings::AppSettings::default()
                });
                if settings.start_minimized {
                    resident::with_resident(app.handle(), |r, shell| {
                        // Never hide the only window without a tray to bring it back.
                        if let Err(err) = r.ensure_tray(shell) {
                            tracing::error!("系统托盘初始化失败: {}", err);
                            return;
                        }
                        r.hide_window(shell);
                    });
                }
            }

            #[cfg(debug_assertions)]
            {
                let enabled = std::env::var("TRAY_TODO_DEV_DIAGNOSTICS")
                    .ok()
                    .map(|v| v.trim().to_ascii_lowercase())
                    .is_some_and(|v| v == "1" || v == "true" || v == "yes");
                if enabled {
                    let identifier = &app.config().identifier;
                    tracing::info!(identifier = %identifier, "[dev] tauri identifier");
                    if let Ok(dir) = app_paths::app_data_dir(app.handle()) {
                        tracing::info!(dir = %dir.display(), "[dev] app data dir");
                    }
                    let icon = app_paths::tray_icon_asset(app.handle());
                    tracing::info!(icon = %icon.display(), exists = icon.exists(), "[dev] tray icon asset");
                }
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            app_exit,
            set_title,
            dialog_open_file,
            dialog_save_file,
            tray_start_flashing,
            tray_stop_flashing,
            show_notification,
            show_task_notification,
            settings_get,
            settings_set,
            autostart_get,
            autostart_set
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| match event {
        tauri::RunEvent::ExitRequested { api, code, .. } => {
            #[cfg(desktop)]
            {
                let resident = app_handle.state::<resident::ResidentState>();
                // `code` is None when the last window went away on its own.
                if code.is_none()
                    && resident.keeps_running_without_windows(cfg!(target_os = "macos"))
                {
                    tracing::info!("最后一个窗口已关闭，保持驻留");
                    api.prevent_exit();
                    return;
                }
                tracing::info!("收到退出请求，开始清理...");
                resident.mark_quitting();
            }
            #[cfg(not(desktop))]
            let _ = (api, code);
        }
        tauri::RunEvent::Exit => {
            #[cfg(desktop)]
            crate::app::cleanup::cleanup_before_exit(app_handle);
        }
        #[cfg(target_os = "macos")]
        tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            if !has_visible_windows {
                resident::show_main_window(app_handle);
            }
        }
        _ => {}
    });
}
