//! Usage: Tracing setup (console + daily rolling file under `<app data>/logs`) and log retention.

use crate::{app_paths, settings};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "tray-todo.log";
const DEFAULT_FILTER: &str = "info,tray_todo_lib=debug";

// Dropping the guard flushes and stops the file writer; keep it for the process lifetime.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer().with_target(true).with_level(true)
}

/// Best-effort: never aborts startup. Falls back to console-only when the log dir is unusable.
pub(crate) fn init(app: &tauri::AppHandle) {
    let log_dir = app_paths::app_data_dir(app).map(|dir| app_paths::logs_dir(&dir));

    let file_error = match &log_dir {
        Ok(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => None,
            Err(e) => Some(format!("failed to create log dir {}: {e}", dir.display())),
        },
        Err(err) => Some(err.clone()),
    };

    let installed = match (&log_dir, &file_error) {
        (Ok(dir), None) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);

            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            let subscriber = tracing_subscriber::registry()
                .with(env_filter())
                .with(console_layer())
                .with(file_layer);
            tracing::subscriber::set_global_default(subscriber)
        }
        _ => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter())
                .with(console_layer());
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    if installed.is_err() {
        // Already initialized (e.g. a second `init` call); keep the existing subscriber.
        return;
    }

    // Route `log` records from Tauri and its plugins into tracing.
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::debug!("log 桥接未安装: {err}");
    }

    if let Some(err) = file_error {
        tracing::warn!("文件日志不可用，仅输出到控制台: {err}");
        return;
    }

    if let Ok(dir) = &log_dir {
        let retention_days = settings::read(app)
            .map(|s| s.log_retention_days)
            .unwrap_or(settings::DEFAULT_LOG_RETENTION_DAYS);
        let removed = prune_old_logs(dir, retention_days, SystemTime::now());
        tracing::info!(
            dir = %dir.display(),
            retention_days,
            removed,
            "文件日志已初始化"
        );
    }
}

/// Remove rolled log files whose last modification is older than `retention_days`.
pub(crate) fn prune_old_logs(dir: &Path, retention_days: u32, now: SystemTime) -> usize {
    let max_age = Duration::from_secs(u64::from(retention_days) * 24 * 60 * 60);
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        let expired = now
            .duration_since(modified)
            .map(|age| age > max_age)
            .unwrap_or(false);
        if expired && std::fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    removed
}
