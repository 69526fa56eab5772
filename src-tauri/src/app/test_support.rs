//! Usage: In-process doubles for the resident core, the notifier and the UI channel (tests only).

use crate::app::channel::{PushTopic, UiChannel};
use crate::app::notice::{NoticeBackend, NoticeId, NoticeRequest};
use crate::app::resident::{self, MainWindow, Shell, Ticker, TimerGuard, TrayHandle};
use crate::domain::tray_icon::{IconSource, RgbaIcon};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) type Resident = resident::Resident<FakeTray>;

#[derive(Debug, Default)]
struct WindowFlags {
    destroyed: bool,
    hidden: bool,
    minimized: bool,
    focused: bool,
}

/// Shared handle to the fake main window; clones observe the same flags.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindow {
    flags: Arc<Mutex<WindowFlags>>,
}

impl FakeWindow {
    fn flags(&self) -> std::sync::MutexGuard<'_, WindowFlags> {
        self.flags.lock().expect("window flags")
    }

    pub(crate) fn exists(&self) -> bool {
        !self.flags().destroyed
    }

    pub(crate) fn destroy(&self) {
        self.flags().destroyed = true;
    }

    pub(crate) fn set_minimized(&self, minimized: bool) {
        self.flags().minimized = minimized;
    }

    pub(crate) fn is_visible_now(&self) -> bool {
        !self.flags().hidden
    }

    pub(crate) fn is_minimized_now(&self) -> bool {
        self.flags().minimized
    }

    pub(crate) fn focused(&self) -> bool {
        self.flags().focused
    }
}

impl MainWindow for FakeWindow {
    fn is_visible(&self) -> bool {
        self.is_visible_now()
    }

    fn is_minimized(&self) -> bool {
        self.is_minimized_now()
    }

    fn show(&self) -> Result<(), String> {
        self.flags().hidden = false;
        Ok(())
    }

    fn hide(&self) -> Result<(), String> {
        let mut flags = self.flags();
        flags.hidden = true;
        flags.focused = false;
        Ok(())
    }

    fn unminimize(&self) -> Result<(), String> {
        self.flags().minimized = false;
        Ok(())
    }

    fn set_focus(&self) -> Result<(), String> {
        self.flags().focused = true;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TrayRecord {
    created: usize,
    destroyed: usize,
    initial_icon: Option<RgbaIcon>,
    images: Vec<RgbaIcon>,
}

/// Everything the fake trays did. `images` only holds `set_image` calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrayLog {
    record: Arc<Mutex<TrayRecord>>,
}

impl TrayLog {
    fn record(&self) -> std::sync::MutexGuard<'_, TrayRecord> {
        self.record.lock().expect("tray record")
    }

    pub(crate) fn created(&self) -> usize {
        self.record().created
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.record().destroyed
    }

    pub(crate) fn initial_icon(&self) -> Option<RgbaIcon> {
        self.record().initial_icon.clone()
    }

    pub(crate) fn images(&self) -> Vec<RgbaIcon> {
        self.record().images.clone()
    }
}

#[derive(Debug)]
pub(crate) struct FakeTray {
    log: TrayLog,
}

impl TrayHandle for FakeTray {
    fn set_image(&self, icon: &RgbaIcon) -> Result<(), String> {
        self.log.record().images.push(icon.clone());
        Ok(())
    }

    fn destroy(self) -> Result<(), String> {
        self.log.record().destroyed += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TickerRecord {
    started: usize,
    live: usize,
    last_interval: Option<Duration>,
}

/// Never fires on its own: tests call `Resident::flash_tick` by hand.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTicker {
    record: Arc<Mutex<TickerRecord>>,
}

impl FakeTicker {
    fn record(&self) -> std::sync::MutexGuard<'_, TickerRecord> {
        self.record.lock().expect("ticker record")
    }

    pub(crate) fn started(&self) -> usize {
        self.record().started
    }

    pub(crate) fn live(&self) -> usize {
        self.record().live
    }

    pub(crate) fn last_interval(&self) -> Option<Duration> {
        self.record().last_interval
    }
}

struct FakeTimer {
    ticker: FakeTicker,
}

impl TimerGuard for FakeTimer {
    fn cancel(self: Box<Self>) {
        self.ticker.record().live -= 1;
    }
}

impl Ticker for FakeTicker {
    fn start(&self, interval: Duration) -> Box<dyn TimerGuard> {
        {
            let mut record = self.record();
            record.started += 1;
            record.live += 1;
            record.last_interval = Some(interval);
        }
        Box::new(FakeTimer {
            ticker: self.clone(),
        })
    }
}

pub(crate) struct FakeIconSource {
    result: Result<Option<RgbaIcon>, String>,
}

impl IconSource for FakeIconSource {
    fn load(&self, _size: u32) -> Result<Option<RgbaIcon>, String> {
        self.result.clone()
    }
}

pub(crate) struct FakeShell {
    pub(crate) window: FakeWindow,
    pub(crate) ticker: FakeTicker,
    pub(crate) tray_log: TrayLog,
    icons: FakeIconSource,
    fail_build: AtomicBool,
}

impl FakeShell {
    /// Visible window, no icon asset on disk.
    pub(crate) fn new() -> Self {
        Self::with_icon(Ok(None))
    }

    pub(crate) fn with_icon(result: Result<Option<RgbaIcon>, String>) -> Self {
        Self {
            window: FakeWindow::default(),
            ticker: FakeTicker::default(),
            tray_log: TrayLog::default(),
            icons: FakeIconSource { result },
            fail_build: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_tray_build(&self) {
        self.fail_build.store(true, Ordering::SeqCst);
    }
}

impl Shell for FakeShell {
    type Tray = FakeTray;
    type Window = FakeWindow;

    fn main_window(&self) -> Option<FakeWindow> {
        self.window.exists().then(|| self.window.clone())
    }

    fn icon_source(&self) -> &dyn IconSource {
        &self.icons
    }

    fn build_tray(&self, icon: &RgbaIcon) -> Result<FakeTray, String> {
        if self.fail_build.load(Ordering::SeqCst) {
            return Err("tray unavailable".to_string());
        }
        {
            let mut record = self.tray_log.record();
            record.created += 1;
            record.initial_icon = Some(icon.clone());
        }
        Ok(FakeTray {
            log: self.tray_log.clone(),
        })
    }

    fn ticker(&self) -> &dyn Ticker {
        &self.ticker
    }
}

/// Notification backend that records what would have been shown.
#[derive(Default)]
pub(crate) struct FakeNoticeBackend {
    unsupported: bool,
    fail_show: bool,
    no_clicks: bool,
    shown: Mutex<Vec<(NoticeId, NoticeRequest)>>,
}

impl FakeNoticeBackend {
    pub(crate) fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_show: true,
            ..Self::default()
        }
    }

    pub(crate) fn without_clicks() -> Self {
        Self {
            no_clicks: true,
            ..Self::default()
        }
    }

    pub(crate) fn shown(&self) -> Vec<(NoticeId, NoticeRequest)> {
        self.shown.lock().expect("shown").clone()
    }
}

impl NoticeBackend for FakeNoticeBackend {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn reports_clicks(&self) -> bool {
        !self.no_clicks
    }

    fn show(&self, id: NoticeId, request: &NoticeRequest) -> Result<(), String> {
        if self.fail_show {
            return Err("notification daemon unavailable".to_string());
        }
        self.shown
            .lock()
            .expect("shown")
            .push((id, request.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingChannel {
    pushed: Mutex<Vec<(PushTopic, serde_json::Value)>>,
}

impl RecordingChannel {
    pub(crate) fn pushed(&self) -> Vec<(PushTopic, serde_json::Value)> {
        self.pushed.lock().expect("pushed").clone()
    }

    pub(crate) fn topics(&self) -> Vec<PushTopic> {
        self.pushed().into_iter().map(|(topic, _)| topic).collect()
    }
}

impl UiChannel for RecordingChannel {
    fn push(&self, topic: PushTopic, payload: serde_json::Value) -> Result<(), String> {
        self.pushed
            .lock()
            .expect("pushed")
            .push((topic, payload));
        Ok(())
    }
}

/// Counts invocations of a click callback.
#[derive(Clone, Default)]
pub(crate) struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub(crate) fn callback(&self) -> Box<dyn FnOnce() + Send> {
        let counter = self.0.clone();
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
