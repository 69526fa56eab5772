//! Usage: Attention indicator (alternate the tray image between normal and empty on a fixed tick).

use super::shell::{Ticker, TimerGuard, TrayHandle};
use super::Resident;
use crate::domain::tray_icon::RgbaIcon;
use crate::shared::mutex_ext::MutexExt;
use std::time::Duration;

pub const FLASH_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashFrame {
    Empty,
    Normal,
}

impl FlashFrame {
    fn toggled(self) -> Self {
        match self {
            Self::Empty => Self::Normal,
            Self::Normal => Self::Empty,
        }
    }
}

enum FlashState {
    Idle,
    Flashing {
        next: FlashFrame,
        timer: Box<dyn TimerGuard>,
    },
}

/// {Idle, Flashing} with guarded transitions; owns at most one timer.
pub struct Flasher {
    state: FlashState,
    empty_icon: Option<RgbaIcon>,
}

impl Default for Flasher {
    fn default() -> Self {
        Self {
            state: FlashState::Idle,
            empty_icon: None,
        }
    }
}

impl Flasher {
    pub fn is_running(&self) -> bool {
        matches!(self.state, FlashState::Flashing { .. })
    }

    fn start(&mut self, ticker: &dyn Ticker) -> bool {
        if self.is_running() {
            return false;
        }
        let timer = ticker.start(FLASH_INTERVAL);
        self.state = FlashState::Flashing {
            next: FlashFrame::Empty,
            timer,
        };
        true
    }

    fn advance(&mut self) -> Option<FlashFrame> {
        match &mut self.state {
            FlashState::Idle => None,
            FlashState::Flashing { next, .. } => {
                let frame = *next;
                *next = frame.toggled();
                Some(frame)
            }
        }
    }

    fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.state, FlashState::Idle) {
            FlashState::Idle => false,
            FlashState::Flashing { timer, .. } => {
                timer.cancel();
                true
            }
        }
    }

    fn prepare_empty_icon(&mut self, normal: &RgbaIcon) {
        let stale = self
            .empty_icon
            .as_ref()
            .map_or(true, |e| e.width() != normal.width() || e.height() != normal.height());
        if stale {
            self.empty_icon = Some(RgbaIcon::transparent(normal.width(), normal.height()));
        }
    }
}

impl<T: TrayHandle> Resident<T> {
    pub fn is_flashing(&self) -> bool {
        self.flasher.lock_or_recover().is_running()
    }

    /// Returns `true` only when a new timer was started.
    pub fn start_flashing(&self, ticker: &dyn Ticker) -> bool {
        let mut flasher = self.flasher.lock_or_recover();
        if flasher.is_running() {
            return false;
        }
        if !self.has_tray() {
            tracing::debug!("系统托盘不存在，忽略闪烁请求");
            return false;
        }

        let normal = self.normal_icon.lock_or_recover().clone();
        let Some(normal) = normal else {
            tracing::warn!("托盘图标未初始化，无法开始闪烁");
            return false;
        };

        flasher.prepare_empty_icon(&normal);
        let started = flasher.start(ticker);
        if started {
            tracing::info!("托盘图标开始闪烁");
        }
        started
    }

    /// Returns `true` when a running flasher was stopped.
    pub fn stop_flashing(&self) -> bool {
        let mut flasher = self.flasher.lock_or_recover();
        if !flasher.stop() {
            return false;
        }

        let tray = self.tray.lock_or_recover();
        let normal = self.normal_icon.lock_or_recover();
        if let (Some(tray), Some(normal)) = (tray.as_ref(), normal.as_ref()) {
            if let Err(err) = tray.set_image(normal) {
                tracing::warn!("托盘图标恢复失败: {err}");
            }
        }

        tracing::info!("托盘图标停止闪烁");
        true
    }

    /// One timer tick. Stale ticks after `stop_flashing` are ignored.
    pub fn flash_tick(&self) {
        let mut flasher = self.flasher.lock_or_recover();
        let Some(frame) = flasher.advance() else {
            return;
        };

        let tray = self.tray.lock_or_recover();
        let Some(tray) = tray.as_ref() else {
            flasher.stop();
            tracing::info!("闪烁期间托盘已销毁，停止闪烁");
            return;
        };

        let normal = self.normal_icon.lock_or_recover();
        let icon = match frame {
            FlashFrame::Empty => flasher.empty_icon.as_ref(),
            FlashFrame::Normal => normal.as_ref(),
        };
        if let Some(icon) = icon {
            if let Err(err) = tray.set_image(icon) {
                tracing::warn!(?frame, "闪烁时更新托盘图标失败: {err}");
            }
        }
    }
}
