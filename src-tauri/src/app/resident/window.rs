//! Usage: Window visibility coordinator (close/minimize become hide-to-tray until quitting).

use super::shell::{MainWindow, Shell, TrayHandle};
use super::Resident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Caller must veto the close (`prevent_close`); the window was hidden instead.
    HideToTray,
    Allow,
}

/// Hides the window only once a tray exists to bring it back; `false` leaves the window untouched.
fn hide_to_tray<T, S>(resident: &Resident<T>, shell: &S, window: &S::Window) -> bool
where
    T: TrayHandle,
    S: Shell<Tray = T>,
{
    if let Err(err) = resident.ensure_tray(shell) {
        tracing::error!("系统托盘创建失败，窗口保持原状: {}", err);
        return false;
    }
    if let Err(err) = window.hide() {
        tracing::warn!("主窗口隐藏失败: {}", err);
    }
    true
}

impl<T: TrayHandle> Resident<T> {
    pub fn handle_minimize<S>(&self, shell: &S)
    where
        S: Shell<Tray = T>,
    {
        let Some(window) = shell.main_window() else {
            return;
        };
        if hide_to_tray(self, shell, &window) {
            tracing::info!("主窗口最小化，已隐藏到托盘");
        }
    }

    /// Without a tray the close goes through, so the last window closing can still end the process.
    pub fn handle_close_requested<S>(&self, shell: &S) -> CloseDecision
    where
        S: Shell<Tray = T>,
    {
        if self.is_quitting() {
            tracing::info!("正在退出，允许关闭主窗口");
            return CloseDecision::Allow;
        }

        let Some(window) = shell.main_window() else {
            return CloseDecision::Allow;
        };
        if !hide_to_tray(self, shell, &window) {
            return CloseDecision::Allow;
        }
        tracing::info!("主窗口关闭请求，已隐藏到托盘");
        CloseDecision::HideToTray
    }

    /// Restore, show and focus the main window. Showing always ends any flashing.
    pub fn show_window<S>(&self, shell: &S)
    where
        S: Shell<Tray = T>,
    {
        let Some(window) = shell.main_window() else {
            tracing::debug!("主窗口不存在，忽略显示请求");
            return;
        };

        if window.is_minimized() {
            if let Err(err) = window.unminimize() {
                tracing::warn!("主窗口还原失败: {}", err);
            }
        }
        if let Err(err) = window.show() {
            tracing::warn!("主窗口显示失败: {}", err);
        }
        if let Err(err) = window.set_focus() {
            tracing::debug!("主窗口聚焦失败: {}", err);
        }
        self.stop_flashing();

        tracing::info!("主窗口已显示");
    }

    pub fn hide_window<S>(&self, shell: &S)
    where
        S: Shell<Tray = T>,
    {
        let Some(window) = shell.main_window() else {
            return;
        };
        if let Err(err) = window.hide() {
            tracing::warn!("主窗口隐藏失败: {}", err);
            return;
        }
        tracing::info!("主窗口已隐藏");
    }

    pub fn toggle_window<S>(&self, shell: &S)
    where
        S: Shell<Tray = T>,
    {
        let Some(window) = shell.main_window() else {
            return;
        };
        if window.is_visible() && !window.is_minimized() {
            self.hide_window(shell);
        } else {
            self.show_window(shell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CloseDecision;
    use crate::app::resident::Shell;
    use crate::app::test_support::{FakeShell, Resident};

    #[test]
    fn close_while_not_quitting_hides_and_creates_tray() {
        let shell = FakeShell::new();
        let resident = Resident::default();

        assert_eq!(
            resident.handle_close_requested(&shell),
            CloseDecision::HideToTray
        );
        assert!(!shell.window.is_visible_now());
        assert!(shell.window.exists());
        assert!(resident.has_tray());
    }

    #[test]
    fn close_while_quitting_is_allowed_without_tray() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        resident.mark_quitting();

        assert_eq!(resident.handle_close_requested(&shell), CloseDecision::Allow);
        assert!(shell.window.is_visible_now());
        assert!(!resident.has_tray());
    }

    #[test]
    fn minimize_hides_to_tray() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        shell.window.set_minimized(true);

        resident.handle_minimize(&shell);

        assert!(!shell.window.is_visible_now());
        assert!(resident.has_tray());
    }

    #[test]
    fn show_restores_focuses_and_stops_flashing() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        resident.handle_close_requested(&shell);
        assert!(resident.start_flashing(shell.ticker()));
        shell.window.set_minimized(true);

        resident.show_window(&shell);

        assert!(shell.window.is_visible_now());
        assert!(!shell.window.is_minimized_now());
        assert!(shell.window.focused());
        assert!(!resident.is_flashing());
        assert_eq!(shell.ticker.live(), 0);
    }

    #[test]
    fn toggle_alternates_visibility() {
        let shell = FakeShell::new();
        let resident = Resident::default();

        resident.toggle_window(&shell);
        assert!(!shell.window.is_visible_now());

        resident.toggle_window(&shell);
        assert!(shell.window.is_visible_now());
    }

    #[test]
    fn toggle_shows_a_minimized_window() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        shell.window.set_minimized(true);

        resident.toggle_window(&shell);

        assert!(shell.window.is_visible_now());
        assert!(!shell.window.is_minimized_now());
    }

    #[test]
    fn missing_window_is_noop() {
        let shell = FakeShell::new();
        shell.window.destroy();
        let resident = Resident::default();

        resident.show_window(&shell);
        resident.hide_window(&shell);
        resident.toggle_window(&shell);
        resident.handle_minimize(&shell);

        assert!(!resident.has_tray());
        assert_eq!(resident.handle_close_requested(&shell), CloseDecision::Allow);
    }

    #[test]
    fn close_without_tray_keeps_window_and_allows_exit() {
        let shell = FakeShell::new();
        shell.fail_tray_build();
        let resident = Resident::default();

        assert_eq!(resident.handle_close_requested(&shell), CloseDecision::Allow);
        assert!(shell.window.is_visible_now());
        assert!(!resident.has_tray());
    }

    #[test]
    fn minimize_without_tray_leaves_window_minimized() {
        let shell = FakeShell::new();
        shell.fail_tray_build();
        let resident = Resident::default();
        shell.window.set_minimized(true);

        resident.handle_minimize(&shell);

        assert!(shell.window.is_visible_now());
        assert!(shell.window.is_minimized_now());
        assert!(!resident.has_tray());
    }
}
