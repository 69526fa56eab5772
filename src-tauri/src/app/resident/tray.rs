//! Usage: Tray lifecycle ({Absent, Present}) with lazy creation and one-shot teardown.

use super::shell::{Shell, TrayHandle};
use super::Resident;
use crate::domain::tray_icon::{resolve_normal_icon, RgbaIcon};
use crate::shared::mutex_ext::MutexExt;

impl<T: TrayHandle> Resident<T> {
    pub fn has_tray(&self) -> bool {
        self.tray.lock_or_recover().is_some()
    }

    /// Canonical "normal" bitmap, known once a tray has been built.
    pub fn normal_icon(&self) -> Option<RgbaIcon> {
        self.normal_icon.lock_or_recover().clone()
    }

    /// Absent -> Present. Returns `Ok(false)` when a tray already exists.
    pub fn ensure_tray<S>(&self, shell: &S) -> Result<bool, String>
    where
        S: Shell<Tray = T>,
    {
        let mut tray = self.tray.lock_or_recover();
        if tray.is_some() {
            return Ok(false);
        }

        let icon = resolve_normal_icon(shell.icon_source());
        let built = shell.build_tray(&icon)?;
        *tray = Some(built);
        *self.normal_icon.lock_or_recover() = Some(icon);

        tracing::info!("系统托盘已创建");
        Ok(true)
    }

    /// Present -> Absent. Returns `false` when there was nothing to destroy.
    pub fn destroy_tray(&self) -> bool {
        let Some(tray) = self.tray.lock_or_recover().take() else {
            return false;
        };
        if let Err(err) = tray.destroy() {
            tracing::warn!("系统托盘移除失败: {err}");
        }
        tracing::info!("系统托盘已销毁");
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{FakeShell, Resident};
    use crate::domain::tray_icon::{synthesize_fallback, RgbaIcon, TRAY_ICON_SIZE};

    #[test]
    fn ensure_tray_is_idempotent() {
        let shell = FakeShell::new();
        let resident = Resident::default();

        assert!(resident.ensure_tray(&shell).expect("first"));
        assert!(!resident.ensure_tray(&shell).expect("second"));

        assert!(resident.has_tray());
        assert_eq!(shell.tray_log.created(), 1);
    }

    #[test]
    fn destroy_tray_is_idempotent() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        resident.ensure_tray(&shell).expect("ensure");

        assert!(resident.destroy_tray());
        assert!(!resident.destroy_tray());

        assert!(!resident.has_tray());
        assert_eq!(shell.tray_log.destroyed(), 1);
    }

    #[test]
    fn missing_asset_builds_tray_with_generated_icon() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        resident.ensure_tray(&shell).expect("ensure");

        let fallback = synthesize_fallback(TRAY_ICON_SIZE);
        assert_eq!(shell.tray_log.initial_icon(), Some(fallback.clone()));
        assert_eq!(resident.normal_icon(), Some(fallback));
    }

    #[test]
    fn loaded_asset_becomes_normal_icon() {
        let asset = RgbaIcon::new(16, 16, vec![7; 16 * 16 * 4]).expect("icon");
        let shell = FakeShell::with_icon(Ok(Some(asset.clone())));
        let resident = Resident::default();
        resident.ensure_tray(&shell).expect("ensure");

        assert_eq!(resident.normal_icon(), Some(asset));
    }

    #[test]
    fn failing_asset_never_reaches_caller() {
        let shell = FakeShell::with_icon(Err("io error".to_string()));
        let resident = Resident::default();

        assert!(resident.ensure_tray(&shell).expect("fallback hides the error"));
        assert_eq!(
            resident.normal_icon(),
            Some(synthesize_fallback(TRAY_ICON_SIZE))
        );
    }

    #[test]
    fn build_failure_leaves_tray_absent() {
        let shell = FakeShell::new();
        shell.fail_tray_build();
        let resident = Resident::default();

        assert!(resident.ensure_tray(&shell).is_err());
        assert!(!resident.has_tray());
        assert!(resident.normal_icon().is_none());
    }

    #[test]
    fn tray_can_be_recreated_after_destroy() {
        let shell = FakeShell::new();
        let resident = Resident::default();
        resident.ensure_tray(&shell).expect("ensure");
        resident.destroy_tray();

        assert!(resident.ensure_tray(&shell).expect("again"));
        assert_eq!(shell.tray_log.created(), 2);
    }
}
