//! Usage: Application layer (tray/window lifecycle, UI channel, notifications, startup wiring).

pub(crate) mod channel;
pub(crate) mod cleanup;
pub(crate) mod dialogs;
pub(crate) mod logging;
#[cfg(desktop)]
pub(crate) mod menu;
pub(crate) mod notice;
pub(crate) mod resident;

#[cfg(test)]
pub(crate) mod test_support;
