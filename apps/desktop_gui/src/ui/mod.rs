//! UI layer for desktop GUI: app shell and analysis panels.

pub mod app;
pub mod panels;

pub use app::{DesktopGuiApp, StartupConfig};
