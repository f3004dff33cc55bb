//! Infrastructure layer for the plugin.
//!
//! Contains OS-facing adapters: the low-level mouse hook, window and widget
//! lookup against Win32 and GTK 2, and configuration file storage.

pub mod mouse_hook;
pub mod storage;
pub mod toolkit;
