//! Win32 window lookup.

#![cfg(target_os = "windows")]

use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::WindowFromPoint;

use super::{NativeWindow, WindowLocator};

/// Finds windows with `WindowFromPoint`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowLocator;

impl WindowLocator for Win32WindowLocator {
    fn window_at(&self, x: i32, y: i32) -> Option<NativeWindow> {
        // SAFETY: WindowFromPoint takes the point by value and has no
        // preconditions; it returns NULL when no window is at the point.
        let hwnd = unsafe { WindowFromPoint(POINT { x, y }) };
        (!hwnd.0.is_null()).then(|| NativeWindow(hwnd.0 as isize))
    }
}
