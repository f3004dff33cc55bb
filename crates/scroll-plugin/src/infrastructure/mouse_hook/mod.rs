//! Low-level mouse hook infrastructure.
//!
//! On Windows this installs a `WH_MOUSE_LL` hook on the thread that calls
//! [`HookBackend::install`] (inside Pidgin, the GTK main thread, whose message
//! pump keeps the hook alive). Every mouse message in the session is decoded
//! into a [`MouseHookEvent`] and handed synchronously to the registered
//! [`WheelHandler`], whose [`HookVerdict`] decides whether the event continues
//! down the hook chain.
//!
//! # Windows-Specific Implementation
//!
//! The hook callback must complete within ~300ms or Windows will silently
//! remove the hook. Handlers therefore do a bounded amount of work and never
//! block.
//!
//! # Testability
//!
//! The [`HookBackend`] trait lets tests drive the whole load/dispatch/unload
//! cycle through [`mock::MockMouseHook`] without touching the OS.

use std::sync::Arc;

use scroll_core::ScrollDelta;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// `WM_MOUSEWHEEL`: the message identifier delivered for vertical wheel movement.
pub const WM_MOUSEWHEEL_MESSAGE: u32 = 0x020A;

/// A mouse event delivered to the low-level hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseHookEvent {
    /// The vertical wheel moved.
    Wheel {
        /// Signed wheel delta; positive = away from user.
        delta: ScrollDelta,
        /// Pointer X in screen coordinates at the time of the event.
        x: i32,
        /// Pointer Y in screen coordinates.
        y: i32,
        /// Milliseconds since system start (from the hook struct).
        time_ms: u32,
    },
    /// Any other mouse message (moves, buttons, horizontal wheel).
    Other {
        /// The raw window message identifier.
        message: u32,
    },
}

impl MouseHookEvent {
    /// Decodes the fields of a low-level hook struct into an event.
    pub fn decode(message: u32, mouse_data: u32, x: i32, y: i32, time_ms: u32) -> Self {
        if message == WM_MOUSEWHEEL_MESSAGE {
            MouseHookEvent::Wheel {
                delta: ScrollDelta::from_mouse_data(mouse_data),
                x,
                y,
                time_ms,
            }
        } else {
            MouseHookEvent::Other { message }
        }
    }
}

/// What the hook callback does with an event after the handler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    /// The handler compensated the scroll itself. The callback returns without
    /// calling the next hook in the chain.
    Handled,
    /// The event is passed to the next hook unchanged.
    Forward,
}

/// Opaque value of an installed OS hook handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookToken(pub isize);

/// Error type for hook operations.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to install mouse hook (code {code:#x}): {message}")]
    InstallFailed { code: i32, message: String },
    #[error("a mouse hook is already installed")]
    AlreadyInstalled,
    #[error("failed to stop the hook message loop: {0}")]
    MessageLoop(String),
}

/// Receives decoded mouse events from the hook callback.
///
/// Called synchronously on the thread that installed the hook.
pub trait WheelHandler: Send + Sync {
    fn handle(&self, event: &MouseHookEvent) -> HookVerdict;
}

/// Installs and removes the process-wide mouse hook.
pub trait HookBackend: Send + Sync {
    /// Installs the hook and registers `handler` to receive its events.
    fn install(&self, handler: Arc<dyn WheelHandler>) -> Result<HookToken, HookError>;
    /// Removes the hook identified by `token` and unregisters its handler.
    fn remove(&self, token: HookToken);
}

impl<B: HookBackend + ?Sized> HookBackend for Arc<B> {
    fn install(&self, handler: Arc<dyn WheelHandler>) -> Result<HookToken, HookError> {
        (**self).install(handler)
    }

    fn remove(&self, token: HookToken) {
        (**self).remove(token)
    }
}
