//! HookLifecycle: owns the process-wide mouse hook from load to unload.
//!
//! Two states only. `Unhooked` is both the initial and the terminal state;
//! `Hooked` lasts from a successful install until [`HookLifecycle::remove`]
//! or drop. A failed install is logged and leaves the lifecycle `Unhooked`;
//! there are no retries.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::infrastructure::mouse_hook::{HookBackend, HookError, HookToken, WheelHandler};

/// Current state of the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Unhooked,
    Hooked(HookToken),
}

/// Scoped owner of the OS mouse hook.
pub struct HookLifecycle<B: HookBackend> {
    backend: B,
    state: HookState,
}

impl<B: HookBackend> HookLifecycle<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: HookState::Unhooked,
        }
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    pub fn is_hooked(&self) -> bool {
        matches!(self.state, HookState::Hooked(_))
    }

    /// Unhooked → Hooked.
    ///
    /// # Errors
    ///
    /// [`HookError::AlreadyInstalled`] when already hooked (state unchanged),
    /// or the backend's install error, which is also logged.
    pub fn install(&mut self, handler: Arc<dyn WheelHandler>) -> Result<(), HookError> {
        if self.is_hooked() {
            warn!("mouse hook already installed; ignoring second install");
            return Err(HookError::AlreadyInstalled);
        }
        match self.backend.install(handler) {
            Ok(token) => {
                self.state = HookState::Hooked(token);
                info!("smooth scrolling mouse hook installed");
                Ok(())
            }
            Err(e) => {
                error!("SetWindowsHookEx error: {e}");
                Err(e)
            }
        }
    }

    /// Hooked → Unhooked. Returns `true` if a hook was removed.
    pub fn remove(&mut self) -> bool {
        match std::mem::replace(&mut self.state, HookState::Unhooked) {
            HookState::Hooked(token) => {
                self.backend.remove(token);
                info!("smooth scrolling mouse hook removed");
                true
            }
            HookState::Unhooked => false,
        }
    }
}

impl<B: HookBackend> Drop for HookLifecycle<B> {
    fn drop(&mut self) {
        self.remove();
    }
}
