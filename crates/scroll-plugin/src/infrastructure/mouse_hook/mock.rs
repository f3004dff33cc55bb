//! Mock hook backend for unit and integration testing.
//!
//! Stands in for the OS: records installs and removals, can be told to fail,
//! and [`MockMouseHook::dispatch`] plays the part of Windows delivering an
//! event to the installed callback.

use std::sync::{Arc, Mutex};

use super::{HookBackend, HookError, HookToken, HookVerdict, MouseHookEvent, WheelHandler};

#[derive(Default)]
struct MockState {
    handler: Option<(HookToken, Arc<dyn WheelHandler>)>,
    next_token: isize,
    install_count: u32,
    remove_count: u32,
    forwarded_count: u32,
    fail_install: bool,
}

/// A mock implementation of [`HookBackend`].
#[derive(Default)]
pub struct MockMouseHook {
    state: Mutex<MockState>,
}

impl MockMouseHook {
    /// Creates a backend whose installs succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose installs fail, as when `SetWindowsHookExW`
    /// returns `NULL`.
    pub fn failing() -> Self {
        let hook = Self::default();
        hook.state.lock().expect("lock poisoned").fail_install = true;
        hook
    }

    /// Delivers `event` the way the OS would.
    ///
    /// With no hook installed the event never reaches any handler and is
    /// counted as forwarded.
    pub fn dispatch(&self, event: MouseHookEvent) -> HookVerdict {
        // Clone the handler out so it runs without the lock held.
        let handler = self
            .state
            .lock()
            .expect("lock poisoned")
            .handler
            .as_ref()
            .map(|(_, h)| Arc::clone(h));

        let verdict = handler.map_or(HookVerdict::Forward, |h| h.handle(&event));
        if verdict == HookVerdict::Forward {
            self.state.lock().expect("lock poisoned").forwarded_count += 1;
        }
        verdict
    }

    /// Returns `true` while a hook is installed.
    pub fn is_installed(&self) -> bool {
        self.state.lock().expect("lock poisoned").handler.is_some()
    }

    /// Number of successful installs.
    pub fn install_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").install_count
    }

    /// Number of removals of an installed hook.
    pub fn remove_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").remove_count
    }

    /// Number of dispatched events passed on to the next hook in the chain.
    pub fn forwarded_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").forwarded_count
    }
}

impl HookBackend for MockMouseHook {
    fn install(&self, handler: Arc<dyn WheelHandler>) -> Result<HookToken, HookError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.fail_install {
            return Err(HookError::InstallFailed {
                code: 5,
                message: "access denied".to_string(),
            });
        }
        if state.handler.is_some() {
            return Err(HookError::AlreadyInstalled);
        }
        state.next_token += 1;
        let token = HookToken(state.next_token);
        state.handler = Some((token, handler));
        state.install_count += 1;
        Ok(token)
    }

    fn remove(&self, token: HookToken) {
        let mut state = self.state.lock().expect("lock poisoned");
        if matches!(state.handler, Some((installed, _)) if installed == token) {
            state.handler = None;
            state.remove_count += 1;
        }
    }
}
