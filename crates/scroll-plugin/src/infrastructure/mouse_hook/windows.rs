//! Windows low-level mouse hook implementation.
//!
//! Installs `WH_MOUSE_LL` bound to the module of the host executable. The
//! OS callback carries no user-data pointer, so the registered handler lives
//! in a single process-wide slot that is filled on install and emptied on
//! removal; the hook handle itself is owned by whoever holds the
//! [`HookToken`].
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, warn};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, HC_ACTION, HHOOK, MSG, MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_QUIT,
};

use super::{HookBackend, HookError, HookToken, HookVerdict, MouseHookEvent, WheelHandler};

/// Handler of the currently installed hook, if any.
static HANDLER: RwLock<Option<Arc<dyn WheelHandler>>> = RwLock::new(None);

/// Windows `WH_MOUSE_LL` backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsMouseHook;

impl WindowsMouseHook {
    pub fn new() -> Self {
        Self
    }
}

impl HookBackend for WindowsMouseHook {
    fn install(&self, handler: Arc<dyn WheelHandler>) -> Result<HookToken, HookError> {
        let mut slot = HANDLER.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(HookError::AlreadyInstalled);
        }

        // SAFETY: a null module name returns the handle of the executable
        // that created the process (Pidgin's own exe when loaded as a plugin).
        let module = unsafe { GetModuleHandleW(PCWSTR::null()) }.map_err(install_error)?;

        // The handler must be in place before the first callback can fire.
        *slot = Some(handler);

        // SAFETY: `mouse_hook_proc` matches the HOOKPROC signature and lives
        // for the whole process. The installing thread pumps messages.
        let hook = unsafe {
            SetWindowsHookExW(
                WH_MOUSE_LL,
                Some(mouse_hook_proc),
                Some(HINSTANCE(module.0)),
                0,
            )
        };

        match hook {
            Ok(hook) => {
                debug!(handle = hook.0 as isize, "WH_MOUSE_LL hook installed");
                Ok(HookToken(hook.0 as isize))
            }
            Err(e) => {
                *slot = None;
                Err(install_error(e))
            }
        }
    }

    fn remove(&self, token: HookToken) {
        // SAFETY: the token was produced by a successful SetWindowsHookExW.
        if let Err(e) = unsafe { UnhookWindowsHookEx(HHOOK(token.0 as *mut c_void)) } {
            warn!("UnhookWindowsHookEx failed: {e}");
        }
        *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!(handle = token.0, "WH_MOUSE_LL hook removed");
    }
}

fn install_error(e: windows::core::Error) -> HookError {
    HookError::InstallFailed {
        code: e.code().0,
        message: e.message(),
    }
}

/// Runs the registered handler, treating a missing handler or a panic as
/// [`HookVerdict::Forward`]. Unwinding out of the callback would abort.
fn dispatch(event: &MouseHookEvent) -> HookVerdict {
    let Ok(slot) = HANDLER.read() else {
        return HookVerdict::Forward;
    };
    let Some(handler) = slot.as_ref() else {
        return HookVerdict::Forward;
    };
    catch_unwind(AssertUnwindSafe(|| handler.handle(event))).unwrap_or_else(|_| {
        error!("wheel handler panicked; forwarding event");
        HookVerdict::Forward
    })
}

/// Low-level mouse hook callback.
///
/// # Safety
///
/// Called by Windows on the installing thread; must return quickly.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a MSLLHOOKSTRUCT when n_code == HC_ACTION.
    let mhs = &*(l_param.0 as *const MSLLHOOKSTRUCT);
    let event = MouseHookEvent::decode(w_param.0 as u32, mhs.mouseData, mhs.pt.x, mhs.pt.y, mhs.time);

    match dispatch(&event) {
        // Skip the rest of the chain; the target window still gets the message.
        HookVerdict::Handled => LRESULT(0),
        // SAFETY: Forward to the next hook in the chain.
        HookVerdict::Forward => CallNextHookEx(None, n_code, w_param, l_param),
    }
}

/// Identifier of the calling thread, for [`post_quit`].
pub fn current_thread_id() -> u32 {
    // SAFETY: no preconditions.
    unsafe { GetCurrentThreadId() }
}

/// Pumps the calling thread's message queue until `WM_QUIT` arrives.
///
/// Low-level hooks are only called while their thread retrieves messages.
pub fn run_message_loop() {
    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    // GetMessageW returns -1 on error, 0 on WM_QUIT.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            DispatchMessageW(&msg);
        }
    }
}

/// Asks the message loop running on `thread_id` to exit.
pub fn post_quit(thread_id: u32) -> Result<(), HookError> {
    // SAFETY: posting WM_QUIT has no pointer arguments.
    unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
        .map_err(|e| HookError::MessageLoop(e.message()))
}
