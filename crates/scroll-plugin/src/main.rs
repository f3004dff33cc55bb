//! scroll-probe: watch wheel deltas the way the plugin sees them.
//!
//! Installs the same low-level mouse hook as the plugin, but with a handler
//! that only logs each wheel event and the compensation it would receive for
//! a nominal line step. Every event is forwarded, so scrolling elsewhere is
//! unaffected. Useful for checking what a given trackpad driver reports.
//!
//! ```text
//! scroll-probe [STEP_INCREMENT]      (default 18.0)
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ hook thread           -- installs WH_MOUSE_LL, pumps messages
//!  └─ tokio::signal::ctrl_c -- posts WM_QUIT to the hook thread
//! ```

use anyhow::Context;
use scroll_plugin::plugin::init_logging;

/// Step used when none is given on the command line.
const DEFAULT_STEP: f64 = 18.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info");

    let step = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f64>()
            .with_context(|| format!("invalid step increment {arg:?}"))?,
        None => DEFAULT_STEP,
    };

    run(step).await
}

#[cfg(target_os = "windows")]
async fn run(step: f64) -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::anyhow;
    use scroll_plugin::application::hook_lifecycle::HookLifecycle;
    use scroll_plugin::infrastructure::mouse_hook::windows::{
        current_thread_id, post_quit, run_message_loop, WindowsMouseHook,
    };
    use tracing::info;

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();

    let hook_thread = std::thread::Builder::new()
        .name("scroll-probe-hook".to_string())
        .spawn(move || -> anyhow::Result<()> {
            let mut lifecycle = HookLifecycle::new(WindowsMouseHook::new());
            lifecycle.install(Arc::new(probe::ProbeHandler::new(step)))?;
            let _ = ready_tx.send(current_thread_id());
            run_message_loop();
            lifecycle.remove();
            Ok(())
        })
        .context("failed to spawn hook thread")?;

    let Ok(thread_id) = ready_rx.await else {
        // The thread exited before installing the hook; surface its error.
        return hook_thread
            .join()
            .map_err(|_| anyhow!("hook thread panicked"))?;
    };

    info!(step, "scroll-probe ready. Press Ctrl-C to exit.");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    post_quit(thread_id)?;
    hook_thread
        .join()
        .map_err(|_| anyhow!("hook thread panicked"))?
}

#[cfg(not(target_os = "windows"))]
async fn run(_step: f64) -> anyhow::Result<()> {
    anyhow::bail!("scroll-probe needs a Windows low-level mouse hook")
}

#[cfg(target_os = "windows")]
mod probe {
    use scroll_core::ScrollDelta;
    use scroll_plugin::infrastructure::mouse_hook::{HookVerdict, MouseHookEvent, WheelHandler};
    use tracing::info;

    /// Logs wheel events; never handles them.
    pub struct ProbeHandler {
        step: f64,
    }

    impl ProbeHandler {
        pub fn new(step: f64) -> Self {
            Self { step }
        }

        fn report(&self, delta: ScrollDelta, x: i32, y: i32) {
            info!(
                delta = delta.raw(),
                x,
                y,
                whole_notch = delta.is_whole_notch(),
                value_change = delta.apply(0.0, self.step),
                "wheel"
            );
        }
    }

    impl WheelHandler for ProbeHandler {
        fn handle(&self, event: &MouseHookEvent) -> HookVerdict {
            if let MouseHookEvent::Wheel { delta, x, y, .. } = *event {
                self.report(delta, x, y);
            }
            HookVerdict::Forward
        }
    }
}
