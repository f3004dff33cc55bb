//! Plugin identity and the load/unload entry points.
//!
//! [`SmoothScrollPlugin`] is the host-facing object: `load` installs the
//! hook, `unload` removes it, and both always report success so the host
//! never refuses the plugin. A failed install leaves the plugin loaded but
//! inert.
//!
//! On Windows the two `extern "C"` functions in [`host`] are what the
//! libpurple registration shim calls from its `load` and `unload` slots.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::hook_lifecycle::HookLifecycle;
use crate::infrastructure::mouse_hook::{HookBackend, HookError, WheelHandler};
use crate::infrastructure::storage::config::PluginConfig;

/// Static metadata shown in the host's plugin manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub homepage: &'static str,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    id: "gtk-win32-scrolling",
    name: "Windows Smooth Scrolling",
    version: env!("CARGO_PKG_VERSION"),
    summary: "Windows Smooth Scrolling.",
    description: "Allows smooth scrolling with trackpads on Windows.",
    author: "",
    homepage: "",
};

/// Installs a `tracing` subscriber at `default_level` unless `RUST_LOG` is
/// set. Does nothing if the process already has a global subscriber.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Fails only when a subscriber exists already, which is fine.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The loaded plugin: its configuration and the hook it owns.
pub struct SmoothScrollPlugin<B: HookBackend> {
    config: PluginConfig,
    hook: HookLifecycle<B>,
}

impl<B: HookBackend> SmoothScrollPlugin<B> {
    pub fn new(config: PluginConfig, backend: B) -> Self {
        Self {
            config,
            hook: HookLifecycle::new(backend),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn is_hooked(&self) -> bool {
        self.hook.is_hooked()
    }

    /// Installs the hook with `handler`. Always returns `true`.
    pub fn load(&mut self, handler: Arc<dyn WheelHandler>) -> bool {
        info!("{} {} loading", PLUGIN_INFO.name, PLUGIN_INFO.version);
        match self.hook.install(handler) {
            Ok(()) | Err(HookError::AlreadyInstalled) => {}
            // Already logged by the lifecycle.
            Err(_) => warn!("{} stays loaded without scrolling support", PLUGIN_INFO.name),
        }
        true
    }

    /// Removes the hook if installed. Always returns `true`.
    pub fn unload(&mut self) -> bool {
        self.hook.remove();
        info!("{} unloaded", PLUGIN_INFO.name);
        true
    }
}

/// C entry points for the host.
#[cfg(target_os = "windows")]
pub mod host {
    use std::sync::{Arc, Mutex, PoisonError};

    use tracing::{error, warn};

    use super::{init_logging, SmoothScrollPlugin};
    use crate::application::intercept_scroll::{InterceptSettings, ScrollInterceptor};
    use crate::infrastructure::mouse_hook::windows::WindowsMouseHook;
    use crate::infrastructure::storage::config::load_config;
    use crate::infrastructure::toolkit::gtk::GtkToolkit;
    use crate::infrastructure::toolkit::windows::Win32WindowLocator;

    /// glib's `gboolean` truth value.
    const TRUE: i32 = 1;

    static PLUGIN: Mutex<Option<SmoothScrollPlugin<WindowsMouseHook>>> = Mutex::new(None);

    /// Loads configuration, binds GTK, and installs the hook.
    ///
    /// Must be called on the GTK main thread.
    #[no_mangle]
    pub extern "C" fn smooth_scroll_plugin_load() -> i32 {
        let mut slot = PLUGIN.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut previous) = slot.take() {
            previous.unload();
        }

        let loaded = load_config();
        let config = loaded.as_ref().cloned().unwrap_or_default();
        init_logging(&config.logging.log_level);
        if let Err(e) = &loaded {
            warn!("using default settings: {e}");
        }

        let mut plugin = SmoothScrollPlugin::new(config, WindowsMouseHook::new());
        match GtkToolkit::bind() {
            Ok(toolkit) => {
                let settings = InterceptSettings::from(&plugin.config().scroll);
                let interceptor = ScrollInterceptor::new(Win32WindowLocator, toolkit, settings);
                plugin.load(Arc::new(interceptor));
            }
            Err(e) => error!("GTK bindings unavailable, smooth scrolling disabled: {e}"),
        }

        *slot = Some(plugin);
        TRUE
    }

    /// Removes the hook installed by [`smooth_scroll_plugin_load`].
    #[no_mangle]
    pub extern "C" fn smooth_scroll_plugin_unload() -> i32 {
        let plugin = PLUGIN.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(mut plugin) = plugin {
            plugin.unload();
        }
        TRUE
    }
}
