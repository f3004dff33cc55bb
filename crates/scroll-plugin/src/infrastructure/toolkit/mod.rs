//! GUI toolkit seams used by the scroll interceptor.
//!
//! The interceptor needs three things from the outside world: which native
//! window is under the pointer ([`WindowLocator`]), which in-process widget
//! backs that window and how to reach its vertical adjustment
//! ([`WidgetToolkit`]), and a way to move that adjustment.
//!
//! Production implementations live in [`windows`] (Win32 `WindowFromPoint`)
//! and [`gtk`] (GTK 2 symbols resolved from the DLLs already loaded by the
//! host). [`mock::InMemoryDesktop`] implements both traits over plain data.

use std::sync::Arc;

use scroll_core::{AdjustmentState, WidgetKind};

pub mod layout;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod gtk;
#[cfg(target_os = "windows")]
pub mod windows;

/// A native top-level or child window handle (`HWND`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWindow(pub isize);

/// An in-process widget object (`GtkWidget *`). Never owned by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub usize);

/// A widget's vertical adjustment (`GtkAdjustment *`). Never owned by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdjustmentHandle(pub usize);

/// Error raised while binding to the toolkit at load time.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("module {0} is not loaded in this process")]
    ModuleNotLoaded(String),
    #[error("symbol {symbol} not found in {module}")]
    SymbolMissing {
        module: &'static str,
        symbol: &'static str,
    },
}

/// Finds the native window at a screen position.
#[cfg_attr(test, mockall::automock)]
pub trait WindowLocator: Send + Sync {
    fn window_at(&self, x: i32, y: i32) -> Option<NativeWindow>;
}

/// The widget queries and the one mutation the interceptor performs.
#[cfg_attr(test, mockall::automock)]
pub trait WidgetToolkit: Send + Sync {
    /// Maps a native window to the in-process widget it backs. `None` for
    /// windows of other processes and windows without a widget.
    fn widget_for_window(&self, window: NativeWindow) -> Option<WidgetHandle>;

    /// Returns `true` if `widget` belongs to `kind`. For
    /// [`WidgetKind::Generic`] this means its class has a `vadjustment`
    /// property.
    fn is_kind(&self, widget: WidgetHandle, kind: WidgetKind) -> bool;

    /// Fetches the vertical adjustment through the accessor for `kind`.
    fn vadjustment(&self, widget: WidgetHandle, kind: WidgetKind) -> Option<AdjustmentHandle>;

    /// Reads the adjustment's current fields.
    fn adjustment_state(&self, adjustment: AdjustmentHandle) -> AdjustmentState;

    /// Writes the adjustment's value WITHOUT emitting `value-changed`.
    ///
    /// This deliberately departs from the toolkit's setter contract: going
    /// through `gtk_adjustment_set_value` redraws mid-scroll and flickers. The
    /// widget picks the new value up on its own next update.
    fn set_value_silently(&self, adjustment: AdjustmentHandle, value: f64);
}

impl<L: WindowLocator + ?Sized> WindowLocator for Arc<L> {
    fn window_at(&self, x: i32, y: i32) -> Option<NativeWindow> {
        (**self).window_at(x, y)
    }
}

impl<T: WidgetToolkit + ?Sized> WidgetToolkit for Arc<T> {
    fn widget_for_window(&self, window: NativeWindow) -> Option<WidgetHandle> {
        (**self).widget_for_window(window)
    }

    fn is_kind(&self, widget: WidgetHandle, kind: WidgetKind) -> bool {
        (**self).is_kind(widget, kind)
    }

    fn vadjustment(&self, widget: WidgetHandle, kind: WidgetKind) -> Option<AdjustmentHandle> {
        (**self).vadjustment(widget, kind)
    }

    fn adjustment_state(&self, adjustment: AdjustmentHandle) -> AdjustmentState {
        (**self).adjustment_state(adjustment)
    }

    fn set_value_silently(&self, adjustment: AdjustmentHandle, value: f64) {
        (**self).set_value_silently(adjustment, value)
    }
}
