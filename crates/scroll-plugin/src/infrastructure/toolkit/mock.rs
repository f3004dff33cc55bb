//! In-memory desktop for testing.
//!
//! Models stacked screen windows, the widgets behind them, and their
//! adjustments as plain data, implementing both [`WindowLocator`] and
//! [`WidgetToolkit`]. Windows added without a widget behave like windows
//! owned by another process.

use std::collections::HashMap;
use std::sync::Mutex;

use scroll_core::{AdjustmentState, WidgetKind};

use super::{AdjustmentHandle, NativeWindow, WidgetHandle, WidgetToolkit, WindowLocator};

/// A screen rectangle in virtual screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

struct MockWidget {
    handle: WidgetHandle,
    kinds: Vec<WidgetKind>,
    adjustment: Option<AdjustmentHandle>,
}

#[derive(Debug, Clone, Copy)]
struct MockAdjustment {
    state: AdjustmentState,
    silent_writes: u32,
}

#[derive(Default)]
struct Desktop {
    /// Bottom-most first.
    windows: Vec<(ScreenRect, NativeWindow)>,
    widgets: HashMap<NativeWindow, MockWidget>,
    adjustments: HashMap<AdjustmentHandle, MockAdjustment>,
    next_id: usize,
}

impl Desktop {
    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn widget(&self, handle: WidgetHandle) -> Option<&MockWidget> {
        self.widgets.values().find(|w| w.handle == handle)
    }
}

/// An in-memory implementation of the toolkit seams.
#[derive(Default)]
pub struct InMemoryDesktop {
    inner: Mutex<Desktop>,
}

impl InMemoryDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a window on top of all existing ones. Without
    /// [`attach_widget`](Self::attach_widget) it stands for a foreign window.
    pub fn add_window(&self, rect: ScreenRect) -> NativeWindow {
        let mut desktop = self.inner.lock().expect("lock poisoned");
        let window = NativeWindow(desktop.next_id() as isize);
        desktop.windows.push((rect, window));
        window
    }

    /// Creates an adjustment not yet attached to any widget.
    pub fn add_adjustment(&self, state: AdjustmentState) -> AdjustmentHandle {
        let mut desktop = self.inner.lock().expect("lock poisoned");
        let handle = AdjustmentHandle(desktop.next_id());
        desktop.adjustments.insert(
            handle,
            MockAdjustment {
                state,
                silent_writes: 0,
            },
        );
        handle
    }

    /// Backs `window` with a widget of the given kinds.
    pub fn attach_widget(
        &self,
        window: NativeWindow,
        kinds: &[WidgetKind],
        adjustment: Option<AdjustmentHandle>,
    ) -> WidgetHandle {
        let mut desktop = self.inner.lock().expect("lock poisoned");
        let handle = WidgetHandle(desktop.next_id());
        desktop.widgets.insert(
            window,
            MockWidget {
                handle,
                kinds: kinds.to_vec(),
                adjustment,
            },
        );
        handle
    }

    /// Returns the current state of an adjustment.
    pub fn adjustment(&self, handle: AdjustmentHandle) -> Option<AdjustmentState> {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop.adjustments.get(&handle).map(|a| a.state)
    }

    /// Number of silent value writes an adjustment has received.
    pub fn silent_writes(&self, handle: AdjustmentHandle) -> u32 {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop.adjustments.get(&handle).map_or(0, |a| a.silent_writes)
    }
}

impl WindowLocator for InMemoryDesktop {
    fn window_at(&self, x: i32, y: i32) -> Option<NativeWindow> {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop
            .windows
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, window)| *window)
    }
}

impl WidgetToolkit for InMemoryDesktop {
    fn widget_for_window(&self, window: NativeWindow) -> Option<WidgetHandle> {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop.widgets.get(&window).map(|w| w.handle)
    }

    fn is_kind(&self, widget: WidgetHandle, kind: WidgetKind) -> bool {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop
            .widget(widget)
            .is_some_and(|w| w.kinds.contains(&kind))
    }

    fn vadjustment(&self, widget: WidgetHandle, kind: WidgetKind) -> Option<AdjustmentHandle> {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop
            .widget(widget)
            .filter(|w| w.kinds.contains(&kind))
            .and_then(|w| w.adjustment)
    }

    fn adjustment_state(&self, adjustment: AdjustmentHandle) -> AdjustmentState {
        let desktop = self.inner.lock().expect("lock poisoned");
        desktop
            .adjustments
            .get(&adjustment)
            .map(|a| a.state)
            .unwrap_or_default()
    }

    fn set_value_silently(&self, adjustment: AdjustmentHandle, value: f64) {
        let mut desktop = self.inner.lock().expect("lock poisoned");
        if let Some(adj) = desktop.adjustments.get_mut(&adjustment) {
            adj.state.value = value;
            adj.silent_writes += 1;
        }
    }
}
