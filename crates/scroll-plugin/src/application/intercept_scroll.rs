//! ScrollInterceptor: turns wheel events into fractional adjustment moves.
//!
//! For every wheel event the interceptor finds the window under the pointer,
//! the in-process widget behind it, and that widget's vertical adjustment,
//! then corrects the adjustment's value so the total scroll distance matches
//! the size of the wheel delta instead of one full notch.
//!
//! # Architecture
//!
//! The use case depends only on the [`WindowLocator`] and [`WidgetToolkit`]
//! traits and on `scroll_core`. A miss at any resolution step is not an error:
//! the event is simply forwarded.

use scroll_core::{classify, ScrollDelta, WidgetKind};
use tracing::{debug, trace};

use crate::infrastructure::mouse_hook::{HookVerdict, MouseHookEvent, WheelHandler};
use crate::infrastructure::storage::config::ScrollConfig;
use crate::infrastructure::toolkit::{AdjustmentHandle, WidgetToolkit, WindowLocator};

/// Runtime switches for the interceptor.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptSettings {
    /// When `false` every event is forwarded untouched.
    pub enabled: bool,
    /// Widget kinds eligible for compensation.
    pub kinds: Vec<WidgetKind>,
    /// Keep written values within the adjustment's range.
    pub clamp_to_bounds: bool,
}

impl Default for InterceptSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            kinds: WidgetKind::PRIORITY.to_vec(),
            clamp_to_bounds: false,
        }
    }
}

impl From<&ScrollConfig> for InterceptSettings {
    fn from(config: &ScrollConfig) -> Self {
        Self {
            enabled: config.enabled,
            kinds: config.kinds.clone(),
            clamp_to_bounds: config.clamp_to_bounds,
        }
    }
}

/// The adjustment an event resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub kind: WidgetKind,
    pub adjustment: AdjustmentHandle,
}

/// The Scroll Interceptor use case.
pub struct ScrollInterceptor<L, T> {
    locator: L,
    toolkit: T,
    settings: InterceptSettings,
}

impl<L: WindowLocator, T: WidgetToolkit> ScrollInterceptor<L, T> {
    pub fn new(locator: L, toolkit: T, settings: InterceptSettings) -> Self {
        Self {
            locator,
            toolkit,
            settings,
        }
    }

    pub fn settings(&self) -> &InterceptSettings {
        &self.settings
    }

    /// Processes one hook event and decides whether it continues down the chain.
    pub fn intercept(&self, event: &MouseHookEvent) -> HookVerdict {
        if !self.settings.enabled {
            return HookVerdict::Forward;
        }
        let MouseHookEvent::Wheel { delta, x, y, .. } = *event else {
            return HookVerdict::Forward;
        };

        match self.resolve_target(x, y) {
            Some(target) => {
                self.compensate(target, delta);
                HookVerdict::Handled
            }
            None => HookVerdict::Forward,
        }
    }

    /// Walks pointer position → window → widget → kind → adjustment.
    pub fn resolve_target(&self, x: i32, y: i32) -> Option<ScrollTarget> {
        let Some(window) = self.locator.window_at(x, y) else {
            trace!(x, y, "no window under pointer");
            return None;
        };
        let Some(widget) = self.toolkit.widget_for_window(window) else {
            trace!(?window, "window has no in-process widget");
            return None;
        };
        let Some(kind) = classify(&self.settings.kinds, |k| self.toolkit.is_kind(widget, k))
        else {
            trace!(?widget, "widget is not scrollable");
            return None;
        };
        let Some(adjustment) = self.toolkit.vadjustment(widget, kind) else {
            trace!(?widget, ?kind, "widget has no vertical adjustment");
            return None;
        };
        Some(ScrollTarget { kind, adjustment })
    }

    fn compensate(&self, target: ScrollTarget, delta: ScrollDelta) {
        let state = self.toolkit.adjustment_state(target.adjustment);
        let value = state.scrolled(delta, self.settings.clamp_to_bounds);
        debug!(
            kind = ?target.kind,
            delta = delta.raw(),
            from = state.value,
            to = value,
            "compensating wheel scroll"
        );
        self.toolkit.set_value_silently(target.adjustment, value);
    }
}

impl<L: WindowLocator, T: WidgetToolkit> WheelHandler for ScrollInterceptor<L, T> {
    fn handle(&self, event: &MouseHookEvent) -> HookVerdict {
        self.intercept(event)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use scroll_core::AdjustmentState;

    use super::*;
    use crate::infrastructure::toolkit::{
        MockWidgetToolkit, MockWindowLocator, NativeWindow, WidgetHandle,
    };

    const WINDOW: NativeWindow = NativeWindow(0x1001);
    const WIDGET: WidgetHandle = WidgetHandle(0x2002);
    const ADJ: AdjustmentHandle = AdjustmentHandle(0x3003);
    const STEP: f64 = 12.0;

    fn wheel(raw: i16) -> MouseHookEvent {
        MouseHookEvent::Wheel {
            delta: ScrollDelta::new(raw),
            x: 300,
            y: 200,
            time_ms: 0,
        }
    }

    fn locator_with_window() -> MockWindowLocator {
        let mut locator = MockWindowLocator::new();
        locator
            .expect_window_at()
            .with(eq(300), eq(200))
            .return_const(Some(WINDOW));
        locator
    }

    /// A toolkit whose widget is of `kind` and whose adjustment sits at 100.
    fn toolkit_for(kind: WidgetKind) -> MockWidgetToolkit {
        let mut toolkit = MockWidgetToolkit::new();
        toolkit
            .expect_widget_for_window()
            .with(eq(WINDOW))
            .return_const(Some(WIDGET));
        toolkit
            .expect_is_kind()
            .returning(move |_, k| k == kind);
        toolkit
            .expect_vadjustment()
            .with(eq(WIDGET), eq(kind))
            .return_const(Some(ADJ));
        toolkit.expect_adjustment_state().return_const(AdjustmentState {
            lower: 0.0,
            upper: 1000.0,
            value: 100.0,
            step_increment: STEP,
            page_increment: 200.0,
            page_size: 250.0,
        });
        toolkit
    }

    fn interceptor(
        locator: MockWindowLocator,
        toolkit: MockWidgetToolkit,
    ) -> ScrollInterceptor<MockWindowLocator, MockWidgetToolkit> {
        ScrollInterceptor::new(locator, toolkit, InterceptSettings::default())
    }

    #[test]
    fn test_one_notch_leaves_value_unchanged_but_is_handled() {
        // Arrange
        let mut toolkit = toolkit_for(WidgetKind::ScrolledWindow);
        toolkit
            .expect_set_value_silently()
            .with(eq(ADJ), eq(100.0))
            .times(1)
            .return_const(());
        let sut = interceptor(locator_with_window(), toolkit);

        // Act
        let verdict = sut.intercept(&wheel(120));

        // Assert
        assert_eq!(verdict, HookVerdict::Handled);
    }

    #[test]
    fn test_two_notches_up_move_one_step_further() {
        let mut toolkit = toolkit_for(WidgetKind::TextView);
        toolkit
            .expect_set_value_silently()
            .with(eq(ADJ), eq(100.0 - STEP))
            .times(1)
            .return_const(());
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Handled);
    }

    #[test]
    fn test_half_notch_gives_back_half_a_step() {
        let mut toolkit = toolkit_for(WidgetKind::TreeView);
        toolkit
            .expect_set_value_silently()
            .with(eq(ADJ), eq(100.0 + STEP / 2.0))
            .times(1)
            .return_const(());
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(60)), HookVerdict::Handled);
    }

    #[test]
    fn test_generic_fallback_applies_the_same_mutation() {
        let mut toolkit = toolkit_for(WidgetKind::Generic);
        toolkit
            .expect_set_value_silently()
            .with(eq(ADJ), eq(100.0 - STEP))
            .times(1)
            .return_const(());
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Handled);
    }

    #[test]
    fn test_no_window_under_pointer_forwards() {
        // Arrange
        let mut locator = MockWindowLocator::new();
        locator.expect_window_at().return_const(None);
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().never();
        toolkit.expect_set_value_silently().never();
        let sut = interceptor(locator, toolkit);

        // Act / Assert
        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Forward);
    }

    #[test]
    fn test_foreign_window_forwards() {
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().return_const(None);
        toolkit.expect_is_kind().never();
        toolkit.expect_set_value_silently().never();
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Forward);
    }

    #[test]
    fn test_unscrollable_widget_forwards() {
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().return_const(Some(WIDGET));
        toolkit.expect_is_kind().times(4).return_const(false);
        toolkit.expect_vadjustment().never();
        toolkit.expect_set_value_silently().never();
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(60)), HookVerdict::Forward);
    }

    #[test]
    fn test_missing_adjustment_forwards() {
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().return_const(Some(WIDGET));
        toolkit.expect_is_kind().return_const(true);
        toolkit.expect_vadjustment().return_const(None);
        toolkit.expect_set_value_silently().never();
        let sut = interceptor(locator_with_window(), toolkit);

        assert_eq!(sut.intercept(&wheel(60)), HookVerdict::Forward);
    }

    #[test]
    fn test_non_wheel_event_forwards_without_lookups() {
        let mut locator = MockWindowLocator::new();
        locator.expect_window_at().never();
        let sut = interceptor(locator, MockWidgetToolkit::new());

        let verdict = sut.intercept(&MouseHookEvent::Other { message: 0x0200 });

        assert_eq!(verdict, HookVerdict::Forward);
    }

    #[test]
    fn test_disabled_interceptor_forwards_without_lookups() {
        let mut locator = MockWindowLocator::new();
        locator.expect_window_at().never();
        let settings = InterceptSettings {
            enabled: false,
            ..InterceptSettings::default()
        };
        let sut = ScrollInterceptor::new(locator, MockWidgetToolkit::new(), settings);

        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Forward);
    }

    #[test]
    fn test_disabled_kind_is_not_compensated() {
        // Arrange: the widget is only a tree view, and tree views are switched off
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().return_const(Some(WIDGET));
        toolkit
            .expect_is_kind()
            .returning(|_, k| k == WidgetKind::TreeView);
        toolkit.expect_set_value_silently().never();
        let settings = InterceptSettings {
            kinds: vec![WidgetKind::TextView, WidgetKind::ScrolledWindow],
            ..InterceptSettings::default()
        };
        let sut = ScrollInterceptor::new(locator_with_window(), toolkit, settings);

        // Act / Assert
        assert_eq!(sut.intercept(&wheel(240)), HookVerdict::Forward);
    }

    #[test]
    fn test_clamping_keeps_value_in_range() {
        let mut toolkit = MockWidgetToolkit::new();
        toolkit.expect_widget_for_window().return_const(Some(WIDGET));
        toolkit.expect_is_kind().return_const(true);
        toolkit.expect_vadjustment().return_const(Some(ADJ));
        toolkit.expect_adjustment_state().return_const(AdjustmentState {
            lower: 0.0,
            upper: 1000.0,
            value: 5.0,
            step_increment: STEP,
            page_increment: 200.0,
            page_size: 250.0,
        });
        toolkit
            .expect_set_value_silently()
            .with(eq(ADJ), eq(0.0))
            .times(1)
            .return_const(());
        let settings = InterceptSettings {
            clamp_to_bounds: true,
            ..InterceptSettings::default()
        };
        let sut = ScrollInterceptor::new(locator_with_window(), toolkit, settings);

        assert_eq!(sut.intercept(&wheel(360)), HookVerdict::Handled);
    }

    #[test]
    fn test_settings_from_scroll_config() {
        let config = ScrollConfig {
            enabled: false,
            kinds: vec![WidgetKind::TreeView],
            clamp_to_bounds: true,
        };
        let settings = InterceptSettings::from(&config);
        assert!(!settings.enabled);
        assert_eq!(settings.kinds, vec![WidgetKind::TreeView]);
        assert!(settings.clamp_to_bounds);
    }
}
