//! Snapshot of a GTK adjustment.
//!
//! GTK models the position of a scrollable range as an *adjustment*: a lower
//! and upper bound, the current value, the size of the visible page, and the
//! step sizes used for line and page scrolling. The plugin copies these
//! fields out of the live toolkit object into an [`AdjustmentState`] so the
//! scroll arithmetic can run without touching toolkit memory.

use crate::domain::delta::ScrollDelta;

/// The fields of an adjustment that the scroll arithmetic reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjustmentState {
    pub lower: f64,
    pub upper: f64,
    pub value: f64,
    pub step_increment: f64,
    pub page_increment: f64,
    pub page_size: f64,
}

impl AdjustmentState {
    /// The largest value GTK itself would ever settle on (`upper - page_size`),
    /// never below `lower`.
    pub fn max_value(&self) -> f64 {
        (self.upper - self.page_size).max(self.lower)
    }

    /// Computes the value after compensating for `delta`.
    ///
    /// With `clamp` set the result is kept within `[lower, upper - page_size]`;
    /// otherwise it is returned as-is and the toolkit settles the range on its
    /// next own update.
    pub fn scrolled(&self, delta: ScrollDelta, clamp: bool) -> f64 {
        let value = delta.apply(self.value, self.step_increment);
        if clamp {
            value.clamp(self.lower, self.max_value())
        } else {
            value
        }
    }
}
