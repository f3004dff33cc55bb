//! # scroll-core
//!
//! Shared domain logic for Windows Smooth Scrolling: the arithmetic that turns
//! a raw wheel delta into a fractional scroll step, a snapshot of a GTK
//! adjustment, and the priority-ordered classification of scrollable widgets.
//!
//! This crate has zero dependencies on OS APIs or the GUI toolkit. The plugin
//! crate binds these types to the Win32 hook and to GTK.
//!
//! # Why "smooth" scrolling? (for beginners)
//!
//! Windows reports wheel movement in units where `120` is one notch of a
//! classic mouse wheel. High-resolution trackpads send many smaller deltas
//! (for example `30` or `60`), but GTK 2 on Windows treats every wheel message
//! as one full notch. The result is that a gentle two-finger swipe scrolls far
//! too quickly.
//!
//! The fix is to let GTK apply its usual one-line step, then nudge the
//! adjustment by the difference between what the hardware asked for and what
//! GTK did:
//!
//! ```text
//! diff      = step_increment * ((|delta| - 120) / 120)
//! new value = value - diff * sign(delta)
//! ```
//!
//! - **`domain::delta`** – [`ScrollDelta`] and the compensation formula.
//! - **`domain::adjustment`** – [`AdjustmentState`], a copy of the fields of a
//!   GTK adjustment that the formula reads.
//! - **`domain::widget`** – [`WidgetKind`] and [`classify`].

pub mod domain;

pub use domain::adjustment::AdjustmentState;
pub use domain::delta::{ScrollDelta, WHEEL_DELTA};
pub use domain::widget::{classify, WidgetKind};
