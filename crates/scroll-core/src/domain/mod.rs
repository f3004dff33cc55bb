//! Domain types for smooth scrolling.
//!
//! Everything here is pure: no OS calls, no toolkit pointers, no I/O.

pub mod adjustment;
pub mod delta;
pub mod widget;
