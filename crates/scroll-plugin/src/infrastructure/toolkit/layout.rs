//! In-memory layout of the GTK 2 objects the plugin reads and writes directly.
//!
//! GTK 2 exposes `GtkAdjustment`'s fields publicly and Pidgin's bundled GTK
//! is ABI-stable, so the value can be written in place, skipping the
//! `value-changed` emission that `gtk_adjustment_set_value` performs.

use std::ffi::c_void;

use scroll_core::AdjustmentState;

/// `GTypeInstance`: every GObject starts with a pointer to its class.
#[repr(C)]
#[derive(Debug)]
pub struct GTypeInstance {
    pub g_class: *mut c_void,
}

/// `GObject`.
#[repr(C)]
#[derive(Debug)]
pub struct GObject {
    pub g_type_instance: GTypeInstance,
    pub ref_count: u32,
    pub qdata: *mut c_void,
}

/// `GtkObject` (GTK 2 only).
#[repr(C)]
#[derive(Debug)]
pub struct GtkObject {
    pub parent_instance: GObject,
    pub flags: u32,
}

/// `GtkAdjustment` (GTK 2).
#[repr(C)]
#[derive(Debug)]
pub struct GtkAdjustment {
    pub parent_instance: GtkObject,
    pub lower: f64,
    pub upper: f64,
    pub value: f64,
    pub step_increment: f64,
    pub page_increment: f64,
    pub page_size: f64,
}

/// Copies the scroll-relevant fields out of a live adjustment.
///
/// # Safety
///
/// `adjustment` must point to a live `GtkAdjustment`.
pub unsafe fn read_state(adjustment: *const GtkAdjustment) -> AdjustmentState {
    let adj = &*adjustment;
    AdjustmentState {
        lower: adj.lower,
        upper: adj.upper,
        value: adj.value,
        step_increment: adj.step_increment,
        page_increment: adj.page_increment,
        page_size: adj.page_size,
    }
}

/// Stores `value` into the adjustment without any signal emission.
///
/// # Safety
///
/// `adjustment` must point to a live `GtkAdjustment` and the caller must be on
/// the GUI thread.
pub unsafe fn write_value_silently(adjustment: *mut GtkAdjustment, value: f64) {
    (*adjustment).value = value;
}
