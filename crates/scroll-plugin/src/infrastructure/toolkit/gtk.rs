//! GTK 2 bridge for the Windows build.
//!
//! The plugin does not link against GTK. Pidgin has already loaded the GTK 2
//! runtime DLLs by the time plugins load, so the handful of entry points the
//! interceptor needs are looked up in those modules with `GetModuleHandleW` /
//! `GetProcAddress` when the plugin loads. A missing module or symbol is a
//! [`ToolkitError`] and leaves the plugin inert.
//!
//! # Safety
//!
//! Every call through [`GtkApi`] is an FFI call into GTK and must happen on the
//! GUI thread. The low-level hook callback runs on the thread that installed
//! the hook, which inside Pidgin is the GTK main thread.

#![cfg(target_os = "windows")]

use std::ffi::{c_char, c_void};
use std::iter::once;
use std::ptr;

use scroll_core::{AdjustmentState, WidgetKind};
use tracing::debug;
use windows::core::{PCSTR, PCWSTR};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};

use super::layout::{self, GTypeInstance, GtkAdjustment};
use super::{AdjustmentHandle, NativeWindow, ToolkitError, WidgetHandle, WidgetToolkit};

const GDK_DLL: &str = "libgdk-win32-2.0-0.dll";
const GTK_DLL: &str = "libgtk-win32-2.0-0.dll";
const GOBJECT_DLL: &str = "libgobject-2.0-0.dll";

/// Name of the property probed for [`WidgetKind::Generic`].
const VADJUSTMENT_PROPERTY: &[u8] = b"vadjustment\0";

type GType = usize;
type GBoolean = i32;
type Pointer = *mut c_void;

/// Resolves `$name` in `$module` and reinterprets it as the function pointer
/// type expected at the use site.
macro_rules! resolve {
    ($module:expr, $dll:expr, $name:literal) => {{
        // SAFETY: the symbol name is NUL-terminated; the target type is the
        // documented C signature of the GTK function.
        let proc = unsafe { GetProcAddress($module, PCSTR(concat!($name, "\0").as_ptr())) }
            .ok_or(ToolkitError::SymbolMissing {
                module: $dll,
                symbol: $name,
            })?;
        unsafe { std::mem::transmute(proc) }
    }};
}

/// Like [`resolve!`] but yields `None` for symbols absent from older GTK 2 builds.
macro_rules! resolve_optional {
    ($module:expr, $name:literal) => {{
        // SAFETY: see `resolve!`.
        unsafe { GetProcAddress($module, PCSTR(concat!($name, "\0").as_ptr())) }
            .map(|proc| unsafe { std::mem::transmute(proc) })
    }};
}

/// Entry points resolved from the loaded GTK 2 runtime.
pub struct GtkApi {
    handle_table_lookup: unsafe extern "C" fn(Pointer) -> Pointer,
    window_get_user_data: unsafe extern "C" fn(Pointer, *mut Pointer),
    type_check_instance_is_a: unsafe extern "C" fn(Pointer, GType) -> GBoolean,
    object_class_find_property: unsafe extern "C" fn(Pointer, *const c_char) -> Pointer,
    object_get: unsafe extern "C" fn(Pointer, *const c_char, ...),
    object_unref: unsafe extern "C" fn(Pointer),
    widget_get_parent: unsafe extern "C" fn(Pointer) -> Pointer,
    /// Only present from GTK 2.22.
    text_view_get_vadjustment: Option<unsafe extern "C" fn(Pointer) -> Pointer>,
    scrolled_window_get_vadjustment: unsafe extern "C" fn(Pointer) -> Pointer,
    tree_view_get_vadjustment: unsafe extern "C" fn(Pointer) -> Pointer,
    text_view_type: GType,
    scrolled_window_type: GType,
    tree_view_type: GType,
    adjustment_type: GType,
}

impl GtkApi {
    /// Resolves every entry point from the GTK 2 DLLs loaded in this process.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::ModuleNotLoaded`] if a runtime DLL is absent,
    /// [`ToolkitError::SymbolMissing`] if a required symbol is absent.
    pub fn load() -> Result<Self, ToolkitError> {
        let gdk = loaded_module(GDK_DLL)?;
        let gtk = loaded_module(GTK_DLL)?;
        let gobject = loaded_module(GOBJECT_DLL)?;

        let text_view_get_type: unsafe extern "C" fn() -> GType =
            resolve!(gtk, GTK_DLL, "gtk_text_view_get_type");
        let scrolled_window_get_type: unsafe extern "C" fn() -> GType =
            resolve!(gtk, GTK_DLL, "gtk_scrolled_window_get_type");
        let tree_view_get_type: unsafe extern "C" fn() -> GType =
            resolve!(gtk, GTK_DLL, "gtk_tree_view_get_type");
        let adjustment_get_type: unsafe extern "C" fn() -> GType =
            resolve!(gtk, GTK_DLL, "gtk_adjustment_get_type");

        let api = Self {
            handle_table_lookup: resolve!(gdk, GDK_DLL, "gdk_win32_handle_table_lookup"),
            window_get_user_data: resolve!(gdk, GDK_DLL, "gdk_window_get_user_data"),
            type_check_instance_is_a: resolve!(gobject, GOBJECT_DLL, "g_type_check_instance_is_a"),
            object_class_find_property: resolve!(
                gobject,
                GOBJECT_DLL,
                "g_object_class_find_property"
            ),
            object_get: resolve!(gobject, GOBJECT_DLL, "g_object_get"),
            object_unref: resolve!(gobject, GOBJECT_DLL, "g_object_unref"),
            widget_get_parent: resolve!(gtk, GTK_DLL, "gtk_widget_get_parent"),
            text_view_get_vadjustment: resolve_optional!(gtk, "gtk_text_view_get_vadjustment"),
            scrolled_window_get_vadjustment: resolve!(
                gtk,
                GTK_DLL,
                "gtk_scrolled_window_get_vadjustment"
            ),
            tree_view_get_vadjustment: resolve!(gtk, GTK_DLL, "gtk_tree_view_get_vadjustment"),
            // SAFETY: the *_get_type functions register the type on first call
            // and have no other preconditions.
            text_view_type: unsafe { text_view_get_type() },
            scrolled_window_type: unsafe { scrolled_window_get_type() },
            tree_view_type: unsafe { tree_view_get_type() },
            adjustment_type: unsafe { adjustment_get_type() },
        };

        debug!(
            text_view_accessor = api.text_view_get_vadjustment.is_some(),
            "GTK 2 entry points resolved"
        );
        Ok(api)
    }
}

fn loaded_module(name: &str) -> Result<HMODULE, ToolkitError> {
    let wide: Vec<u16> = name.encode_utf16().chain(once(0)).collect();
    // SAFETY: `wide` is NUL-terminated and outlives the call. GetModuleHandleW
    // does not load anything or take a reference.
    unsafe { GetModuleHandleW(PCWSTR(wide.as_ptr())) }
        .map_err(|_| ToolkitError::ModuleNotLoaded(name.to_string()))
}

/// [`WidgetToolkit`] over the live GTK 2 object model.
pub struct GtkToolkit {
    api: GtkApi,
}

impl GtkToolkit {
    pub fn new(api: GtkApi) -> Self {
        Self { api }
    }

    /// Resolves the GTK entry points and wraps them.
    pub fn bind() -> Result<Self, ToolkitError> {
        GtkApi::load().map(Self::new)
    }

    fn is_a(&self, object: Pointer, gtype: GType) -> bool {
        // SAFETY: `object` is a live GTypeInstance (a widget or adjustment).
        !object.is_null() && unsafe { (self.api.type_check_instance_is_a)(object, gtype) } != 0
    }

    fn has_vadjustment_property(&self, widget: Pointer) -> bool {
        // SAFETY: every GObject begins with its GTypeInstance, whose first
        // field is the class pointer that g_object_class_find_property expects.
        unsafe {
            let class = (*(widget as *const GTypeInstance)).g_class;
            !class.is_null()
                && !(self.api.object_class_find_property)(
                    class,
                    VADJUSTMENT_PROPERTY.as_ptr().cast(),
                )
                .is_null()
        }
    }

    /// Text views before GTK 2.22 have no accessor; in Pidgin they always sit
    /// inside a scrolled window that shares their adjustment.
    fn text_view_vadjustment(&self, widget: Pointer) -> Pointer {
        // SAFETY: `widget` is a GtkTextView (checked by the caller).
        unsafe {
            if let Some(get) = self.api.text_view_get_vadjustment {
                return get(widget);
            }
            let parent = (self.api.widget_get_parent)(widget);
            if self.is_a(parent, self.api.scrolled_window_type) {
                (self.api.scrolled_window_get_vadjustment)(parent)
            } else {
                ptr::null_mut()
            }
        }
    }

    fn property_vadjustment(&self, widget: Pointer) -> Pointer {
        let mut adjustment: Pointer = ptr::null_mut();
        // SAFETY: the class has a `vadjustment` property (checked by
        // `is_kind`); g_object_get stores a new reference into `adjustment`.
        unsafe {
            (self.api.object_get)(
                widget,
                VADJUSTMENT_PROPERTY.as_ptr().cast(),
                &mut adjustment as *mut Pointer,
                ptr::null::<c_char>(),
            );
            if !adjustment.is_null() {
                // The widget keeps its own reference, so the pointer stays
                // valid for the rest of this callback.
                (self.api.object_unref)(adjustment);
            }
        }
        adjustment
    }
}

impl WidgetToolkit for GtkToolkit {
    fn widget_for_window(&self, window: NativeWindow) -> Option<WidgetHandle> {
        // SAFETY: the handle table lookup accepts any HWND and returns NULL
        // for windows GDK does not know, including foreign ones.
        unsafe {
            let gdk_window = (self.api.handle_table_lookup)(window.0 as Pointer);
            if gdk_window.is_null() {
                return None;
            }
            let mut user_data: Pointer = ptr::null_mut();
            (self.api.window_get_user_data)(gdk_window, &mut user_data);
            (!user_data.is_null()).then(|| WidgetHandle(user_data as usize))
        }
    }

    fn is_kind(&self, widget: WidgetHandle, kind: WidgetKind) -> bool {
        let widget = widget.0 as Pointer;
        match kind {
            WidgetKind::TextView => self.is_a(widget, self.api.text_view_type),
            WidgetKind::ScrolledWindow => self.is_a(widget, self.api.scrolled_window_type),
            WidgetKind::TreeView => self.is_a(widget, self.api.tree_view_type),
            WidgetKind::Generic => self.has_vadjustment_property(widget),
        }
    }

    fn vadjustment(&self, widget: WidgetHandle, kind: WidgetKind) -> Option<AdjustmentHandle> {
        let widget = widget.0 as Pointer;
        // SAFETY: `kind` was established by `is_kind` for this widget.
        let adjustment = match kind {
            WidgetKind::TextView => self.text_view_vadjustment(widget),
            WidgetKind::ScrolledWindow => unsafe {
                (self.api.scrolled_window_get_vadjustment)(widget)
            },
            WidgetKind::TreeView => unsafe { (self.api.tree_view_get_vadjustment)(widget) },
            WidgetKind::Generic => self.property_vadjustment(widget),
        };
        self.is_a(adjustment, self.api.adjustment_type)
            .then(|| AdjustmentHandle(adjustment as usize))
    }

    fn adjustment_state(&self, adjustment: AdjustmentHandle) -> AdjustmentState {
        // SAFETY: handles come from `vadjustment`, which checked the type.
        unsafe { layout::read_state(adjustment.0 as *const GtkAdjustment) }
    }

    fn set_value_silently(&self, adjustment: AdjustmentHandle, value: f64) {
        // SAFETY: as above; the hook runs on the GUI thread.
        unsafe { layout::write_value_silently(adjustment.0 as *mut GtkAdjustment, value) }
    }
}
