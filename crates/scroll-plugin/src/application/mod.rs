//! Application layer use cases for the plugin.
//!
//! Use cases in this layer orchestrate `scroll_core` domain logic through
//! traits defined by the infrastructure layer, so every decision can be
//! tested without Windows or GTK.
//!
//! # Sub-modules
//!
//! - **`intercept_scroll`** – Resolves the widget under the pointer for each
//!   wheel event and corrects its vertical adjustment. Runs on every wheel
//!   message in the session.
//!
//! - **`hook_lifecycle`** – Owns the OS hook handle between plugin load and
//!   unload.

pub mod hook_lifecycle;
pub mod intercept_scroll;
