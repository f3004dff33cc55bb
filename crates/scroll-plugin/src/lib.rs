//! scroll-plugin library entry point.
//!
//! Built as a `cdylib` for the host and as an `rlib` shared by the
//! `scroll-probe` binary and the integration tests in `tests/`.

pub mod application;
pub mod infrastructure;
pub mod plugin;
