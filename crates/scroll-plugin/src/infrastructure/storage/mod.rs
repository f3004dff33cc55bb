//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the plugin's TOML settings from the
//! libpurple user directory and falls back to defaults when no file exists.

pub mod config;
