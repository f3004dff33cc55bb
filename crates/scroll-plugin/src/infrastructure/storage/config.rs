//! TOML-based configuration for the plugin.
//!
//! The file lives next to Pidgin's own settings in the libpurple user
//! directory:
//! - Windows:  `%APPDATA%\.purple\smooth-scroll.toml`
//! - elsewhere: `~/.purple/smooth-scroll.toml`
//!
//! `PURPLEHOME` replaces the base directory, as it does for libpurple.
//!
//! ```toml
//! [scroll]
//! enabled = true
//! kinds = ["text_view", "scrolled_window", "tree_view", "generic"]
//! clamp_to_bounds = false
//!
//! [logging]
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section and
//! a missing key all fall back to the values above.

use std::path::{Path, PathBuf};

use scroll_core::WidgetKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the plugin configuration inside the libpurple user directory.
pub const CONFIG_FILE_NAME: &str = "smooth-scroll.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user directory could not be determined.
    #[error("could not determine the libpurple user directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level plugin configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PluginConfig {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scroll compensation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrollConfig {
    /// Master switch; when `false` the hook forwards every event.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Widget kinds that receive compensation. Classification order is fixed
    /// regardless of the order listed here.
    #[serde(default = "default_kinds")]
    pub kinds: Vec<WidgetKind>,
    /// Clamp written values to `[lower, upper - page_size]`.
    #[serde(default)]
    pub clamp_to_bounds: bool,
}

/// Diagnostic output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_kinds() -> Vec<WidgetKind> {
    WidgetKind::PRIORITY.to_vec()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            kinds: default_kinds(),
            clamp_to_bounds: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// The libpurple user directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither `PURPLEHOME` nor
/// the platform home variable is set.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    purple_home_dir()
        .map(|home| home.join(".purple"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the config from its default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<PluginConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `PluginConfig` from `path`, returning `PluginConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<PluginConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PluginConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to its default location.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &PluginConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &PluginConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Base directory under which libpurple keeps `.purple`.
fn purple_home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("PURPLEHOME") {
        return Some(PathBuf::from(home));
    }

    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("smooth_scroll_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_default_config_enables_every_kind() {
        let cfg = PluginConfig::default();
        assert!(cfg.scroll.enabled);
        assert_eq!(cfg.scroll.kinds, WidgetKind::PRIORITY.to_vec());
        assert!(!cfg.scroll.clamp_to_bounds);
        assert_eq!(cfg.logging.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: PluginConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, PluginConfig::default());
    }

    #[test]
    fn test_partial_scroll_section_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[scroll]
kinds = ["text_view", "tree_view"]
"#;

        // Act
        let cfg: PluginConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.scroll.kinds, vec![WidgetKind::TextView, WidgetKind::TreeView]);
        // Unspecified fields keep their defaults
        assert!(cfg.scroll.enabled);
        assert_eq!(cfg.logging.log_level, "info");
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let result: Result<PluginConfig, _> = toml::from_str("[scroll]\nkinds = [\"icon_view\"]");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = temp_dir().join(CONFIG_FILE_NAME);
        let cfg = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, PluginConfig::default());
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        // Arrange
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_config_from(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        let mut cfg = PluginConfig::default();
        cfg.scroll.clamp_to_bounds = true;
        cfg.scroll.kinds = vec![WidgetKind::ScrolledWindow];
        cfg.logging.log_level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save creates missing directories");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_file_name() {
        // NoPlatformConfigDir in a stripped environment is also acceptable.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with(Path::new(".purple").join(CONFIG_FILE_NAME)));
        }
    }
}
