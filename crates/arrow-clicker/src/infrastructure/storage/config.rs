//! TOML-based configuration persistence.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\ArrowClicker\config.toml`
//! - Linux:    `~/.config/arrow-clicker/config.toml`
//! - macOS:    `~/Library/Application Support/ArrowClicker/config.toml`
//!
//! Example:
//!
//! ```toml
//! [motion]
//! max_speed = 30
//! rounding = "round"
//!
//! [app]
//! log_level = "info"
//! ```
//!
//! # Legacy format
//!
//! Earlier releases stored nothing but the speed ceiling: the whole file was
//! a single integer such as `30`.  [`parse_config`] still accepts that and
//! maps it to `motion.max_speed`.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent, so a partial file (or an empty
//! one) is valid.

use std::path::{Path, PathBuf};

use arrow_clicker_core::domain::motion::{MotionError, DEFAULT_MAX_SPEED};
use arrow_clicker_core::{MotionParams, RoundingPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
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

    /// The config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(#[from] MotionError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub app: GeneralConfig,
}

/// Pointer motion settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotionConfig {
    /// Speed ceiling in pixels per tick.  Must be positive.
    #[serde(default = "default_max_speed")]
    pub max_speed: u32,
    /// How fractional per-tick deltas become whole pixels.
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_max_speed() -> u32 {
    DEFAULT_MAX_SPEED
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            rounding: RoundingPolicy::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Builds the motion curve described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `max_speed` is zero.
    pub fn motion_params(&self) -> Result<MotionParams, ConfigError> {
        Ok(MotionParams::with_max_speed(self.motion.max_speed)?)
    }
}

/// Where a loaded config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from a TOML file.
    Loaded,
    /// Parsed from a legacy single-integer file.
    Legacy,
    /// The file did not exist and was created with defaults.
    Created,
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Parses config file content, accepting both TOML and the legacy integer form.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML and
/// [`ConfigError::Invalid`] for a zero speed ceiling.
pub fn parse_config(content: &str) -> Result<(AppConfig, ConfigSource), ConfigError> {
    let (config, source) = match content.trim().parse::<u32>() {
        Ok(max_speed) => {
            let mut config = AppConfig::default();
            config.motion.max_speed = max_speed;
            (config, ConfigSource::Legacy)
        }
        Err(_) => (toml::from_str::<AppConfig>(content)?, ConfigSource::Loaded),
    };
    config.motion_params()?;
    Ok((config, source))
}

/// Loads the config at `path`, creating it with defaults if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and parse or validation errors from [`parse_config`].
pub fn load_or_create(path: &Path) -> Result<(AppConfig, ConfigSource), ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            save_config_to(path, &config)?;
            Ok((config, ConfigSource::Created))
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
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
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ArrowClicker"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("arrow-clicker"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ArrowClicker")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
