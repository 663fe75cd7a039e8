//! Shared configuration for pylights tools.
//!
//! TOML profiles naming the devices you talk to, layered with
//! `PYLIGHTS_` environment overrides, and translation to
//! `pylights_core::ControllerConfig`. The CLI adds flag-aware wrappers
//! on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pylights_core::ControllerConfig;

/// Host tried when no profile names one (the device's mDNS name).
pub const DEFAULT_HOST: &str = "pylights.local";
/// Port the device's HTTP API listens on out of the box.
pub const DEFAULT_PORT: u16 = 5001;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_timeout() -> u64 {
    10
}

/// A named device profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP address of the device.
    pub host: String,

    /// Override the default port.
    pub port: Option<u16>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Periodic full refresh for long-running views (seconds, 0 = never).
    pub refresh_interval: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: None,
            timeout: None,
            refresh_interval: None,
        }
    }
}

impl Config {
    /// Pick a profile: `name` if given, else `default_profile`.
    ///
    /// With no profiles configured at all the built-in profile (pointing
    /// at `pylights.local`) is used, so a fresh install works on a home
    /// network without any setup.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let wanted = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");

        if let Some(profile) = self.profiles.get(wanted) {
            return Ok((wanted.to_owned(), profile.clone()));
        }
        if name.is_none() && self.profiles.is_empty() {
            return Ok((wanted.to_owned(), Profile::default()));
        }
        Err(ConfigError::UnknownProfile {
            profile: wanted.to_owned(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
///
/// `PYLIGHTS_CONFIG` overrides the location outright.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("PYLIGHTS_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "pylights", "pylights").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pylights");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered over defaults and under the
/// environment. A missing file is not an error.
///
/// Nested keys use a double underscore: `PYLIGHTS_DEFAULTS__PORT=8080`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PYLIGHTS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ControllerConfig` from a profile, falling back to `defaults`.
pub fn profile_to_controller_config(profile: &Profile, defaults: &Defaults) -> ControllerConfig {
    ControllerConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        refresh_interval_secs: profile.refresh_interval.unwrap_or(0),
        ..ControllerConfig::default()
    }
}

/// The port to use for `profile`.
pub fn profile_port(profile: &Profile, defaults: &Defaults) -> u16 {
    profile.port.unwrap_or(defaults.port)
}
