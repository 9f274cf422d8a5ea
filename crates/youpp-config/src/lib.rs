//! Shared configuration for youpp tools.
//!
//! TOML profiles layered with `YOUPP_` environment variables, base-URL
//! validation, and a keyring-backed [`TokenStore`](youpp_api::TokenStore).
//! The CLI adds flag-aware overrides on top.

mod tokens;

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

pub use tokens::{KEYRING_SERVICE, KeyringTokenStore};

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "YOUPP_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{field} is not configured for profile '{profile}'")]
    MissingBaseUrl { profile: String, field: &'static str },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

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

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

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

impl Config {
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
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
fn default_timeout() -> u64 {
    30
}

/// A named backend deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Admin API base URL (e.g., "https://api.youpp.example").
    pub api_base_url: Option<String>,

    /// Backend base URL for public page fetches.
    pub backend_base_url: Option<String>,

    /// Email used by `youpp login` when none is given.
    pub email: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

/// Check that `raw` is an absolute http(s) URL and strip trailing slashes.
pub fn validate_base_url(field: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = url::Url::parse(trimmed).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a URL ({e})"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http or https URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_owned())
}

// ── Resolved settings ───────────────────────────────────────────────

/// Profile values merged with defaults, ready for client construction.
///
/// Base URLs stay optional here: the clients report a missing one the
/// moment they are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: String,
    pub api_base_url: Option<String>,
    pub backend_base_url: Option<String>,
    pub email: Option<String>,
    pub timeout: Duration,
}

impl Settings {
    /// Resolve `profile_name` against `config`. A missing profile yields
    /// empty settings so env vars and flags alone can drive the CLI.
    pub fn from_config(config: &Config, profile_name: &str) -> Self {
        let profile = config.profiles.get(profile_name).cloned().unwrap_or_default();
        Self {
            profile: profile_name.to_owned(),
            api_base_url: profile.api_base_url,
            backend_base_url: profile.backend_base_url,
            email: profile.email,
            timeout: Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout)),
        }
    }

    /// The admin API base URL, or an error naming the profile.
    pub fn require_api_base_url(&self) -> Result<&str, ConfigError> {
        self.api_base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                profile: self.profile.clone(),
                field: "api_base_url",
            })
    }

    pub fn require_backend_base_url(&self) -> Result<&str, ConfigError> {
        self.backend_base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                profile: self.profile.clone(),
                field: "backend_base_url",
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `YOUPP_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "youpp", "youpp").map_or_else(
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
    p.push("youpp");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file at `path` (if any), then `YOUPP_*` env
/// vars with `__` separating nested keys (`YOUPP_DEFAULTS__TIMEOUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("YOUPP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or unreadable.
///
/// Read-only callers only: anything that saves must use [`load_config`]
/// so a broken file is reported instead of replaced.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using default config");
        Config::default()
    })
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
