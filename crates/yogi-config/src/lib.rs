//! Shared configuration for the `yogi` client.
//!
//! TOML file + `YOGI_*` environment layering, translation to
//! `yogi_core::ClientConfig`, and the file-backed admin flag store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use yogi_core::{ClientConfig, CoreError, DEFAULT_API_URL, SessionStore, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Backend origin.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds. Unset means no client-side limit.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates (local development backends).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Quiet period before search input is sent.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: None,
            insecure: false,
            ca_cert: None,
            output: default_output(),
            color: default_color(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_search_debounce_ms() -> u64 {
    500
}

impl Config {
    /// Translate into the runtime config the controllers take.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_url = url::Url::parse(self.api_url.trim()).map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("'{}' is not a valid URL: {e}", self.api_url),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.api_url),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca) = self.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ClientConfig {
            api_url,
            tls,
            timeout: self.timeout.map(Duration::from_secs),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "yogineers", "yogi")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "yogi", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the admin flag is persisted.
pub fn session_state_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "yogi", "session.json"]),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load defaults, then the canonical config file, then `YOGI_*` env vars.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Same layering with an explicit file path. A missing file is fine.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("YOGI_"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), api_url = %config.api_url, "config loaded");
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML at the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Admin flag store ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
struct SessionFile {
    #[serde(rename = "adminAuthenticated", default)]
    admin_authenticated: bool,
}

/// Admin flag persisted as `{"adminAuthenticated": bool}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory.
    pub fn default_location() -> Self {
        Self::new(session_state_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> bool {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no admin state, treating as logged out");
                return false;
            }
        };
        match serde_json::from_str::<SessionFile>(&raw) {
            Ok(file) => file.admin_authenticated,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "admin state unreadable, treating as logged out");
                false
            }
        }
    }

    fn save(&self, authenticated: bool) -> Result<(), CoreError> {
        let storage = |e: &dyn std::fmt::Display| CoreError::Storage {
            message: format!("{}: {e}", self.path.display()),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage(&e))?;
        }
        let body = serde_json::to_string(&SessionFile {
            admin_authenticated: authenticated,
        })
        .map_err(|e| storage(&e))?;
        std::fs::write(&self.path, body).map_err(|e| storage(&e))
    }
}
