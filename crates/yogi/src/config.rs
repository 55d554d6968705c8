//! CLI configuration: `yogi_config` plus `GlobalOpts` overrides.

use std::sync::Arc;

use yogi_config::FileSessionStore;
use yogi_core::{AdminSession, ClientConfig};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use yogi_config::{Config, config_path, load_config, save_config};

/// Settings resolved from config file, env and flags (flags win).
#[derive(Debug, Clone)]
pub struct Resolved {
    pub client: ClientConfig,
    pub output: OutputFormat,
    pub color: ColorMode,
}

pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let mut cfg = load_config()?;

    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if global.timeout.is_some() {
        cfg.timeout = global.timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }

    let output = match global.output {
        Some(format) => format,
        None => parse_value::<OutputFormat>("output", &cfg.output)?,
    };
    let color = match global.color {
        Some(mode) => mode,
        None => parse_value::<ColorMode>("color", &cfg.color)?,
    };

    Ok(Resolved {
        client: cfg.to_client_config()?,
        output,
        color,
    })
}

/// Parse a config-file string into one of the CLI's value enums.
fn parse_value<T: clap::ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Restore the admin session from the platform data directory.
pub fn admin_session() -> AdminSession {
    AdminSession::restore(Arc::new(FileSessionStore::default_location()))
}
