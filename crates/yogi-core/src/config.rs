// ── Runtime client configuration ──
//
// Describes *how* to reach the backend. Built by the CLI (or any other
// front end) and handed in; core never reads config files.

use std::time::Duration;

use url::Url;
use yogi_api::{ApiClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Quiet period before a search input is sent.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to the site backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin (e.g. `https://api.yogineers.com`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout. `None` leaves it to the platform.
    pub timeout: Option<Duration>,
    /// Debounce applied to search input.
    pub search_debounce: Duration,
}

impl ClientConfig {
    /// Strict TLS, no timeout, default search debounce.
    pub fn with_api_url(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: None,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    /// Build the HTTP client described by this config.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        };
        Ok(ApiClient::new(self.api_url.as_str(), &transport)?)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
