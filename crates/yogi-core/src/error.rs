// ── Core error types ──
//
// User-facing errors from yogi-core. Consumers never see reqwest errors
// or JSON parse failures directly: the `From<yogi_api::Error>` impl
// translates transport-layer errors into view-appropriate variants.

use thiserror::Error;

/// Message shown when the admin password does not match.
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password. Please try again.";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the backend timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    /// 404 from the backend.
    #[error("{message}")]
    NotFound { message: String },

    /// Non-2xx response. `message` is the server's text or the generic
    /// `HTTP error! status: <code>` form.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    #[error("Invalid response from backend: {message}")]
    InvalidResponse { message: String },

    // ── Client-side checks ───────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("{}", INVALID_PASSWORD_MESSAGE)]
    InvalidPassword,

    #[error("Admin login required")]
    AdminRequired,

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    // ── Local state ──────────────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status of the underlying response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<yogi_api::Error> for CoreError {
    fn from(err: yogi_api::Error) -> Self {
        match err {
            yogi_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            yogi_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            yogi_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            yogi_api::Error::Http {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            yogi_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            yogi_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
            yogi_api::Error::Multipart(message) => CoreError::ValidationFailed { message },
        }
    }
}
