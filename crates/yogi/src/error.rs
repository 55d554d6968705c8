//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use yogi_config::ConfigError;
use yogi_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(yogi::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Set it with --api-url, YOGI_API_URL, or api_url in config.toml."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(yogi::timeout),
        help("Raise the limit with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Admin gate ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(yogi::invalid_password))]
    InvalidPassword { message: String },

    #[error("Admin login required")]
    #[diagnostic(code(yogi::admin_required), help("Run: yogi admin login"))]
    AdminRequired,

    #[error("A submission is already in progress")]
    #[diagnostic(code(yogi::in_flight))]
    SubmissionInFlight,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(yogi::not_found), help("Run: yogi {list_command} to see what exists"))]
    NotFound {
        message: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(yogi::api_error))]
    Api { message: String, status: Option<u16> },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(code(yogi::invalid_response))]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(yogi::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(yogi::config),
        help("Inspect the file with: yogi config show")
    )]
    Config(#[from] ConfigError),

    #[error("Could not persist admin state: {message}")]
    #[diagnostic(code(yogi::storage))]
    Storage { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(yogi::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(yogi::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::InvalidPassword { .. } | Self::AdminRequired => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::SubmissionInFlight => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { message } => CliError::NotFound {
                message,
                list_command: "blogs list".into(),
            },

            CoreError::Api { message, status } => CliError::Api { message, status },

            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            err @ CoreError::InvalidPassword => CliError::InvalidPassword {
                message: err.to_string(),
            },

            CoreError::AdminRequired => CliError::AdminRequired,

            CoreError::SubmissionInFlight => CliError::SubmissionInFlight,

            CoreError::Storage { message } => CliError::Storage { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_keeps_wording_and_auth_exit_code() {
        let err = CliError::from(CoreError::InvalidPassword);
        assert_eq!(err.to_string(), "Invalid password. Please try again.");
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn not_found_maps_to_exit_code_4() {
        let err = CliError::from(CoreError::NotFound {
            message: "HTTP error! status: 404".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn server_message_passes_through() {
        let err = CliError::from(CoreError::Api {
            message: "Title already exists".into(),
            status: Some(422),
        });
        assert_eq!(err.to_string(), "Title already exists");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
