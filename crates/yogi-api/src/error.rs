use thiserror::Error;

/// Top-level error type for the `yogi-api` crate.
///
/// Covers every failure mode of the REST surface: transport, non-2xx
/// responses, and bodies that fail to decode. `yogi-core` maps these into
/// view-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the server's `message` (or `error`)
    /// field when the body carries one, else `HTTP error! status: <code>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A multipart file part could not be read from disk.
    #[error("Multipart payload error: {0}")]
    Multipart(String),
}

impl Error {
    /// Build the generic status error used when the body has no message.
    pub fn from_status(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("HTTP error! status: {status}"),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn generic_status_message_matches_site_wording() {
        let err = Error::from_status(502);
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected_from_status() {
        assert!(Error::from_status(404).is_not_found());
    }
}
