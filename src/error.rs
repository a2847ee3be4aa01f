//! Client error types.
//!
//! [`ExplorerError`] is the single error type of the library. Transport
//! failures, non-2xx responses, and malformed envelopes all collapse into
//! one "fetch failed" outcome at the controller boundary, but keep their
//! variant here so logs can tell them apart.

/// Library-wide error enum.
///
/// # Kinds
///
/// | Variant             | `kind()`             | Source                     |
/// |---------------------|----------------------|----------------------------|
/// | `Transport`         | `transport`          | connect, timeout, TLS      |
/// | `Status`            | `status`             | non-2xx HTTP response      |
/// | `MalformedEnvelope` | `malformed_envelope` | body is not `{ data: .. }` |
/// | `InvalidConfig`     | `invalid_config`     | bad base URL or header     |
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept verbatim for logging.
        body: String,
    },

    /// The response body did not match the expected envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),

    /// Configuration could not be turned into a working client.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExplorerError {
    /// Returns a stable, machine-readable name for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::MalformedEnvelope(_) => "malformed_envelope",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Returns the HTTP status code, when the server produced one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::MalformedEnvelope(_) | Self::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_code() {
        let err = ExplorerError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), "status");
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.to_string(), "unexpected status 503: unavailable");
    }

    #[test]
    fn serde_failure_is_malformed_envelope() {
        let Err(source) = serde_json::from_str::<serde_json::Value>("{not json") else {
            panic!("expected parse failure");
        };
        let err = ExplorerError::from(source);
        assert_eq!(err.kind(), "malformed_envelope");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn invalid_config_has_no_status() {
        let err = ExplorerError::InvalidConfig("bad header".to_string());
        assert_eq!(err.kind(), "invalid_config");
        assert!(err.to_string().contains("bad header"));
    }
}
