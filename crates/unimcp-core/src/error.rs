// ── Core error types ──
//
// The three hard failures a controller operation can produce. Transport
// details from `unimcp_api` are folded in here; "device not found" is not
// an error at this layer and never appears below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required connection settings are missing or unusable. Raised before
    /// any network I/O.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The controller rejected the login.
    #[error("Authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// A controller call failed after login: non-success status, transport
    /// failure, timeout, or an unusable response.
    #[error("Controller request failed: {message}")]
    Request {
        /// HTTP status, when the failure came from a response.
        status: Option<u16>,
        message: String,
    },
}

impl CoreError {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Configuration { .. } => None,
            Self::Authentication { status, .. } => Some(*status),
            Self::Request { status, .. } => *status,
        }
    }

    /// Stable short name of the error kind, for structured logs and tool output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration_error",
            Self::Authentication { .. } => "authentication_error",
            Self::Request { .. } => "request_error",
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unimcp_api::Error> for CoreError {
    fn from(err: unimcp_api::Error) -> Self {
        match err {
            unimcp_api::Error::Authentication { status, body } => {
                CoreError::Authentication { status, body }
            }
            unimcp_api::Error::InvalidUrl(e) => CoreError::Configuration {
                message: format!("invalid controller URL: {e}"),
            },
            unimcp_api::Error::Tls(message) => CoreError::Configuration { message },
            unimcp_api::Error::Request { status, body } => CoreError::Request {
                status: Some(status),
                message: format!("HTTP {status}: {body}"),
            },
            unimcp_api::Error::Transport(e) => CoreError::Request {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            unimcp_api::Error::Timeout { timeout_secs } => CoreError::Request {
                status: None,
                message: format!("timed out after {timeout_secs}s"),
            },
            unimcp_api::Error::Api { message } => CoreError::Request {
                status: None,
                message,
            },
            unimcp_api::Error::Deserialization { message, body: _ } => CoreError::Request {
                status: None,
                message: format!("unexpected response: {message}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejection_keeps_status() {
        let err: CoreError = unimcp_api::Error::Authentication {
            status: 401,
            body: "bad creds".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Authentication { status: 401, .. }));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.kind(), "authentication_error");
    }

    #[test]
    fn http_failure_becomes_request_error_with_status() {
        let err: CoreError = unimcp_api::Error::Request {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Controller request failed: HTTP 500: boom");
    }

    #[test]
    fn timeouts_and_envelope_errors_have_no_status() {
        let err: CoreError = unimcp_api::Error::Timeout { timeout_secs: 10 }.into();
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("10s"));

        let err: CoreError = unimcp_api::Error::Api {
            message: "api.err.NoSiteContext".into(),
        }
        .into();
        assert_eq!(err.kind(), "request_error");
    }

    #[test]
    fn tls_setup_failure_is_configuration() {
        let err: CoreError = unimcp_api::Error::Tls("invalid CA cert".into()).into();
        assert!(matches!(err, CoreError::Configuration { .. }));
    }
}
