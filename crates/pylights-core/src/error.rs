// ── Core error types ──
//
// User-facing errors from pylights-core. The `From<pylights_api::Error>`
// impl translates transport-layer errors into domain variants so
// consumers never match on reqwest or serde types directly.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {address}: {source}")]
    ConnectionFailed {
        address: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Invalid device address: {message}")]
    InvalidAddress { message: String },

    #[error("Not connected to a device")]
    NotConnected,

    // ── Request errors ───────────────────────────────────────────────
    #[error("Device unreachable: {message}")]
    Transport { message: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from device: {message}")]
    Decode { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Errors that indicate a wiring bug rather than a device or network
    /// problem. Everything else is reported and the caller carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotConnected)
    }

    /// HTTP status returned by the device, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::ConnectionFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pylights_api::Error> for CoreError {
    fn from(err: pylights_api::Error) -> Self {
        match err {
            pylights_api::Error::NotConnected => CoreError::NotConnected,
            pylights_api::Error::Transport(e) => {
                let message = if e.is_timeout() {
                    "request timed out".to_owned()
                } else {
                    e.to_string()
                };
                CoreError::Transport { message }
            }
            pylights_api::Error::InvalidUrl(e) => CoreError::InvalidAddress {
                message: e.to_string(),
            },
            pylights_api::Error::Config(message) => CoreError::Internal(message),
            pylights_api::Error::Server { status, message } => {
                CoreError::Server { status, message }
            }
            pylights_api::Error::Deserialization { message, .. } => CoreError::Decode { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_keep_status_and_message() {
        let err = CoreError::from(pylights_api::Error::Server {
            status: 404,
            message: "Unknown song".into(),
        });
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Unknown song");
        assert!(!err.is_fatal());
    }

    #[test]
    fn only_not_connected_is_fatal() {
        assert!(CoreError::from(pylights_api::Error::NotConnected).is_fatal());
        assert!(
            !CoreError::ValidationFailed {
                message: "x".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn connection_failure_exposes_source_status() {
        let err = CoreError::ConnectionFailed {
            address: "http://10.0.0.7:5001".into(),
            source: Box::new(CoreError::Server {
                status: 503,
                message: "HTTP 503: Unknown error".into(),
            }),
        };
        assert_eq!(err.status(), Some(503));
    }
}
