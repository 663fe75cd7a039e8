//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pylights_config::ConfigError;
use pylights_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to pylights at {address}")]
    #[diagnostic(
        code(pylights::connection_failed),
        help(
            "Check that the device is powered on and reachable.\n\
             Address: {address}\n\
             Try: pylights --host <ip> info"
        )
    )]
    ConnectionFailed {
        address: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Could not resolve host '{host}': {reason}")]
    #[diagnostic(
        code(pylights::resolve_failed),
        help("Use the device's IP address with --host, or check your network's mDNS.")
    )]
    ResolveFailed { host: String, reason: String },

    #[error("Device unreachable: {message}")]
    #[diagnostic(
        code(pylights::unreachable),
        help("Increase the timeout with --timeout or check the device's network connection.")
    )]
    Unreachable { message: String },

    // ── Device ───────────────────────────────────────────────────────

    #[error("Device rejected the request ({status}): {message}")]
    #[diagnostic(code(pylights::device_error))]
    Device { status: u16, message: String },

    #[error("Unexpected response from device: {message}")]
    #[diagnostic(
        code(pylights::decode),
        help("The device firmware may be newer or older than this client.")
    )]
    Decode { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(pylights::not_found),
        help("Run: pylights {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pylights::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pylights::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pylights config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(pylights::config))]
    Config(ConfigError),

    // ── Internal ─────────────────────────────────────────────────────

    #[error("Internal error: {0}")]
    #[diagnostic(code(pylights::internal))]
    Internal(String),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ResolveFailed { .. } | Self::Unreachable { .. } => {
                exit_code::CONNECTION
            }
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { profile } => {
                let cfg = pylights_config::load_config_or_default();
                let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
                names.sort();
                CliError::ProfileNotFound {
                    name: profile,
                    available: if names.is_empty() {
                        "(none)".into()
                    } else {
                        names.join(", ")
                    },
                }
            }
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { address, source } => {
                CliError::ConnectionFailed { address, source }
            }
            CoreError::InvalidAddress { message } => CliError::Validation {
                field: "host".into(),
                reason: message,
            },
            CoreError::NotConnected => {
                CliError::Internal("command issued before a device was connected".into())
            }
            CoreError::Transport { message } => CliError::Unreachable { message },
            CoreError::Server { status, message } => CliError::Device { status, message },
            CoreError::Decode { message } => CliError::Decode { message },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
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
    fn connection_errors_use_connection_exit_code() {
        let err = CliError::from(CoreError::Transport {
            message: "request timed out".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn local_validation_is_a_usage_error() {
        let err = CliError::from(CoreError::ValidationFailed {
            message: "volume must be between 0 and 100, got 140".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
