use thiserror::Error;

/// Top-level error type for the `pylights-api` crate.
///
/// Covers every failure mode of a single request against the device:
/// wiring (no base URL committed), transport, non-2xx responses, and
/// payloads that don't match the expected shape. `pylights-core` maps
/// these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Wiring ──────────────────────────────────────────────────────
    /// A request was attempted before a base URL was committed by `connect`.
    #[error("Client is not connected to a device")]
    NotConnected,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built from the transport config.
    #[error("Transport configuration error: {0}")]
    Config(String),

    // ── Device ──────────────────────────────────────────────────────
    /// Non-2xx response. `message` comes from the `{"error": "..."}`
    /// envelope when the device sent one.
    #[error("Device error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
