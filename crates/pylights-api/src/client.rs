// pylights HTTP client
//
// Wraps `reqwest::Client` with base-URL commitment, URL construction,
// in-flight accounting, and response classification. Endpoint groups
// (songs, lights, etc.) are implemented as inherent methods in
// `crate::endpoints` to keep this module focused on transport mechanics.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};
use url::Url;

use crate::error::Error;
use crate::in_flight::InFlight;
use crate::models::{ErrorEnvelope, InfoDescriptor};
use crate::transport::TransportConfig;

/// Path prefix shared by every device endpoint.
pub const API_PREFIX: &str = "/pylights-api";

/// Raw HTTP client for a single pylights device.
///
/// Starts without a base URL. [`connect`](Self::connect) validates and
/// commits one; every request before that fails with
/// [`Error::NotConnected`].
pub struct PylightsClient {
    http: reqwest::Client,
    base_url: RwLock<Option<Url>>,
    in_flight: InFlight,
}

impl PylightsClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: RwLock::new(None),
            in_flight: InFlight::new(),
        }
    }

    /// The committed base URL, if `connect` has succeeded.
    pub fn base_url(&self) -> Option<Url> {
        self.base_url.read().expect("base URL lock poisoned").clone()
    }

    /// The shared in-flight request counter.
    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    // ── Connection ───────────────────────────────────────────────────

    /// Validate `candidate` with one `/info` round trip and commit it.
    ///
    /// The candidate is committed tentatively for the duration of the
    /// validation request. On failure it is rolled back and the original
    /// error is returned, so no command can ever target an unvalidated
    /// address. On success the info payload is handed back so callers
    /// don't need a second round trip.
    pub async fn connect(&self, candidate: &str) -> Result<InfoDescriptor, Error> {
        let url = Url::parse(candidate)?;
        debug!(%url, "validating device address");

        *self.base_url.write().expect("base URL lock poisoned") = Some(url);

        match self.info().await {
            Ok(info) => {
                debug!(candidate, "device address validated");
                Ok(info)
            }
            Err(e) => {
                debug!(candidate, error = %e, "device address rejected");
                *self.base_url.write().expect("base URL lock poisoned") = None;
                Err(e)
            }
        }
    }

    /// Forget the committed base URL.
    pub fn disconnect(&self) {
        *self.base_url.write().expect("base URL lock poisoned") = None;
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL: `{base}/pylights-api{endpoint}`.
    pub(crate) fn api_url(&self, endpoint: &str) -> Result<Url, Error> {
        let Some(base) = self.base_url() else {
            error!(endpoint, "request attempted before a device address was committed");
            return Err(Error::NotConnected);
        };
        let base = base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{API_PREFIX}{endpoint}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the response body as `T`.
    ///
    /// The in-flight counter is held from before dispatch until the body
    /// is fully decoded (or the future is dropped).
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.api_url(endpoint)?;
        let _guard = self.in_flight.acquire();

        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Classify a response: non-2xx becomes `Error::Server`, 2xx is decoded.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body).map_or_else(
                |_| format!("HTTP {}: Unknown error", status.as_u16()),
                |envelope| envelope.error,
            );
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(len = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    // ── Info ─────────────────────────────────────────────────────────

    /// Fetch the full songs + lights + presets bundle.
    ///
    /// `GET /info`
    pub async fn info(&self) -> Result<InfoDescriptor, Error> {
        self.get("/info", &[]).await
    }
}
