// ── Aggregate client state ──

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use super::{DeveloperInfo, Light, PlaybackState, Preset, RemapSession};

/// Everything the client knows about the connected device.
///
/// Owned by the [`DataStore`](crate::store::DataStore); consumers only
/// ever see `Arc` snapshots of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientState {
    pub playback: PlaybackState,
    /// Device-reported order.
    pub lights: Vec<Light>,
    pub presets: Vec<Preset>,
    pub remap: RemapSession,
    /// Only present while a developer view is open.
    pub developer: Option<DeveloperInfo>,
    /// Debounced "a request is taking a while" indicator.
    pub loading: bool,
    /// Committed device address; `None` until a connect succeeds.
    pub base_url: Option<Url>,
    /// When the last full `/info` bundle was applied.
    pub last_refresh: Option<DateTime<Utc>>,
}

impl ClientState {
    pub fn is_connected(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn light(&self, name: &str) -> Option<&Light> {
        self.lights.iter().find(|l| l.name == name)
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}
