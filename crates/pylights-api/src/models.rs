// Wire response types
//
// Every endpoint answers with one of a handful of shapes. Field names are
// snake_case on the wire and map one-to-one onto the Rust fields, so no
// renaming is needed. Optional developer fields use `#[serde(default)]`
// because older device firmware omits them.

use serde::{Deserialize, Serialize};

// ── Songs ────────────────────────────────────────────────────────────

/// A song known to the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDescriptor {
    pub title: String,
    pub artist: String,
    /// Base64-encoded album art, passed through untouched.
    #[serde(default)]
    pub album_art: String,
    pub length_ms: f64,
}

/// Playback state as reported by every `/songs/*` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongsDescriptor {
    pub songs: Vec<SongDescriptor>,
    #[serde(default)]
    pub playing: Option<SongDescriptor>,
    pub paused: bool,
    pub current_time_ms: f64,
    pub volume: i64,
}

// ── Lights ───────────────────────────────────────────────────────────

/// One relay-driven light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightDescriptor {
    pub name: String,
    pub gpio: u32,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightsDescriptor {
    pub lights: Vec<LightDescriptor>,
}

// ── Presets ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDescriptor {
    pub name: String,
    pub lights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsDescriptor {
    pub presets: Vec<PresetDescriptor>,
}

// ── Remap ────────────────────────────────────────────────────────────

/// Remap session state. `remaining: null` means no session is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapDescriptor {
    #[serde(default)]
    pub remaining: Option<Vec<String>>,
}

// ── Developer ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperDescriptor {
    pub version: String,
    pub ip_address: String,
    pub cpu_usage: f64,
    #[serde(default)]
    pub led_server_ip_address: Option<String>,
    #[serde(default)]
    pub led_server_status: Option<bool>,
    #[serde(default)]
    pub serial_port: Option<String>,
}

// ── Info ─────────────────────────────────────────────────────────────

/// Full bundle returned by `/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoDescriptor {
    pub songs: SongsDescriptor,
    pub lights: LightsDescriptor,
    pub presets: PresetsDescriptor,
}

// ── Error envelope ───────────────────────────────────────────────────

/// Body of a non-2xx response, when the device sends one.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: String,
}

// ── Tagged union ─────────────────────────────────────────────────────

/// Any decoded response, tagged by shape.
///
/// The shape is fixed by the endpoint that produced it, so dispatch on
/// this enum never needs to inspect payload contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Info(InfoDescriptor),
    Songs(SongsDescriptor),
    Lights(LightsDescriptor),
    Presets(PresetsDescriptor),
    Remap(RemapDescriptor),
    Developer(DeveloperDescriptor),
}

impl Descriptor {
    /// Whether applying this shape replaces the playback slice.
    pub fn carries_playback(&self) -> bool {
        matches!(self, Self::Info(_) | Self::Songs(_))
    }

    /// Short shape name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Info(_) => "info",
            Self::Songs(_) => "songs",
            Self::Lights(_) => "lights",
            Self::Presets(_) => "presets",
            Self::Remap(_) => "remap",
            Self::Developer(_) => "developer",
        }
    }
}

impl From<InfoDescriptor> for Descriptor {
    fn from(d: InfoDescriptor) -> Self {
        Self::Info(d)
    }
}

impl From<SongsDescriptor> for Descriptor {
    fn from(d: SongsDescriptor) -> Self {
        Self::Songs(d)
    }
}

impl From<LightsDescriptor> for Descriptor {
    fn from(d: LightsDescriptor) -> Self {
        Self::Lights(d)
    }
}

impl From<PresetsDescriptor> for Descriptor {
    fn from(d: PresetsDescriptor) -> Self {
        Self::Presets(d)
    }
}

impl From<RemapDescriptor> for Descriptor {
    fn from(d: RemapDescriptor) -> Self {
        Self::Remap(d)
    }
}

impl From<DeveloperDescriptor> for Descriptor {
    fn from(d: DeveloperDescriptor) -> Self {
        Self::Developer(d)
    }
}
