// ── Client-side domain model ──
//
// Canonical types for everything the engine tracks about a device.
// Converted from the wire descriptors in `crate::convert`; consumers
// (CLI, UIs) depend only on these.

pub mod developer;
pub mod light;
pub mod preset;
pub mod remap;
pub mod song;
pub mod state;

// ── Re-exports ──────────────────────────────────────────────────────

pub use developer::DeveloperInfo;
pub use light::Light;
pub use preset::Preset;
pub use remap::RemapSession;
pub use song::{AlbumArt, PlaybackState, Song, Tick};
pub use state::ClientState;
