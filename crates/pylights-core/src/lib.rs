//! State synchronization engine between `pylights-api` and UI consumers.
//!
//! This crate keeps a local view of one pylights device in step with the
//! device itself:
//!
//! - **[`Controller`]**: command facade. [`connect()`](Controller::connect)
//!   validates an address, reconciles the initial info bundle, and spawns
//!   the loading debounce and refresh tasks. Every command issues one
//!   request and reconciles the response.
//!
//! - **[`DataStore`]**: single owner of [`ClientState`], held in a
//!   `tokio::sync::watch` channel. Responses are folded in by the pure
//!   [`reconcile`] function, one state slice per response shape.
//!
//! - **[`PlaybackClock`]**: interpolates the song position between
//!   refreshes and asks for a refresh when a song ends.
//!
//! - **[`StateStream`]**: subscription handle with `current()` /
//!   `latest()` / `changed()` for reactive rendering.

pub mod clock;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
mod loading;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clock::PlaybackClock;
pub use command::{Command, CommandResult};
pub use config::ControllerConfig;
pub use controller::{ConnectionState, Controller, device_address};
pub use error::CoreError;
pub use store::{DataStore, ReconcileOutcome, reconcile};
pub use stream::{StateStream, StateWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlbumArt, ClientState, DeveloperInfo, Light, PlaybackState, Preset, RemapSession, Song, Tick,
};
