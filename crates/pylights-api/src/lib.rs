// pylights-api: Async Rust client for the pylights show controller HTTP API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod in_flight;
pub mod models;
pub mod transport;

pub use client::{API_PREFIX, PylightsClient};
pub use error::Error;
pub use in_flight::{InFlight, InFlightGuard};
pub use models::{
    Descriptor, DeveloperDescriptor, InfoDescriptor, LightDescriptor, LightsDescriptor,
    PresetDescriptor, PresetsDescriptor, RemapDescriptor, SongDescriptor, SongsDescriptor,
};
pub use transport::TransportConfig;
