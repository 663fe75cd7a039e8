// ── Runtime controller configuration ──
//
// Describes how the engine talks to a device. Built by the CLI (usually
// from a `pylights-config` profile) and handed to `Controller::new`;
// core never reads config files.

use std::time::Duration;

/// Tuning for a single device connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long requests must be outstanding before `loading` turns on.
    pub loading_debounce: Duration,
    /// Playback clock step. The device reports positions in milliseconds
    /// and the clock advances by exactly this much per tick.
    pub clock_period: Duration,
    /// How often to perform a full `/info` refresh (seconds). 0 = never.
    pub refresh_interval_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            loading_debounce: Duration::from_millis(200),
            clock_period: Duration::from_secs(1),
            refresh_interval_secs: 0,
        }
    }
}
