// ── Light domain type ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    /// Unique key; commands address lights by name.
    pub name: String,
    /// GPIO pin driving the light's relay.
    pub channel: u32,
    pub on: bool,
}
