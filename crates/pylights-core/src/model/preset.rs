// ── Preset domain type ──

use serde::{Deserialize, Serialize};

/// A named set of lights switched on together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub lights: Vec<String>,
}
