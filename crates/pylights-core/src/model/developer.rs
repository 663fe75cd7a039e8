// ── Developer diagnostics ──

use serde::{Deserialize, Serialize};

/// Device diagnostics. Only populated while a developer view has asked
/// for them; cleared again when that view closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperInfo {
    pub version: String,
    pub ip_address: String,
    pub cpu_usage_pct: f64,
    pub led_server_ip_address: Option<String>,
    pub led_server_online: Option<bool>,
    pub serial_port: Option<String>,
}
