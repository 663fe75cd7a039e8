//! CLI configuration: thin wrapper around `pylights_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--host, --port, --timeout).

use std::time::Duration;

use pylights_core::ControllerConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use pylights_config::{
    DEFAULT_PORT, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Where and how to reach the device for this invocation.
#[derive(Debug, Clone)]
pub struct Target {
    pub profile_name: String,
    pub host: String,
    pub port: u16,
    pub controller: ControllerConfig,
}

/// Resolve the target device from config + CLI flags.
///
/// CLI flag overrides take priority over profile values. A `--host` flag
/// also works with no config file at all.
pub fn resolve_target(global: &GlobalOpts) -> Result<Target, CliError> {
    let cfg = load_config()?;

    let (profile_name, profile) = match cfg.resolve_profile(global.profile.as_deref()) {
        Ok(found) => found,
        // An explicit host makes the profile optional.
        Err(_) if global.host.is_some() && global.profile.is_none() => {
            ("(flags)".to_owned(), Profile::default())
        }
        Err(e) => return Err(e.into()),
    };

    let mut controller = pylights_config::profile_to_controller_config(&profile, &cfg.defaults);
    if let Some(secs) = global.timeout {
        controller.timeout = Duration::from_secs(secs);
    }

    Ok(Target {
        host: global.host.clone().unwrap_or_else(|| profile.host.clone()),
        port: global
            .port
            .unwrap_or_else(|| pylights_config::profile_port(&profile, &cfg.defaults)),
        profile_name,
        controller,
    })
}
