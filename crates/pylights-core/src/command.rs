// ── Command API ──
//
// Every operation the controller can perform against a device, as data.
// The CLI builds these from its subcommands and hands them to
// `Controller::execute`; UIs may call the matching methods directly.

use strum::IntoStaticStr;

use crate::model::{DeveloperInfo, RemapSession};

/// All operations against a pylights device.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    /// Fetch the full `/info` bundle.
    Refresh,

    // ── Playback ─────────────────────────────────────────────────────
    PlaySong { title: String },
    Pause,
    Resume,
    Stop,
    SetVolume { value: i64 },

    // ── Lights ───────────────────────────────────────────────────────
    AllLightsOn,
    AllLightsOff,
    TurnOnLight { name: String },
    TurnOffLight { name: String },
    ToggleLight { name: String },

    // ── Presets ──────────────────────────────────────────────────────
    ActivatePreset { name: String },
    AddPreset { name: String, lights: Vec<String> },

    // ── Remap ────────────────────────────────────────────────────────
    StartRemap,
    NextRemap { name: String },
    CancelRemap,
    AcknowledgeRemap,

    // ── Developer ────────────────────────────────────────────────────
    DeveloperInfo,
    RecompileShows,
    CloseDeveloper,
}

impl Command {
    /// Short kebab-case name for logging.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// What a command produced, beyond the state it reconciled.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    Remap(RemapSession),
    Developer(DeveloperInfo),
}
