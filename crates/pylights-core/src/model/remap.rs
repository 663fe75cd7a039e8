// ── Light remap session ──
//
// Remapping walks through every light on the device, asking the operator
// to name whichever relay just switched on. The device drives the
// sequence; the client only mirrors the names still waiting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "remaining", rename_all = "snake_case")]
pub enum RemapSession {
    /// No remap in progress.
    #[default]
    Idle,
    /// A remap is running. An empty list means every light has been
    /// named and the session awaits acknowledgement.
    Active(Vec<String>),
}

impl RemapSession {
    /// Mirror the device's `remaining` field (`None` means no session).
    pub fn from_remaining(remaining: Option<Vec<String>>) -> Self {
        remaining.map_or(Self::Idle, Self::Active)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// `true` once an active session has no lights left to name.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Active(remaining) if remaining.is_empty())
    }

    /// The light the device is currently asking about.
    pub fn current(&self) -> Option<&str> {
        match self {
            Self::Active(remaining) => remaining.first().map(String::as_str),
            Self::Idle => None,
        }
    }

    /// Names still waiting, empty when idle.
    pub fn remaining(&self) -> &[String] {
        match self {
            Self::Active(remaining) => remaining,
            Self::Idle => &[],
        }
    }
}
