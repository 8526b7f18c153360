use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of the system mixer.
///
/// Level and mute are independent axes: muting does not change the
/// stored level, and the level survives a mute/unmute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeState {
    /// Master volume as a percentage, 0-100.
    pub level: u8,
    /// Whether the endpoint is currently muted.
    pub muted: bool,
}

impl std::fmt::Display for VolumeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}%{}",
            self.level,
            if self.muted { " (muted)" } else { "" }
        )
    }
}
