use serde::{Deserialize, Serialize};

/// Named volume shortcut mapping to a fixed level and mute flag.
///
/// The table is static: the `Muted` preset drops the level to 0 and
/// engages mute, every other preset unmutes at its target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Preset {
    Muted,
    Low,
    Medium,
    High,
    Max,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Muted,
        Preset::Low,
        Preset::Medium,
        Preset::High,
        Preset::Max,
    ];

    /// Canonical (wire) name, as accepted by `apply_preset`.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Muted => "MUTED",
            Preset::Low => "LOW",
            Preset::Medium => "MEDIUM",
            Preset::High => "HIGH",
            Preset::Max => "MAX",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Muted => "Muted",
            Preset::Low => "Low",
            Preset::Medium => "Medium",
            Preset::High => "High",
            Preset::Max => "Maximum",
        }
    }

    /// Target volume percentage.
    pub fn level(self) -> u8 {
        match self {
            Preset::Muted => 0,
            Preset::Low => 25,
            Preset::Medium => 50,
            Preset::High => 75,
            Preset::Max => 100,
        }
    }

    /// Whether applying the preset engages mute.
    pub fn muted(self) -> bool {
        matches!(self, Preset::Muted)
    }

    pub fn description(self) -> String {
        format!(
            "{} preset: {}% volume, {}",
            self.label(),
            self.level(),
            if self.muted() { "muted" } else { "unmuted" }
        )
    }
}

impl std::str::FromStr for Preset {
    type Err = UnknownPreset;

    /// Case-insensitive lookup by canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct UnknownPreset(pub String);

impl std::fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown preset: {}", self.0)
    }
}
