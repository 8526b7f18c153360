// Volume controller: validates arguments and drives a mixer backend.

use crate::error::VolumeError;
use crate::mixer::Mixer;
use crate::preset::Preset;
use crate::types::VolumeState;

/// Stateless controller over a mixer backend.
///
/// Every operation re-queries or re-applies directly against the mixer;
/// nothing is cached between calls. OS failures come back as structured
/// [`VolumeError`]s, a single best-effort attempt per call.
pub struct VolumeController {
    mixer: Box<dyn Mixer>,
}

impl VolumeController {
    pub fn new(mixer: Box<dyn Mixer>) -> Self {
        Self { mixer }
    }

    /// Current level and mute status.
    pub fn get_volume(&self) -> Result<VolumeState, VolumeError> {
        let scalar = self.mixer.volume()?;
        let muted = self.mixer.muted()?;
        Ok(VolumeState {
            level: scalar_to_percent(scalar),
            muted,
        })
    }

    /// Set the master volume to a percentage in [0,100].
    ///
    /// The returned state is re-read from the mixer, so hardware that
    /// rounds to its nearest supported step is reported faithfully.
    pub fn set_volume(&self, percent: i64) -> Result<VolumeState, VolumeError> {
        if !(0..=100).contains(&percent) {
            return Err(VolumeError::InvalidArgument(format!(
                "volume must be between 0 and 100, got {percent}"
            )));
        }

        self.mixer.set_volume(percent as f32 / 100.0)?;
        let state = self.get_volume()?;
        tracing::info!(level = state.level, "volume set");
        Ok(state)
    }

    /// Engage mute; the stored level is untouched. Idempotent.
    pub fn mute(&self) -> Result<VolumeState, VolumeError> {
        self.set_mute_flag(true)
    }

    /// Release mute; the stored level is untouched. Idempotent.
    pub fn unmute(&self) -> Result<VolumeState, VolumeError> {
        self.set_mute_flag(false)
    }

    /// Flip the current mute flag.
    pub fn toggle_mute(&self) -> Result<VolumeState, VolumeError> {
        let current = self.mixer.muted()?;
        self.set_mute_flag(!current)
    }

    /// Apply a named preset: set its level, then its mute flag.
    ///
    /// Unknown names are rejected before anything touches the mixer, so
    /// a failed lookup leaves the state unchanged.
    pub fn apply_preset(&self, name: &str) -> Result<VolumeState, VolumeError> {
        let preset: Preset = name
            .parse()
            .map_err(|e: crate::preset::UnknownPreset| VolumeError::InvalidArgument(e.to_string()))?;

        self.mixer.set_volume(f32::from(preset.level()) / 100.0)?;
        self.mixer.set_muted(preset.muted())?;

        let state = self.get_volume()?;
        tracing::info!(preset = preset.name(), level = state.level, muted = state.muted, "preset applied");
        Ok(state)
    }

    fn set_mute_flag(&self, muted: bool) -> Result<VolumeState, VolumeError> {
        self.mixer.set_muted(muted)?;
        let state = self.get_volume()?;
        tracing::info!(muted = state.muted, "mute flag set");
        Ok(state)
    }
}

fn scalar_to_percent(scalar: f32) -> u8 {
    (scalar.clamp(0.0, 1.0) * 100.0).round() as u8
}
