// Mixer backends: the narrow seam between the controller and the OS.

use std::sync::Mutex;

use crate::error::MixerError;

#[cfg(windows)]
mod endpoint;
#[cfg(windows)]
pub use endpoint::EndpointMixer;

/// Access to a system audio endpoint's master volume and mute switch.
///
/// Volume is expressed as a scalar in 0.0-1.0, matching the Core Audio
/// endpoint API; percentage conversion happens in the controller.
/// Implementations perform a live OS call per method, no caching.
pub trait Mixer: Send + Sync {
    fn volume(&self) -> Result<f32, MixerError>;
    fn set_volume(&self, scalar: f32) -> Result<(), MixerError>;
    fn muted(&self) -> Result<bool, MixerError>;
    fn set_muted(&self, muted: bool) -> Result<(), MixerError>;
}

/// Open the platform's default render endpoint.
///
/// On non-Windows hosts there is no system backend; callers can still run
/// against a [`FakeMixer`].
pub fn system_mixer() -> Result<Box<dyn Mixer>, MixerError> {
    #[cfg(windows)]
    {
        Ok(Box::new(EndpointMixer::default_output()?))
    }
    #[cfg(not(windows))]
    {
        Err(MixerError::NoDevice)
    }
}

/// In-memory mixer for tests and headless environments.
///
/// Holds level and mute behind a mutex and otherwise behaves like a real
/// endpoint, including independent level/mute axes.
pub struct FakeMixer {
    state: Mutex<FakeState>,
}

struct FakeState {
    scalar: f32,
    muted: bool,
    // When set, every call fails as if the endpoint disappeared.
    unplugged: bool,
}

impl FakeMixer {
    pub fn new(level: u8, muted: bool) -> Self {
        Self {
            state: Mutex::new(FakeState {
                scalar: f32::from(level.min(100)) / 100.0,
                muted,
                unplugged: false,
            }),
        }
    }

    /// A mixer whose endpoint is gone; every call returns `NoDevice`.
    pub fn unplugged() -> Self {
        let mixer = Self::new(0, false);
        // A freshly constructed mutex cannot be poisoned.
        if let Ok(mut state) = mixer.state.lock() {
            state.unplugged = true;
        }
        mixer
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> Result<T, MixerError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| MixerError::Backend("mixer state poisoned".to_string()))?;
        if state.unplugged {
            return Err(MixerError::NoDevice);
        }
        Ok(f(&mut state))
    }
}

impl Default for FakeMixer {
    fn default() -> Self {
        Self::new(50, false)
    }
}

impl Mixer for FakeMixer {
    fn volume(&self) -> Result<f32, MixerError> {
        self.with_state(|s| s.scalar)
    }

    fn set_volume(&self, scalar: f32) -> Result<(), MixerError> {
        self.with_state(|s| s.scalar = scalar.clamp(0.0, 1.0))
    }

    fn muted(&self) -> Result<bool, MixerError> {
        self.with_state(|s| s.muted)
    }

    fn set_muted(&self, muted: bool) -> Result<(), MixerError> {
        self.with_state(|s| s.muted = muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_mixer_roundtrip() {
        let mixer = FakeMixer::new(30, false);
        assert_eq!(mixer.volume().unwrap(), 0.3);

        mixer.set_volume(0.75).unwrap();
        assert_eq!(mixer.volume().unwrap(), 0.75);
    }

    #[test]
    fn test_fake_mixer_mute_preserves_level() {
        let mixer = FakeMixer::new(60, false);
        mixer.set_muted(true).unwrap();

        assert!(mixer.muted().unwrap());
        assert_eq!(mixer.volume().unwrap(), 0.6);
    }

    #[test]
    fn test_fake_mixer_clamps_scalar() {
        let mixer = FakeMixer::default();
        mixer.set_volume(1.7).unwrap();
        assert_eq!(mixer.volume().unwrap(), 1.0);
    }

    #[test]
    fn test_poisoned_state_is_a_backend_error() {
        use std::sync::Arc;

        let mixer = Arc::new(FakeMixer::new(50, false));
        let poisoner = mixer.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the state");
        })
        .join();

        assert!(matches!(mixer.volume(), Err(MixerError::Backend(_))));
    }

    #[test]
    fn test_unplugged_mixer_fails_every_call() {
        let mixer = FakeMixer::unplugged();
        assert!(matches!(mixer.volume(), Err(MixerError::NoDevice)));
        assert!(matches!(mixer.set_volume(0.5), Err(MixerError::NoDevice)));
        assert!(matches!(mixer.muted(), Err(MixerError::NoDevice)));
        assert!(matches!(mixer.set_muted(true), Err(MixerError::NoDevice)));
    }
}
