use thiserror::Error;

/// Failure raised by a mixer backend.
#[derive(Debug, Clone, Error)]
pub enum MixerError {
    /// No audio render endpoint could be reached.
    #[error("no audio endpoint available")]
    NoDevice,

    /// Any other OS-level audio failure (driver fault, access denied, ...).
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Error surface of the volume controller.
///
/// Every operation returns one of these instead of propagating an OS
/// fault; the protocol adapter turns them into structured error results.
#[derive(Debug, Clone, Error)]
pub enum VolumeError {
    #[error("audio device unavailable")]
    DeviceUnavailable,

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Mixer(MixerError),
}

impl From<MixerError> for VolumeError {
    fn from(err: MixerError) -> Self {
        match err {
            MixerError::NoDevice => VolumeError::DeviceUnavailable,
            other => VolumeError::Mixer(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_device_maps_to_device_unavailable() {
        assert!(matches!(
            VolumeError::from(MixerError::NoDevice),
            VolumeError::DeviceUnavailable
        ));
    }

    #[test]
    fn test_backend_failure_stays_a_mixer_error() {
        let err = VolumeError::from(MixerError::Backend("driver fault".to_string()));
        assert!(matches!(err, VolumeError::Mixer(_)));
        assert_eq!(err.to_string(), "audio backend error: driver fault");
    }
}
