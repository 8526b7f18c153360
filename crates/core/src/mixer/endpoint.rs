// Windows Core Audio backend: default render endpoint via WASAPI.

use std::ptr;

use windows::Win32::Foundation::BOOL;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{eConsole, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};

use super::Mixer;
use crate::error::MixerError;

// HRESULT for ERROR_NOT_FOUND, returned when no render endpoint exists.
const E_NOTFOUND: i32 = 0x8007_0490_u32 as i32;

/// Master volume control of the default render endpoint.
///
/// The COM apartment is tied to the thread that constructed the mixer;
/// all calls must stay on that thread (the server runs a current-thread
/// runtime for exactly this reason).
pub struct EndpointMixer {
    endpoint: IAudioEndpointVolume,
}

impl EndpointMixer {
    /// Bind the default console render endpoint.
    pub fn default_output() -> Result<Self, MixerError> {
        unsafe {
            // S_FALSE (already initialized) is fine; a genuine failure
            // will surface on the CoCreateInstance call below.
            let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(wrap)?;
            let device = enumerator
                .GetDefaultAudioEndpoint(eRender, eConsole)
                .map_err(wrap)?;
            let endpoint: IAudioEndpointVolume =
                device.Activate(CLSCTX_ALL, None).map_err(wrap)?;

            Ok(Self { endpoint })
        }
    }
}

impl Mixer for EndpointMixer {
    fn volume(&self) -> Result<f32, MixerError> {
        unsafe { self.endpoint.GetMasterVolumeLevelScalar().map_err(wrap) }
    }

    fn set_volume(&self, scalar: f32) -> Result<(), MixerError> {
        unsafe {
            self.endpoint
                .SetMasterVolumeLevelScalar(scalar, ptr::null())
                .map_err(wrap)
        }
    }

    fn muted(&self) -> Result<bool, MixerError> {
        unsafe { self.endpoint.GetMute().map(|b| b.as_bool()).map_err(wrap) }
    }

    fn set_muted(&self, muted: bool) -> Result<(), MixerError> {
        unsafe {
            self.endpoint
                .SetMute(BOOL::from(muted), ptr::null())
                .map_err(wrap)
        }
    }
}

fn wrap(err: windows::core::Error) -> MixerError {
    if err.code().0 == E_NOTFOUND {
        MixerError::NoDevice
    } else {
        MixerError::Backend(err.message().to_string())
    }
}
