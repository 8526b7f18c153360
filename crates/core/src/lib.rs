// Core volume-control logic: mixer abstraction, controller, presets.

pub mod controller;
pub mod error;
pub mod mixer;
pub mod preset;
pub mod types;

pub use controller::VolumeController;
pub use error::{MixerError, VolumeError};
pub use mixer::{system_mixer, FakeMixer, Mixer};
pub use preset::Preset;
pub use types::VolumeState;
