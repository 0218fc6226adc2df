use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::airframe::MixerMode;

/// Configuration-class errors reported when the active mixer is built.
/// The per-tick mixing itself never fails.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MixerError {
    #[error("Mixer mode {0:?} is not supported by this build.")]
    UnsupportedMode(MixerMode),
    #[error("Mixer mode {0} does not exist.")]
    UnknownMode(u8),
}
