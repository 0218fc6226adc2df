#![no_std]

// Logging macros for either defmt or log, must come before the other modules
#[macro_use]
mod logging;

pub mod airframe;
pub mod consts;
pub mod errors;
pub mod hw_abstraction;
pub mod mixer;
pub mod types;
pub mod utils;

pub use airframe::{find_mixer, is_mixer_supported, MixerDefinition, MixerMode, MotorMixer};
pub use consts::MAX_MOTORS;
pub use errors::MixerError;
pub use mixer::{shared::SharedMixer, Mixer};

// Re-exported for implementors
pub use embassy_sync;
pub use embassy_time;
pub use heapless;

#[macro_export]
macro_rules! const_default {
    ($type:ty => { $($token:tt)+ } ) => {
        impl $crate::ConstDefault for $type {
            const DEFAULT: Self = Self::const_default();
        }

        impl $type {
            pub const fn const_default() -> Self {
                Self { $($token)+ }
            }
        }

        impl Default for $type {
            fn default() -> Self {
                Self::const_default()
            }
        }
    };
    ($type:ty => $($token:tt)+ ) => {
        impl $crate::ConstDefault for $type {
            const DEFAULT: Self = Self::const_default();
        }

        impl $type {
            pub const fn const_default() -> Self {
                $($token)+
            }
        }

        impl Default for $type {
            fn default() -> Self {
                Self::const_default()
            }
        }
    };
}

pub trait ConstDefault {
    const DEFAULT: Self;
}
