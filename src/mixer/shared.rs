//! A [`Mixer`] that can be placed in a `static` and used from both the
//! configuration context and the control loop. The critical section keeps
//! [`Mixer::rebuild`] and [`Mixer::mix_table`] from ever interleaving.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use heapless::Vec;

use super::Mixer;
use crate::consts::MAX_MOTORS;
use crate::errors::MixerError;
use crate::types::config::Config;
use crate::types::control::MixerInput;

pub struct SharedMixer {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Mixer>>,
}

impl SharedMixer {
    pub const fn new(config: Config) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Mixer::new(config))),
        }
    }

    /// Run `f` with exclusive access to the mixer.
    pub fn with<R>(&self, f: impl FnOnce(&mut Mixer) -> R) -> R {
        self.inner.lock(|mixer| f(&mut mixer.borrow_mut()))
    }

    pub fn configure(&self, config: Config, output_count: u8) -> Result<(), MixerError> {
        self.with(|mixer| mixer.configure(config, output_count))
    }

    /// Run one mixer tick, returning a copy of the resulting motor commands.
    pub fn mix_table(&self, input: &MixerInput) -> Vec<i16, MAX_MOTORS> {
        self.with(|mixer| {
            mixer.mix_table(input);
            mixer.motors().iter().copied().collect()
        })
    }

    pub fn motor_count(&self) -> u8 {
        self.with(|mixer| mixer.motor_count())
    }

    pub fn is_output_saturated(&self) -> bool {
        self.with(|mixer| mixer.is_output_saturated())
    }
}
