//! The motor mixer turns roll, pitch and yaw demand together with a throttle
//! demand into a command for each motor of the configured airframe.
//!
//! All state lives in [`Mixer`]: the active motor table, the motor command
//! arrays, the 3D throttle direction memory and the saturation flag. The
//! active table is built by [`Mixer::rebuild`] whenever the configuration
//! changes, and consumed every control loop iteration by
//! [`Mixer::mix_table`]. The two must never run concurrently, wrap the mixer
//! in a [`shared::SharedMixer`] if it is accessed from more than one context.

use heapless::Vec;

use crate::airframe::{find_mixer, MotorMixer};
use crate::consts::MAX_MOTORS;
use crate::errors::MixerError;
use crate::types::config::Config;

mod disarmed;
mod mix;
mod output;
pub mod shared;

pub use disarmed::disarmed_command;

/// Side of the 3D deadband the throttle was last commanded on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThrottleDirection {
    Positive,
    Negative,
}

/// Motor mixer for a single airframe, from active motor table to motor commands.
pub struct Mixer {
    config: Config,
    /// Motor rows currently in effect, one per driven motor
    active: Vec<MotorMixer, MAX_MOTORS>,
    motors: [i16; MAX_MOTORS],
    disarmed: [i16; MAX_MOTORS],
    /// Last throttle command outside the 3D deadband
    throttle_previous: i16,
    saturated: bool,
}

impl Mixer {
    /// Create a mixer with no active motors. Call [`Mixer::rebuild`] to
    /// load the airframe from `config`.
    pub const fn new(config: Config) -> Self {
        let disarmed = disarmed_command(
            config.is_3d(),
            config.flight_3d.neutral3d,
            config.motor.min_command,
        );

        Self {
            active: Vec::new(),
            motors: [disarmed; MAX_MOTORS],
            disarmed: [disarmed; MAX_MOTORS],
            throttle_previous: config.rx.mid_rc,
            saturated: false,
            config,
        }
    }

    /// Replace the configuration and rebuild the active mixer from it.
    pub fn configure(&mut self, config: Config, output_count: u8) -> Result<(), MixerError> {
        self.config = config;
        self.rebuild(output_count)
    }

    /// Build the active motor table from the current configuration.
    ///
    /// Custom modes take the rows from the custom mixer slots up to the first
    /// unused slot. Other modes copy the catalog rows, but never more than
    /// the `output_count` motor outputs the hardware exposes. In 3D mode the
    /// roll, pitch and yaw weights are halved to leave room for reversing.
    ///
    /// If the mode is not part of this build no motors are driven and an
    /// error is returned. The disarmed commands are regenerated either way.
    pub fn rebuild(&mut self, output_count: u8) -> Result<(), MixerError> {
        const ID: &str = "mixer";

        let mode = self.config.mixer.mixer_mode;
        self.active.clear();

        let result = if mode.is_custom() {
            let rows = self.config.custom_mixer.iter();
            self.active.extend(rows.take_while(|row| !row.is_unused()).copied());
            Ok(())
        } else if let Some(definition) = find_mixer(mode) {
            let count = definition.motor_count.min(output_count);
            if count < definition.motor_count {
                warn!(
                    "{}: {:?} needs {} motors, but only {} outputs are available",
                    ID, mode, definition.motor_count, output_count
                );
            }

            if let Some(motors) = definition.motors {
                self.active.extend(motors.iter().take(count as usize).copied());
            }
            Ok(())
        } else {
            warn!("{}: Mixer mode {:?} is not supported", ID, mode);
            Err(MixerError::UnsupportedMode(mode))
        };

        // Leave headroom for reversing the motors
        if self.config.is_3d() && self.active.len() > 1 {
            for row in self.active.iter_mut() {
                row.roll *= 0.5;
                row.pitch *= 0.5;
                row.yaw *= 0.5;
            }
            debug!("{}: Attitude weights halved for 3D", ID);
        }

        self.reset_disarmed_motors();

        info!(
            "{}: Active mixer {:?} with {} motors",
            ID,
            mode,
            self.active.len()
        );

        result
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn motor_count(&self) -> u8 {
        self.active.len() as u8
    }

    /// The motor rows currently in effect, indexed by motor
    pub fn active_mixer(&self) -> &[MotorMixer] {
        &self.active
    }

    /// Commands produced by the latest tick, one per active motor
    pub fn motors(&self) -> &[i16] {
        &self.motors[..self.active.len()]
    }

    /// Whether the roll, pitch and yaw demand had to be scaled down to fit
    /// the available throttle range during the latest tick.
    pub fn is_output_saturated(&self) -> bool {
        self.saturated
    }

    pub fn throttle_direction(&self) -> ThrottleDirection {
        if self.throttle_previous <= self.config.deadband3d_stick_low() {
            ThrottleDirection::Negative
        } else {
            ThrottleDirection::Positive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airframe::{MixerMode, MIXER_TABLE, QUAD_X};
    use crate::types::config::Features;

    fn config_for(mode: MixerMode) -> Config {
        let mut config = Config::default();
        config.mixer.mixer_mode = mode;
        config
    }

    #[test]
    fn new_mixer_is_inert() {
        let mixer = Mixer::new(Config::default());
        assert_eq!(mixer.motor_count(), 0);
        assert!(mixer.motors().is_empty());
        assert!(!mixer.is_output_saturated());
        assert_eq!(mixer.throttle_direction(), ThrottleDirection::Positive);
    }

    #[test]
    fn catalog_motor_count() {
        for definition in MIXER_TABLE.iter().filter(|d| !d.mode.is_custom()) {
            let mut mixer = Mixer::new(config_for(definition.mode));
            mixer.rebuild(MAX_MOTORS as u8).unwrap();

            assert_eq!(mixer.motor_count(), definition.motor_count, "{:?}", definition.mode);
            assert_eq!(mixer.active_mixer(), definition.motors.unwrap());
        }
    }

    #[test]
    fn capped_by_output_count() {
        let mut mixer = Mixer::new(config_for(MixerMode::QuadX));
        mixer.rebuild(3).unwrap();

        assert_eq!(mixer.motor_count(), 3);
        assert_eq!(mixer.active_mixer(), &QUAD_X[..3]);
    }

    #[test]
    fn custom_stops_at_unused_slot() {
        let mut config = config_for(MixerMode::Custom);
        config.custom_mixer[0] = MotorMixer::new(1.0, -1.0, 1.0, -1.0);
        config.custom_mixer[1] = MotorMixer::new(1.0, 1.0, -1.0, 1.0);
        config.custom_mixer[2] = MotorMixer::UNUSED;
        config.custom_mixer[3] = MotorMixer::new(1.0, 1.0, 1.0, 1.0);

        let mut mixer = Mixer::new(config);
        mixer.rebuild(MAX_MOTORS as u8).unwrap();

        assert_eq!(mixer.motor_count(), 2);
        assert_eq!(mixer.active_mixer(), &config.custom_mixer[..2]);
    }

    #[test]
    fn custom_first_slot_unused() {
        let mut config = config_for(MixerMode::CustomTri);
        config.custom_mixer[1] = MotorMixer::new(1.0, 1.0, 1.0, 1.0);

        let mut mixer = Mixer::new(config);
        mixer.rebuild(MAX_MOTORS as u8).unwrap();
        assert_eq!(mixer.motor_count(), 0);
    }

    #[test]
    fn custom_ignores_output_count() {
        let mut config = config_for(MixerMode::CustomAirplane);
        config.custom_mixer[..4].copy_from_slice(&QUAD_X);

        let mut mixer = Mixer::new(config);
        mixer.rebuild(2).unwrap();
        assert_eq!(mixer.motor_count(), 4);
    }

    #[test]
    fn unsupported_mode() {
        let mut mixer = Mixer::new(config_for(MixerMode::QuadX));
        mixer.rebuild(4).unwrap();
        assert_eq!(mixer.motor_count(), 4);

        let result = mixer.configure(config_for(MixerMode::Heli120Ccpm), 4);
        assert_eq!(result, Err(MixerError::UnsupportedMode(MixerMode::Heli120Ccpm)));
        assert_eq!(mixer.motor_count(), 0);
    }

    #[test]
    fn halved_in_3d() {
        for definition in MIXER_TABLE.iter().filter(|d| !d.mode.is_custom()) {
            let mut config = config_for(definition.mode);
            config.features = Features::THREE_D;

            let mut mixer = Mixer::new(config);
            mixer.rebuild(MAX_MOTORS as u8).unwrap();

            for (active, row) in mixer.active_mixer().iter().zip(definition.motors.unwrap()) {
                assert_eq!(active.throttle, row.throttle);
                assert_eq!(active.roll, row.roll * 0.5);
                assert_eq!(active.pitch, row.pitch * 0.5);
                assert_eq!(active.yaw, row.yaw * 0.5);
            }
        }
    }

    #[test]
    fn single_motor_not_halved_in_3d() {
        let mut config = config_for(MixerMode::Custom);
        config.features = Features::THREE_D;
        config.custom_mixer[0] = MotorMixer::new(1.0, 0.4, 0.6, 0.8);

        let mut mixer = Mixer::new(config);
        mixer.rebuild(MAX_MOTORS as u8).unwrap();
        assert_eq!(mixer.active_mixer(), &[MotorMixer::new(1.0, 0.4, 0.6, 0.8)]);

        // Also when the output count leaves only one motor of an airframe
        config.mixer.mixer_mode = MixerMode::QuadX;
        mixer.configure(config, 1).unwrap();
        assert_eq!(mixer.active_mixer(), &QUAD_X[..1]);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let mut config = config_for(MixerMode::Hex6X);
        config.features = Features::THREE_D;

        let mut mixer = Mixer::new(config);
        mixer.rebuild(6).unwrap();
        let first: Vec<MotorMixer, MAX_MOTORS> = Vec::from_slice(mixer.active_mixer()).unwrap();

        mixer.rebuild(6).unwrap();
        assert_eq!(mixer.motor_count(), 6);
        for (a, b) in first.iter().zip(mixer.active_mixer()) {
            assert_eq!(a.roll.to_bits(), b.roll.to_bits());
            assert_eq!(a.pitch.to_bits(), b.pitch.to_bits());
            assert_eq!(a.yaw.to_bits(), b.yaw.to_bits());
            assert_eq!(a.throttle.to_bits(), b.throttle.to_bits());
        }
    }
}
