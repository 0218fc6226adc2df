use serde::{Deserialize, Serialize};

use crate::airframe::{MixerMode, MotorMixer};
use crate::consts::{MAX_MOTORS, YAW_JUMP_PREVENTION_LIMIT_HIGH};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformType {
    Multirotor,
    Airplane,
    Helicopter,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MixerConfig {
    /// Airframe to mix for
    pub mixer_mode: MixerMode,
    /// Direction in which yaw demand is applied to the motors, `1` or `-1`
    pub yaw_motor_direction: i8,
    /// Maximum yaw demand beyond the yaw stick deflection. Meaningful values
    /// lie between [`YAW_JUMP_PREVENTION_LIMIT_LOW`](crate::consts::YAW_JUMP_PREVENTION_LIMIT_LOW) and
    /// [`YAW_JUMP_PREVENTION_LIMIT_HIGH`], the limit is disabled when at or
    /// above the latter.
    pub yaw_jump_prevention_limit: u16,
    pub platform_type: PlatformType,
    pub has_flaps: bool,
}

impl MixerConfig {
    /// Whether the yaw demand is limited to prevent yaw jumps
    pub const fn yaw_jump_prevention_active(&self) -> bool {
        self.yaw_jump_prevention_limit < YAW_JUMP_PREVENTION_LIMIT_HIGH
    }
}

crate::const_default!(
    MixerConfig => {
        mixer_mode: MixerMode::QuadX,
        yaw_motor_direction: 1,
        yaw_jump_prevention_limit: 200,
        platform_type: PlatformType::Multirotor,
        has_flaps: false,
    }
);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Lowest command that keeps an armed motor spinning
    pub min_throttle: i16,
    /// Highest command sent to any motor
    pub max_throttle: i16,
    /// Command that keeps a motor stopped
    pub min_command: i16,
}

crate::const_default!(
    MotorConfig => {
        min_throttle: 1150,
        max_throttle: 1850,
        min_command: 1000,
    }
);

/// Motor command values used for bidirectional (3D) thrust.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flight3dConfig {
    /// Highest command producing reverse thrust
    pub deadband3d_low: i16,
    /// Lowest command producing forward thrust
    pub deadband3d_high: i16,
    /// Command at which the motors are stopped
    pub neutral3d: i16,
}

crate::const_default!(
    Flight3dConfig => {
        deadband3d_low: 1406,
        deadband3d_high: 1514,
        neutral3d: 1460,
    }
);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxConfig {
    /// Stick value at center position
    pub mid_rc: i16,
}

crate::const_default!(
    RxConfig => {
        mid_rc: 1500,
    }
);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RcControlsConfig {
    /// Half-width of the throttle stick deadband around `mid_rc` in 3D mode
    pub deadband3d_throttle: i16,
}

crate::const_default!(
    RcControlsConfig => {
        deadband3d_throttle: 50,
    }
);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features(u8);

bitflags::bitflags! {
    impl Features: u8 {
        /// Bidirectional thrust, the throttle stick center means zero thrust
        const THREE_D = 1 << 0;
        /// Stop the motors while armed with throttle stick low
        const MOTOR_STOP = 1 << 1;
    }
}

crate::const_default!(
    Features => Features::empty()
);

/// Everything the mixer needs to know about the vehicle configuration.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub mixer: MixerConfig,
    pub motor: MotorConfig,
    pub flight_3d: Flight3dConfig,
    pub rx: RxConfig,
    pub rc_controls: RcControlsConfig,
    pub features: Features,
    /// Motor rows used by the custom mixer modes. The first slot with zero
    /// throttle ends the table.
    pub custom_mixer: [MotorMixer; MAX_MOTORS],
}

crate::const_default!(
    Config => {
        mixer: MixerConfig::const_default(),
        motor: MotorConfig::const_default(),
        flight_3d: Flight3dConfig::const_default(),
        rx: RxConfig::const_default(),
        rc_controls: RcControlsConfig::const_default(),
        features: Features::const_default(),
        custom_mixer: [MotorMixer::UNUSED; MAX_MOTORS],
    }
);

impl Config {
    pub const fn is_3d(&self) -> bool {
        self.features.contains(Features::THREE_D)
    }

    pub const fn motor_stop(&self) -> bool {
        self.features.contains(Features::MOTOR_STOP)
    }

    /// Lower edge of the 3D throttle stick deadband
    pub fn deadband3d_stick_low(&self) -> i16 {
        self.rx.mid_rc - self.rc_controls.deadband3d_throttle
    }

    /// Upper edge of the 3D throttle stick deadband
    pub fn deadband3d_stick_high(&self) -> i16 {
        self.rx.mid_rc + self.rc_controls.deadband3d_throttle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::YAW_JUMP_PREVENTION_LIMIT_LOW;

    #[test]
    fn default_yaw_limit_in_range() {
        let config = Config::default();
        let limit = config.mixer.yaw_jump_prevention_limit;
        assert!((YAW_JUMP_PREVENTION_LIMIT_LOW..YAW_JUMP_PREVENTION_LIMIT_HIGH).contains(&limit));
        assert!(config.mixer.yaw_jump_prevention_active());
    }

    #[test]
    fn yaw_limit_disabled_at_high() {
        let mut config = Config::default();
        config.mixer.yaw_jump_prevention_limit = YAW_JUMP_PREVENTION_LIMIT_HIGH;
        assert!(!config.mixer.yaw_jump_prevention_active());

        config.mixer.yaw_jump_prevention_limit = YAW_JUMP_PREVENTION_LIMIT_LOW;
        assert!(config.mixer.yaw_jump_prevention_active());
    }

    #[test]
    fn deadband_edges() {
        let config = Config::default();
        assert_eq!(config.deadband3d_stick_low(), 1450);
        assert_eq!(config.deadband3d_stick_high(), 1550);
    }
}
