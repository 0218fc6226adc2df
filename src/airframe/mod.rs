//! Catalog of the airframe geometries known to the mixer.
//!
//! Each airframe is described by one [`MotorMixer`] row per motor, giving
//! the weight with which that motor contributes to throttle, roll, pitch and
//! yaw. The position of a row within a table is the motor index, and thereby
//! the output channel the motor must be wired to. Rows must never be
//! reordered.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::{consts::MAX_MOTORS, errors::MixerError};

/// Contribution of a single motor to each control axis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorMixer {
    pub throttle: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl MotorMixer {
    /// A slot with zero throttle marks the end of a custom mixer table.
    pub const UNUSED: MotorMixer = MotorMixer::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(throttle: f32, roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            throttle,
            roll,
            pitch,
            yaw,
        }
    }

    pub fn is_unused(&self) -> bool {
        self.throttle == 0.0
    }
}

impl Default for MotorMixer {
    fn default() -> Self {
        Self::UNUSED
    }
}

/// Numeric mixer mode identifiers. Not every mode is compiled into the
/// catalog, use [`is_mixer_supported`] to check.
#[repr(u8)]
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MixerMode {
    Tri = 1,
    QuadP = 2,
    QuadX = 3,
    Bicopter = 4,
    Gimbal = 5,
    Y6 = 6,
    Hex6 = 7,
    FlyingWing = 8,
    Y4 = 9,
    Hex6X = 10,
    OctoX8 = 11,
    OctoFlatP = 12,
    OctoFlatX = 13,
    Airplane = 14,
    Heli120Ccpm = 15,
    Heli90Deg = 16,
    Vtail4 = 17,
    Hex6H = 18,
    PpmToServo = 19,
    Dualcopter = 20,
    Singlecopter = 21,
    Atail4 = 22,
    Custom = 23,
    CustomAirplane = 24,
    CustomTri = 25,
}

impl MixerMode {
    /// Whether the motor table of this mode comes from the user supplied
    /// custom mixer rather than from the catalog.
    pub const fn is_custom(self) -> bool {
        matches!(
            self,
            MixerMode::Custom | MixerMode::CustomTri | MixerMode::CustomAirplane
        )
    }

    /// Convert a zero-based preset index (as listed to users) into a mode.
    pub fn from_preset_index(index: u8) -> Result<Self, MixerError> {
        let raw = index.checked_add(1).ok_or(MixerError::UnknownMode(index))?;
        MixerMode::try_from(raw).map_err(|e| MixerError::UnknownMode(e.number))
    }
}

/// Compiled-in description of an airframe.
#[derive(Debug, Clone, Copy)]
pub struct MixerDefinition {
    pub mode: MixerMode,
    pub motor_count: u8,
    pub use_servos: bool,
    /// Motor rows, `None` for modes whose rows come from the custom mixer.
    pub motors: Option<&'static [MotorMixer]>,
}

impl MixerDefinition {
    const fn new(
        mode: MixerMode,
        motor_count: u8,
        use_servos: bool,
        motors: Option<&'static [MotorMixer]>,
    ) -> Self {
        Self {
            mode,
            motor_count,
            use_servos,
            motors,
        }
    }
}

const fn m(throttle: f32, roll: f32, pitch: f32, yaw: f32) -> MotorMixer {
    MotorMixer::new(throttle, roll, pitch, yaw)
}

/// Quadcopter "x" configuration
/// ```text
///   front
/// M4     M2
///   \   /
///     |
///   /   \
/// M3     M1
/// ```
pub static QUAD_X: [MotorMixer; 4] = [
    m(1.0, -1.0, 1.0, -1.0), // rear right
    m(1.0, -1.0, -1.0, 1.0), // front right
    m(1.0, 1.0, 1.0, 1.0),   // rear left
    m(1.0, 1.0, -1.0, -1.0), // front left
];

/// Tricopter, yaw is handled by the tail servo so the motors carry no yaw
/// authority. Pitch is rescaled such that the tail balances both arms.
pub static TRICOPTER: [MotorMixer; 3] = [
    m(1.0, 0.0, 1.333333, 0.0),   // rear
    m(1.0, -1.0, -0.666667, 0.0), // right
    m(1.0, 1.0, -0.666667, 0.0),  // left
];

/// Quadcopter "+" configuration
/// ```text
///    front
///      M4
///      |
/// M3---+---M2
///      |
///      M1
/// ```
pub static QUAD_P: [MotorMixer; 4] = [
    m(1.0, 0.0, 1.0, -1.0),  // rear
    m(1.0, -1.0, 0.0, 1.0),  // right
    m(1.0, 1.0, 0.0, 1.0),   // left
    m(1.0, 0.0, -1.0, -1.0), // front
];

#[cfg(feature = "uncommon-mixers")]
pub static VTAIL_4: [MotorMixer; 4] = [
    m(1.0, -0.58, 0.58, 1.0),  // rear right
    m(1.0, -0.46, -0.39, -0.5), // front right
    m(1.0, 0.58, 0.58, -1.0),  // rear left
    m(1.0, 0.46, -0.39, 0.5),  // front left
];

#[cfg(feature = "uncommon-mixers")]
pub static ATAIL_4: [MotorMixer; 4] = [
    m(1.0, 0.0, 1.0, 1.0),   // rear right
    m(1.0, -1.0, -1.0, 0.0), // front right
    m(1.0, 0.0, 1.0, -1.0),  // rear left
    m(1.0, 1.0, -1.0, -0.0), // front left
];

#[cfg(feature = "uncommon-mixers")]
pub static Y4: [MotorMixer; 4] = [
    m(1.0, 0.0, 1.0, -1.0),  // rear top, CW
    m(1.0, -1.0, -1.0, 0.0), // front right, CCW
    m(1.0, 0.0, 1.0, 1.0),   // rear bottom, CCW
    m(1.0, 1.0, -1.0, 0.0),  // front left, CW
];

#[cfg(feature = "uncommon-mixers")]
pub static HEX_6H: [MotorMixer; 6] = [
    m(1.0, -1.0, 1.0, -1.0), // rear right
    m(1.0, -1.0, -1.0, 1.0), // front right
    m(1.0, 1.0, 1.0, 1.0),   // rear left
    m(1.0, 1.0, -1.0, -1.0), // front left
    m(1.0, 0.0, 0.0, 0.0),   // right
    m(1.0, 0.0, 0.0, 0.0),   // left
];

#[cfg(feature = "uncommon-mixers")]
pub static Y6: [MotorMixer; 6] = [
    m(1.0, 0.0, 1.333333, 1.0),    // rear
    m(1.0, -1.0, -0.666667, -1.0), // right
    m(1.0, 1.0, -0.666667, -1.0),  // left
    m(1.0, 0.0, 1.333333, -1.0),   // under rear
    m(1.0, -1.0, -0.666667, 1.0),  // under right
    m(1.0, 1.0, -0.666667, 1.0),   // under left
];

#[cfg(feature = "uncommon-mixers")]
pub static HEX_6P: [MotorMixer; 6] = [
    m(1.0, -0.866025, 0.5, 1.0),  // rear right
    m(1.0, -0.866025, -0.5, -1.0), // front right
    m(1.0, 0.866025, 0.5, 1.0),   // rear left
    m(1.0, 0.866025, -0.5, -1.0), // front left
    m(1.0, 0.0, -1.0, 1.0),       // front
    m(1.0, 0.0, 1.0, -1.0),       // rear
];

#[cfg(feature = "uncommon-mixers")]
pub static OCTO_FLAT_P: [MotorMixer; 8] = [
    m(1.0, 0.707107, -0.707107, 1.0),  // front left
    m(1.0, -0.707107, -0.707107, 1.0), // front right
    m(1.0, -0.707107, 0.707107, 1.0),  // rear right
    m(1.0, 0.707107, 0.707107, 1.0),   // rear left
    m(1.0, 0.0, -1.0, -1.0),           // front
    m(1.0, -1.0, 0.0, -1.0),           // right
    m(1.0, 0.0, 1.0, -1.0),            // rear
    m(1.0, 1.0, 0.0, -1.0),            // left
];

#[cfg(feature = "uncommon-mixers")]
pub static OCTO_FLAT_X: [MotorMixer; 8] = [
    m(1.0, 1.0, -0.414178, 1.0),   // mid-front left
    m(1.0, -0.414178, -1.0, 1.0),  // front right
    m(1.0, -1.0, 0.414178, 1.0),   // mid-rear right
    m(1.0, 0.414178, 1.0, 1.0),    // rear left
    m(1.0, 0.414178, -1.0, -1.0),  // front left
    m(1.0, -1.0, -0.414178, -1.0), // mid-front right
    m(1.0, -0.414178, 1.0, -1.0),  // rear right
    m(1.0, 1.0, 0.414178, -1.0),   // mid-rear left
];

#[cfg(feature = "uncommon-mixers")]
pub static OCTO_X8: [MotorMixer; 8] = [
    m(1.0, -1.0, 1.0, -1.0), // rear right
    m(1.0, -1.0, -1.0, 1.0), // front right
    m(1.0, 1.0, 1.0, 1.0),   // rear left
    m(1.0, 1.0, -1.0, -1.0), // front left
    m(1.0, -1.0, 1.0, 1.0),  // under rear right
    m(1.0, -1.0, -1.0, -1.0), // under front right
    m(1.0, 1.0, 1.0, -1.0),  // under rear left
    m(1.0, 1.0, -1.0, 1.0),  // under front left
];

pub static HEX_6X: [MotorMixer; 6] = [
    m(1.0, -0.5, 0.866025, 1.0),   // rear right
    m(1.0, -0.5, -0.866025, 1.0),  // front right
    m(1.0, 0.5, 0.866025, -1.0),   // rear left
    m(1.0, 0.5, -0.866025, -1.0),  // front left
    m(1.0, -1.0, 0.0, -1.0),       // right
    m(1.0, 1.0, 0.0, 1.0),         // left
];

/// Two pusher/puller motors that only take throttle, attitude is left to
/// the control surfaces.
pub static DUAL_PROP: [MotorMixer; 2] = [
    m(1.0, 0.0, 0.0, 0.0),
    m(1.0, 0.0, 0.0, 0.0),
];

use MixerMode as M;

/// All airframes compiled into this build
pub static MIXER_TABLE: &[MixerDefinition] = &[
    MixerDefinition::new(M::Tri, 3, true, Some(&TRICOPTER)),
    MixerDefinition::new(M::CustomTri, 3, false, None),
    MixerDefinition::new(M::QuadP, 4, false, Some(&QUAD_P)),
    MixerDefinition::new(M::QuadX, 4, false, Some(&QUAD_X)),
    MixerDefinition::new(M::Hex6X, 6, false, Some(&HEX_6X)),
    MixerDefinition::new(M::Custom, 0, false, None),
    MixerDefinition::new(M::FlyingWing, 2, true, Some(&DUAL_PROP)),
    MixerDefinition::new(M::Airplane, 2, true, Some(&DUAL_PROP)),
    MixerDefinition::new(M::CustomAirplane, 2, true, None),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Y4, 4, false, Some(&Y4)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Atail4, 4, false, Some(&ATAIL_4)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Vtail4, 4, false, Some(&VTAIL_4)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Y6, 6, false, Some(&Y6)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Hex6, 6, false, Some(&HEX_6P)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::Hex6H, 6, false, Some(&HEX_6H)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::OctoX8, 8, false, Some(&OCTO_X8)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::OctoFlatP, 8, false, Some(&OCTO_FLAT_P)),
    #[cfg(feature = "uncommon-mixers")]
    MixerDefinition::new(M::OctoFlatX, 8, false, Some(&OCTO_FLAT_X)),
];

/// Look up the airframe definition for `mode`. Returns `None` if the mode is
/// not compiled into this build.
pub fn find_mixer(mode: MixerMode) -> Option<&'static MixerDefinition> {
    MIXER_TABLE.iter().find(|def| def.mode == mode)
}

pub fn is_mixer_supported(mode: MixerMode) -> bool {
    find_mixer(mode).is_some()
}

/// Preload the custom mixer `slots` with the motor rows of `mode`, such that
/// a custom mixer can be built starting from a known airframe.
///
/// All slots are marked unused before the rows are copied. If `mode` is not
/// supported the slots are left untouched.
pub fn load_mix(mode: MixerMode, slots: &mut [MotorMixer; MAX_MOTORS]) -> Result<(), MixerError> {
    const ID: &str = "load_mix";

    let definition = find_mixer(mode).ok_or(MixerError::UnsupportedMode(mode))?;

    for slot in slots.iter_mut() {
        slot.throttle = 0.0;
    }

    if let Some(motors) = definition.motors {
        slots
            .iter_mut()
            .zip(motors.iter())
            .for_each(|(slot, row)| *slot = *row);
    }

    debug!("{}: Loaded preset {:?} into custom mixer", ID, mode);
    Ok(())
}
