use super::status::StateFlags;

/// Signed roll, pitch and yaw demand, nominally within `[-500, 500]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisDemand {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl AxisDemand {
    pub const fn new(roll: i16, pitch: i16, yaw: i16) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Stick commands after receiver mapping. Roll, pitch and yaw are centered
/// around zero, throttle is an absolute motor-command-scale value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RcCommand {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
    pub throttle: i16,
}

impl RcCommand {
    pub const fn axes(&self) -> AxisDemand {
        AxisDemand::new(self.roll, self.pitch, self.yaw)
    }
}

/// Signals consumed by a single mixer tick. All of these are produced by
/// other parts of the flight controller.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MixerInput {
    /// Output of the attitude controller
    pub axis_pid: AxisDemand,
    /// Stick commands, used for manual passthrough and yaw jump prevention
    pub rc_command: RcCommand,
    /// Vehicle state, only `FIXED_WING` is consulted by the mixer
    pub state: StateFlags,
    pub armed: bool,
    /// Manual (passthrough) flight mode is active
    pub manual_mode: bool,
    /// The raw throttle stick is below the minimum check value
    pub throttle_below_min_check: bool,
    pub failsafe_active: bool,
    pub failsafe_requires_motor_stop: bool,
    /// Navigation wants the motors stopped or idling
    pub nav_motor_stop_or_idle: bool,
    pub flying_autonomous: bool,
}
