use static_assertions::const_assert;

/// Maximum number of motors the mixer can drive
pub const MAX_MOTORS: usize = 8;

/// Lower bound of the sensible yaw-jump-prevention range
pub const YAW_JUMP_PREVENTION_LIMIT_LOW: u16 = 80;

/// Yaw-jump-prevention limits at or above this value disable the yaw clamp
pub const YAW_JUMP_PREVENTION_LIMIT_HIGH: u16 = 500;

/// Share of the throttle range always kept for throttle, even when the
/// roll/pitch/yaw mix has to be scaled down to fit.
pub const THROTTLE_CLIPPING_FACTOR: f32 = 0.33;

/// Time given to the ESCs to react after all motors are stopped [ms]
pub const MOTOR_STOP_SETTLE_MS: u64 = 50;

// The octocopter geometries in the catalog need eight outputs
const_assert!(MAX_MOTORS >= 8);
const_assert!(YAW_JUMP_PREVENTION_LIMIT_LOW < YAW_JUMP_PREVENTION_LIMIT_HIGH);
