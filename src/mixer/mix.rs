use super::Mixer;
use crate::consts::{MAX_MOTORS, THROTTLE_CLIPPING_FACTOR};
use crate::types::config::MixerConfig;
use crate::types::control::{AxisDemand, MixerInput};
use crate::types::status::StateFlags;
use crate::utils::func::constrain;

/// Throttle command and the range it may be placed in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct ThrottleBand {
    command: i32,
    min: i32,
    max: i32,
}

impl ThrottleBand {
    fn range(&self) -> i32 {
        self.max - self.min
    }
}

/// Select the roll, pitch and yaw demand to mix. Fixed-wing vehicles in
/// manual mode pass the sticks straight through, otherwise the attitude
/// controller output is used, with yaw limited to prevent yaw jumps.
pub(crate) fn axis_input(input: &MixerInput, motor_count: usize, config: &MixerConfig) -> AxisDemand {
    if input.state.contains(StateFlags::FIXED_WING) && input.manual_mode {
        return input.rc_command.axes();
    }

    let mut demand = input.axis_pid;

    if motor_count >= 4 && config.yaw_jump_prevention_active() {
        let bound = config.yaw_jump_prevention_limit as i32 + (input.rc_command.yaw as i32).abs();
        demand.yaw = constrain(demand.yaw as i32, -bound, bound) as i16;
    }

    demand
}

impl Mixer {
    /// Compute the motor commands for one control loop iteration.
    ///
    /// The resulting commands are available through [`Mixer::motors`]. While
    /// disarmed every motor receives its disarmed command.
    pub fn mix_table(&mut self, input: &MixerInput) {
        let count = self.active.len();
        let demand = axis_input(input, count, &self.config.mixer);

        // Attitude part of every motor. The range always includes zero.
        let yaw_dir = -(self.config.mixer.yaw_motor_direction as i32);
        let mut rpy_mix = [0i16; MAX_MOTORS];
        let mut rpy_mix_max = 0i32;
        let mut rpy_mix_min = 0i32;

        for (mix, row) in rpy_mix.iter_mut().zip(self.active.iter()) {
            *mix = (demand.pitch as f32 * row.pitch
                + demand.roll as f32 * row.roll
                + (yaw_dir * demand.yaw as i32) as f32 * row.yaw) as i16;

            rpy_mix_max = rpy_mix_max.max(*mix as i32);
            rpy_mix_min = rpy_mix_min.min(*mix as i32);
        }

        let rpy_mix_range = rpy_mix_max - rpy_mix_min;

        let mut band = self.throttle_band(input);
        let throttle_range = band.range();

        // Part of the throttle range always kept for throttle alone
        let half_range = throttle_range / 2;
        let clip = throttle_range as f32 * THROTTLE_CLIPPING_FACTOR / 2.0;
        let clip_min = ((band.min + half_range) as f32 - clip) as i32;

        if rpy_mix_range > throttle_range {
            self.saturated = true;

            // Scale down attitude demand uniformly so it fits the throttle range
            if rpy_mix_range > 0 {
                let reduction = throttle_range as f32 / rpy_mix_range as f32;
                for mix in rpy_mix[..count].iter_mut() {
                    *mix = (reduction * *mix as f32) as i16;
                }
            }

            // Allow some clipping on edges to soften correction response
            band.max = ((band.min + half_range) as f32 + clip) as i32;
            band.min = clip_min;
        } else {
            self.saturated = false;

            // Shrink from both ends to fit the attitude demand. The upper
            // limit is placed relative to the already raised lower limit.
            band.min = (band.min + rpy_mix_range / 2).min(clip_min);
            let clip_max = ((band.min + half_range) as f32 + clip) as i32;
            band.max = (band.max - rpy_mix_range / 2).max(clip_max);
        }

        if !input.armed {
            self.motors[..count].copy_from_slice(&self.disarmed[..count]);
            return;
        }

        let config = &self.config;
        let min_command = config.motor.min_command as i32;
        let min_throttle = config.motor.min_throttle as i32;
        let max_throttle = config.motor.max_throttle as i32;
        let deadband3d_low = config.flight_3d.deadband3d_low as i32;
        let deadband3d_high = config.flight_3d.deadband3d_high as i32;
        let reversed = self.throttle_previous <= config.deadband3d_stick_low();

        let motor_stop = config.motor_stop()
            && (input.failsafe_requires_motor_stop
                || (!input.failsafe_active && input.nav_motor_stop_or_idle)
                || (!input.flying_autonomous
                    && !input.failsafe_active
                    && input.throttle_below_min_check));

        let stop_command = match config.is_3d() {
            true => config.rx.mid_rc,
            false => config.motor.min_command,
        };

        for (i, row) in self.active.iter().enumerate() {
            // Add in the desired throttle, but keep it in a range that doesn't
            // clip the attitude part. This can move throttle both down and up.
            let throttle = constrain((band.command as f32 * row.throttle) as i32, band.min, band.max);
            let mut motor = rpy_mix[i] as i32 + throttle;

            motor = if input.failsafe_active {
                constrain(motor, min_command, max_throttle)
            } else if config.is_3d() {
                match reversed {
                    true => constrain(motor, min_throttle, deadband3d_low),
                    false => constrain(motor, deadband3d_high, max_throttle),
                }
            } else {
                constrain(motor, min_throttle, max_throttle)
            };

            self.motors[i] = match motor_stop {
                true => stop_command,
                false => motor as i16,
            };
        }
    }

    /// Find the throttle command and the range it must stay within. In 3D
    /// mode this also tracks which side of the deadband the throttle was
    /// last on, so crossing the deadband never causes a jump in thrust.
    fn throttle_band(&mut self, input: &MixerInput) -> ThrottleBand {
        let config = &self.config;
        let min_throttle = config.motor.min_throttle as i32;
        let max_throttle = config.motor.max_throttle as i32;
        let throttle = input.rc_command.throttle;

        if !config.is_3d() {
            return ThrottleBand {
                command: throttle as i32,
                min: min_throttle,
                max: max_throttle,
            };
        }

        // Always start out in the positive direction after arming
        if !input.armed {
            self.throttle_previous = config.rx.mid_rc;
        }

        let deadband3d_low = config.flight_3d.deadband3d_low as i32;
        let deadband3d_high = config.flight_3d.deadband3d_high as i32;

        if throttle <= config.deadband3d_stick_low() {
            self.throttle_previous = throttle;
            ThrottleBand {
                command: throttle as i32,
                min: min_throttle,
                max: deadband3d_low,
            }
        } else if throttle >= config.deadband3d_stick_high() {
            self.throttle_previous = throttle;
            ThrottleBand {
                command: throttle as i32,
                min: deadband3d_high,
                max: max_throttle,
            }
        } else if self.throttle_previous <= config.deadband3d_stick_low() {
            ThrottleBand {
                command: deadband3d_low,
                min: min_throttle,
                max: deadband3d_low,
            }
        } else {
            ThrottleBand {
                command: deadband3d_high,
                min: deadband3d_high,
                max: max_throttle,
            }
        }
    }
}
