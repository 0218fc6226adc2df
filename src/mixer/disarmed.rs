use super::Mixer;
use crate::consts::MAX_MOTORS;

/// Command sent to every motor while disarmed. In 3D mode the motors are
/// stopped at the neutral point, otherwise at the minimum command.
pub const fn disarmed_command(is_3d: bool, neutral3d: i16, min_command: i16) -> i16 {
    if is_3d {
        neutral3d
    } else {
        min_command
    }
}

impl Mixer {
    /// Recompute the disarmed command of all motor slots from the current
    /// configuration.
    pub fn reset_disarmed_motors(&mut self) {
        let command = disarmed_command(
            self.config.is_3d(),
            self.config.flight_3d.neutral3d,
            self.config.motor.min_command,
        );
        self.disarmed = [command; MAX_MOTORS];
    }

    /// Commands used in place of the mix while disarmed, for all slots
    pub fn disarmed_motors(&self) -> &[i16; MAX_MOTORS] {
        &self.disarmed
    }
}
