use embassy_time::Timer;

use super::Mixer;
use crate::consts::MOTOR_STOP_SETTLE_MS;
use crate::hw_abstraction::MotorOutput;

const ID: &str = "motor_output";

impl Mixer {
    /// Send the commands of the latest tick to the motors.
    pub async fn write_motors(&self, output: &mut impl MotorOutput) {
        for (index, &value) in self.motors().iter().enumerate() {
            output.write_motor(index, value).await;
        }
    }

    /// Override the command of every active motor with `value` and send it.
    /// The override persists until the next [`Mixer::mix_table`].
    pub async fn write_all_motors(&mut self, output: &mut impl MotorOutput, value: i16) {
        let count = self.active.len();
        self.motors[..count].fill(value);
        self.write_motors(output).await;
    }

    /// Command all motors to their disarmed value and give the output
    /// stage time to settle.
    pub async fn stop_motors(&mut self, output: &mut impl MotorOutput) {
        let config = &self.config;
        let value = super::disarmed_command(
            config.is_3d(),
            config.flight_3d.neutral3d,
            config.motor.min_command,
        );

        self.write_all_motors(output, value).await;
        Timer::after_millis(MOTOR_STOP_SETTLE_MS).await;

        info!("{}: Motors stopped at {}", ID, value);
    }

    /// Stop generating pulses on all motor outputs.
    pub async fn stop_pwm_all_motors(&self, output: &mut impl MotorOutput) {
        output.shutdown_pulses(self.active.len()).await;
        debug!("{}: Pulses shut down on {} outputs", ID, self.active.len());
    }
}
