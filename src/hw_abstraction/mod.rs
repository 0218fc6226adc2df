/// Output stage driving the motors (PWM, DShot, ...). Motor `index` refers
/// to the row of the active mixer, the implementor is responsible for
/// mapping it to the physical output channel.
#[allow(async_fn_in_trait)]
pub trait MotorOutput {
    /// Number of motor outputs the hardware exposes
    fn output_count(&self) -> u8;
    async fn write_motor(&mut self, index: usize, value: i16);
    async fn shutdown_pulses(&mut self, motor_count: usize);
}
