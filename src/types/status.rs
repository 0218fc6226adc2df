use super::config::{MixerConfig, PlatformType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateFlags(u8);

bitflags::bitflags! {
    /// Vehicle capabilities derived from the mixer configuration. Other
    /// subsystems may own additional bits, which are left untouched here.
    impl StateFlags: u8 {

        /// **Bit 0** - The vehicle is flying on wings.
        const FIXED_WING = 1 << 0;

        /// **Bit 1** - The vehicle is a helicopter.
        const HELICOPTER = 1 << 1;

        /// **Bit 2** - Flaperons can be used.
        const FLAPERON_AVAILABLE = 1 << 2;
    }
}

impl StateFlags {
    /// Set the platform related flags according to `config`, leaving all
    /// other flags as they are.
    pub fn update_from(&mut self, config: &MixerConfig) {
        let (fixed_wing, helicopter) = match config.platform_type {
            PlatformType::Airplane => (true, false),
            PlatformType::Helicopter => (false, true),
            PlatformType::Multirotor => (false, false),
        };

        self.set(StateFlags::FIXED_WING, fixed_wing);
        self.set(StateFlags::HELICOPTER, helicopter);
        self.set(StateFlags::FLAPERON_AVAILABLE, config.has_flaps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airplane_with_flaps() {
        let config = MixerConfig {
            platform_type: PlatformType::Airplane,
            has_flaps: true,
            ..MixerConfig::default()
        };

        let mut flags = StateFlags::HELICOPTER;
        flags.update_from(&config);
        assert_eq!(flags, StateFlags::FIXED_WING | StateFlags::FLAPERON_AVAILABLE);
    }

    #[test]
    fn helicopter() {
        let config = MixerConfig {
            platform_type: PlatformType::Helicopter,
            ..MixerConfig::default()
        };

        let mut flags = StateFlags::FIXED_WING | StateFlags::FLAPERON_AVAILABLE;
        flags.update_from(&config);
        assert_eq!(flags, StateFlags::HELICOPTER);
    }

    #[test]
    fn multirotor_keeps_foreign_bits() {
        let foreign = StateFlags::from_bits_retain(1 << 7);
        let mut flags = foreign | StateFlags::FIXED_WING;
        flags.update_from(&MixerConfig::default());
        assert_eq!(flags, foreign);
    }
}
