//! Timing configuration
//!
//! The busy-wait delay is only as accurate as the clock frequency it is
//! calibrated against, so the frequency is an explicit setting instead of an
//! assumption. Firmware normally uses [`Config::from_build`], whose values are
//! baked in at compile time from the `BLINKY_CLOCK_HZ` and
//! `BLINKY_INTERVAL_MS` environment variables. When unset, the interval is
//! 500 ms and the clock is the selected board's core clock, or 8 MHz without a
//! board.

use crate::time::{Hertz, MilliSeconds};

mod build {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

/// Clock frequency assumed when nothing else is configured
pub const DEFAULT_CLOCK: Hertz = Hertz(8_000_000);

/// Time between two toggles when nothing else is configured
pub const DEFAULT_INTERVAL: MilliSeconds = MilliSeconds(500);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The clock is too slow to count milliseconds (below 1 kHz)
    ClockTooSlow(Hertz),
    /// The toggle interval is zero
    ZeroInterval,
}

/// Timing configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    clock: Hertz,
    interval: MilliSeconds,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            clock: DEFAULT_CLOCK,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl Config {
    /// Configuration chosen at build time
    pub const fn from_build() -> Config {
        Config {
            clock: Hertz(build::CLOCK_HZ),
            interval: MilliSeconds(build::INTERVAL_MS),
        }
    }

    pub fn clock(mut self, clock: Hertz) -> Self {
        self.clock = clock;
        self
    }

    pub fn interval(mut self, interval: MilliSeconds) -> Self {
        self.interval = interval;
        self
    }

    pub fn clock_freq(&self) -> Hertz {
        self.clock
    }

    pub fn toggle_interval(&self) -> MilliSeconds {
        self.interval
    }

    /// Checks that the delays can be calibrated from this configuration
    pub fn validate(self) -> Result<Config, Error> {
        if self.clock.0 < 1_000 {
            return Err(Error::ClockTooSlow(self.clock));
        }
        if self.interval.0 == 0 {
            return Err(Error::ZeroInterval);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::U32Ext;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.clock_freq(), 8.mhz());
        assert_eq!(config.toggle_interval(), 500.ms());
        assert_eq!(config.validate(), Ok(config));
    }

    #[test]
    fn build_config_is_valid() {
        assert!(Config::from_build().validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = Config::default().clock(16.mhz()).interval(250.ms());

        assert_eq!(config.clock_freq(), Hertz(16_000_000));
        assert_eq!(config.toggle_interval(), MilliSeconds(250));
    }

    #[test]
    fn rejects_unusable_timing() {
        assert_eq!(
            Config::default().clock(999.hz()).validate(),
            Err(Error::ClockTooSlow(Hertz(999)))
        );
        assert_eq!(
            Config::default().interval(0.ms()).validate(),
            Err(Error::ZeroInterval)
        );
    }
}
