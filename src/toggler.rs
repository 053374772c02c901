//! Pin toggler
//!
//! Configures one pin as an output, then flips it forever at a fixed
//! interval:
//!
//! ```text
//! initialize() → loop { toggle(); wait(interval) }
//! ```
//!
//! Toggling is a read-modify-write XOR of the pin's output bit, so the
//! level alternates strictly starting from whatever the hardware came out of
//! reset with.

use crate::config::{self, Config};
use crate::delay::BusyWait;
use crate::gpio::{Input, Level, Output, Pin};
use crate::hal::blocking::delay::DelayMs;
use crate::hal::digital::v2::{StatefulOutputPin, ToggleableOutputPin};
use crate::hal::timer::{CountDown, Periodic};
use crate::register::Register;
use crate::time::MilliSeconds;
use void::{ResultVoidExt, Void};

/// Toggles a pin, blocking on a delay provider between toggles
pub struct PinToggler<P, D> {
    pin: P,
    delay: D,
    interval: MilliSeconds,
    level: Level,
    toggles: u32,
}

impl<P, D, E> PinToggler<P, D>
where
    P: StatefulOutputPin<Error = E> + ToggleableOutputPin<Error = E>,
{
    /// Takes a pin that is already an output.
    ///
    /// The starting level is read back from the pin.
    pub fn new(pin: P, delay: D, interval: MilliSeconds) -> Result<Self, E> {
        let level = Level::from(pin.is_set_high()?);
        Ok(PinToggler {
            pin,
            delay,
            interval,
            level,
            toggles: 0,
        })
    }

    /// Level the pin was left at by the last toggle
    pub fn level(&self) -> Level {
        self.level
    }

    /// Number of toggles so far (wraps around)
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn interval(&self) -> MilliSeconds {
        self.interval
    }

    /// Releases the pin and the delay provider
    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D, E> PinToggler<P, D>
where
    P: StatefulOutputPin<Error = E> + ToggleableOutputPin<Error = E>,
    D: DelayMs<u32>,
{
    /// One period: flips the pin, then blocks for the interval.
    ///
    /// Returns the level the pin was flipped to.
    pub fn step(&mut self) -> Result<Level, E> {
        self.pin.toggle()?;
        self.level = !self.level;
        self.toggles = self.toggles.wrapping_add(1);

        self.delay.delay_ms(self.interval.0);
        Ok(self.level)
    }

    /// Toggles until the pin reports an error.
    pub fn try_run(mut self) -> Result<Void, E> {
        loop {
            self.step()?;
        }
    }
}

impl<P, D> PinToggler<P, D>
where
    P: StatefulOutputPin<Error = Void> + ToggleableOutputPin<Error = Void>,
    D: DelayMs<u32>,
{
    /// Toggles forever.
    pub fn run(self) -> ! {
        void::unreachable(self.try_run().void_unwrap())
    }
}

impl<DIR, OUT, D> PinToggler<Pin<DIR, OUT, Output>, D>
where
    DIR: Register,
    OUT: Register<Word = DIR::Word>,
{
    /// Configures `pin` as an output and toggles it every `interval`.
    ///
    /// Only the pin's bit in the direction register is written.
    pub fn initialize(pin: Pin<DIR, OUT, Input>, delay: D, interval: MilliSeconds) -> Self {
        PinToggler::new(pin.into_output(), delay, interval).void_unwrap()
    }
}

impl<DIR, OUT> PinToggler<Pin<DIR, OUT, Output>, BusyWait>
where
    DIR: Register,
    OUT: Register<Word = DIR::Word>,
{
    /// Configures `pin` as an output, blocking with a spin loop calibrated
    /// against the configured clock.
    ///
    /// Fails without touching the pin if `config` can't be calibrated.
    pub fn busy_wait(pin: Pin<DIR, OUT, Input>, config: Config) -> Result<Self, config::Error> {
        let config = config.validate()?;
        let delay = BusyWait::new(config.clock_freq());
        Ok(PinToggler::initialize(pin, delay, config.toggle_interval()))
    }
}

/// Toggles a pin whenever a periodic count down timer expires
///
/// Unlike [`PinToggler`] nothing blocks: `poll` returns `WouldBlock` until
/// the period is over.
pub struct PolledToggler<P, T> {
    pin: P,
    timer: T,
    level: Level,
    toggles: u32,
}

impl<P, T, E> PolledToggler<P, T>
where
    P: StatefulOutputPin<Error = E> + ToggleableOutputPin<Error = E>,
    T: CountDown + Periodic,
{
    /// Takes a pin that is already an output and starts `timer` with `interval`.
    pub fn new(pin: P, mut timer: T, interval: MilliSeconds) -> Result<Self, E>
    where
        MilliSeconds: Into<T::Time>,
    {
        let level = Level::from(pin.is_set_high()?);
        timer.start(interval);
        Ok(PolledToggler {
            pin,
            timer,
            level,
            toggles: 0,
        })
    }

    /// Flips the pin if the period is over.
    pub fn poll(&mut self) -> nb::Result<Level, E> {
        match self.timer.wait() {
            Ok(()) => {}
            Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(never)) => void::unreachable(never),
        }

        self.pin.toggle().map_err(nb::Error::Other)?;
        self.level = !self.level;
        self.toggles = self.toggles.wrapping_add(1);
        Ok(self.level)
    }

    /// Polls until the pin reports an error.
    pub fn try_run(mut self) -> Result<Void, E> {
        loop {
            nb::block!(self.poll())?;
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    /// Releases the pin and the timer
    pub fn free(self) -> (P, T) {
        (self.pin, self.timer)
    }
}

impl<P, T> PolledToggler<P, T>
where
    P: StatefulOutputPin<Error = Void> + ToggleableOutputPin<Error = Void>,
    T: CountDown + Periodic,
{
    /// Toggles forever.
    pub fn run(self) -> ! {
        void::unreachable(self.try_run().void_unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimDelay, SimRegister, SimTimer};
    use crate::time::U32Ext;

    #[test]
    fn initialize_reads_power_on_level() {
        let dir = SimRegister::new(0u8);
        let out = SimRegister::new(0b0000_0001u8);
        let clock = SimDelay::new();

        let pin = Pin::new(&dir, &out, 0).unwrap();
        let toggler = PinToggler::initialize(pin, &clock, 500.ms());
        assert_eq!(toggler.level(), Level::High);
        assert_eq!(toggler.toggles(), 0);
        assert_eq!(toggler.interval(), MilliSeconds(500));
        assert_eq!(clock.waits(), 0);
    }

    #[test]
    fn step_toggles_then_waits() {
        let dir = SimRegister::new(0u8);
        let out = SimRegister::new(0u8);
        let clock = SimDelay::new();

        let pin = Pin::new(&dir, &out, 3).unwrap();
        let mut toggler = PinToggler::initialize(pin, &clock, MilliSeconds(20));
        assert_eq!(toggler.step().void_unwrap(), Level::High);
        assert_eq!(out.value(), 0b1000);
        assert_eq!(clock.now_ms(), 20);
        assert_eq!(toggler.toggles(), 1);

        let (pin, _) = toggler.free();
        assert_eq!(pin.level(), Level::High);
    }

    #[test]
    fn busy_wait_uses_configured_clock() {
        let dir = SimRegister::new(0u32);
        let out = SimRegister::new(0u32);

        let config = Config::default().interval(MilliSeconds(100));
        let toggler = PinToggler::busy_wait(Pin::new(&dir, &out, 21).unwrap(), config).unwrap();
        assert_eq!(toggler.interval(), MilliSeconds(100));

        let (_, delay) = toggler.free();
        assert_eq!(delay.clock(), config.clock_freq());
        assert_eq!(delay.cycles_for_ms(100), 800_000);
    }

    #[test]
    fn busy_wait_rejects_unusable_config() {
        let dir = SimRegister::new(0u32);
        let out = SimRegister::new(0u32);

        let slow = Config::default().clock(999.hz());
        assert_eq!(
            PinToggler::busy_wait(Pin::new(&dir, &out, 21).unwrap(), slow).err(),
            Some(config::Error::ClockTooSlow(999.hz()))
        );

        let stopped = Config::default().interval(0.ms());
        assert_eq!(
            PinToggler::busy_wait(Pin::new(&dir, &out, 21).unwrap(), stopped).err(),
            Some(config::Error::ZeroInterval)
        );
        assert_eq!(dir.accesses() + out.accesses(), 0);
    }

    #[test]
    fn polled_toggler_waits_for_timer() {
        let dir = SimRegister::new(0u8);
        let out = SimRegister::new(0u8);
        let timer = SimTimer::new();

        let pin = Pin::new(&dir, &out, 0).unwrap().into_output();
        let mut toggler = PolledToggler::new(pin, &timer, MilliSeconds(500)).void_unwrap();
        assert_eq!(timer.period(), MilliSeconds(500));

        assert!(toggler.poll().is_err());
        timer.advance(500);
        assert_eq!(toggler.poll().ok(), Some(Level::High));
        assert!(toggler.poll().is_err());
        timer.advance(500);
        assert_eq!(toggler.poll().ok(), Some(Level::Low));
        assert_eq!(toggler.toggles(), 2);
        assert_eq!(out.value(), 0);
    }
}
