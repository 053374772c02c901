//! Delays

use crate::hal::blocking::delay::{DelayMs, DelayUs};
use crate::time::{Hertz, MicroSeconds};
use cast::u32;
use cortex_m::asm;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

pub trait DelayExt {
    fn delay(self, clock: Hertz) -> Delay;
}

impl DelayExt for SYST {
    fn delay(self, clock: Hertz) -> Delay {
        Delay::new(self, clock)
    }
}

/// Calibrated spin loop as a delay provider
///
/// The core executes no-ops for as many cycles as the requested time takes at
/// `clock`. Nothing else runs meanwhile and the wait can't be cancelled. If
/// `clock` doesn't match the real core clock the delays stretch or shrink by
/// the same ratio.
pub struct BusyWait {
    clock: Hertz,
}

impl BusyWait {
    /// Calibrates the spin loop against a core running at `clock`
    pub fn new(clock: Hertz) -> Self {
        assert!(clock.0 >= 1_000);
        BusyWait { clock }
    }

    /// Core clock the spin loop is calibrated against
    pub fn clock(&self) -> Hertz {
        self.clock
    }

    /// Number of cycles spun for a delay of `us` microseconds
    pub fn cycles_for_us(&self, us: u32) -> u64 {
        u64::from(self.clock.0) * u64::from(us) / 1_000_000
    }

    /// Number of cycles spun for a delay of `ms` milliseconds
    pub fn cycles_for_ms(&self, ms: u32) -> u64 {
        u64::from(self.clock.0) * u64::from(ms) / 1_000
    }

    fn spin(&mut self, mut cycles: u64) {
        // `asm::delay` takes at most `u32::MAX` cycles at a time.
        while cycles > 0 {
            let chunk = u32(cycles).unwrap_or(u32::MAX);
            asm::delay(chunk);
            cycles -= u64::from(chunk);
        }
    }
}

impl DelayMs<u32> for BusyWait {
    fn delay_ms(&mut self, ms: u32) {
        let cycles = self.cycles_for_ms(ms);
        self.spin(cycles);
    }
}

impl DelayMs<u16> for BusyWait {
    fn delay_ms(&mut self, ms: u16) {
        self.delay_ms(u32(ms));
    }
}

impl DelayMs<u8> for BusyWait {
    fn delay_ms(&mut self, ms: u8) {
        self.delay_ms(u32(ms));
    }
}

impl DelayUs<u32> for BusyWait {
    fn delay_us(&mut self, us: u32) {
        let cycles = self.cycles_for_us(us);
        self.spin(cycles);
    }
}

impl DelayUs<u16> for BusyWait {
    fn delay_us(&mut self, us: u16) {
        self.delay_us(u32(us))
    }
}

impl DelayUs<u8> for BusyWait {
    fn delay_us(&mut self, us: u8) {
        self.delay_us(u32(us))
    }
}

/// System timer (SysTick) as a delay provider
pub struct Delay {
    ticks_per_us: u32,
    syst: SYST,
}

impl Delay {
    /// Configures the system timer (SysTick) as a delay provider
    pub fn new(mut syst: SYST, clock: Hertz) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        let freq = clock.0;
        assert!(freq > 1_000_000_u32);
        let ticks_per_us = freq / 1_000_000_u32;
        Delay { ticks_per_us, syst }
    }

    /// Wait for the given time.
    pub fn delay<T>(&mut self, delay: T)
    where
        T: Into<MicroSeconds>,
    {
        let delay: MicroSeconds = delay.into();
        self.delay_us(delay.0)
    }

    /// Releases the system timer (SysTick) resource
    pub fn free(self) -> SYST {
        self.syst
    }

    fn wait_ticks(&mut self, mut total_rvr: u64) {
        const MAX_RVR: u32 = 0x00FF_FFFF;
        while total_rvr > 0 {
            let current_rvr = if total_rvr <= u64::from(MAX_RVR) {
                total_rvr as u32
            } else {
                MAX_RVR
            };
            self.syst.set_reload(current_rvr);
            self.syst.clear_current();
            self.syst.enable_counter();
            total_rvr -= u64::from(current_rvr);
            while !self.syst.has_wrapped() {}
            self.syst.disable_counter();
        }
    }
}

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        let ticks = u64::from(self.ticks_per_us) * u64::from(ms) * 1_000;
        self.wait_ticks(ticks);
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.delay_ms(u32(ms));
    }
}

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        self.delay_ms(u32(ms));
    }
}

impl DelayUs<u32> for Delay {
    fn delay_us(&mut self, us: u32) {
        let ticks = u64::from(self.ticks_per_us) * u64::from(us);
        self.wait_ticks(ticks);
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        self.delay_us(u32(us))
    }
}

impl DelayUs<u8> for Delay {
    fn delay_us(&mut self, us: u8) {
        self.delay_us(u32(us))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::U32Ext;

    #[test]
    fn busy_wait_calibration() {
        let delay = BusyWait::new(8.mhz());

        assert_eq!(delay.clock(), Hertz(8_000_000));
        assert_eq!(delay.cycles_for_ms(500), 4_000_000);
        assert_eq!(delay.cycles_for_ms(1), 8_000);
        assert_eq!(delay.cycles_for_us(1), 8);
        assert_eq!(delay.cycles_for_us(0), 0);
    }

    #[test]
    fn busy_wait_does_not_overflow() {
        let delay = BusyWait::new(64.mhz());

        assert_eq!(delay.cycles_for_ms(u32::MAX), 64_000 * u64::from(u32::MAX));
    }

    #[test]
    fn slow_clocks_round_down() {
        let delay = BusyWait::new(32_768.hz());

        assert_eq!(delay.cycles_for_ms(1), 32);
        assert_eq!(delay.cycles_for_ms(500), 16_384);
        assert_eq!(delay.cycles_for_us(10), 0);
    }

    #[test]
    #[should_panic]
    fn busy_wait_needs_a_clock() {
        BusyWait::new(999.hz());
    }
}
