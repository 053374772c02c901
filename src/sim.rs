//! Simulated hardware
//!
//! Registers, delays and timers backed by plain memory, for running drivers
//! on a host. Every type is shared through `&` references, so a test can keep
//! observing a register or clock while a driver owns a handle to it.

use core::cell::Cell;

use crate::hal::blocking::delay::{DelayMs, DelayUs};
use crate::hal::timer::{CountDown, Periodic};
use crate::register::{Register, Word};
use crate::time::MilliSeconds;
use void::Void;

/// Register whose value lives in memory, counting every access
pub struct SimRegister<W> {
    value: Cell<W>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl<W: Word> SimRegister<W> {
    /// Creates a register holding its reset value
    pub fn new(reset: W) -> Self {
        SimRegister {
            value: Cell::new(reset),
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    /// Current value, without counting as an access
    pub fn value(&self) -> W {
        self.value.get()
    }

    /// Changes the value from the hardware side, without counting as an access
    pub fn set(&self, value: W) {
        self.value.set(value);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn accesses(&self) -> usize {
        self.reads() + self.writes()
    }
}

impl<W: Word> Register for &'_ SimRegister<W> {
    type Word = W;

    fn read(&self) -> W {
        self.reads.set(self.reads.get() + 1);
        self.value.get()
    }

    fn write(&mut self, value: W) {
        self.writes.set(self.writes.get() + 1);
        self.value.set(value);
    }
}

/// Blocking delay that advances a virtual clock instead of waiting
#[derive(Default)]
pub struct SimDelay {
    now: Cell<u64>,
    waits: Cell<u32>,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far, in microseconds
    pub fn now_us(&self) -> u64 {
        self.now.get()
    }

    /// Virtual time elapsed so far, in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now.get() / 1_000
    }

    /// Number of delays performed
    pub fn waits(&self) -> u32 {
        self.waits.get()
    }

    fn advance_us(&self, us: u64) {
        self.now.set(self.now.get() + us);
        self.waits.set(self.waits.get() + 1);
    }
}

impl DelayMs<u32> for &'_ SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.advance_us(u64::from(ms) * 1_000);
    }
}

impl DelayMs<u16> for &'_ SimDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.advance_us(u64::from(ms) * 1_000);
    }
}

impl DelayUs<u32> for &'_ SimDelay {
    fn delay_us(&mut self, us: u32) {
        self.advance_us(u64::from(us));
    }
}

/// Count-down timer driven by calls to `advance`
#[derive(Default)]
pub struct SimTimer {
    period: Cell<u32>,
    elapsed: Cell<u32>,
    starts: Cell<u32>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `ms` milliseconds of virtual time pass
    pub fn advance(&self, ms: u32) {
        self.elapsed.set(self.elapsed.get() + ms);
    }

    /// Period of the last `start`
    pub fn period(&self) -> MilliSeconds {
        MilliSeconds(self.period.get())
    }

    /// Number of times the timer was (re)started
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }
}

impl CountDown for &'_ SimTimer {
    type Time = MilliSeconds;

    fn start<T>(&mut self, count: T)
    where
        T: Into<MilliSeconds>,
    {
        self.period.set(count.into().0);
        self.elapsed.set(0);
        self.starts.set(self.starts.get() + 1);
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        let period = self.period.get();
        let elapsed = self.elapsed.get();
        if period > 0 && elapsed >= period {
            self.elapsed.set(elapsed - period);
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl Periodic for &'_ SimTimer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_counts_accesses() {
        let reg = SimRegister::new(0x10u8);
        let mut handle = &reg;

        handle.modify(|r| r | 0x01);
        assert_eq!(reg.value(), 0x11);
        assert_eq!(reg.reads(), 1);
        assert_eq!(reg.writes(), 1);

        reg.set(0);
        assert_eq!(handle.read(), 0);
        assert_eq!(reg.accesses(), 3);
    }

    #[test]
    fn delay_advances_virtual_clock() {
        let clock = SimDelay::new();
        let mut delay = &clock;

        delay.delay_ms(500u32);
        delay.delay_ms(250u16);
        delay.delay_us(10u32);
        assert_eq!(clock.now_us(), 750_010);
        assert_eq!(clock.now_ms(), 750);
        assert_eq!(clock.waits(), 3);
    }

    #[test]
    fn timer_is_periodic() {
        let timer = SimTimer::new();
        let mut handle = &timer;

        assert!(handle.wait().is_err());

        handle.start(MilliSeconds(500));
        timer.advance(499);
        assert!(handle.wait().is_err());
        timer.advance(1);
        assert!(handle.wait().is_ok());
        assert!(handle.wait().is_err());
        timer.advance(500);
        assert!(handle.wait().is_ok());
        assert_eq!(timer.starts(), 1);
    }
}
