//! Timers
use crate::hal::timer::{CountDown, Periodic};
use crate::time::{Hertz, MilliSeconds};
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use nb;
use void::Void;

pub trait TimerExt<TIM> {
    fn timer<T>(self, timeout: T, clock: Hertz) -> Timer<TIM>
    where
        T: Into<MilliSeconds>;
}

/// Hardware timers
///
/// SysTick wraps once per millisecond and the timer counts wraps, so periods
/// aren't limited by the 24-bit reload register. `wait` has to be polled at
/// least once per millisecond, or wraps are lost and the period stretches.
pub struct Timer<TIM> {
    clock: Hertz,
    count: WrapCount,
    tim: TIM,
}

/// Counts 1 ms timer wraps up to a period, then starts over
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct WrapCount {
    period: u32,
    elapsed: u32,
}

impl WrapCount {
    fn restart(&mut self, period: MilliSeconds) {
        self.period = period.0;
        self.elapsed = 0;
    }

    /// Records whether the timer wrapped since the last call. Returns `true`
    /// once per completed period.
    fn tick(&mut self, wrapped: bool) -> bool {
        if wrapped {
            self.elapsed += 1;
        }

        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

impl Timer<SYST> {
    /// Configures the SYST clock as a periodic count down timer
    pub fn syst<T>(mut syst: SYST, timeout: T, clock: Hertz) -> Self
    where
        T: Into<MilliSeconds>,
    {
        syst.set_clock_source(SystClkSource::Core);
        let mut timer = Timer {
            tim: syst,
            clock,
            count: WrapCount::default(),
        };
        timer.start(timeout);
        timer
    }

    /// Releases the SYST peripheral
    pub fn release(mut self) -> SYST {
        self.tim.disable_counter();
        self.tim
    }
}

impl CountDown for Timer<SYST> {
    type Time = MilliSeconds;

    fn start<T>(&mut self, timeout: T)
    where
        T: Into<MilliSeconds>,
    {
        let cycles = self.clock.cycles_per_ms();
        assert!(cycles > 0 && cycles <= (1 << 24));
        let rvr = cycles - 1;

        self.count.restart(timeout.into());

        self.tim.set_reload(rvr);
        self.tim.clear_current();
        self.tim.enable_counter();
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        if self.count.tick(self.tim.has_wrapped()) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl TimerExt<SYST> for SYST {
    fn timer<T>(self, timeout: T, clock: Hertz) -> Timer<SYST>
    where
        T: Into<MilliSeconds>,
    {
        Timer::syst(self, timeout, clock)
    }
}

impl Periodic for Timer<SYST> {}
