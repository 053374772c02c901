//! Time units

use core::fmt;


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Hertz(pub u32);

impl Hertz {
    /// Number of clock cycles that fit in one millisecond
    pub const fn cycles_per_ms(self) -> u32 {
        self.0 / 1_000
    }
}

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct MilliSeconds(pub u32);

impl fmt::Display for MilliSeconds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct MicroSeconds(pub u32);

impl fmt::Display for MicroSeconds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} µs", self.0)
    }
}


/// Extension trait that adds convenience methods to the `u32` type
pub trait U32Ext {
    /// Wrap in `Hertz`
    fn hz(self) -> Hertz;

    /// Wrap in `Hertz`
    fn khz(self) -> Hertz;

    /// Wrap in `Hertz`
    fn mhz(self) -> Hertz;

    /// Wrap in `MilliSeconds`
    fn ms(self) -> MilliSeconds;

    /// Wrap in `MicroSeconds`
    fn us(self) -> MicroSeconds;
}

impl U32Ext for u32 {
    fn hz(self) -> Hertz {
        Hertz(self)
    }

    fn khz(self) -> Hertz {
        Hertz(self * 1_000)
    }

    fn mhz(self) -> Hertz {
        Hertz(self * 1_000_000)
    }

    fn ms(self) -> MilliSeconds {
        MilliSeconds(self)
    }

    fn us(self) -> MicroSeconds {
        MicroSeconds(self)
    }
}

/// Saturates at `u32::MAX` microseconds.
impl From<MilliSeconds> for MicroSeconds {
    fn from(ms: MilliSeconds) -> MicroSeconds {
        MicroSeconds(ms.0.saturating_mul(1_000))
    }
}

impl From<MicroSeconds> for MilliSeconds {
    fn from(us: MicroSeconds) -> MilliSeconds {
        MilliSeconds(us.0 / 1_000)
    }
}

/// Period of a frequency up to 1 kHz.
impl From<Hertz> for MilliSeconds {
    fn from(freq: Hertz) -> MilliSeconds {
        let freq = freq.0;
        assert!(freq != 0 && freq <= 1_000);
        MilliSeconds(1_000 / freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_helpers() {
        assert_eq!(8.mhz(), Hertz(8_000_000));
        assert_eq!(32.khz(), Hertz(32_000));
        assert_eq!(500.ms(), MilliSeconds(500));
        assert_eq!(8.mhz().cycles_per_ms(), 8_000);
    }

    #[test]
    fn conversions() {
        assert_eq!(MicroSeconds::from(500.ms()), MicroSeconds(500_000));
        assert_eq!(MicroSeconds::from(MilliSeconds(u32::MAX)), MicroSeconds(u32::MAX));
        assert_eq!(MilliSeconds::from(1_999.us()), MilliSeconds(1));
        assert_eq!(MilliSeconds::from(2.hz()), MilliSeconds(500));
    }

    #[test]
    #[should_panic]
    fn period_of_zero_hertz() {
        let _: MilliSeconds = 0.hz().into();
    }

    #[test]
    fn display() {
        assert_eq!(8.mhz().to_string(), "8000000 Hz");
        assert_eq!(500.ms().to_string(), "500 ms");
    }
}
