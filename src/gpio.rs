//! General Purpose Input / Output
//!
//! Drives ports that use one direction bit and one output bit per pin: a
//! set direction bit makes the pin an output, and the output register holds
//! the level driven on it.

use core::marker::PhantomData;
use core::ops::Not;

use crate::hal::digital::v2::{OutputPin, StatefulOutputPin, ToggleableOutputPin};
use crate::register::{Register, Word};

/// Logic level of a pin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Level {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        level == Level::High
    }
}

/// Input mode (type state)
pub struct Input;

/// Output mode (type state)
pub struct Output;

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for valid pin modes (type state).
///
/// It can not be implemented by outside types.
pub trait PinMode: sealed::Sealed {
    // Value of the pin's bit in the direction register.
    #[doc(hidden)]
    const DIR: bool;
}

impl sealed::Sealed for Input {}
impl PinMode for Input {
    const DIR: bool = false;
}

impl sealed::Sealed for Output {}
impl PinMode for Output {
    const DIR: bool = true;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pin number does not fit in the port's registers
    InvalidPin(u8),
}

/// Pin `i` of a port, owning the port's direction and output registers
pub struct Pin<DIR, OUT, MODE> {
    dir: DIR,
    out: OUT,
    i: u8,
    _mode: PhantomData<MODE>,
}

impl<DIR, OUT, MODE> Pin<DIR, OUT, MODE> {
    /// Returns this pin's number inside its port.
    pub fn pin_number(&self) -> u8 {
        self.i
    }

    /// Releases the direction and output registers
    pub fn free(self) -> (DIR, OUT) {
        (self.dir, self.out)
    }
}

impl<DIR, OUT> Pin<DIR, OUT, Input>
where
    DIR: Register,
    OUT: Register<Word = DIR::Word>,
{
    /// Takes pin `i` of the port made of `dir` and `out`.
    ///
    /// No register is accessed; the pin keeps whatever mode the hardware is in
    /// and is treated as an input until configured.
    pub fn new(dir: DIR, out: OUT, i: u8) -> Result<Self, Error> {
        if i >= <DIR::Word as Word>::WIDTH {
            return Err(Error::InvalidPin(i));
        }

        Ok(Pin {
            dir,
            out,
            i,
            _mode: PhantomData,
        })
    }
}

impl<DIR, OUT, MODE> Pin<DIR, OUT, MODE>
where
    DIR: Register,
    MODE: PinMode,
{
    /// Puts `self` into mode `M`.
    ///
    /// Only this pin's bit of the direction register changes.
    fn mode<M: PinMode>(&mut self) {
        let bit = <DIR::Word as Word>::bit(self.i);
        self.dir.modify(|r| if M::DIR { r | bit } else { r & !bit });
    }

    /// Configures the pin to operate as an output pin.
    pub fn into_output(mut self) -> Pin<DIR, OUT, Output> {
        self.mode::<Output>();
        Pin {
            dir: self.dir,
            out: self.out,
            i: self.i,
            _mode: PhantomData,
        }
    }

    /// Configures the pin to operate as an input pin.
    pub fn into_input(mut self) -> Pin<DIR, OUT, Input> {
        self.mode::<Input>();
        Pin {
            dir: self.dir,
            out: self.out,
            i: self.i,
            _mode: PhantomData,
        }
    }
}

impl<DIR, OUT: Register> Pin<DIR, OUT, Output> {
    /// Level currently driven on the pin.
    pub fn level(&self) -> Level {
        let bit = <OUT::Word as Word>::bit(self.i);
        Level::from(self.out.read() & bit != <OUT::Word as Word>::ZERO)
    }
}

impl<DIR, OUT: Register> OutputPin for Pin<DIR, OUT, Output> {
    type Error = void::Void;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let bit = <OUT::Word as Word>::bit(self.i);
        self.out.modify(|r| r | bit);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let bit = <OUT::Word as Word>::bit(self.i);
        self.out.modify(|r| r & !bit);
        Ok(())
    }
}

impl<DIR, OUT: Register> StatefulOutputPin for Pin<DIR, OUT, Output> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level() == Level::High)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(self.level() == Level::Low)
    }
}

impl<DIR, OUT: Register> ToggleableOutputPin for Pin<DIR, OUT, Output> {
    type Error = void::Void;

    /// Flips the pin with a read-modify-write XOR of its output bit.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let bit = <OUT::Word as Word>::bit(self.i);
        self.out.modify(|r| r ^ bit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRegister;
    use void::ResultVoidExt;

    #[test]
    fn level_negation() {
        assert_eq!(!Level::Low, Level::High);
        assert_eq!(!!Level::High, Level::High);
        assert_eq!(Level::from(true), Level::High);
        assert!(!bool::from(Level::Low));
    }

    #[test]
    fn pin_number_out_of_range() {
        let dir = SimRegister::new(0u8);
        let out = SimRegister::new(0u8);

        assert!(Pin::new(&dir, &out, 7).is_ok());
        assert_eq!(Pin::new(&dir, &out, 8).err(), Some(Error::InvalidPin(8)));
        assert_eq!(dir.accesses() + out.accesses(), 0);
    }

    #[test]
    fn into_output_sets_only_its_direction_bit() {
        let dir = SimRegister::new(0b1000_0010u8);
        let out = SimRegister::new(0u8);

        let pin = Pin::new(&dir, &out, 0).unwrap().into_output();
        assert_eq!(dir.value(), 0b1000_0011);
        assert_eq!(out.accesses(), 0);

        pin.into_input();
        assert_eq!(dir.value(), 0b1000_0010);
    }

    #[test]
    fn toggle_flips_only_its_output_bit() {
        let dir = SimRegister::new(0u32);
        let out = SimRegister::new(0xFFFF_0000u32);

        let mut pin = Pin::new(&dir, &out, 17).unwrap().into_output();
        assert_eq!(pin.level(), Level::High);

        pin.toggle().void_unwrap();
        assert_eq!(out.value(), 0xFFFD_0000);
        assert!(pin.is_set_low().void_unwrap());

        pin.toggle().void_unwrap();
        assert_eq!(out.value(), 0xFFFF_0000);
        assert!(pin.is_set_high().void_unwrap());
    }

    #[test]
    fn set_high_and_low() {
        let dir = SimRegister::new(0u16);
        let out = SimRegister::new(0b0100u16);

        let mut pin = Pin::new(&dir, &out, 3).unwrap().into_output();
        pin.set_high().void_unwrap();
        assert_eq!(out.value(), 0b1100);
        pin.set_low().void_unwrap();
        assert_eq!(out.value(), 0b0100);
    }
}
