//! Memory-mapped registers

use core::marker::PhantomData;
use core::ops::{BitAnd, BitOr, BitXor, Not};
use core::ptr;

mod sealed {
    pub trait Sealed {}
}

/// Register width (`u8`, `u16` or `u32`).
///
/// It can not be implemented by outside types.
pub trait Word:
    sealed::Sealed
    + Copy
    + Eq
    + core::fmt::Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Number of bits in the register
    const WIDTH: u8;

    /// All bits cleared
    const ZERO: Self;

    /// Mask with only bit `n` set.
    ///
    /// `n` must be less than `WIDTH`.
    fn bit(n: u8) -> Self;
}

macro_rules! words {
    ($($W:ty,)+) => {
        $(
            impl sealed::Sealed for $W {}

            impl Word for $W {
                const WIDTH: u8 = <$W>::BITS as u8;
                const ZERO: Self = 0;

                fn bit(n: u8) -> Self {
                    1 << n
                }
            }
        )+
    }
}

words! {
    u8,
    u16,
    u32,
}

/// A readable and writable hardware register
pub trait Register {
    /// Width of the register
    type Word: Word;

    /// Reads the current value
    fn read(&self) -> Self::Word;

    /// Overwrites the whole register
    fn write(&mut self, value: Self::Word);

    /// Read-modify-write
    fn modify<F>(&mut self, f: F)
    where
        F: FnOnce(Self::Word) -> Self::Word,
    {
        let value = self.read();
        self.write(f(value));
    }
}

/// Register at a fixed memory address, accessed with volatile loads and stores
pub struct Mmio<W> {
    address: usize,
    _word: PhantomData<W>,
}

impl<W: Word> Mmio<W> {
    /// Creates a handle to the register at `address`.
    ///
    /// # Safety
    ///
    /// `address` must be a valid, suitably aligned register of width `W` for
    /// as long as the handle lives, and no other code may perform conflicting
    /// accesses to it.
    pub unsafe fn new(address: usize) -> Self {
        Mmio {
            address,
            _word: PhantomData,
        }
    }

    /// Returns the address this handle points at.
    pub fn address(&self) -> usize {
        self.address
    }
}

impl<W: Word> Register for Mmio<W> {
    type Word = W;

    fn read(&self) -> W {
        // NOTE(unsafe) validity of the address is a precondition of `new`
        unsafe { ptr::read_volatile(self.address as *const W) }
    }

    fn write(&mut self, value: W) {
        // NOTE(unsafe) validity of the address is a precondition of `new`
        unsafe { ptr::write_volatile(self.address as *mut W, value) }
    }
}

impl<R: Register> Register for &'_ mut R {
    type Word = R::Word;

    fn read(&self) -> R::Word {
        (**self).read()
    }

    fn write(&mut self, value: R::Word) {
        (**self).write(value)
    }
}
