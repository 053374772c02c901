//! Board support
//!
//! nRF51 and nRF52832 share the GPIO layout of port P0: `DIR` holds one
//! direction bit per pin and `OUT` one output bit per pin. The LED is the
//! first user LED of the vendor development kit.

use crate::gpio::{Input, Pin};
use crate::register::Mmio;
use crate::time::Hertz;

#[cfg(all(feature = "nrf51", feature = "nrf52832"))]
compile_error!("Select at most one board: 'nrf51' or 'nrf52832'");

/// Base address of GPIO port P0
pub const P0_BASE: usize = 0x5000_0000;

/// Output register of port P0
pub const P0_OUT: usize = P0_BASE + 0x504;

/// Direction register of port P0
pub const P0_DIR: usize = P0_BASE + 0x514;

/// LED1 of the nRF51 DK
#[cfg(feature = "nrf51")]
pub const LED_PIN: u8 = 21;

/// Nominal core clock (HFCLK)
#[cfg(feature = "nrf51")]
pub const CORE_CLOCK: Hertz = Hertz(16_000_000);

/// LED1 of the nRF52 DK
#[cfg(feature = "nrf52832")]
pub const LED_PIN: u8 = 17;

/// Nominal core clock (HFCLK)
#[cfg(feature = "nrf52832")]
pub const CORE_CLOCK: Hertz = Hertz(64_000_000);

/// The LED pin, before it is configured
pub type Led = Pin<Mmio<u32>, Mmio<u32>, Input>;

/// Board peripherals
pub struct Board {
    pub led: Led,
}

static mut TAKEN: bool = false;

impl Board {
    /// Returns the board peripherals the first time it is called, `None`
    /// afterwards
    pub fn take() -> Option<Board> {
        cortex_m::interrupt::free(|_| {
            // NOTE(unsafe) the flag is only touched inside critical sections
            if unsafe { TAKEN } {
                return None;
            }
            unsafe { TAKEN = true };

            // NOTE(unsafe) both addresses are registers of port P0, and the
            // take-once flag keeps them from being handed out twice
            let (dir, out) = unsafe { (Mmio::new(P0_DIR), Mmio::new(P0_OUT)) };
            Pin::new(dir, out, LED_PIN).ok().map(|led| Board { led })
        })
    }
}
