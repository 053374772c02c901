//! Blinks the development kit's LED with a calibrated busy-wait.
//!
//! The spin loop is calibrated against `BLINKY_CLOCK_HZ`. When it is unset the
//! selected board's core clock is used: 16 MHz on `nrf51`, 64 MHz on
//! `nrf52832`. Set it explicitly when the core runs at another frequency, e.g.
//!
//! ```text
//! BLINKY_CLOCK_HZ=64_000_000 cargo run --example blinky --features nrf52832,rt
//! ```

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use blinky::board::{self, Board};
use blinky::config::Config;
use blinky::toggler::PinToggler;
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;

#[entry]
fn main() -> ! {
    let board = Board::take().unwrap();

    // Clock and interval come from BLINKY_CLOCK_HZ / BLINKY_INTERVAL_MS.
    let config = Config::from_build();

    hprintln!(
        "blinky: toggling P0.{} every {}, calibrated for {}",
        board::LED_PIN,
        config.toggle_interval(),
        config.clock_freq()
    )
    .unwrap();
    if config.clock_freq() != board::CORE_CLOCK {
        hprintln!(
            "blinky: core clock is {}, the blink period will drift",
            board::CORE_CLOCK
        )
        .unwrap();
    }

    // Configure the LED as output and spin between toggles.
    PinToggler::busy_wait(board.led, config).unwrap().run()
}
