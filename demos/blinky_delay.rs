#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate panic_halt;

use blinky::board::{self, Board};
use blinky::config::Config;
use blinky::prelude::*;
use blinky::toggler::PinToggler;
use cortex_m_rt::entry;

#[entry]
fn main() -> ! {
    let board = Board::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Get the delay provider.
    let delay = cp.SYST.delay(board::CORE_CLOCK);
    let interval = Config::from_build().toggle_interval();

    // Configure the LED as output and let SysTick time the interval.
    PinToggler::initialize(board.led, delay, interval).run()
}
