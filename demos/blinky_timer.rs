#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate panic_halt;

use blinky::board::{self, Board};
use blinky::config::Config;
use blinky::prelude::*;
use blinky::toggler::PolledToggler;
use cortex_m_rt::entry;
use void::ResultVoidExt;

#[entry]
fn main() -> ! {
    let board = Board::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let interval = Config::from_build().toggle_interval();
    let timer = cp.SYST.timer(interval, board::CORE_CLOCK);

    let led = board.led.into_output();
    let toggler = PolledToggler::new(led, timer, interval).void_unwrap();

    // Poll SysTick and toggle whenever the interval is over.
    toggler.run()
}
