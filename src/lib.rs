#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;

#[cfg(any(feature = "nrf51", feature = "nrf52832"))]
pub mod board;
pub mod config;
pub mod delay;
pub mod gpio;
pub mod prelude;
pub mod register;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod time;
pub mod timer;
pub mod toggler;
