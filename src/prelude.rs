pub use embedded_hal::digital::v2::*;
pub use embedded_hal::prelude::*;

pub use crate::delay::DelayExt as _;
pub use crate::register::Register as _;
pub use crate::time::U32Ext as _;
pub use crate::timer::TimerExt as _;
