//! Trait definitions for hardware abstraction.
//!
//! The tasks in [`crate::tasks`] are generic over these traits so they can
//! run against real peripherals (`hal::esp32`) or test doubles
//! ([`crate::hal::mock`]).
//!
//! # Submodules
//!
//! - `hardware`: digital/PWM/delay seams (re-exported from `embedded-hal`)
//!   plus [`AnalogInput`]
//! - `display`: [`ModeDisplay`] text rendering

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;
