//! Periodic polling tasks.
//!
//! Each task owns its pins outright and runs as one independent loop:
//!
//! ```text
//! new() -> start() (settle/calibrate, optional) -> loop { poll(); delay(period) }
//! ```
//!
//! `poll()` performs exactly one iteration and returns what changed, if
//! anything; `run()` wraps it in the never-ending loop, logs the change
//! events and sleeps for the task's period. Apart from the single
//! [`SharedMode`](crate::shared::SharedMode) byte between the display and
//! buzzer tasks, no state is shared.
//!
//! | Task | Period | Inputs | Outputs |
//! |------|--------|--------|---------|
//! | [`BrakeTask`] | 50 ms | brake button | FPGA brake line |
//! | [`BatteryTask`] | 50 ms | battery button | FPGA battery line |
//! | [`JoystickTask`] | 100 ms | joystick axes + switch | FPGA power lines |
//! | [`MonitorTask`] | 100 ms | FPGA mode lines | RGB LEDs |
//! | [`DisplayTask`] | 200 ms | FPGA mode lines | OLED, shared mode |
//! | [`BuzzerTask`] | 150 ms | shared mode | two buzzers |

pub mod battery;
pub mod brake;
pub mod buzzer;
pub mod display;
pub mod joystick;
pub mod monitor;

pub use battery::{BatteryEvent, BatteryTask};
pub use brake::{BrakeEvent, BrakeTask};
pub use buzzer::{Buzzer, BuzzerOutput, BuzzerTask};
pub use display::DisplayTask;
pub use joystick::{Calibration, JoystickInputs, JoystickReport, JoystickTask, PowerOutputs};
pub use monitor::{MonitorTask, RgbLeds};

use crate::error::HardwareError;
use crate::mode::SignalLines;
use crate::traits::{InputPin, OutputPin, PinState};

/// Drives an output line to `high`.
#[inline]
pub(crate) fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), HardwareError> {
    pin.set_state(PinState::from(high))
        .map_err(HardwareError::digital)
}

/// Reads an active-low input: `true` when the line is pulled low.
#[inline]
pub(crate) fn is_active_low<P: InputPin>(pin: &mut P) -> Result<bool, HardwareError> {
    pin.is_low().map_err(HardwareError::digital)
}

/// The three FPGA mode lines, configured as pull-down inputs.
///
/// Each decoder task owns its own instance; the two never share reads.
#[derive(Debug)]
pub struct ModeLines<I> {
    /// R line (bit 0).
    pub r: I,
    /// G line (bit 1).
    pub g: I,
    /// B line (bit 2).
    pub b: I,
}

impl<I: InputPin> ModeLines<I> {
    /// Groups three input pins.
    pub fn new(r: I, g: I, b: I) -> Self {
        Self { r, g, b }
    }

    /// Samples all three lines.
    pub fn read(&mut self) -> Result<SignalLines, HardwareError> {
        Ok(SignalLines {
            r: self.r.is_high().map_err(HardwareError::digital)?,
            g: self.g.is_high().map_err(HardwareError::digital)?,
            b: self.b.is_high().map_err(HardwareError::digital)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockPin;

    #[test]
    fn mode_lines_sample_each_pin() {
        let r = MockPin::new(true);
        let g = MockPin::new(false);
        let b = MockPin::new(true);
        let mut lines = ModeLines::new(r.clone(), g.clone(), b.clone());

        let sample = lines.read().unwrap();
        assert_eq!(sample, SignalLines { r: true, g: false, b: true });
        assert_eq!(sample.code().bits(), 0b101);
    }

    #[test]
    fn drive_sets_level() {
        let pin = MockPin::new(false);
        let mut out = pin.clone();
        drive(&mut out, true).unwrap();
        assert!(pin.is_set_high());
        drive(&mut out, false).unwrap();
        assert!(!pin.is_set_high());
    }

    #[test]
    fn active_low_inverts() {
        let pin = MockPin::new(true);
        let mut input = pin.clone();
        assert!(!is_active_low(&mut input).unwrap());
        pin.press();
        assert!(is_active_low(&mut input).unwrap());
    }
}
