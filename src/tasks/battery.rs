//! Battery-simulation button to FPGA battery line.
//!
//! Button B (pull-up, active low) simulates a depleted battery. Its state is
//! mirrored onto the FPGA battery line on every change, sampled every 50 ms.
//! Unlike the brake task there is no start-up delay: polling begins as soon
//! as the task is running.

use core::fmt;

use crate::config::TimingConfig;
use crate::error::HardwareError;
use crate::traits::{DelayNs, InputPin, OutputPin};

use super::{drive, is_active_low};

/// A battery-button state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryEvent {
    /// Whether button B is now held.
    pub pressed: bool,
}

impl fmt::Display for BatteryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pressed {
            f.write_str("button B pressed -> battery line HIGH")
        } else {
            f.write_str("button B released -> battery line LOW")
        }
    }
}

/// Battery-simulation button polling task.
pub struct BatteryTask<I, O> {
    button: I,
    signal: O,
    pressed: bool,
    period_ms: u32,
}

impl<I: InputPin, O: OutputPin> BatteryTask<I, O> {
    /// Creates the task and drives the battery line low.
    pub fn new(button: I, mut signal: O, timing: &TimingConfig) -> Result<Self, HardwareError> {
        drive(&mut signal, false)?;
        log::info!("[BATTERY] task ready: button B -> FPGA battery line");
        Ok(Self {
            button,
            signal,
            pressed: false,
            period_ms: timing.battery_period_ms,
        })
    }

    /// Samples button B once.
    pub fn poll(&mut self) -> Result<Option<BatteryEvent>, HardwareError> {
        let pressed = is_active_low(&mut self.button)?;
        if pressed != self.pressed {
            drive(&mut self.signal, pressed)?;
            self.pressed = pressed;
            return Ok(Some(BatteryEvent { pressed }));
        }
        Ok(None)
    }

    /// Poll period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Runs the task forever.
    pub fn run<D: DelayNs>(mut self, mut delay: D) -> ! {
        loop {
            match self.poll() {
                Ok(Some(event)) => log::info!("[BATTERY] {}", event),
                Ok(None) => {}
                Err(e) => log::warn!("[BATTERY] {}", e),
            }
            delay.delay_ms(self.period_ms);
        }
    }
}
