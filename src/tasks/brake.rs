//! Brake button to FPGA brake line.
//!
//! Samples the brake button (pull-up, active low) every 50 ms and mirrors
//! its state onto the FPGA brake line: pressed drives the line high,
//! released drives it low. The line is only written, and the transition
//! only logged, when the sampled state changes.
//!
//! There is no debounce beyond the sampling interval.

use core::fmt;

use crate::config::TimingConfig;
use crate::error::HardwareError;
use crate::traits::{DelayNs, InputPin, OutputPin};

use super::{drive, is_active_low};

/// A brake state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrakeEvent {
    /// New state of the brake button.
    pub applied: bool,
}

impl fmt::Display for BrakeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.applied {
            f.write_str("brake applied -> brake line HIGH")
        } else {
            f.write_str("brake released -> brake line LOW")
        }
    }
}

/// Brake button polling task.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::config::TimingConfig;
/// use fpga_energy_bridge::hal::MockPin;
/// use fpga_energy_bridge::tasks::BrakeTask;
///
/// let button = MockPin::new(true); // released (pull-up)
/// let line = MockPin::new(false);
/// let mut task = BrakeTask::new(button.clone(), line.clone(), &TimingConfig::default()).unwrap();
///
/// assert!(task.poll().unwrap().is_none());
///
/// button.press();
/// let event = task.poll().unwrap().unwrap();
/// assert!(event.applied);
/// assert!(line.is_set_high());
/// ```
pub struct BrakeTask<I, O> {
    button: I,
    signal: O,
    applied: bool,
    period_ms: u32,
    startup_ms: u32,
}

impl<I: InputPin, O: OutputPin> BrakeTask<I, O> {
    /// Creates the task and drives the brake line low.
    pub fn new(button: I, mut signal: O, timing: &TimingConfig) -> Result<Self, HardwareError> {
        drive(&mut signal, false)?;
        Ok(Self {
            button,
            signal,
            applied: false,
            period_ms: timing.brake_period_ms,
            startup_ms: timing.brake_startup_ms,
        })
    }

    /// Waits the start-up delay before the first poll.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) {
        delay.delay_ms(self.startup_ms);
        log::info!("[BRAKE] task started: press the brake button to raise the FPGA brake line");
    }

    /// Samples the button once, mirroring any change onto the brake line.
    pub fn poll(&mut self) -> Result<Option<BrakeEvent>, HardwareError> {
        let pressed = is_active_low(&mut self.button)?;
        if pressed == self.applied {
            return Ok(None);
        }

        drive(&mut self.signal, pressed)?;
        self.applied = pressed;
        Ok(Some(BrakeEvent { applied: pressed }))
    }

    /// Last sampled state.
    #[inline]
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Poll period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Runs the task forever.
    pub fn run<D: DelayNs>(mut self, mut delay: D) -> ! {
        self.start(&mut delay);
        loop {
            match self.poll() {
                Ok(Some(event)) => log::info!("[BRAKE] {}", event),
                Ok(None) => {}
                Err(e) => log::warn!("[BRAKE] {}", e),
            }
            delay.delay_ms(self.period_ms);
        }
    }
}
