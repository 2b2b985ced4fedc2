//! FPGA mode monitor with RGB LED feedback.
//!
//! Every 100 ms the three FPGA mode lines are sampled and each one is
//! mirrored onto its LED (R line to red, G to green, B to blue). Changes of
//! the combined mode code are reported for logging.

use crate::config::TimingConfig;
use crate::error::HardwareError;
use crate::mode::{ModeChange, ModeCode, ModeTracker};
use crate::traits::{DelayNs, InputPin, OutputPin};

use super::{drive, ModeLines};

/// Status LEDs mirroring the mode lines.
#[derive(Debug)]
pub struct RgbLeds<O> {
    /// Red LED (R line).
    pub r: O,
    /// Green LED (G line).
    pub g: O,
    /// Blue LED (B line).
    pub b: O,
}

/// FPGA monitor polling task.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::config::TimingConfig;
/// use fpga_energy_bridge::hal::MockPin;
/// use fpga_energy_bridge::mode::ModeCode;
/// use fpga_energy_bridge::tasks::{ModeLines, MonitorTask, RgbLeds};
///
/// let b_line = MockPin::new(true);
/// let blue = MockPin::new(false);
/// let lines = ModeLines::new(MockPin::new(false), MockPin::new(false), b_line);
/// let leds = RgbLeds { r: MockPin::new(false), g: MockPin::new(false), b: blue.clone() };
///
/// let mut task = MonitorTask::new(lines, leds, &TimingConfig::default()).unwrap();
/// let change = task.poll().unwrap().unwrap();
///
/// assert_eq!(change.current, ModeCode::REGEN_BRAKING);
/// assert!(blue.is_set_high());
/// ```
pub struct MonitorTask<I, O> {
    lines: ModeLines<I>,
    leds: RgbLeds<O>,
    tracker: ModeTracker,
    period_ms: u32,
}

impl<I: InputPin, O: OutputPin> MonitorTask<I, O> {
    /// Creates the task and switches all LEDs off.
    pub fn new(
        lines: ModeLines<I>,
        mut leds: RgbLeds<O>,
        timing: &TimingConfig,
    ) -> Result<Self, HardwareError> {
        drive(&mut leds.r, false)?;
        drive(&mut leds.g, false)?;
        drive(&mut leds.b, false)?;
        log::info!("[MONITOR] FPGA monitor ready");

        Ok(Self {
            lines,
            leds,
            tracker: ModeTracker::new(),
            period_ms: timing.monitor_period_ms,
        })
    }

    /// Samples the lines once, mirrors them onto the LEDs and reports a
    /// change of code.
    pub fn poll(&mut self) -> Result<Option<ModeChange>, HardwareError> {
        let sample = self.lines.read()?;

        drive(&mut self.leds.r, sample.r)?;
        drive(&mut self.leds.g, sample.g)?;
        drive(&mut self.leds.b, sample.b)?;

        Ok(self.tracker.observe(sample.code()))
    }

    /// Code seen by the last poll.
    #[inline]
    pub fn last_code(&self) -> Option<ModeCode> {
        self.tracker.last()
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
                Ok(Some(change)) => log::info!("[MONITOR] {}", change),
                Ok(None) => {}
                Err(e) => log::warn!("[MONITOR] {}", e),
            }
            delay.delay_ms(self.period_ms);
        }
    }
}
