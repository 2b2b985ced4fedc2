//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every hardware seam used by the
//! tasks, enabling development and testing on desktop without a board.
//!
//! Pins, analog channels and PWM channels are cheap cloneable *handles* over
//! shared atomics: keep one handle in the test, move a clone into the task,
//! and drive or inspect the line from outside.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPin`] | [`InputPin`] + [`OutputPin`] | Settable/inspectable logic level |
//! | [`MockAnalog`] | [`AnalogInput`] | Settable ADC reading |
//! | [`MockPwm`] | [`SetDutyCycle`] | Records the compare level |
//! | [`MockDisplay`] | [`ModeDisplay`] | Records rendered frames |
//! | [`MockDelay`] | [`DelayNs`] | Records requested delays |
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::hal::MockPin;
//! use fpga_energy_bridge::traits::{InputPin, OutputPin};
//!
//! let line = MockPin::new(false);
//! let mut task_side = line.clone();
//!
//! task_side.set_high().unwrap();
//! assert!(line.is_set_high());
//!
//! line.set(false);
//! assert!(task_side.is_low().unwrap());
//! ```
//!
//! [`InputPin`]: crate::traits::InputPin
//! [`OutputPin`]: crate::traits::OutputPin
//! [`AnalogInput`]: crate::traits::AnalogInput
//! [`SetDutyCycle`]: crate::traits::SetDutyCycle
//! [`ModeDisplay`]: crate::traits::ModeDisplay
//! [`DelayNs`]: crate::traits::DelayNs

extern crate alloc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

use embedded_hal::{digital, pwm};

use crate::pwm::PwmTiming;
use crate::traits::{AnalogInput, DelayNs, InputPin, ModeDisplay, OutputPin, SetDutyCycle};

// ============================================================================
// Digital
// ============================================================================

/// Mock GPIO line, usable as input or output.
///
/// All clones share one level. Writes through [`OutputPin`] are counted so
/// tests can assert that a task only touches an output on change.
/// [`fail_next_write`](Self::fail_next_write) makes the next write return
/// an error without changing the level.
#[derive(Clone, Debug, Default)]
pub struct MockPin {
    level: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
    fail_next: Arc<AtomicBool>,
}

impl MockPin {
    /// Creates a pin at the given level (`true` = high).
    pub fn new(high: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(high)),
            writes: Arc::new(AtomicUsize::new(0)),
            fail_next: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Drives the line from outside (simulated hardware).
    pub fn set(&self, high: bool) {
        self.level.store(high, Ordering::SeqCst);
    }

    /// Simulates pressing an active-low button.
    pub fn press(&self) {
        self.set(false);
    }

    /// Simulates releasing an active-low button.
    pub fn release(&self) {
        self.set(true);
    }

    /// Current level.
    pub fn is_set_high(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Number of writes made through [`OutputPin`].
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes the next [`OutputPin`] write fail, leaving the level as is.
    pub fn fail_next_write(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn write(&self, high: bool) -> Result<(), digital::ErrorKind> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(digital::ErrorKind::Other);
        }
        self.level.store(high, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, digital::ErrorKind> {
        Ok(self.is_set_high())
    }

    fn is_low(&mut self) -> Result<bool, digital::ErrorKind> {
        Ok(!self.is_set_high())
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), digital::ErrorKind> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), digital::ErrorKind> {
        self.write(true)
    }
}

// ============================================================================
// Analog
// ============================================================================

/// Mock ADC channel.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::hal::MockAnalog;
/// use fpga_energy_bridge::traits::AnalogInput;
///
/// let axis = MockAnalog::new(100);
/// let mut channel = axis.clone();
///
/// axis.set(3000);
/// assert_eq!(channel.read_raw(), Ok(3000));
/// assert_eq!(axis.reads(), 1);
///
/// axis.fail(true);
/// assert!(channel.read_raw().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockAnalog {
    value: Arc<AtomicU16>,
    reads: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockAnalog {
    /// Creates a channel returning `value`.
    pub fn new(value: u16) -> Self {
        Self {
            value: Arc::new(AtomicU16::new(value)),
            ..Default::default()
        }
    }

    /// Sets the next reading.
    pub fn set(&self, value: u16) {
        self.value.store(value, Ordering::SeqCst);
    }

    /// Makes subsequent reads fail (or succeed again).
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful conversions performed.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl AnalogInput for MockAnalog {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, ()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(());
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.load(Ordering::SeqCst))
    }
}

// ============================================================================
// PWM
// ============================================================================

/// Mock PWM channel with a fixed wrap value.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::hal::MockPwm;
/// use fpga_energy_bridge::traits::SetDutyCycle;
///
/// let buzzer = MockPwm::new(1000);
/// let mut channel = buzzer.clone();
///
/// channel.set_duty_cycle(700).unwrap();
/// assert_eq!(buzzer.level(), 700);
/// assert_eq!(buzzer.duty_percent(), 70);
/// ```
#[derive(Clone, Debug)]
pub struct MockPwm {
    top: u16,
    level: Arc<AtomicU16>,
}

impl MockPwm {
    /// Creates a silent channel that wraps at `top`.
    pub fn new(top: u16) -> Self {
        Self {
            top,
            level: Arc::new(AtomicU16::new(0)),
        }
    }

    /// Creates a channel configured from derived timing.
    pub fn from_timing(timing: PwmTiming) -> Self {
        Self::new(timing.top.min(u16::MAX as u32) as u16)
    }

    /// Current compare level.
    pub fn level(&self) -> u16 {
        self.level.load(Ordering::SeqCst)
    }

    /// Current duty, rounded to the nearest percent.
    pub fn duty_percent(&self) -> u8 {
        if self.top == 0 {
            return 0;
        }
        ((self.level() as u32 * 100 + self.top as u32 / 2) / self.top as u32) as u8
    }

    /// Whether the channel is producing sound.
    pub fn is_sounding(&self) -> bool {
        self.level() > 0
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.top
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.level.store(duty.min(self.top), Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Display
// ============================================================================

/// Mock display for testing.
///
/// Records every rendered frame as a `(header, mode_name)` pair.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::hal::MockDisplay;
/// use fpga_energy_bridge::traits::ModeDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// display.render("MODE", "ELECTRIC").unwrap();
///
/// assert!(display.initialized);
/// assert_eq!(display.render_count(), 1);
/// assert_eq!(display.last_frame(), Some(("MODE", "ELECTRIC")));
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Whether init() was called.
    pub initialized: bool,
    /// Every frame rendered, oldest first.
    pub frames: Vec<(String, String)>,
    /// When set, render() fails.
    pub fail_render: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered.
    pub fn render_count(&self) -> usize {
        self.frames.len()
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<(&str, &str)> {
        self.frames
            .last()
            .map(|(header, mode)| (header.as_str(), mode.as_str()))
    }
}

impl ModeDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn render(&mut self, header: &str, mode_name: &str) -> Result<(), ()> {
        if self.fail_render {
            return Err(());
        }
        self.frames.push((header.into(), mode_name.into()));
        Ok(())
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Mock delay that returns immediately and records what was asked for.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::hal::MockDelay;
/// use fpga_energy_bridge::traits::DelayNs;
///
/// let mut delay = MockDelay::new();
/// delay.delay_ms(500);
/// delay.delay_ms(200);
///
/// assert_eq!(delay.calls_ms, vec![500, 200]);
/// assert_eq!(delay.total_ms(), 700);
/// ```
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Millisecond delays requested via `delay_ms`, in order.
    pub calls_ms: Vec<u32>,
    total_ns: u64,
}

impl MockDelay {
    /// Creates a new mock delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time requested, in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.total_ns += ms as u64 * 1_000_000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_clones_share_level() {
        let pin = MockPin::new(true);
        let mut other = pin.clone();
        assert!(other.is_high().unwrap());

        pin.press();
        assert!(other.is_low().unwrap());
    }

    #[test]
    fn pin_counts_writes_only() {
        let pin = MockPin::new(false);
        let mut out = pin.clone();

        pin.set(true);
        assert_eq!(pin.writes(), 0);

        out.set_low().unwrap();
        out.set_high().unwrap();
        assert_eq!(pin.writes(), 2);
        assert!(pin.is_set_high());
    }

    #[test]
    fn pin_write_failure_is_one_shot() {
        let pin = MockPin::new(false);
        let mut out = pin.clone();

        pin.fail_next_write();
        assert_eq!(out.set_high(), Err(digital::ErrorKind::Other));
        assert!(!pin.is_set_high());
        assert_eq!(pin.writes(), 0);

        out.set_high().unwrap();
        assert!(pin.is_set_high());
    }

    #[test]
    fn pwm_clamps_to_top() {
        let pwm = MockPwm::new(100);
        let mut channel = pwm.clone();
        channel.set_duty_cycle(500).unwrap();
        assert_eq!(pwm.level(), 100);
        assert_eq!(pwm.duty_percent(), 100);
    }

    #[test]
    fn pwm_from_timing() {
        let pwm = MockPwm::from_timing(PwmTiming::derive(80_000_000, 2000));
        assert_eq!(pwm.max_duty_cycle(), 39_999);
        assert!(!pwm.is_sounding());
    }

    #[test]
    fn display_render_failure() {
        let mut display = MockDisplay::new();
        display.fail_render = true;
        assert!(display.render("a", "b").is_err());
        assert_eq!(display.render_count(), 0);
    }

    #[test]
    fn delay_records_sub_millisecond() {
        let mut delay = MockDelay::new();
        delay.delay_us(1500);
        assert!(delay.calls_ms.is_empty());
        assert_eq!(delay.total_ms(), 1);
    }
}
