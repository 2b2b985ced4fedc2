//! Joystick to FPGA power-demand lines.
//!
//! At start-up the stick must be left at rest: after a settling delay both
//! axes are sampled once and the readings become the calibration center.
//! Every 100 ms the vertical axis is then converted to a power demand,
//! classified into a [`PowerBand`], and the three FPGA lines are driven so
//! that exactly one is high. Only band changes are reported.
//!
//! The horizontal axis and the stick's push switch are not used for control;
//! the first is logged at calibration, the second with each band change.

use core::fmt;

use crate::config::{JoystickConfig, TimingConfig};
use crate::error::HardwareError;
use crate::joystick::{power_demand, PowerBand, ADC_MAX};
use crate::traits::{AnalogInput, DelayNs, InputPin, OutputPin};

use super::{drive, is_active_low};

/// Analog axes and push switch of the joystick.
#[derive(Debug)]
pub struct JoystickInputs<Y, X, S> {
    /// Vertical axis (power demand).
    pub vertical: Y,
    /// Horizontal axis.
    pub horizontal: X,
    /// Push switch (pull-up, active low).
    pub switch: S,
}

/// The three power-demand lines toward the FPGA.
#[derive(Debug)]
pub struct PowerOutputs<O> {
    /// Asserted in [`PowerBand::Low`].
    pub low: O,
    /// Asserted in [`PowerBand::High`].
    pub high: O,
    /// Asserted in [`PowerBand::Idle`].
    pub idle: O,
}

/// Resting readings captured at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    /// Vertical-axis center.
    pub center_y: u16,
    /// Horizontal-axis center.
    pub center_x: u16,
}

impl Default for Calibration {
    /// Mid-scale on both axes, used until [`JoystickTask::calibrate`] runs.
    fn default() -> Self {
        let mid = ADC_MAX / 2 + 1;
        Self {
            center_y: mid,
            center_x: mid,
        }
    }
}

/// Reported when the power-demand band changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoystickReport {
    /// Demand percentage that triggered the change.
    pub percent: u8,
    /// New band.
    pub band: PowerBand,
    /// Push switch state at the same sample.
    pub switch_pressed: bool,
}

impl fmt::Display for JoystickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "power = {:3}% | {} | SW={}",
            self.percent,
            self.band.lines(),
            self.switch_pressed as u8
        )
    }
}

/// Joystick polling task.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::config::{JoystickConfig, TimingConfig};
/// use fpga_energy_bridge::hal::{MockAnalog, MockDelay, MockPin};
/// use fpga_energy_bridge::joystick::PowerBand;
/// use fpga_energy_bridge::tasks::{JoystickInputs, JoystickTask, PowerOutputs};
///
/// let y = MockAnalog::new(2000);
/// let inputs = JoystickInputs {
///     vertical: y.clone(),
///     horizontal: MockAnalog::new(2100),
///     switch: MockPin::new(true),
/// };
/// let outputs = PowerOutputs {
///     low: MockPin::new(false),
///     high: MockPin::new(false),
///     idle: MockPin::new(false),
/// };
/// let mut task = JoystickTask::new(
///     inputs,
///     outputs,
///     JoystickConfig::default(),
///     &TimingConfig::default(),
/// )
/// .unwrap();
///
/// let calibration = task.start(&mut MockDelay::new()).unwrap();
/// assert_eq!(calibration.center_y, 2000);
///
/// // At rest: 50 %, low-demand band
/// let report = task.poll().unwrap().unwrap();
/// assert_eq!(report.band, PowerBand::Low);
///
/// // Full forward
/// y.set(4095);
/// assert_eq!(task.poll().unwrap().unwrap().band, PowerBand::High);
/// ```
pub struct JoystickTask<Y, X, S, O> {
    inputs: JoystickInputs<Y, X, S>,
    outputs: PowerOutputs<O>,
    cfg: JoystickConfig,
    calibration: Calibration,
    band: PowerBand,
    period_ms: u32,
    settle_ms: u32,
}

impl<Y, X, S, O> JoystickTask<Y, X, S, O>
where
    Y: AnalogInput,
    X: AnalogInput,
    S: InputPin,
    O: OutputPin,
{
    /// Creates the task and drives all three power lines low.
    pub fn new(
        inputs: JoystickInputs<Y, X, S>,
        mut outputs: PowerOutputs<O>,
        cfg: JoystickConfig,
        timing: &TimingConfig,
    ) -> Result<Self, HardwareError> {
        drive(&mut outputs.low, false)?;
        drive(&mut outputs.high, false)?;
        drive(&mut outputs.idle, false)?;

        Ok(Self {
            inputs,
            outputs,
            cfg,
            calibration: Calibration::default(),
            band: PowerBand::Idle,
            period_ms: timing.joystick_period_ms,
            settle_ms: timing.joystick_settle_ms,
        })
    }

    /// Waits for the stick to settle, then calibrates.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<Calibration, HardwareError> {
        log::info!("[JOYSTICK] calibrating, keep the joystick still");
        delay.delay_ms(self.settle_ms);

        let calibration = self.calibrate()?;
        log::info!(
            "[JOYSTICK] calibration done: center Y = {} | center X = {}",
            calibration.center_y,
            calibration.center_x
        );
        log::info!("[JOYSTICK] monitoring power demand");
        Ok(calibration)
    }

    /// Samples both axes once and stores them as the resting center.
    pub fn calibrate(&mut self) -> Result<Calibration, HardwareError> {
        let center_y = self
            .inputs
            .vertical
            .read_raw()
            .map_err(|_| HardwareError::Analog)?;
        let center_x = self
            .inputs
            .horizontal
            .read_raw()
            .map_err(|_| HardwareError::Analog)?;

        self.calibration = Calibration { center_y, center_x };
        Ok(self.calibration)
    }

    /// Samples the stick once and drives the power lines.
    ///
    /// Lines are written on every poll; a report is returned only when the
    /// band differs from the previous poll.
    pub fn poll(&mut self) -> Result<Option<JoystickReport>, HardwareError> {
        let raw_y = self
            .inputs
            .vertical
            .read_raw()
            .map_err(|_| HardwareError::Analog)?;
        let switch_pressed = is_active_low(&mut self.inputs.switch)?;

        let percent = power_demand(raw_y, self.calibration.center_y, &self.cfg);
        let band = PowerBand::classify(percent, &self.cfg);

        let lines = band.lines();
        drive(&mut self.outputs.low, lines.low)?;
        drive(&mut self.outputs.high, lines.high)?;
        drive(&mut self.outputs.idle, lines.idle)?;

        if band == self.band {
            return Ok(None);
        }
        self.band = band;
        Ok(Some(JoystickReport {
            percent,
            band,
            switch_pressed,
        }))
    }

    /// Current calibration.
    #[inline]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Band reported by the last poll.
    #[inline]
    pub fn band(&self) -> PowerBand {
        self.band
    }

    /// Poll period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Calibrates, then runs the task forever.
    pub fn run<D: DelayNs>(mut self, mut delay: D) -> ! {
        if let Err(e) = self.start(&mut delay) {
            log::warn!("[JOYSTICK] calibration failed ({}), using mid-scale center", e);
        }
        loop {
            match self.poll() {
                Ok(Some(report)) => log::info!("[JOYSTICK] {}", report),
                Ok(None) => {}
                Err(e) => log::warn!("[JOYSTICK] {}", e),
            }
            delay.delay_ms(self.period_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockAnalog, MockDelay, MockPin};
    use alloc::format;

    struct Rig {
        y: MockAnalog,
        x: MockAnalog,
        switch: MockPin,
        low: MockPin,
        high: MockPin,
        idle: MockPin,
        task: JoystickTask<MockAnalog, MockAnalog, MockPin, MockPin>,
    }

    fn rig(center: u16) -> Rig {
        let y = MockAnalog::new(center);
        let x = MockAnalog::new(1900);
        let switch = MockPin::new(true);
        let low = MockPin::new(true);
        let high = MockPin::new(true);
        let idle = MockPin::new(true);
        let task = JoystickTask::new(
            JoystickInputs {
                vertical: y.clone(),
                horizontal: x.clone(),
                switch: switch.clone(),
            },
            PowerOutputs {
                low: low.clone(),
                high: high.clone(),
                idle: idle.clone(),
            },
            JoystickConfig::default(),
            &TimingConfig::default(),
        )
        .unwrap();
        Rig {
            y,
            x,
            switch,
            low,
            high,
            idle,
            task,
        }
    }

    fn asserted(r: &Rig) -> (bool, bool, bool) {
        (r.low.is_set_high(), r.high.is_set_high(), r.idle.is_set_high())
    }

    // =========================================================================
    // Start-up Tests
    // =========================================================================

    #[test]
    fn lines_start_low() {
        let r = rig(2048);
        assert_eq!(asserted(&r), (false, false, false));
    }

    #[test]
    fn start_settles_then_samples_both_axes() {
        let mut r = rig(2010);
        let mut delay = MockDelay::new();
        let cal = r.task.start(&mut delay).unwrap();

        assert_eq!(delay.calls_ms, [1000]);
        assert_eq!(cal, Calibration { center_y: 2010, center_x: 1900 });
        assert_eq!(r.x.reads(), 1);
    }

    #[test]
    fn horizontal_axis_not_read_while_polling() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();
        for _ in 0..3 {
            r.task.poll().unwrap();
        }
        assert_eq!(r.x.reads(), 1);
    }

    #[test]
    fn calibration_failure_is_analog_error() {
        let mut r = rig(2048);
        r.y.fail(true);
        assert_eq!(r.task.calibrate(), Err(HardwareError::Analog));
    }

    // =========================================================================
    // Band Tests
    // =========================================================================

    #[test]
    fn first_poll_at_rest_reports_low_band() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();

        let report = r.task.poll().unwrap().unwrap();
        assert_eq!(report.percent, 50);
        assert_eq!(report.band, PowerBand::Low);
        assert_eq!(asserted(&r), (true, false, false));
    }

    #[test]
    fn first_poll_in_idle_band_is_silent() {
        let mut r = rig(4095);
        r.task.calibrate().unwrap();
        r.y.set(0);

        assert_eq!(r.task.poll().unwrap(), None);
        assert_eq!(asserted(&r), (false, false, true));
    }

    #[test]
    fn full_sweep() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();
        r.task.poll().unwrap();

        r.y.set(4095);
        let report = r.task.poll().unwrap().unwrap();
        assert_eq!(report.band, PowerBand::High);
        assert_eq!(asserted(&r), (false, true, false));

        r.y.set(0);
        let report = r.task.poll().unwrap().unwrap();
        assert_eq!(report.band, PowerBand::Idle);
        assert_eq!(report.percent, 0);
        assert_eq!(asserted(&r), (false, false, true));
    }

    #[test]
    fn movement_within_band_is_silent() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();
        r.task.poll().unwrap();

        for raw in [2100, 2300, 2400, 2000, 1500] {
            r.y.set(raw);
            assert_eq!(r.task.poll().unwrap(), None);
            assert_eq!(asserted(&r), (true, false, false));
        }
    }

    #[test]
    fn switch_reported_with_band_change() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();
        r.switch.press();

        let report = r.task.poll().unwrap().unwrap();
        assert!(report.switch_pressed);

        // Switch alone never triggers a report
        r.switch.release();
        assert_eq!(r.task.poll().unwrap(), None);
    }

    #[test]
    fn read_failure_leaves_lines_untouched() {
        let mut r = rig(2048);
        r.task.calibrate().unwrap();
        r.task.poll().unwrap();

        r.y.fail(true);
        assert_eq!(r.task.poll(), Err(HardwareError::Analog));
        assert_eq!(asserted(&r), (true, false, false));
        assert_eq!(r.task.band(), PowerBand::Low);
    }

    #[test]
    fn report_text() {
        let report = JoystickReport {
            percent: 7,
            band: PowerBand::Idle,
            switch_pressed: true,
        };
        assert_eq!(
            format!("{}", report),
            "power =   7% | LOW=0 HIGH=0 IDLE=1 | SW=1"
        );
    }
}
