//! Audio feedback during regenerative braking.
//!
//! Two buzzers run at a fixed tone frequency. Every 150 ms the task reads
//! the shared mode once: in regenerative braking the buzzers alternate (one
//! at the configured duty, the other silent, swapping each poll); in any
//! other mode both are silent.

use crate::config::{BuzzerConfig, TimingConfig};
use crate::error::HardwareError;
use crate::mode::ModeCode;
use crate::pwm::duty_to_level;
use crate::shared::SharedMode;
use crate::traits::{DelayNs, SetDutyCycle};

/// One PWM-driven buzzer.
///
/// The wrap value is read once at construction; afterwards only the compare
/// level changes.
#[derive(Debug)]
pub struct Buzzer<P> {
    pwm: P,
    top: u16,
}

impl<P: SetDutyCycle> Buzzer<P> {
    /// Wraps a configured PWM channel and silences it.
    pub fn new(mut pwm: P) -> Result<Self, HardwareError> {
        let top = pwm.max_duty_cycle();
        pwm.set_duty_cycle_fully_off().map_err(HardwareError::pwm)?;
        Ok(Self { pwm, top })
    }

    /// Sets the duty cycle: `level = duty * top / 100`.
    pub fn set_duty_percent(&mut self, duty: u8) -> Result<(), HardwareError> {
        let level = duty_to_level(duty, self.top as u32) as u16;
        self.pwm.set_duty_cycle(level).map_err(HardwareError::pwm)
    }

    /// Wrap value of the channel.
    #[inline]
    pub fn top(&self) -> u16 {
        self.top
    }
}

/// Which buzzer sounded on a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuzzerOutput {
    /// Both buzzers off.
    Silent,
    /// Buzzer A on, B off.
    A,
    /// Buzzer B on, A off.
    B,
}

/// Buzzer polling task.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::config::{BuzzerConfig, TimingConfig};
/// use fpga_energy_bridge::hal::MockPwm;
/// use fpga_energy_bridge::mode::ModeCode;
/// use fpga_energy_bridge::shared::SharedMode;
/// use fpga_energy_bridge::tasks::{BuzzerOutput, BuzzerTask};
///
/// let shared = SharedMode::new();
/// let a = MockPwm::new(1000);
/// let b = MockPwm::new(1000);
/// let mut task = BuzzerTask::new(
///     a.clone(),
///     b.clone(),
///     &shared,
///     &BuzzerConfig::default(),
///     &TimingConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(task.poll().unwrap(), BuzzerOutput::Silent);
///
/// shared.publish(ModeCode::REGEN_BRAKING);
/// assert_eq!(task.poll().unwrap(), BuzzerOutput::A);
/// assert_eq!(a.duty_percent(), 70);
/// assert_eq!(task.poll().unwrap(), BuzzerOutput::B);
/// assert_eq!(b.duty_percent(), 70);
/// assert!(!a.is_sounding());
/// ```
pub struct BuzzerTask<'a, P> {
    a: Buzzer<P>,
    b: Buzzer<P>,
    shared: &'a SharedMode,
    toggle: bool,
    duty_percent: u8,
    period_ms: u32,
}

impl<'a, P: SetDutyCycle> BuzzerTask<'a, P> {
    /// Creates the task with both buzzers silent.
    pub fn new(
        a: P,
        b: P,
        shared: &'a SharedMode,
        cfg: &BuzzerConfig,
        timing: &TimingConfig,
    ) -> Result<Self, HardwareError> {
        let a = Buzzer::new(a)?;
        let b = Buzzer::new(b)?;
        log::info!("[BUZZER] ready at {} Hz", cfg.frequency_hz);

        Ok(Self {
            a,
            b,
            shared,
            toggle: false,
            duty_percent: cfg.duty_percent,
            period_ms: timing.buzzer_period_ms,
        })
    }

    /// Reads the shared mode once and drives the buzzers accordingly.
    pub fn poll(&mut self) -> Result<BuzzerOutput, HardwareError> {
        let mode = self.shared.current();

        if mode != ModeCode::REGEN_BRAKING {
            self.a.set_duty_percent(0)?;
            self.b.set_duty_percent(0)?;
            return Ok(BuzzerOutput::Silent);
        }

        self.toggle = !self.toggle;
        if self.toggle {
            self.a.set_duty_percent(self.duty_percent)?;
            self.b.set_duty_percent(0)?;
            Ok(BuzzerOutput::A)
        } else {
            self.a.set_duty_percent(0)?;
            self.b.set_duty_percent(self.duty_percent)?;
            Ok(BuzzerOutput::B)
        }
    }

    /// Poll period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Runs the task forever.
    pub fn run<D: DelayNs>(mut self, mut delay: D) -> ! {
        loop {
            if let Err(e) = self.poll() {
                log::warn!("[BUZZER] {}", e);
            }
            delay.delay_ms(self.period_ms);
        }
    }
}
