//! Joystick-to-power-demand conversion.
//!
//! The vertical axis is read as a 12-bit ADC value, offset by a center
//! captured at start-up, and mapped onto a 0–100 demand where 50 is neutral.
//! The demand then falls into exactly one of three bands, each driving one
//! FPGA input line.
//!
//! ```text
//!  0        idle_below        high_from        100
//!  |---Idle---|-------Low--------|-----High-----|
//! ```
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::config::JoystickConfig;
//! use fpga_energy_bridge::joystick::{power_demand, PowerBand};
//!
//! let cfg = JoystickConfig::default();
//! let center = 2048;
//!
//! assert_eq!(power_demand(center, center, &cfg), 50);
//! assert_eq!(PowerBand::classify(50, &cfg), PowerBand::Low);
//!
//! assert_eq!(power_demand(4095, center, &cfg), 100);
//! assert_eq!(PowerBand::classify(100, &cfg), PowerBand::High);
//! ```

use core::fmt;

use crate::config::JoystickConfig;

/// Largest reading of a 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Converts a raw reading to an absolute percentage of full scale.
///
/// Readings above [`ADC_MAX`] are clamped first, so the result is always
/// in `0..=100`.
#[inline]
pub fn adc_to_percent(raw: u16) -> u8 {
    let raw = raw.min(ADC_MAX) as u32;
    (raw * 100 / ADC_MAX as u32) as u8
}

/// Power demand (0–100) for a vertical-axis reading relative to its center.
///
/// `demand = clamp((raw - center) * 100 / span + neutral, 0, 100)`, with the
/// reading clamped to `adc_max` beforehand. A non-positive `span` is treated
/// as 1.
pub fn power_demand(raw: u16, center: u16, cfg: &JoystickConfig) -> u8 {
    let raw = raw.min(cfg.adc_max) as i32;
    let delta = raw - center as i32;
    let demand = delta * 100 / cfg.span.max(1) + cfg.neutral_percent;
    demand.clamp(0, 100) as u8
}

/// Power demand band reported to the FPGA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PowerBand {
    /// Below `idle_below`.
    #[default]
    Idle,
    /// From `idle_below` up to (not including) `high_from`.
    Low,
    /// At or above `high_from`.
    High,
}

impl PowerBand {
    /// Classifies a demand percentage.
    pub fn classify(percent: u8, cfg: &JoystickConfig) -> Self {
        if percent < cfg.idle_below {
            PowerBand::Idle
        } else if percent < cfg.high_from {
            PowerBand::Low
        } else {
            PowerBand::High
        }
    }

    /// Output line levels for this band.
    #[inline]
    pub const fn lines(self) -> PowerLines {
        PowerLines {
            low: matches!(self, PowerBand::Low),
            high: matches!(self, PowerBand::High),
            idle: matches!(self, PowerBand::Idle),
        }
    }
}

/// Levels of the three power-demand lines toward the FPGA.
///
/// Built only from a [`PowerBand`], so exactly one line is ever asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerLines {
    /// Low-demand line.
    pub low: bool,
    /// High-demand line.
    pub high: bool,
    /// Idle line.
    pub idle: bool,
}

impl PowerLines {
    /// Number of asserted lines.
    #[inline]
    pub const fn asserted(&self) -> u8 {
        self.low as u8 + self.high as u8 + self.idle as u8
    }
}

impl fmt::Display for PowerLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LOW={} HIGH={} IDLE={}",
            self.low as u8, self.high as u8, self.idle as u8
        )
    }
}
