//! PWM timing for the buzzers.
//!
//! A PWM slice counts from 0 to `top` (the wrap value) at
//! `clock_hz / divider`. For a target tone frequency the wrap must fit the
//! 16-bit counter; when it does not at divider 1, the divider is raised to 4.
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::pwm::{duty_to_level, PwmTiming};
//!
//! let timing = PwmTiming::derive(125_000_000, 2000);
//! assert_eq!(timing.divider, 1);
//! assert_eq!(timing.top, 62_499);
//!
//! // 1 kHz overflows at divider 1
//! let timing = PwmTiming::derive(125_000_000, 1000);
//! assert_eq!(timing.divider, 4);
//! assert_eq!(timing.top, 31_249);
//!
//! assert_eq!(duty_to_level(70, 1000), 700);
//! ```

/// Largest wrap value a 16-bit PWM counter accepts.
pub const MAX_TOP: u32 = u16::MAX as u32;

/// Divider used when the wrap does not fit at divider 1.
pub const FALLBACK_DIVIDER: u32 = 4;

/// Clock divider and wrap value for one PWM channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmTiming {
    /// Integer clock divider.
    pub divider: u32,
    /// Counter wrap value; a level equal to `top` is 100 % duty.
    pub top: u32,
}

impl PwmTiming {
    /// Derives divider and wrap for `freq_hz` from a `clock_hz` source.
    ///
    /// Tries divider 1 first, then [`FALLBACK_DIVIDER`]. The fallback result is
    /// not checked again; frequencies low enough to overflow at divider 4 are
    /// not supported and are saturated to [`MAX_TOP`].
    pub fn derive(clock_hz: u32, freq_hz: u32) -> Self {
        let freq_hz = freq_hz.max(1);
        let top = wrap_for(clock_hz, freq_hz, 1);
        if top <= MAX_TOP {
            return Self { divider: 1, top };
        }
        Self {
            divider: FALLBACK_DIVIDER,
            top: wrap_for(clock_hz, freq_hz, FALLBACK_DIVIDER).min(MAX_TOP),
        }
    }

    /// Tone frequency actually produced by this timing.
    #[inline]
    pub fn output_hz(&self, clock_hz: u32) -> u32 {
        (clock_hz as u64 / (self.divider as u64 * (self.top as u64 + 1))) as u32
    }

    /// Compare level for a duty cycle under this timing.
    #[inline]
    pub fn level(&self, duty_percent: u8) -> u32 {
        duty_to_level(duty_percent, self.top)
    }
}

fn wrap_for(clock_hz: u32, freq_hz: u32, divider: u32) -> u32 {
    let ticks = clock_hz as u64 / (freq_hz as u64 * divider as u64);
    ticks.saturating_sub(1).min(u32::MAX as u64) as u32
}

/// Linear duty-to-level conversion: `level = duty * top / 100`.
///
/// Duty above 100 is clamped.
#[inline]
pub fn duty_to_level(duty_percent: u8, top: u32) -> u32 {
    let duty = duty_percent.min(100) as u64;
    (duty * top as u64 / 100) as u32
}
