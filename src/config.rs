//! Firmware configuration: polling cadences, joystick bands, buzzer and
//! display parameters.
//!
//! Uses `heapless::String` for `no_std` compatibility. Every default
//! reproduces the behaviour of the deployed firmware; there is no runtime
//! source of configuration (no flags, no environment, no flash).
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::config::{Config, JoystickConfig, TimingConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.timing.buzzer_period_ms, 150);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_timing(TimingConfig::default().with_display_period_ms(100))
//!     .with_joystick(JoystickConfig::default().with_bands(15, 80));
//! assert_eq!(config.joystick.high_from, 80);
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (display header text).
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating at a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete firmware configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Polling periods and start-up delays
    pub timing: TimingConfig,
    /// Joystick power-demand mapping
    pub joystick: JoystickConfig,
    /// Buzzer PWM parameters
    pub buzzer: BuzzerConfig,
    /// OLED display parameters
    pub display: DisplayConfig,
}

impl Config {
    /// Set timing configuration
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set joystick configuration
    pub fn with_joystick(mut self, joystick: JoystickConfig) -> Self {
        self.joystick = joystick;
        self
    }

    /// Set buzzer configuration
    pub fn with_buzzer(mut self, buzzer: BuzzerConfig) -> Self {
        self.buzzer = buzzer;
        self
    }

    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }
}

// ============================================================================
// Timing Config
// ============================================================================

/// Per-task polling periods and start-up delays, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Brake button poll period
    pub brake_period_ms: u32,
    /// Delay before the brake task starts polling
    pub brake_startup_ms: u32,
    /// Battery-simulation button poll period
    pub battery_period_ms: u32,
    /// Joystick poll period
    pub joystick_period_ms: u32,
    /// Settling time before the joystick center is captured
    pub joystick_settle_ms: u32,
    /// FPGA monitor (LED mirror) poll period
    pub monitor_period_ms: u32,
    /// OLED display poll period
    pub display_period_ms: u32,
    /// Delay before the I2C bus is brought up
    pub display_settle_ms: u32,
    /// Buzzer poll period
    pub buzzer_period_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            brake_period_ms: 50,
            brake_startup_ms: 1000,
            battery_period_ms: 50,
            joystick_period_ms: 100,
            joystick_settle_ms: 1000,
            monitor_period_ms: 100,
            display_period_ms: 200,
            display_settle_ms: 500,
            buzzer_period_ms: 150,
        }
    }
}

impl TimingConfig {
    /// Set the brake poll period
    pub fn with_brake_period_ms(mut self, ms: u32) -> Self {
        self.brake_period_ms = ms;
        self
    }

    /// Set the battery poll period
    pub fn with_battery_period_ms(mut self, ms: u32) -> Self {
        self.battery_period_ms = ms;
        self
    }

    /// Set the joystick poll period
    pub fn with_joystick_period_ms(mut self, ms: u32) -> Self {
        self.joystick_period_ms = ms;
        self
    }

    /// Set the monitor poll period
    pub fn with_monitor_period_ms(mut self, ms: u32) -> Self {
        self.monitor_period_ms = ms;
        self
    }

    /// Set the display poll period
    pub fn with_display_period_ms(mut self, ms: u32) -> Self {
        self.display_period_ms = ms;
        self
    }

    /// Set the buzzer poll period
    pub fn with_buzzer_period_ms(mut self, ms: u32) -> Self {
        self.buzzer_period_ms = ms;
        self
    }
}

// ============================================================================
// Joystick Config
// ============================================================================

/// Mapping from the joystick's vertical axis to a power-demand band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoystickConfig {
    /// Largest representable ADC reading (12-bit)
    pub adc_max: u16,
    /// Deflection from center (in counts) corresponding to 100 points
    pub span: i32,
    /// Percentage reported at the calibrated center
    pub neutral_percent: i32,
    /// Demand below this is idle
    pub idle_below: u8,
    /// Demand at or above this is high
    pub high_from: u8,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            adc_max: 4095,
            span: 2048,
            neutral_percent: 50,
            idle_below: 10,
            high_from: 70,
        }
    }
}

impl JoystickConfig {
    /// Set the band thresholds.
    ///
    /// `high_from` is raised to `idle_below` if given lower, so the three
    /// bands never overlap.
    pub fn with_bands(mut self, idle_below: u8, high_from: u8) -> Self {
        let idle_below = idle_below.min(100);
        self.idle_below = idle_below;
        self.high_from = high_from.clamp(idle_below, 100);
        self
    }

    /// Set the full-scale deflection span
    pub fn with_span(mut self, span: i32) -> Self {
        self.span = span.max(1);
        self
    }
}

// ============================================================================
// Buzzer Config
// ============================================================================

/// Buzzer PWM configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuzzerConfig {
    /// Tone frequency in Hz
    pub frequency_hz: u32,
    /// PWM source clock in Hz
    pub clock_hz: u32,
    /// Duty cycle of the sounding buzzer, in percent
    pub duty_percent: u8,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 2000,
            clock_hz: 80_000_000,
            duty_percent: 70,
        }
    }
}

impl BuzzerConfig {
    /// Set the tone frequency
    pub fn with_frequency_hz(mut self, hz: u32) -> Self {
        self.frequency_hz = hz.max(1);
        self
    }

    /// Set the PWM source clock
    pub fn with_clock_hz(mut self, hz: u32) -> Self {
        self.clock_hz = hz;
        self
    }

    /// Set the sounding duty cycle (clamped to 100)
    pub fn with_duty_percent(mut self, duty: u8) -> Self {
        self.duty_percent = duty.min(100);
        self
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// OLED display configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Fixed first line
    pub header: ShortString,
    /// I2C bus speed in Hz
    pub i2c_baudrate_hz: u32,
    /// SSD1306 I2C address
    pub i2c_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            header: short_string(" CURRENT MODE:"),
            i2c_baudrate_hz: 400_000,
            i2c_address: 0x3C,
        }
    }
}

impl DisplayConfig {
    /// Set the header line
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = short_string(header);
        self
    }

    /// Set the I2C bus speed
    pub fn with_baudrate_hz(mut self, hz: u32) -> Self {
        self.i2c_baudrate_hz = hz;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
