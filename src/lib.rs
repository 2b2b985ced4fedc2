//! # fpga-energy-bridge
//!
//! Input/feedback firmware for an FPGA-based hybrid-vehicle energy manager.
//! The microcontroller turns two buttons and an analog joystick into digital
//! control lines for the FPGA, and renders the FPGA's 3-bit operating-mode
//! code on RGB LEDs, an SSD1306 OLED and a pair of buzzers.
//!
//! ## Features
//!
//! - **Six independent periodic tasks**: brake, battery, joystick, LED monitor,
//!   OLED display and buzzer, each owning its own pins
//! - **Hardware abstraction**: tasks are generic over `embedded-hal` traits, so
//!   everything runs against mocks on desktop
//! - **One shared byte**: the display task publishes the decoded mode, the
//!   buzzer task reads it
//!
//! ## Architecture
//!
//! - `mode` - FPGA mode code, names and change tracking
//! - `joystick` - ADC to power-demand percentage and band classification
//! - `pwm` - buzzer PWM divider/wrap derivation
//! - `shared` - the mode cell shared between display and buzzer
//! - `tasks` - the six polling tasks
//! - `hal` - concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use fpga_energy_bridge::{
//!     config::TimingConfig,
//!     hal::MockPin,
//!     tasks::{BrakeEvent, BrakeTask},
//! };
//!
//! let button = MockPin::new(true); // pull-up, released
//! let brake_line = MockPin::new(false);
//! let mut task = BrakeTask::new(button.clone(), brake_line.clone(), &TimingConfig::default())
//!     .unwrap();
//!
//! button.press();
//! assert_eq!(task.poll().unwrap(), Some(BrakeEvent { applied: true }));
//! assert!(brake_line.is_set_high());
//!
//! // Holding the button produces no further events
//! assert_eq!(task.poll().unwrap(), None);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Configuration for timing, joystick bands, buzzer tone and display.
pub mod config;
/// Hardware error type shared by the tasks.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Joystick power-demand arithmetic.
pub mod joystick;
/// FPGA operating-mode code.
pub mod mode;
/// Buzzer PWM timing.
pub mod pwm;
/// Mode state shared between the display and buzzer tasks.
pub mod shared;
/// Periodic polling tasks.
pub mod tasks;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{BuzzerConfig, Config, DisplayConfig, JoystickConfig, TimingConfig};
pub use error::HardwareError;
pub use joystick::{adc_to_percent, power_demand, PowerBand, PowerLines};
pub use mode::{Mode, ModeChange, ModeCode, ModeTracker, SignalLines};
pub use pwm::{duty_to_level, PwmTiming};
pub use shared::{SharedMode, CURRENT_MODE};
pub use tasks::{
    BatteryTask, BrakeTask, BuzzerTask, DisplayTask, JoystickTask, ModeLines, MonitorTask,
};
pub use traits::{AnalogInput, ModeDisplay};
