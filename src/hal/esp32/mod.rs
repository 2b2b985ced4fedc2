//! ESP32-S3 hardware abstraction layer for the FPGA bridge.
//!
//! ESP-IDF ships FreeRTOS, so the six tasks map one-to-one onto FreeRTOS
//! tasks (spawned as `std` threads) and `FreeRtos` provides the per-task
//! delay. GPIO lines use `esp_idf_hal::gpio::PinDriver` directly: it already
//! implements the `embedded-hal` digital traits the tasks are generic over.
//! This module adds what `embedded-hal` does not cover.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-S3 (Xtensa LX7 240MHz)
//! - **Joystick**: two-axis analog stick with push switch
//! - **Display**: SSD1306 128x64 OLED (I2C)
//! - **Buzzers**: two passive buzzers on LEDC
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod adc;
mod buzzer;
mod display;

pub use adc::joystick_axis;
pub use buzzer::{buzzer_pair, resolution_for};
pub use display::{DisplayError, Esp32Display};

/// Pin assignments for the ESP32-S3 bridge board.
///
/// - Buttons and joystick on GPIO1-6
/// - FPGA control outputs on GPIO8-12
/// - FPGA mode inputs on GPIO13-15
/// - Status LEDs on GPIO16-18
/// - Buzzers on GPIO21/47, OLED on GPIO41/42
pub mod pins {
    // =========================================================================
    // Joystick
    // =========================================================================

    /// Vertical axis (VRy) - ADC1 channel 0
    pub const JOY_VRY: i32 = 1;

    /// Horizontal axis (VRx) - ADC1 channel 1
    pub const JOY_VRX: i32 = 2;

    /// Joystick push switch (pull-up, active low)
    pub const JOY_SW: i32 = 4;

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Brake button (button A, pull-up, active low)
    pub const BRAKE_BTN: i32 = 5;

    /// Battery-simulation button (button B, pull-up, active low)
    pub const BATTERY_BTN: i32 = 6;

    // =========================================================================
    // Outputs to the FPGA
    // =========================================================================

    /// Brake request line
    pub const FPGA_BRAKE: i32 = 8;

    /// Low-battery simulation line
    pub const FPGA_BATTERY: i32 = 9;

    /// Power demand: low band
    pub const POWER_LOW: i32 = 10;

    /// Power demand: high band
    pub const POWER_HIGH: i32 = 11;

    /// Power demand: idle
    pub const POWER_IDLE: i32 = 12;

    // =========================================================================
    // Mode inputs from the FPGA (pull-down)
    // =========================================================================

    /// Mode bit 0
    pub const MODE_R: i32 = 13;

    /// Mode bit 1
    pub const MODE_G: i32 = 14;

    /// Mode bit 2
    pub const MODE_B: i32 = 15;

    // =========================================================================
    // Feedback
    // =========================================================================

    /// Red status LED (mirrors R)
    pub const LED_R: i32 = 16;

    /// Green status LED (mirrors G)
    pub const LED_G: i32 = 17;

    /// Blue status LED (mirrors B)
    pub const LED_B: i32 = 18;

    /// Buzzer A
    pub const BUZZER_A: i32 = 21;

    /// Buzzer B
    pub const BUZZER_B: i32 = 47;

    // =========================================================================
    // I2C Display (SSD1306)
    // =========================================================================

    /// I2C data line
    pub const I2C_SDA: i32 = 41;

    /// I2C clock line
    pub const I2C_SCL: i32 = 42;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;
}
