//! SSD1306 OLED display implementation for ESP32.
//!
//! Shows the decoded FPGA mode on a 128x64 panel as two lines of text:
//!
//! ```text
//! ┌────────────────────────────┐
//! │                            │
//! │   CURRENT MODE:            │  header at (10, 20)
//! │                            │
//! │  REGEN. BRAKING            │  mode name at (10, 40)
//! │                            │
//! └────────────────────────────┘
//! ```
//!
//! # Wiring
//!
//! - SDA → GPIO41
//! - SCL → GPIO42
//! - VCC → 3.3V
//! - GND → GND

use crate::traits::ModeDisplay;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use esp_idf_hal::i2c::I2cDriver;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver<'d> = Ssd1306<
    I2CInterface<I2cDriver<'d>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

const HEADER_POS: Point = Point::new(10, 20);
const MODE_POS: Point = Point::new(10, 40);

/// SSD1306 OLED display for ESP32.
pub struct Esp32Display<'d> {
    display: DisplayDriver<'d>,
}

impl<'d> Esp32Display<'d> {
    /// Wraps an I2C driver talking to the panel at `address`. The panel
    /// itself is configured by [`ModeDisplay::init`].
    pub fn new(i2c: I2cDriver<'d>, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { display }
    }
}

impl ModeDisplay for Esp32Display<'_> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()?;
        self.display.clear(BinaryColor::Off)?;
        self.display.flush()?;
        Ok(())
    }

    fn render(&mut self, header: &str, mode_name: &str) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;

        let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::new(header, HEADER_POS, text_style).draw(&mut self.display)?;
        Text::new(mode_name, MODE_POS, text_style).draw(&mut self.display)?;

        self.display.flush()?;
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}
