//! Hardware abstraction for the polling tasks.
//!
//! Digital lines, PWM channels and delays use the `embedded-hal` 1.0 traits
//! directly, so any HAL that implements them (ESP-IDF, RP2040, the mocks in
//! [`crate::hal::mock`]) plugs into the tasks unchanged. `embedded-hal` has
//! no ADC trait, so [`AnalogInput`] covers the joystick axes.
//!
//! | Trait | Used for |
//! |-------|----------|
//! | [`InputPin`] | Buttons, joystick switch, FPGA mode lines |
//! | [`OutputPin`] | FPGA input lines, status LEDs |
//! | [`SetDutyCycle`] | Buzzers |
//! | [`DelayNs`] | Per-iteration task delay |
//! | [`AnalogInput`] | Joystick axes |
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::hal::MockAnalog;
//! use fpga_energy_bridge::traits::AnalogInput;
//!
//! let mut axis = MockAnalog::new(2048);
//! assert_eq!(axis.read_raw().unwrap(), 2048);
//!
//! axis.set(4095);
//! assert_eq!(axis.read_raw().unwrap(), 4095);
//! ```

pub use embedded_hal::delay::DelayNs;
pub use embedded_hal::digital::{InputPin, OutputPin, PinState};
pub use embedded_hal::pwm::SetDutyCycle;

/// One analog input channel.
///
/// Readings are raw converter counts. For the 12-bit converters this
/// firmware targets that is `0..=4095`, but callers must clamp: some HALs
/// can return values above the nominal range.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use fpga_energy_bridge::traits::AnalogInput;
///
/// struct MyAdcChannel { /* hardware handles */ }
///
/// impl AnalogInput for MyAdcChannel {
///     type Error = ();
///
///     fn read_raw(&mut self) -> Result<u16, ()> {
///         // Select channel, start conversion, wait...
///         Ok(2048)
///     }
/// }
/// ```
pub trait AnalogInput {
    /// Error type for conversions.
    type Error;

    /// Performs one blocking conversion and returns the raw count.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        T::read_raw(self)
    }
}
