//! Joystick axes via the ESP32 one-shot ADC.
//!
//! Both axes sit on ADC1 (GPIO1/GPIO2 on the S3) at 11 dB attenuation, which
//! covers the full 0-3.3 V swing of the joystick potentiometers.
//!
//! # Wiring
//!
//! - VRy → GPIO1 (ADC1 channel 0)
//! - VRx → GPIO2 (ADC1 channel 1)
//! - SW → GPIO4 (pull-up, active low)

use core::borrow::Borrow;

use crate::traits::AnalogInput;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::gpio::ADCPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

impl<'d, T, M> AnalogInput for AdcChannelDriver<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    type Error = EspError;

    fn read_raw(&mut self) -> Result<u16, EspError> {
        AdcChannelDriver::read_raw(self)
    }
}

/// Opens one joystick axis on an already-created ADC driver.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::adc::oneshot::AdcDriver;
/// use fpga_energy_bridge::hal::esp32::joystick_axis;
///
/// let adc1 = AdcDriver::new(peripherals.adc1)?;
/// let vertical = joystick_axis(&adc1, peripherals.pins.gpio1)?;
/// ```
pub fn joystick_axis<'d, T>(
    adc: &'d AdcDriver<'d, T::Adc>,
    pin: impl Peripheral<P = T> + 'd,
) -> Result<AdcChannelDriver<'d, T, &'d AdcDriver<'d, T::Adc>>, EspError>
where
    T: ADCPin,
{
    let config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    AdcChannelDriver::new(adc, pin, &config)
}
