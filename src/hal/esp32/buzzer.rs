//! Buzzer pair on the ESP32 LEDC peripheral.
//!
//! Both buzzers share one LEDC timer running at the tone frequency. The LEDC
//! has no free-running wrap register like a classic PWM slice; its period is
//! `2^bits` counts, so the wrap derived by [`PwmTiming`] is mapped onto the
//! nearest supported resolution. `LedcDriver` implements `SetDutyCycle`
//! with `max_duty_cycle()` as the effective wrap, which is all
//! [`Buzzer`](crate::tasks::Buzzer) needs.
//!
//! # Wiring
//!
//! - Buzzer A → GPIO21
//! - Buzzer B → GPIO47

use crate::config::BuzzerConfig;
use crate::pwm::PwmTiming;
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

/// Highest LEDC resolution usable at audio frequencies on the S3.
const MAX_BITS: u32 = 14;

/// Picks the LEDC resolution whose period best fits the derived wrap.
pub fn resolution_for(timing: &PwmTiming) -> Resolution {
    let counts = timing.top.saturating_add(1);
    let bits = (u32::BITS - 1 - counts.leading_zeros()).min(MAX_BITS);
    match bits {
        14 => Resolution::Bits14,
        13 => Resolution::Bits13,
        12 => Resolution::Bits12,
        11 => Resolution::Bits11,
        10 => Resolution::Bits10,
        _ => Resolution::Bits8,
    }
}

/// Configures one LEDC timer at the buzzer tone and attaches both buzzers.
///
/// Returns `(buzzer_a, buzzer_b)`, both silent.
///
/// # Example
///
/// ```ignore
/// use fpga_energy_bridge::config::BuzzerConfig;
/// use fpga_energy_bridge::hal::esp32::buzzer_pair;
///
/// let (a, b) = buzzer_pair(
///     peripherals.pins.gpio21,
///     peripherals.pins.gpio47,
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
///     peripherals.ledc.channel1,
///     &BuzzerConfig::default(),
/// )?;
/// ```
pub fn buzzer_pair<'d, T, TI, AC, ACI, BC, BCI, AP, API, BP, BPI>(
    a_pin: AP,
    b_pin: BP,
    timer: T,
    a_channel: AC,
    b_channel: BC,
    cfg: &BuzzerConfig,
) -> Result<(LedcDriver<'d>, LedcDriver<'d>), esp_idf_hal::sys::EspError>
where
    TI: esp_idf_hal::ledc::LedcTimer + 'd,
    T: Peripheral<P = TI> + 'd,
    ACI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
    AC: Peripheral<P = ACI> + 'd,
    BCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
    BC: Peripheral<P = BCI> + 'd,
    API: esp_idf_hal::gpio::OutputPin + 'd,
    AP: Peripheral<P = API> + 'd,
    BPI: esp_idf_hal::gpio::OutputPin + 'd,
    BP: Peripheral<P = BPI> + 'd,
{
    let timing = PwmTiming::derive(cfg.clock_hz, cfg.frequency_hz);
    let resolution = resolution_for(&timing);

    let timer_config = TimerConfig::default()
        .frequency(cfg.frequency_hz.max(1).Hz())
        .resolution(resolution);
    let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;

    let mut a = LedcDriver::new(a_channel, &timer_driver, a_pin)?;
    let mut b = LedcDriver::new(b_channel, &timer_driver, b_pin)?;
    a.set_duty(0)?;
    b.set_duty(0)?;

    log::info!(
        "[BUZZER] LEDC {} Hz, {} bits (derived wrap {})",
        cfg.frequency_hz,
        resolution.bits(),
        timing.top
    );
    Ok((a, b))
}
