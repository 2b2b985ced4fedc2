//! Property-based tests for the conversion arithmetic
//!
//! - ADC percentage: always in range, linear over the 12-bit scale, clamped above it
//! - Power bands: exactly one band per demand value
//! - Mode code: `R + 2G + 4B`, and exactly one LED/line per bit
//! - Buzzer levels: never above the wrap value

use fpga_energy_bridge::{
    adc_to_percent, duty_to_level, power_demand, JoystickConfig, ModeCode, PowerBand, PwmTiming,
    SignalLines,
};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    /// Property: 0 <= percent <= 100 for every possible reading
    #[test]
    fn adc_percent_in_range(raw in any::<u16>()) {
        prop_assert!(adc_to_percent(raw) <= 100);
    }

    /// Property: percent = raw * 100 / 4095 (integer) inside the 12-bit range
    #[test]
    fn adc_percent_matches_formula(raw in 0u16..=4095) {
        let expected = (raw as u32 * 100 / 4095) as u8;
        prop_assert_eq!(adc_to_percent(raw), expected);
    }

    /// Property: readings above full scale read as full scale
    #[test]
    fn adc_percent_clamps_high(raw in 4096u16..) {
        prop_assert_eq!(adc_to_percent(raw), 100);
    }

    /// Property: demand stays in 0..=100 for any reading and center
    #[test]
    fn demand_in_range(raw in any::<u16>(), center in 0u16..=4095) {
        let demand = power_demand(raw, center, &JoystickConfig::default());
        prop_assert!(demand <= 100);
    }

    /// Property: demand never decreases as the stick moves forward
    #[test]
    fn demand_is_monotonic(a in 0u16..=4095, b in 0u16..=4095, center in 0u16..=4095) {
        let cfg = JoystickConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(power_demand(lo, center, &cfg) <= power_demand(hi, center, &cfg));
    }

    /// Property: bands are exclusive and exhaustive
    #[test]
    fn exactly_one_band(percent in 0u8..=100) {
        let cfg = JoystickConfig::default();
        let band = PowerBand::classify(percent, &cfg);
        prop_assert_eq!(band.lines().asserted(), 1);

        let expected = if percent < 10 {
            PowerBand::Idle
        } else if percent < 70 {
            PowerBand::Low
        } else {
            PowerBand::High
        };
        prop_assert_eq!(band, expected);
    }

    /// Property: custom bands still cover every value exactly once
    #[test]
    fn custom_bands_exhaustive(idle in 0u8..=100, high in 0u8..=100, percent in 0u8..=100) {
        let cfg = JoystickConfig::default().with_bands(idle, high);
        prop_assert_eq!(PowerBand::classify(percent, &cfg).lines().asserted(), 1);
    }

    /// Property: code = R + 2G + 4B
    #[test]
    fn code_formula(r in any::<bool>(), g in any::<bool>(), b in any::<bool>()) {
        let code = SignalLines { r, g, b }.code();
        prop_assert_eq!(code.bits(), r as u8 + 2 * g as u8 + 4 * b as u8);
        prop_assert_eq!(code.lines(), SignalLines { r, g, b });
    }

    /// Property: from_bits keeps only the low three bits
    #[test]
    fn code_masks_to_three_bits(bits in any::<u8>()) {
        prop_assert_eq!(ModeCode::from_bits(bits).bits(), bits & 0b111);
    }

    /// Property: level <= top and level is linear in duty
    #[test]
    fn duty_level_bounded(duty in any::<u8>(), freq in 100u32..=20_000) {
        let timing = PwmTiming::derive(80_000_000, freq);
        let level = duty_to_level(duty, timing.top);
        prop_assert!(level <= timing.top);
        if duty <= 100 {
            prop_assert_eq!(level as u64, duty as u64 * timing.top as u64 / 100);
        }
    }
}
