//! Hardware error type shared by all polling tasks.
//!
//! Peripherals are treated as infallible in operation: a task that sees one
//! of these logs it and carries on with its next poll. The type exists so
//! that pins, PWM channels and displays with different driver error types
//! can flow through one `Result` per poll.

use core::fmt;

use embedded_hal::{digital, pwm};

/// Failure reported by a peripheral during a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardwareError {
    /// GPIO read or write failed.
    Digital(digital::ErrorKind),
    /// PWM duty update failed.
    Pwm(pwm::ErrorKind),
    /// ADC conversion failed.
    Analog,
    /// Display buffer or bus transfer failed.
    Display,
}

impl HardwareError {
    /// Maps any `embedded-hal` digital error.
    pub fn digital<E: digital::Error>(e: E) -> Self {
        HardwareError::Digital(e.kind())
    }

    /// Maps any `embedded-hal` PWM error.
    pub fn pwm<E: pwm::Error>(e: E) -> Self {
        HardwareError::Pwm(e.kind())
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Digital(kind) => write!(f, "GPIO error: {:?}", kind),
            HardwareError::Pwm(kind) => write!(f, "PWM error: {:?}", kind),
            HardwareError::Analog => f.write_str("ADC read failed"),
            HardwareError::Display => f.write_str("display update failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn maps_digital_kind() {
        let err = HardwareError::Digital(digital::ErrorKind::Other);
        assert_eq!(format!("{}", err), "GPIO error: Other");
    }

    #[test]
    fn maps_pwm_kind() {
        let err = HardwareError::Pwm(pwm::ErrorKind::Other);
        assert_eq!(format!("{}", err), "PWM error: Other");
    }

    #[test]
    fn plain_messages() {
        assert_eq!(format!("{}", HardwareError::Analog), "ADC read failed");
        assert_eq!(format!("{}", HardwareError::Display), "display update failed");
    }
}
