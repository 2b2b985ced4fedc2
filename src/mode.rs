//! The FPGA mode-signal protocol.
//!
//! The FPGA reports its operating mode on three parallel digital lines,
//! historically named after the RGB LEDs they are mirrored onto. The lines
//! are concatenated into a 3-bit [`ModeCode`]:
//!
//! | Bit | Line |
//! |-----|------|
//! | 0   | R    |
//! | 1   | G    |
//! | 2   | B    |
//!
//! Only codes 0–4 carry a defined meaning; 5–7 decode to [`Mode::Unknown`].
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::mode::{Mode, ModeCode, SignalLines};
//!
//! let lines = SignalLines { r: false, g: false, b: true };
//! let code = lines.code();
//!
//! assert_eq!(code.bits(), 0b100);
//! assert_eq!(code.mode(), Mode::RegenBraking);
//! assert_eq!(code.label(), "REGEN_BRAKING");
//! ```

use core::fmt;

/// Snapshot of the three FPGA signal lines for one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalLines {
    /// R line, bit 0.
    pub r: bool,
    /// G line, bit 1.
    pub g: bool,
    /// B line, bit 2.
    pub b: bool,
}

impl SignalLines {
    /// Combines the lines into a mode code (`B*4 + G*2 + R`).
    #[inline]
    pub const fn code(&self) -> ModeCode {
        ModeCode(((self.b as u8) << 2) | ((self.g as u8) << 1) | (self.r as u8))
    }
}

/// A 3-bit mode code, always in `0..=7`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeCode(u8);

impl ModeCode {
    /// Regenerative braking, the only code that drives the buzzers.
    pub const REGEN_BRAKING: ModeCode = ModeCode(0b100);

    /// Idle / stopped.
    pub const IDLE: ModeCode = ModeCode(0b000);

    /// Builds a code from a raw byte, keeping only the low three bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        ModeCode(bits & 0b111)
    }

    /// Raw value in `0..=7`.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Decoded operating mode.
    pub const fn mode(self) -> Mode {
        match self.0 {
            0b000 => Mode::Idle,
            0b001 => Mode::Electric,
            0b010 => Mode::DieselCharge,
            0b011 => Mode::HybridAssist,
            0b100 => Mode::RegenBraking,
            _ => Mode::Unknown,
        }
    }

    /// Short label used in log lines.
    #[inline]
    pub const fn label(self) -> &'static str {
        self.mode().label()
    }

    /// Human-readable label shown on the OLED.
    #[inline]
    pub const fn display_name(self) -> &'static str {
        self.mode().display_name()
    }

    /// Splits the code back into its three lines.
    #[inline]
    pub const fn lines(self) -> SignalLines {
        SignalLines {
            r: self.0 & 0b001 != 0,
            g: self.0 & 0b010 != 0,
            b: self.0 & 0b100 != 0,
        }
    }
}

/// Renders as three binary digits, e.g. `100`.
impl fmt::Display for ModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}

/// FPGA energy-management mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Vehicle stopped, no energy flow.
    Idle,
    /// Pure electric traction.
    Electric,
    /// Diesel engine charging the battery.
    DieselCharge,
    /// Diesel and electric traction combined.
    HybridAssist,
    /// Regenerative braking.
    RegenBraking,
    /// Codes 5–7.
    Unknown,
}

impl Mode {
    /// Log label.
    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Electric => "ELECTRIC",
            Mode::DieselCharge => "DIESEL_CHARGE",
            Mode::HybridAssist => "HYBRID_ASSIST",
            Mode::RegenBraking => "REGEN_BRAKING",
            Mode::Unknown => "UNKNOWN",
        }
    }

    /// OLED label.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Mode::Idle => "IDLE / STOPPED",
            Mode::Electric => "ELECTRIC",
            Mode::DieselCharge => "DIESEL CHARGE",
            Mode::HybridAssist => "HYBRID ASSIST",
            Mode::RegenBraking => "REGEN. BRAKING",
            Mode::Unknown => "UNKNOWN",
        }
    }
}

/// A change of mode code observed by one of the decoder tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChange {
    /// Code seen on the previous poll, `None` before the first poll.
    pub previous: Option<ModeCode>,
    /// Code seen on this poll.
    pub current: ModeCode,
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FPGA -> new mode {} ({})", self.current, self.current.label())
    }
}

/// Tracks the last observed code and reports changes.
///
/// Both decoder tasks own one of these; they never share it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeTracker {
    last: Option<ModeCode>,
}

impl ModeTracker {
    /// Creates a tracker with no previous observation.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records `code`, returning the change if it differs from the last one.
    pub fn observe(&mut self, code: ModeCode) -> Option<ModeChange> {
        if self.last == Some(code) {
            return None;
        }
        let change = ModeChange {
            previous: self.last,
            current: code,
        };
        self.last = Some(code);
        Some(change)
    }

    /// The last observed code.
    #[inline]
    pub fn last(&self) -> Option<ModeCode> {
        self.last
    }
}
