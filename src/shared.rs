//! Shared mode state between the display and buzzer tasks.
//!
//! A single-producer/single-consumer latest-value cell: the display task
//! publishes every mode change, the buzzer task reads the current value on
//! each poll. There is no queue and no notification. A reader may observe
//! a stale value for up to one of its polling periods.
//!
//! # Example
//!
//! ```rust
//! use fpga_energy_bridge::mode::ModeCode;
//! use fpga_energy_bridge::shared::SharedMode;
//!
//! static MODE: SharedMode = SharedMode::new();
//!
//! assert_eq!(MODE.current(), ModeCode::IDLE);
//! MODE.publish(ModeCode::REGEN_BRAKING);
//! assert_eq!(MODE.current(), ModeCode::REGEN_BRAKING);
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use crate::mode::ModeCode;

/// Process-wide mode state, written by the display task and read by the
/// buzzer task.
pub static CURRENT_MODE: SharedMode = SharedMode::new();

/// Lock-free single-byte mode cell.
#[derive(Debug, Default)]
pub struct SharedMode {
    code: AtomicU8,
}

impl SharedMode {
    /// Creates a cell holding mode 0 (idle).
    pub const fn new() -> Self {
        Self {
            code: AtomicU8::new(0),
        }
    }

    /// Stores a new mode code.
    #[inline]
    pub fn publish(&self, code: ModeCode) {
        // Relaxed: the byte is the only data handed over.
        self.code.store(code.bits(), Ordering::Relaxed);
    }

    /// Loads the most recently published mode code.
    #[inline]
    pub fn current(&self) -> ModeCode {
        ModeCode::from_bits(self.code.load(Ordering::Relaxed))
    }
}
