//! Display abstraction for mode feedback.
//!
//! This module defines the [`ModeDisplay`] trait: a two-line text surface.
//! The display task draws a fixed header and the current mode name on every
//! poll.

/// Two-line text display.
///
/// Implementors own a frame buffer: `render` clears it, draws both lines and
/// transmits it in one go.
///
/// # Example
///
/// ```ignore
/// use fpga_energy_bridge::traits::ModeDisplay;
///
/// struct MyDisplay { /* ... */ }
///
/// impl ModeDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, header: &str, mode_name: &str) -> Result<(), ()> {
///         // Clear buffer, draw text, flush...
///         Ok(())
///     }
/// }
/// ```
pub trait ModeDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display controller and blanks the screen.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the frame buffer, draws both lines and sends the buffer.
    ///
    /// # Arguments
    ///
    /// * `header` - Fixed first line
    /// * `mode_name` - Human-readable name of the current mode
    fn render(&mut self, header: &str, mode_name: &str) -> Result<(), Self::Error>;
}
