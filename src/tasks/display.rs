//! OLED mode display and publication of the shared mode.
//!
//! This task decodes the FPGA mode lines on its own pins and its own 200 ms
//! cadence, independently of the LED monitor. On a change of code it logs the
//! transition and publishes the code into the [`SharedMode`] read by the
//! buzzer task; it is the only writer of that state. The screen is redrawn on
//! every poll regardless of change.

use core::fmt;

use crate::config::{DisplayConfig, ShortString, TimingConfig};
use crate::error::HardwareError;
use crate::mode::{ModeChange, ModeCode, ModeTracker};
use crate::shared::SharedMode;
use crate::traits::{DelayNs, InputPin, ModeDisplay};

use super::ModeLines;

/// OLED display polling task.
///
/// # Example
///
/// ```rust
/// use fpga_energy_bridge::config::{DisplayConfig, TimingConfig};
/// use fpga_energy_bridge::hal::{MockDisplay, MockPin};
/// use fpga_energy_bridge::mode::ModeCode;
/// use fpga_energy_bridge::shared::SharedMode;
/// use fpga_energy_bridge::tasks::{DisplayTask, ModeLines};
///
/// let shared = SharedMode::new();
/// let lines = ModeLines::new(MockPin::new(false), MockPin::new(false), MockPin::new(true));
/// let mut task = DisplayTask::new(
///     lines,
///     MockDisplay::new(),
///     &shared,
///     &DisplayConfig::default(),
///     &TimingConfig::default(),
/// );
///
/// task.poll().unwrap();
/// assert_eq!(shared.current(), ModeCode::REGEN_BRAKING);
/// assert_eq!(task.display().last_frame(), Some((" CURRENT MODE:", "REGEN. BRAKING")));
/// ```
pub struct DisplayTask<'a, I, D> {
    lines: ModeLines<I>,
    display: D,
    shared: &'a SharedMode,
    tracker: ModeTracker,
    header: ShortString,
    period_ms: u32,
    settle_ms: u32,
    settled: bool,
    initialized: bool,
}

impl<'a, I, D> DisplayTask<'a, I, D>
where
    I: InputPin,
    D: ModeDisplay,
{
    /// Creates the task. The display is not touched until [`start`](Self::start).
    pub fn new(
        lines: ModeLines<I>,
        display: D,
        shared: &'a SharedMode,
        cfg: &DisplayConfig,
        timing: &TimingConfig,
    ) -> Self {
        Self {
            lines,
            display,
            shared,
            tracker: ModeTracker::new(),
            header: cfg.header.clone(),
            period_ms: timing.display_period_ms,
            settle_ms: timing.display_settle_ms,
            settled: false,
            initialized: false,
        }
    }

    /// Waits for the bus to settle, then opens and initializes the display.
    ///
    /// `open` builds the display driver, bus included, and is only called
    /// once the settle delay has elapsed. Only a failure to open is an error:
    /// a panel that fails to initialize is logged and the task still decodes
    /// and publishes the mode.
    pub fn connect<T, F, E>(
        lines: ModeLines<I>,
        open: F,
        shared: &'a SharedMode,
        cfg: &DisplayConfig,
        timing: &TimingConfig,
        delay: &mut T,
    ) -> Result<Self, HardwareError>
    where
        T: DelayNs,
        F: FnOnce() -> Result<D, E>,
        E: fmt::Debug,
    {
        delay.delay_ms(timing.display_settle_ms);

        let display = open().map_err(|e| {
            log::warn!("[DISPLAY] bus setup failed: {:?}", e);
            HardwareError::Display
        })?;
        let mut task = Self::new(lines, display, shared, cfg, timing);
        task.settled = true;
        if let Err(e) = task.init() {
            log::warn!("[DISPLAY] {}", e);
        }
        Ok(task)
    }

    /// Waits for the bus to settle and initializes the display.
    pub fn start<T: DelayNs>(&mut self, delay: &mut T) -> Result<(), HardwareError> {
        delay.delay_ms(self.settle_ms);
        self.settled = true;
        self.init()
    }

    fn init(&mut self) -> Result<(), HardwareError> {
        log::info!("[DISPLAY] initializing OLED");
        self.display.init().map_err(|_| HardwareError::Display)?;
        self.initialized = true;
        log::info!("[DISPLAY] waiting for FPGA mode signals");
        Ok(())
    }

    /// Whether the display has been initialized.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Samples the mode lines once, publishes a changed code and redraws.
    ///
    /// A failed redraw is logged here and does not hide a mode change: the
    /// code is published before rendering is attempted.
    pub fn poll(&mut self) -> Result<Option<ModeChange>, HardwareError> {
        let code = self.lines.read()?.code();

        let change = self.tracker.observe(code);
        if change.is_some() {
            self.shared.publish(code);
        }

        if self
            .display
            .render(self.header.as_str(), code.display_name())
            .is_err()
        {
            log::warn!("[DISPLAY] {}", HardwareError::Display);
        }

        Ok(change)
    }

    /// Code seen by the last poll.
    #[inline]
    pub fn last_code(&self) -> Option<ModeCode> {
        self.tracker.last()
    }

    /// The display driver.
    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display driver.
    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Poll period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Starts the task unless it was built with [`connect`](Self::connect),
    /// then runs it forever.
    pub fn run<T: DelayNs>(mut self, mut delay: T) -> ! {
        if !self.settled {
            if let Err(e) = self.start(&mut delay) {
                log::warn!("[DISPLAY] {}", e);
            }
        }
        loop {
            match self.poll() {
                Ok(Some(change)) => log::info!("[DISPLAY] {}", change),
                Ok(None) => {}
                Err(e) => log::warn!("[DISPLAY] {}", e),
            }
            delay.delay_ms(self.period_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockDisplay, MockPin};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// Delay that records into a log shared with the display factory.
    struct Sequenced<'l>(&'l RefCell<Vec<&'static str>>);

    impl DelayNs for Sequenced<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, _ms: u32) {
            self.0.borrow_mut().push("settle");
        }
    }

    fn lines() -> ModeLines<MockPin> {
        ModeLines::new(MockPin::new(false), MockPin::new(false), MockPin::new(false))
    }

    struct Rig {
        inputs: [MockPin; 3],
        shared: &'static SharedMode,
        task: DisplayTask<'static, MockPin, MockDisplay>,
    }

    fn rig(shared: &'static SharedMode) -> Rig {
        let inputs = [MockPin::new(false), MockPin::new(false), MockPin::new(false)];
        let task = DisplayTask::new(
            ModeLines::new(inputs[0].clone(), inputs[1].clone(), inputs[2].clone()),
            MockDisplay::new(),
            shared,
            &DisplayConfig::default(),
            &TimingConfig::default(),
        );
        Rig {
            inputs,
            shared,
            task,
        }
    }

    fn set_code(r: &Rig, bits: u8) {
        for (i, pin) in r.inputs.iter().enumerate() {
            pin.set(bits & (1 << i) != 0);
        }
    }

    #[test]
    fn start_settles_then_inits() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);
        let mut delay = MockDelay::new();

        assert!(!r.task.is_initialized());
        r.task.start(&mut delay).unwrap();
        assert_eq!(delay.calls_ms, [500]);
        assert!(r.task.display().initialized);
        assert!(r.task.is_initialized());
    }

    #[test]
    fn connect_opens_bus_after_settle() {
        static SHARED: SharedMode = SharedMode::new();
        let log = RefCell::new(Vec::new());

        let task = DisplayTask::connect(
            lines(),
            || {
                log.borrow_mut().push("open");
                Ok::<_, ()>(MockDisplay::new())
            },
            &SHARED,
            &DisplayConfig::default(),
            &TimingConfig::default(),
            &mut Sequenced(&log),
        )
        .unwrap();

        assert_eq!(*log.borrow(), ["settle", "open"]);
        assert!(task.is_initialized());
        assert!(task.display().initialized);
    }

    #[test]
    fn connect_waits_display_settle() {
        static SHARED: SharedMode = SharedMode::new();
        let mut delay = MockDelay::new();

        let task = DisplayTask::connect(
            lines(),
            || Ok::<_, ()>(MockDisplay::new()),
            &SHARED,
            &DisplayConfig::default(),
            &TimingConfig::default(),
            &mut delay,
        )
        .unwrap();
        assert_eq!(delay.calls_ms, [500]);
        assert_eq!(task.display().render_count(), 0);
    }

    #[test]
    fn connect_reports_bus_failure() {
        static SHARED: SharedMode = SharedMode::new();
        let mut delay = MockDelay::new();

        let result = DisplayTask::<MockPin, MockDisplay>::connect(
            lines(),
            || Err("no ack"),
            &SHARED,
            &DisplayConfig::default(),
            &TimingConfig::default(),
            &mut delay,
        );
        assert!(matches!(result, Err(HardwareError::Display)));
        assert_eq!(delay.calls_ms, [500]);
    }

    #[test]
    fn publishes_on_change() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);

        set_code(&r, 0b001);
        assert!(r.task.poll().unwrap().is_some());
        assert_eq!(r.shared.current(), ModeCode::from_bits(1));

        set_code(&r, 0b100);
        let change = r.task.poll().unwrap().unwrap();
        assert_eq!(change.previous, Some(ModeCode::from_bits(1)));
        assert_eq!(r.shared.current(), ModeCode::REGEN_BRAKING);
    }

    #[test]
    fn does_not_republish_unchanged_code() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);

        set_code(&r, 0b010);
        r.task.poll().unwrap();

        // Someone else scribbling on the cell is not overwritten until a change
        SHARED.publish(ModeCode::from_bits(7));
        assert!(r.task.poll().unwrap().is_none());
        assert_eq!(SHARED.current(), ModeCode::from_bits(7));
    }

    #[test]
    fn renders_every_poll() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);

        for _ in 0..4 {
            r.task.poll().unwrap();
        }
        assert_eq!(r.task.display().render_count(), 4);
        assert_eq!(
            r.task.display().last_frame(),
            Some((" CURRENT MODE:", "IDLE / STOPPED"))
        );
    }

    #[test]
    fn unknown_code_shows_fallback() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);

        set_code(&r, 0b110);
        r.task.poll().unwrap();
        assert_eq!(r.task.display().last_frame().unwrap().1, "UNKNOWN");
        assert_eq!(SHARED.current().bits(), 0b110);
    }

    #[test]
    fn render_failure_still_publishes() {
        static SHARED: SharedMode = SharedMode::new();
        let mut r = rig(&SHARED);
        r.task.display_mut().fail_render = true;

        set_code(&r, 0b100);
        let change = r.task.poll().unwrap();
        assert!(change.is_some());
        assert_eq!(SHARED.current(), ModeCode::REGEN_BRAKING);
    }
}
