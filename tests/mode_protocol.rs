//! Integration tests for the FPGA mode path: lines → LEDs, OLED, shared mode → buzzers

use fpga_energy_bridge::{
    config::{BuzzerConfig, DisplayConfig, TimingConfig},
    hal::{MockDisplay, MockPin, MockPwm},
    tasks::{BuzzerOutput, BuzzerTask, DisplayTask, ModeLines, MonitorTask, RgbLeds},
    ModeCode, SharedMode,
};

/// The three physical mode lines, with one handle per decoder task.
struct Lines {
    r: MockPin,
    g: MockPin,
    b: MockPin,
}

impl Lines {
    fn new() -> Self {
        Self {
            r: MockPin::new(false),
            g: MockPin::new(false),
            b: MockPin::new(false),
        }
    }

    fn set(&self, bits: u8) {
        self.r.set(bits & 0b001 != 0);
        self.g.set(bits & 0b010 != 0);
        self.b.set(bits & 0b100 != 0);
    }

    fn decoder(&self) -> ModeLines<MockPin> {
        ModeLines::new(self.r.clone(), self.g.clone(), self.b.clone())
    }
}

fn leds() -> ([MockPin; 3], RgbLeds<MockPin>) {
    let pins = [MockPin::new(false), MockPin::new(false), MockPin::new(false)];
    let leds = RgbLeds {
        r: pins[0].clone(),
        g: pins[1].clone(),
        b: pins[2].clone(),
    };
    (pins, leds)
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn both_decoders_agree_on_every_code() {
    let lines = Lines::new();
    let shared = SharedMode::new();
    let timing = TimingConfig::default();

    let (led_pins, led_drivers) = leds();
    let mut monitor = MonitorTask::new(lines.decoder(), led_drivers, &timing).unwrap();
    let mut display = DisplayTask::new(
        lines.decoder(),
        MockDisplay::new(),
        &shared,
        &DisplayConfig::default(),
        &timing,
    );

    for bits in 0u8..8 {
        lines.set(bits);
        let from_monitor = monitor.poll().unwrap().unwrap();
        let from_display = display.poll().unwrap().unwrap();

        assert_eq!(from_monitor.current, from_display.current);
        assert_eq!(from_monitor.current.bits(), bits);
        assert_eq!(shared.current().bits(), bits);

        for (i, led) in led_pins.iter().enumerate() {
            assert_eq!(led.is_set_high(), bits & (1 << i) != 0);
        }
        assert_eq!(
            display.display().last_frame().unwrap().1,
            ModeCode::from_bits(bits).display_name()
        );
    }
}

#[test]
fn display_names_for_defined_modes() {
    let lines = Lines::new();
    let shared = SharedMode::new();
    let mut display = DisplayTask::new(
        lines.decoder(),
        MockDisplay::new(),
        &shared,
        &DisplayConfig::default(),
        &TimingConfig::default(),
    );

    let expected = [
        (0b000, "IDLE / STOPPED"),
        (0b001, "ELECTRIC"),
        (0b010, "DIESEL CHARGE"),
        (0b011, "HYBRID ASSIST"),
        (0b100, "REGEN. BRAKING"),
        (0b101, "UNKNOWN"),
        (0b110, "UNKNOWN"),
        (0b111, "UNKNOWN"),
    ];
    for (bits, name) in expected {
        lines.set(bits);
        display.poll().unwrap();
        assert_eq!(display.display().last_frame(), Some((" CURRENT MODE:", name)));
    }
}

#[test]
fn custom_header_is_rendered() {
    let lines = Lines::new();
    let shared = SharedMode::new();
    let cfg = DisplayConfig::default().with_header("MODE");
    let mut display = DisplayTask::new(
        lines.decoder(),
        MockDisplay::new(),
        &shared,
        &cfg,
        &TimingConfig::default(),
    );

    display.poll().unwrap();
    assert_eq!(display.display().last_frame(), Some(("MODE", "IDLE / STOPPED")));
}

// ============================================================================
// Display → buzzer hand-off
// ============================================================================

struct Chain<'a> {
    lines: Lines,
    display: DisplayTask<'a, MockPin, MockDisplay>,
    buzzer: BuzzerTask<'a, MockPwm>,
    a: MockPwm,
    b: MockPwm,
}

fn chain(shared: &SharedMode) -> Chain<'_> {
    let lines = Lines::new();
    let timing = TimingConfig::default();
    let display = DisplayTask::new(
        lines.decoder(),
        MockDisplay::new(),
        shared,
        &DisplayConfig::default(),
        &timing,
    );
    let a = MockPwm::new(39_999);
    let b = MockPwm::new(39_999);
    let buzzer = BuzzerTask::new(a.clone(), b.clone(), shared, &BuzzerConfig::default(), &timing)
        .unwrap();
    Chain {
        lines,
        display,
        buzzer,
        a,
        b,
    }
}

#[test]
fn regen_braking_alternates_buzzers() {
    let shared = SharedMode::new();
    let mut c = chain(&shared);

    c.lines.set(0b100);
    c.display.poll().unwrap();

    let mut sequence = Vec::new();
    for _ in 0..4 {
        sequence.push(c.buzzer.poll().unwrap());
        // One at 70 %, the other at 0 %
        assert_eq!(c.a.duty_percent() + c.b.duty_percent(), 70);
    }
    assert_eq!(
        sequence,
        [BuzzerOutput::A, BuzzerOutput::B, BuzzerOutput::A, BuzzerOutput::B]
    );
}

#[test]
fn leaving_regen_silences_within_one_poll() {
    let shared = SharedMode::new();
    let mut c = chain(&shared);

    c.lines.set(0b100);
    c.display.poll().unwrap();
    c.buzzer.poll().unwrap();
    assert!(c.a.is_sounding() || c.b.is_sounding());

    c.lines.set(0b001);
    c.display.poll().unwrap();
    assert_eq!(c.buzzer.poll().unwrap(), BuzzerOutput::Silent);
    assert!(!c.a.is_sounding());
    assert!(!c.b.is_sounding());
}

#[test]
fn buzzer_ignores_lines_until_display_publishes() {
    let shared = SharedMode::new();
    let mut c = chain(&shared);

    // Lines already show regen, but the display task has not polled yet
    c.lines.set(0b100);
    assert_eq!(c.buzzer.poll().unwrap(), BuzzerOutput::Silent);

    c.display.poll().unwrap();
    assert_eq!(c.buzzer.poll().unwrap(), BuzzerOutput::A);
}

#[test]
fn other_modes_keep_buzzers_silent() {
    let shared = SharedMode::new();
    let mut c = chain(&shared);

    for bits in [0b000, 0b001, 0b010, 0b011, 0b101, 0b110, 0b111] {
        c.lines.set(bits);
        c.display.poll().unwrap();
        for _ in 0..3 {
            assert_eq!(c.buzzer.poll().unwrap(), BuzzerOutput::Silent);
        }
        assert!(!c.a.is_sounding());
        assert!(!c.b.is_sounding());
    }
}
