//! ESP32-S3 FPGA energy-manager bridge.
//!
//! This is the main entry point for the physical hardware. It brings up the
//! peripherals and spawns six independent FreeRTOS tasks, all at priority 1:
//!
//! - Brake button → FPGA brake line (50 ms)
//! - Battery button → FPGA battery line (50 ms)
//! - Joystick → FPGA power-demand lines (100 ms)
//! - FPGA mode lines → RGB LEDs (100 ms)
//! - FPGA mode lines → OLED, shared mode (200 ms)
//! - Shared mode → buzzers (150 ms)
//!
//! The main task then idles. Every GPIO is checked against the board map in
//! `hal::esp32::pins` before use, and a mismatch aborts start-up, as does a
//! failure to spawn the joystick task; the other tasks are skipped with a log line if they cannot be
//! created.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/xtensa-esp32s3-espidf/release/esp32_main
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{
    AnyIOPin, AnyOutputPin, IOPin, Input, Output, OutputPin, Pin, PinDriver, Pull,
};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::task::thread::ThreadSpawnConfiguration;
use fpga_energy_bridge::hal::esp32::{buzzer_pair, joystick_axis, pins as board, Esp32Display};
use fpga_energy_bridge::tasks::{
    BatteryTask, BrakeTask, BuzzerTask, DisplayTask, JoystickInputs, JoystickTask, ModeLines,
    MonitorTask, PowerOutputs, RgbLeds,
};
use fpga_energy_bridge::{Config, CURRENT_MODE};
use std::thread;

/// FreeRTOS priority of every application task.
const TASK_PRIORITY: u8 = 1;

/// Stack for the button, monitor and buzzer tasks.
const SMALL_STACK: usize = 4096;

/// Stack for the joystick (ADC) and display (I2C + frame buffer) tasks.
const LARGE_STACK: usize = 8192;

type InputLine = PinDriver<'static, AnyIOPin, Input>;
type OutputLine = PinDriver<'static, AnyOutputPin, Output>;

fn input(pin: AnyIOPin, pull: Pull) -> anyhow::Result<InputLine> {
    let mut line = PinDriver::input(pin)?;
    line.set_pull(pull)?;
    Ok(line)
}

fn output(pin: AnyOutputPin) -> anyhow::Result<OutputLine> {
    Ok(PinDriver::output(pin)?)
}

/// Checks that a GPIO taken from the peripherals is the one the board map
/// names for `role`.
fn wired<P: Pin>(role: &str, pin: &P, expected: i32) -> anyhow::Result<()> {
    let actual = i32::from(pin.pin());
    anyhow::ensure!(
        actual == expected,
        "{} wired to GPIO{}, board map says GPIO{}",
        role,
        actual,
        expected
    );
    Ok(())
}

/// Spawns one FreeRTOS task. `name` must be NUL-terminated.
fn spawn_task<F>(name: &'static [u8], stack_size: usize, body: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    let label = std::str::from_utf8(name)
        .unwrap_or("task")
        .trim_end_matches('\0');

    ThreadSpawnConfiguration {
        name: Some(name),
        stack_size,
        priority: TASK_PRIORITY,
        ..Default::default()
    }
    .set()?;

    let spawned = thread::Builder::new()
        .stack_size(stack_size)
        .spawn(move || {
            if let Err(e) = body() {
                log::error!("[{}] task stopped: {:?}", label, e);
            }
        });

    ThreadSpawnConfiguration::default().set()?;
    spawned?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("================================");
    log::info!("  FPGA energy manager bridge");
    log::info!("================================");

    let config = Config::default();
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // =========================================================================
    // FPGA mode lines: read by both the LED monitor and the display task
    // =========================================================================
    let mut mode_r = pins.gpio13;
    let mut mode_g = pins.gpio14;
    let mut mode_b = pins.gpio15;
    wired("mode R", &mode_r, board::MODE_R)?;
    wired("mode G", &mode_g, board::MODE_G)?;
    wired("mode B", &mode_b, board::MODE_B)?;
    // SAFETY: both decoders only ever configure these pins as pull-down
    // inputs and only read them; neither drives nor reconfigures the lines
    // after set-up.
    let (display_r, display_g, display_b) = unsafe {
        (
            mode_r.clone_unchecked(),
            mode_g.clone_unchecked(),
            mode_b.clone_unchecked(),
        )
    };

    // =========================================================================
    // Brake: button A (GPIO5) → FPGA brake (GPIO8)
    // =========================================================================
    let (brake_btn, brake_out) = (pins.gpio5, pins.gpio8);
    wired("brake button", &brake_btn, board::BRAKE_BTN)?;
    wired("brake line", &brake_out, board::FPGA_BRAKE)?;
    let timing = config.timing;
    if let Err(e) = spawn_task(b"brake\0", SMALL_STACK, move || {
        let task = BrakeTask::new(
            input(brake_btn.downgrade(), Pull::Up)?,
            output(brake_out.downgrade_output())?,
            &timing,
        )?;
        task.run(FreeRtos)
    }) {
        log::error!("[MAIN] could not start brake task: {:?}", e);
    }

    // =========================================================================
    // Battery: button B (GPIO6) → FPGA battery (GPIO9)
    // =========================================================================
    let (battery_btn, battery_out) = (pins.gpio6, pins.gpio9);
    wired("battery button", &battery_btn, board::BATTERY_BTN)?;
    wired("battery line", &battery_out, board::FPGA_BATTERY)?;
    if let Err(e) = spawn_task(b"battery\0", SMALL_STACK, move || {
        let task = BatteryTask::new(
            input(battery_btn.downgrade(), Pull::Up)?,
            output(battery_out.downgrade_output())?,
            &timing,
        )?;
        task.run(FreeRtos)
    }) {
        log::error!("[MAIN] could not start battery task: {:?}", e);
    }

    // =========================================================================
    // Joystick: VRy/VRx (GPIO1/2 on ADC1), SW (GPIO4) → power lines (GPIO10-12)
    // =========================================================================
    let (adc1, vry, vrx, joy_sw) = (peripherals.adc1, pins.gpio1, pins.gpio2, pins.gpio4);
    let (power_low, power_high, power_idle) = (pins.gpio10, pins.gpio11, pins.gpio12);
    wired("joystick VRy", &vry, board::JOY_VRY)?;
    wired("joystick VRx", &vrx, board::JOY_VRX)?;
    wired("joystick switch", &joy_sw, board::JOY_SW)?;
    wired("power low", &power_low, board::POWER_LOW)?;
    wired("power high", &power_high, board::POWER_HIGH)?;
    wired("power idle", &power_idle, board::POWER_IDLE)?;
    let joystick_cfg = config.joystick;
    spawn_task(b"joystick\0", LARGE_STACK, move || {
        let adc = AdcDriver::new(adc1)?;
        let inputs = JoystickInputs {
            vertical: joystick_axis(&adc, vry)?,
            horizontal: joystick_axis(&adc, vrx)?,
            switch: input(joy_sw.downgrade(), Pull::Up)?,
        };
        let outputs = PowerOutputs {
            low: output(power_low.downgrade_output())?,
            high: output(power_high.downgrade_output())?,
            idle: output(power_idle.downgrade_output())?,
        };
        let task = JoystickTask::new(inputs, outputs, joystick_cfg, &timing)?;
        task.run(FreeRtos)
    })?;

    // =========================================================================
    // LED monitor: mode lines → RGB LEDs (GPIO16-18)
    // =========================================================================
    let (led_r, led_g, led_b) = (pins.gpio16, pins.gpio17, pins.gpio18);
    wired("LED R", &led_r, board::LED_R)?;
    wired("LED G", &led_g, board::LED_G)?;
    wired("LED B", &led_b, board::LED_B)?;
    if let Err(e) = spawn_task(b"monitor\0", SMALL_STACK, move || {
        let lines = ModeLines::new(
            input(mode_r.downgrade(), Pull::Down)?,
            input(mode_g.downgrade(), Pull::Down)?,
            input(mode_b.downgrade(), Pull::Down)?,
        );
        let leds = RgbLeds {
            r: output(led_r.downgrade_output())?,
            g: output(led_g.downgrade_output())?,
            b: output(led_b.downgrade_output())?,
        };
        let task = MonitorTask::new(lines, leds, &timing)?;
        task.run(FreeRtos)
    }) {
        log::error!("[MAIN] could not start monitor task: {:?}", e);
    }

    // =========================================================================
    // Display: mode lines → SSD1306 (I2C0 on GPIO41/42), publishes shared mode
    // =========================================================================
    let (i2c0, sda, scl) = (peripherals.i2c0, pins.gpio41, pins.gpio42);
    wired("OLED SDA", &sda, board::I2C_SDA)?;
    wired("OLED SCL", &scl, board::I2C_SCL)?;
    let display_cfg = config.display.clone();
    if display_cfg.i2c_address != board::OLED_I2C_ADDR {
        log::warn!(
            "[MAIN] OLED address {:#04x} differs from the board default {:#04x}",
            display_cfg.i2c_address,
            board::OLED_I2C_ADDR
        );
    }
    if let Err(e) = spawn_task(b"display\0", LARGE_STACK, move || {
        let lines = ModeLines::new(
            input(display_r.downgrade(), Pull::Down)?,
            input(display_g.downgrade(), Pull::Down)?,
            input(display_b.downgrade(), Pull::Down)?,
        );
        // The I2C bus comes up only after the panel's power-on settle
        let mut delay = FreeRtos;
        let task = DisplayTask::connect(
            lines,
            || {
                I2cDriver::new(
                    i2c0,
                    sda,
                    scl,
                    &I2cConfig::new().baudrate(display_cfg.i2c_baudrate_hz.Hz()),
                )
                .map(|i2c| Esp32Display::new(i2c, display_cfg.i2c_address))
            },
            &CURRENT_MODE,
            &display_cfg,
            &timing,
            &mut delay,
        )?;
        task.run(delay)
    }) {
        log::error!("[MAIN] could not start display task: {:?}", e);
    }

    // =========================================================================
    // Buzzers: shared mode → buzzer A/B (GPIO21/47 on LEDC)
    // =========================================================================
    let (buzzer_a, buzzer_b) = (pins.gpio21, pins.gpio47);
    wired("buzzer A", &buzzer_a, board::BUZZER_A)?;
    wired("buzzer B", &buzzer_b, board::BUZZER_B)?;
    let ledc = peripherals.ledc;
    let (timer0, channel0, channel1) = (ledc.timer0, ledc.channel0, ledc.channel1);
    let buzzer_cfg = config.buzzer;
    if let Err(e) = spawn_task(b"buzzer\0", SMALL_STACK, move || {
        let (a, b) = buzzer_pair(buzzer_a, buzzer_b, timer0, channel0, channel1, &buzzer_cfg)?;
        let task = BuzzerTask::new(a, b, &CURRENT_MODE, &buzzer_cfg, &timing)?;
        task.run(FreeRtos)
    }) {
        log::error!("[MAIN] could not start buzzer task: {:?}", e);
    }

    log::info!("[MAIN] all tasks started");

    loop {
        FreeRtos::delay_ms(1000);
    }
}
