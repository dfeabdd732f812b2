//! Glide - Servo Sequencer Firmware
//!
//! Main firmware binary for RP2040 boards. Drives one hobby servo from a
//! PWM slice and plays a looping step sequence through the non-blocking
//! motion scheduler.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use glide_core::config::{SequencerConfig, MAX_CONFIG_SIZE};
use glide_drivers::servo::{PulseRange, PwmServo};

mod tasks;

/// Flash size on the Pico
const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the config sector (last 4KB, reserved in memory.x)
const CONFIG_OFFSET: u32 = (FLASH_SIZE - 4096) as u32;

/// GPIO driving the servo signal (PWM slice 7, channel A)
const SERVO_GPIO: u8 = 14;

/// PWM divider: 125 MHz / 125 = 1 MHz, so one count is 1 us
const PWM_DIVIDER: u8 = 125;

/// PWM top for a 20 ms (50 Hz) servo frame at 1 MHz
const PWM_TOP: u16 = 19_999;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glide firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration from flash (or use defaults)
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(p.FLASH);
    let config = load_config(&mut flash);
    info!(
        "Sequencer config: cap={}deg delay={}ms loop_delay={}ms",
        config.motion.max_increment_degrees,
        config.motion.increment_delay_ms,
        config.loop_delay_ms
    );

    // Setup PWM for the servo frame
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0; // Output off until attach

    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm_config);
    let (Some(output), _) = pwm.split() else {
        error!("PWM channel A unavailable");
        return;
    };

    let servo = PwmServo::new(output, SERVO_GPIO, PulseRange::default());
    info!("Servo PWM initialized on GPIO{}", SERVO_GPIO);

    let sequencer_config = SequencerConfig {
        pin: SERVO_GPIO,
        ..config
    };
    unwrap!(spawner.spawn(tasks::servo_task(servo, sequencer_config)));

    info!("All tasks spawned");
}

/// Read the persisted sequencer config, falling back to defaults
fn load_config<T: embassy_rp::flash::Instance>(
    flash: &mut Flash<'_, T, Blocking, FLASH_SIZE>,
) -> SequencerConfig {
    let mut buf = [0u8; MAX_CONFIG_SIZE];
    if flash.blocking_read(CONFIG_OFFSET, &mut buf).is_err() {
        warn!("Config read failed, using defaults");
        return SequencerConfig::default();
    }

    match SequencerConfig::from_bytes(&buf) {
        Ok(config) => config,
        Err(e) => {
            // Erased flash reads as 0xFF and fails the version check
            info!("No stored config ({}), using defaults", e);
            SequencerConfig::default()
        }
    }
}
