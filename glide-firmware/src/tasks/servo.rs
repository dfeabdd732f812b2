//! Servo sequencing task
//!
//! Owns the motion scheduler and polls it every millisecond. The scheduler
//! itself decides when a tick is due, so the poll rate only bounds timing
//! jitter.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};

use glide_core::config::SequencerConfig;
use glide_core::observer::DefmtObserver;
use glide_core::MotionScheduler;
use glide_drivers::clock::EmbassyClock;
use glide_drivers::servo::PwmServo;

/// Demo sequence played on boot
const SEQUENCE: [u8; 3] = [30, 90, 150];

/// Poll interval in milliseconds
const POLL_INTERVAL_MS: u64 = 1;

/// Servo sequencing task
#[embassy_executor::task]
pub async fn servo_task(servo: PwmServo<PwmOutput<'static>>, config: SequencerConfig) {
    info!("Servo task started");

    let mut seq = MotionScheduler::with_observer(servo, config.motion, DefmtObserver);

    if let Err(e) = seq.begin(config.pin) {
        error!("Servo attach failed: {}", e);
        return;
    }

    if let Err(e) = seq.extend(&SEQUENCE) {
        error!("Failed to queue sequence: {}", e);
        return;
    }

    if let Err(e) = seq.start_loop(config.loop_delay_ms) {
        error!("Failed to start loop: {}", e);
        return;
    }

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Err(e) = seq.poll(&clock) {
            warn!("Servo update failed: {}", e);
        }
    }
}
