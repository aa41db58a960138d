// ClapTrace — Capture Task
//
// Polls the sound sensor at ~100 Hz and drives the capture window: a
// threshold crossing arms a 5-second accelerometer watch, and the peak X/Z
// deviations go out over the Bluetooth link when the window closes.

use std::thread;
use std::time::{Duration, Instant};

use crate::capture::CaptureWindow;
use crate::config::*;
use crate::drivers::imu::Mpu6050;
use crate::drivers::link::ResultLink;
use crate::drivers::sound::SoundSensor;

pub fn capture_task(imu: Mpu6050, mut sound: SoundSensor, mut link: ResultLink<'_>) -> ! {
    log::info!("Capture task started");

    let mut window = CaptureWindow::new();
    let interval = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        let tick_start = Instant::now();

        match sound.read_level() {
            Ok(level) => {
                if window.feed_sound(level, crate::now_ms()) {
                    log::info!(
                        "Sound detected (level {}) — capturing for {} ms",
                        level,
                        CAPTURE_WINDOW_MS
                    );
                }
            }
            Err(e) => {
                log::warn!("Sound read error: {}", e);
            }
        }

        if window.is_armed() {
            match imu.read_accel() {
                Ok(sample) => {
                    if let Some(reading) = window.feed_accel(sample, crate::now_ms()) {
                        let line = reading.to_string();
                        if let Err(e) = link.send_line(&line) {
                            log::warn!("Result send failed: {}", e);
                        }
                        log::info!("Capture complete — peaks {}", line);
                    }
                }
                Err(e) => {
                    log::warn!("IMU read error: {}", e);
                }
            }
        }

        // Sleep for the remainder of the poll interval to hold ~100 Hz.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
