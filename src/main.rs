// ClapTrace — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up logging and the shared I2C bus.
//   2. Scan the bus and report every responding address.
//   3. Check MPU6050 connectivity; a failed check aborts startup.
//   4. Wake the MPU6050 and select the ±2 g range.
//   5. Bring up the sound-sensor ADC and the Bluetooth UART.
//   6. Run the capture loop forever.

mod capture;
mod config;
mod drivers;
mod events;
mod tasks;

use std::sync::Mutex;

use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;

use crate::drivers::imu::Mpu6050;
use crate::drivers::link::ResultLink;
use crate::drivers::sound::SoundSensor;

// ---------------------------------------------------------------------------
// Utility: milliseconds since boot (wraps at ~49 days — fine for timeouts)
// ---------------------------------------------------------------------------
pub fn now_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("ClapTrace firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (MPU6050) ------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // ---- Bus scan (diagnostic report) -------------------------------------
    log::info!("Scanning for I2C devices…");
    let found = drivers::scan_bus(i2c_bus);
    for addr in &found {
        log::info!("I2C device found at 0x{:02X}", addr);
    }
    log::info!("I2C scan complete ({} device(s))", found.len());

    // ---- Accelerometer: connectivity is a startup precondition ------------
    let imu = Mpu6050::new(i2c_bus);
    if !imu.is_connected() {
        log::error!("MPU6050 connection failed");
        log::error!("Check power, SDA/SCL wiring, and the I2C address");
        anyhow::bail!("MPU6050 unreachable at startup");
    }
    log::info!("MPU6050 connected");
    imu.init()?;

    // ---- Sound sensor (ADC) -----------------------------------------------
    let sound = SoundSensor::new()?;

    // ---- Bluetooth result link (HC-10 on UART1) ---------------------------
    let mut link = ResultLink::new(
        peripherals.uart1,
        peripherals.pins.gpio21, // TX
        peripherals.pins.gpio20, // RX
    )?;
    if let Some(status) = link.read_status() {
        log::info!("BT module says: {}", status);
    }

    log::info!("Boot complete — entering capture loop");
    tasks::capture::capture_task(imu, sound, link)
}
