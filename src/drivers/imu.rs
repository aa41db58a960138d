// ClapTrace — MPU6050 Accelerometer Driver
//
// Custom register-level driver over shared I2C bus.
// Avoids external crate version conflicts with esp-idf-hal.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;
use crate::events::AccelSample;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 6-byte accelerometer burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor and select the ±2 g accelerometer range.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±2 g full scale (16384 LSB/g)
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x00], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±2g)");
        Ok(())
    }

    /// Burst-read the three acceleration axes in raw sensor units.
    pub fn read_accel(&self) -> anyhow::Result<AccelSample> {
        let mut bus = self.bus.lock().unwrap();
        let mut raw = [0u8; 6];
        bus.write_read(
            I2C_ADDR_MPU6050,
            &[REG_ACCEL_XOUT_H],
            &mut raw,
            I2C_TIMEOUT_TICKS,
        )?;

        Ok(AccelSample {
            ax: i16::from_be_bytes([raw[0], raw[1]]),
            ay: i16::from_be_bytes([raw[2], raw[3]]),
            az: i16::from_be_bytes([raw[4], raw[5]]),
        })
    }
}
