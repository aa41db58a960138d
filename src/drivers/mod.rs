// ClapTrace — Hardware Drivers

pub mod imu;
pub mod link;
pub mod sound;

use crate::config::*;
use self::imu::SharedBus;

/// Probe every valid 7-bit address and return the responders.
/// Boot-time diagnostic only; nothing downstream depends on the result.
pub fn scan_bus(bus: SharedBus) -> Vec<u8> {
    let mut bus = bus.lock().unwrap();
    let mut probe = [0u8; 1];
    let mut found = Vec::new();
    for addr in I2C_SCAN_FIRST..=I2C_SCAN_LAST {
        if bus.read(addr, &mut probe, I2C_TIMEOUT_TICKS).is_ok() {
            found.push(addr);
        }
    }
    found
}
