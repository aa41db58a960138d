// ClapTrace — Bluetooth Result Link
//
// HC-10 style BLE module on UART1.  Carries exactly one result line per
// completed capture window; the module's own status chatter can be drained
// without blocking.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::uart::{config::Config as UartConfig, Uart, UartDriver};
use esp_idf_hal::units::Hertz;

use crate::config::*;

pub struct ResultLink<'d> {
    uart: UartDriver<'d>,
}

impl<'d> ResultLink<'d> {
    pub fn new(
        uart: impl Peripheral<P = impl Uart> + 'd,
        tx: impl Peripheral<P = impl OutputPin> + 'd,
        rx: impl Peripheral<P = impl InputPin> + 'd,
    ) -> anyhow::Result<Self> {
        let cfg = UartConfig::new().baudrate(Hertz(BT_BAUD));
        let uart = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None, // CTS
            Option::<AnyIOPin>::None, // RTS
            &cfg,
        )?;
        Ok(Self { uart })
    }

    /// Send one CRLF-terminated line.
    pub fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.uart.write(line.as_bytes())?;
        self.uart.write(b"\r\n")?;
        Ok(())
    }

    /// Drain any pending status text from the module without blocking.
    pub fn read_status(&mut self) -> Option<String> {
        let mut buf = [0u8; 64];
        match self.uart.read(&mut buf, NON_BLOCK) {
            Ok(n) if n > 0 => {
                let text = String::from_utf8_lossy(&buf[..n]).trim().to_string();
                (!text.is_empty()).then_some(text)
            }
            _ => None,
        }
    }
}
