// ClapTrace — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_SOUND_ADC: u32 = 2; // D0/A0 — Analog sound sensor (ADC1_CH2)
pub const PIN_I2C_SDA: i32 = 6;   // D4    — I2C data line
pub const PIN_I2C_SCL: i32 = 7;   // D5    — I2C clock line
pub const PIN_BT_RX: i32 = 20;    // D7    — UART1 RX (from HC-10 TX)
pub const PIN_BT_TX: i32 = 21;    // D6    — UART1 TX (to HC-10 RX)

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks
pub const I2C_SCAN_FIRST: u8 = 0x03;     // valid 7-bit address range;
pub const I2C_SCAN_LAST: u8 = 0x77;      // reserved addresses excluded

// ---------------------------------------------------------------------------
// Capture Window
// ---------------------------------------------------------------------------
pub const SOUND_THRESHOLD: u16 = 40;     // ADC counts; strictly above arms
pub const CAPTURE_WINDOW_MS: u32 = 5000; // measured from the arming poll
pub const POLL_INTERVAL_MS: u64 = 10;    // ~100 Hz poll cycle

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_2G: f32 = 16384.0; // LSB/g at ±2 g
pub const GRAVITY_OFFSET_G: f32 = 1.0;   // resting component on the vertical (X) axis

// ---------------------------------------------------------------------------
// Serial Links
// ---------------------------------------------------------------------------
pub const BT_BAUD: u32 = 9600;        // HC-10 factory default
pub const ADC_FULL_SCALE: u16 = 4095; // 12-bit one-shot reads
