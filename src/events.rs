// ClapTrace — Shared Data Types

// ---------------------------------------------------------------------------
// Accelerometer Sample (3-axis raw reading from MPU6050)
// ---------------------------------------------------------------------------
/// Instantaneous acceleration in raw sensor units.
/// At the ±2 g full-scale range, ±16384 raw counts correspond to ±2 g.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccelSample {
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
}
