// ClapTrace — Capture Window State Machine
//
// Pure Idle/Armed state machine, no hardware access.  The capture task feeds
// it sound levels and accelerometer samples together with a monotonic
// millisecond timestamp; it hands back a peak reading when a window closes.

use std::fmt;

use crate::config::*;
use crate::events::AccelSample;

/// Peak signed deviations accumulated over one capture window, in g.
///
/// `Display` renders the Bluetooth wire format: both values to two decimals,
/// comma-joined (`"-0.34,1.02"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakReading {
    pub peak_x: f32,
    pub peak_z: f32,
}

impl fmt::Display for PeakReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2},{:.2}", self.peak_x, self.peak_z)
    }
}

#[derive(Debug, Clone, Copy)]
enum CaptureState {
    Idle,
    Armed {
        started_at_ms: u32,
        peak_x: f32,
        peak_z: f32,
    },
}

/// Sound-triggered capture window.
///
/// A sound level strictly above [`SOUND_THRESHOLD`] arms the window; for the
/// next [`CAPTURE_WINDOW_MS`] every accelerometer sample updates the peak
/// trackers, and the window closes on the first sample at or past the
/// deadline.  Threshold crossings while armed are ignored, so windows never
/// overlap.
pub struct CaptureWindow {
    state: CaptureState,
}

impl CaptureWindow {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, CaptureState::Armed { .. })
    }

    /// Feed the current sound level.  Returns `true` only on the
    /// Idle→Armed transition, so the caller can log the arm notice once.
    pub fn feed_sound(&mut self, level: u16, now_ms: u32) -> bool {
        match self.state {
            CaptureState::Idle if level > SOUND_THRESHOLD => {
                self.state = CaptureState::Armed {
                    started_at_ms: now_ms,
                    peak_x: 0.0,
                    peak_z: 0.0,
                };
                true
            }
            _ => false,
        }
    }

    /// Feed one accelerometer sample.  No-op while idle.
    ///
    /// While armed, X and Z are converted to g (X additionally has the
    /// resting 1 g component removed), the peak trackers keep the sample
    /// with the strictly largest magnitude (sign preserved, first
    /// occurrence wins ties), and once the window deadline has passed the
    /// machine disarms and returns the accumulated peaks.  The closing
    /// sample is folded into the peaks before the deadline check.
    pub fn feed_accel(&mut self, sample: AccelSample, now_ms: u32) -> Option<PeakReading> {
        let CaptureState::Armed {
            started_at_ms,
            peak_x,
            peak_z,
        } = &mut self.state
        else {
            return None;
        };

        let ax_g = sample.ax as f32 / ACCEL_SCALE_2G - GRAVITY_OFFSET_G;
        let az_g = sample.az as f32 / ACCEL_SCALE_2G;

        if ax_g.abs() > peak_x.abs() {
            *peak_x = ax_g;
        }
        if az_g.abs() > peak_z.abs() {
            *peak_z = az_g;
        }

        // Wrapping arithmetic: now_ms rolls over every ~49 days.
        if now_ms.wrapping_sub(*started_at_ms) >= CAPTURE_WINDOW_MS {
            let reading = PeakReading {
                peak_x: *peak_x,
                peak_z: *peak_z,
            };
            self.state = CaptureState::Idle;
            return Some(reading);
        }

        None
    }
}

impl Default for CaptureWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ax: i16, az: i16) -> AccelSample {
        AccelSample { ax, ay: 0, az }
    }

    /// Arm at `t0`, feed `(ax, az, at_ms)` triples, close the window with a
    /// rest sample and return the emitted line.
    fn run_window(t0: u32, trace: &[(i16, i16, u32)]) -> String {
        let mut window = CaptureWindow::new();
        assert!(window.feed_sound(SOUND_THRESHOLD + 10, t0));
        let mut result = None;
        for &(ax, az, at_ms) in trace {
            result = window.feed_accel(sample(ax, az), t0.wrapping_add(at_ms));
        }
        let reading = result
            .or_else(|| window.feed_accel(sample(16384, 0), t0.wrapping_add(CAPTURE_WINDOW_MS)))
            .expect("window should close");
        reading.to_string()
    }

    #[test]
    fn stays_idle_at_or_below_threshold() {
        let mut window = CaptureWindow::new();
        for level in [0, 10, SOUND_THRESHOLD - 1, SOUND_THRESHOLD] {
            assert!(!window.feed_sound(level, 100));
            assert!(!window.is_armed());
        }
    }

    #[test]
    fn arms_strictly_above_threshold() {
        let mut window = CaptureWindow::new();
        assert!(window.feed_sound(SOUND_THRESHOLD + 1, 100));
        assert!(window.is_armed());
    }

    #[test]
    fn accel_is_ignored_while_idle() {
        let mut window = CaptureWindow::new();
        assert_eq!(window.feed_accel(sample(16384, 16384), 9000), None);
        assert!(!window.is_armed());
    }

    #[test]
    fn retrigger_while_armed_is_ignored() {
        let mut window = CaptureWindow::new();
        assert!(window.feed_sound(50, 1000));
        // A louder event mid-window must not re-arm or reset anything.
        assert!(!window.feed_sound(500, 3000));
        // The window still closes 5000 ms after the *first* trigger.
        assert_eq!(window.feed_accel(sample(0, 0), 5999), None);
        assert!(window.feed_accel(sample(0, 0), 6000).is_some());
    }

    #[test]
    fn no_result_before_the_window_elapses() {
        let mut window = CaptureWindow::new();
        window.feed_sound(50, 0);
        assert_eq!(window.feed_accel(sample(0, 0), 4999), None);
        let reading = window.feed_accel(sample(0, 0), 5000);
        assert!(reading.is_some());
        assert!(!window.is_armed());
    }

    #[test]
    fn gravity_offset_applies_to_x_only() {
        // Device at rest: 1 g on X, 1 g worth of raw counts on Z.
        let line = run_window(0, &[(16384, 16384, 0)]);
        assert_eq!(line, "0.00,1.00");
    }

    #[test]
    fn peak_keeps_largest_magnitude_with_sign() {
        // |−1.5 g| beats +1.0 g on Z; the negative sign must survive.
        let line = run_window(0, &[(16384, 16384, 0), (16384, -24576, 100)]);
        assert_eq!(line, "0.00,-1.50");
    }

    #[test]
    fn equal_magnitude_keeps_first_occurrence() {
        // +1 g then −1 g on Z: replacement requires strictly greater
        // magnitude, so the first sample's sign is kept.
        let line = run_window(0, &[(16384, 16384, 0), (16384, -16384, 100)]);
        assert_eq!(line, "0.00,1.00");
    }

    #[test]
    fn reference_trace_matches_expected_line() {
        // Three samples at 0 / 2000 / 5001 ms: corrected X runs 0.0, −1.0,
        // −2.0 and raw Z runs 0.0, 1.0, −1.0 (tie on magnitude, first wins).
        let line = run_window(
            700,
            &[(16384, 0, 0), (0, 16384, 2000), (-16384, -16384, 5001)],
        );
        assert_eq!(line, "-2.00,1.00");
    }

    #[test]
    fn closing_sample_is_included_in_the_peaks() {
        // The sample that trips the deadline still updates the trackers.
        let line = run_window(0, &[(16384, 0, 0), (16384, 24576, 5001)]);
        assert_eq!(line, "0.00,1.50");
    }

    #[test]
    fn peaks_reset_between_windows() {
        let mut window = CaptureWindow::new();
        window.feed_sound(50, 0);
        let first = window.feed_accel(sample(-16384, 24576), 5000).unwrap();
        assert_eq!(first.to_string(), "-2.00,1.50");

        // Second window sees only rest samples; the old peaks must be gone.
        window.feed_sound(50, 10_000);
        let second = window.feed_accel(sample(16384, 0), 15_000).unwrap();
        assert_eq!(second.to_string(), "0.00,0.00");
    }

    #[test]
    fn identical_traces_emit_identical_lines() {
        let trace = [(20000, -3000, 0), (-9000, 12000, 2500), (4000, 4000, 5002)];
        assert_eq!(run_window(123, &trace), run_window(987_654, &trace));
    }

    #[test]
    fn window_survives_timer_wraparound() {
        let t0 = u32::MAX - 2500;
        let mut window = CaptureWindow::new();
        window.feed_sound(50, t0);
        assert_eq!(window.feed_accel(sample(0, 0), t0.wrapping_add(2400)), None);
        assert!(window.feed_accel(sample(0, 0), 2501).is_some());
    }

    #[test]
    fn line_format_rounds_to_two_decimals() {
        let reading = PeakReading {
            peak_x: -0.336,
            peak_z: 1.018,
        };
        assert_eq!(reading.to_string(), "-0.34,1.02");
    }
}
