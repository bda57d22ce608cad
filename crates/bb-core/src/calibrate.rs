//! Boot-time timing calibration.
//!
//! The engine has no usable clock of its own, only the millisecond
//! tick source and an uncalibrated busy-wait loop. At boot it arms a
//! long countdown window, spins a fixed iteration count, and reads
//! back how many ticks the spin consumed. That single measurement
//! scales every pitch and percussion period afterwards.

use core::fmt;

use crate::board::{BusyWait, TickCountdown};

/// Ticks armed for the measurement window.
pub const CALIBRATION_WINDOW_TICKS: u32 = 4096;

/// Busy-wait iterations executed during the measurement.
pub const CALIBRATION_ITERATIONS: u32 = 1_000_000;

/// Empirical busy-wait throughput, fixed for the life of the process.
///
/// Named in cycles-per-second terms for its role in the pitch math,
/// but it is an empirical scale factor (iterations per second as
/// observed through the tick source), not a hardware clock rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    cycles_per_second: f32,
}

impl Calibration {
    /// Wrap a known constant. Tests and fixed-clock targets use this;
    /// a real boot goes through [`calibrate`] exactly once.
    pub const fn from_cycles_per_second(cycles_per_second: f32) -> Self {
        Self { cycles_per_second }
    }

    pub fn cycles_per_second(&self) -> f32 {
        self.cycles_per_second
    }
}

/// Calibration failure. Fatal: playback timing would be meaningless,
/// so callers must abort startup rather than continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationError {
    /// The tick source never fired during the measurement window
    /// (typically: interrupts not yet enabled at boot).
    TickSourceSilent,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::TickSourceSilent => {
                write!(f, "tick source never fired during calibration")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationError {}

/// Measure busy-wait throughput against the tick source.
///
/// Precondition: the tick source is already running. Must run exactly
/// once, before any playback window is armed; rerunning after the
/// sequencer has started would clobber the active window.
///
/// If the spin outlasts the measurement window the countdown bottoms
/// out and the elapsed count saturates at the window length,
/// understating the constant; the window is sized so that any target
/// slow enough to hit this is out of musical range anyway.
pub fn calibrate<B: BusyWait>(
    board: &mut B,
    countdown: &TickCountdown,
) -> Result<Calibration, CalibrationError> {
    countdown.arm(CALIBRATION_WINDOW_TICKS);
    board.spin(CALIBRATION_ITERATIONS);

    let elapsed = CALIBRATION_WINDOW_TICKS - countdown.remaining();
    if elapsed == 0 {
        return Err(CalibrationError::TickSourceSilent);
    }

    Ok(Calibration {
        cycles_per_second: 1_000_000_000.0 / elapsed as f32,
    })
}
