//! Hardware seams and the shared tick countdown.

use core::sync::atomic::{AtomicU32, Ordering};

/// A digital output line owned exclusively by the synthesis loop.
///
/// Implementations must have bounded, consistent per-call latency;
/// the pitch of every generated waveform depends on it. No other
/// contract.
pub trait OutputLine {
    /// Drive the line high or low.
    fn set(&mut self, high: bool);
}

/// Calibrated busy-wait primitive.
///
/// `spin(n)` executes `n` trivial loop passes. On hardware this is an
/// empty counted loop the compiler must not elide; the simulated
/// board advances modeled time instead. All synthesis timing is
/// expressed in these iterations, scaled by the boot calibration.
pub trait BusyWait {
    fn spin(&mut self, iterations: u32);
}

/// Remaining milliseconds in the current playback window.
///
/// The only value shared between the tick source and the synthesis
/// loop. The tick source calls [`tick`](Self::tick); the sequencer
/// calls [`arm`](Self::arm) when it opens a new window; generators
/// only read. Neither writer performs a compound update against the
/// other, so plain atomic loads and stores suffice: no locks, and no
/// jitter injected into the busy-wait loops.
pub struct TickCountdown(AtomicU32);

impl TickCountdown {
    /// An unarmed countdown. `const` so board crates can place it in
    /// a `static` next to their tick interrupt handler.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Open a playback window of `ticks` milliseconds.
    pub fn arm(&self, ticks: u32) {
        self.0.store(ticks, Ordering::Relaxed);
    }

    /// Called by the tick source once per elapsed millisecond.
    /// Decrements toward zero, never below.
    pub fn tick(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                if v == 0 {
                    None
                } else {
                    Some(v - 1)
                }
            });
    }

    /// Milliseconds left in the window.
    pub fn remaining(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Has the window closed?
    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }
}

impl Default for TickCountdown {
    fn default() -> Self {
        Self::new()
    }
}
