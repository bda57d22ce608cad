//! Modeled-time board: iteration cost model, tick source, transition log.

use bb_core::{BusyWait, OutputLine, TickCountdown};

/// Modeled nanoseconds per countdown tick (one millisecond).
pub const NANOS_PER_TICK: u64 = 1_000_000;

/// Default per-iteration cost: a slow MCU spinning an empty counted
/// loop, ≈312k iterations per second. Keeps the boot calibration spin
/// inside its measurement window.
const DEFAULT_NS_PER_ITERATION: u64 = 3_200;

/// Default output-line write cost.
const DEFAULT_NS_PER_LINE_WRITE: u64 = 250;

/// A recorded output-line level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Modeled time of the write, in nanoseconds from boot.
    pub at_nanos: u64,
    /// Level the line changed to.
    pub high: bool,
}

/// Simulated board.
///
/// `spin` advances modeled time by the iteration cost; `set` charges
/// a fixed per-write latency and logs level changes. Whenever modeled
/// time crosses a millisecond boundary the tick source fires exactly
/// one countdown decrement, mirroring a 1 kHz tick interrupt.
pub struct SimBoard<'a> {
    countdown: &'a TickCountdown,
    ns_per_iteration: u64,
    ns_per_line_write: u64,
    nanos: u64,
    next_tick_at: u64,
    level: bool,
    transitions: Vec<Transition>,
}

impl<'a> SimBoard<'a> {
    /// Board with the default cost model.
    pub fn new(countdown: &'a TickCountdown) -> Self {
        Self::with_costs(countdown, DEFAULT_NS_PER_ITERATION, DEFAULT_NS_PER_LINE_WRITE)
    }

    /// Board with an explicit cost model, for tests that pin exact
    /// timings. `ns_per_iteration` must be nonzero or busy-waits
    /// would never make progress.
    pub fn with_costs(
        countdown: &'a TickCountdown,
        ns_per_iteration: u64,
        ns_per_line_write: u64,
    ) -> Self {
        assert!(ns_per_iteration > 0, "iteration cost must be nonzero");
        Self {
            countdown,
            ns_per_iteration,
            ns_per_line_write,
            nanos: 0,
            next_tick_at: NANOS_PER_TICK,
            level: false,
            transitions: Vec::new(),
        }
    }

    /// Modeled time since boot.
    pub fn elapsed_nanos(&self) -> u64 {
        self.nanos
    }

    /// Whole ticks fired since boot.
    pub fn elapsed_ticks(&self) -> u64 {
        self.nanos / NANOS_PER_TICK
    }

    /// Captured line transitions, oldest first.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Drop captured transitions. The clock keeps running.
    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    fn advance(&mut self, nanos: u64) {
        self.nanos += nanos;
        while self.nanos >= self.next_tick_at {
            self.countdown.tick();
            self.next_tick_at += NANOS_PER_TICK;
        }
    }
}

impl OutputLine for SimBoard<'_> {
    fn set(&mut self, high: bool) {
        if high != self.level {
            self.level = high;
            self.transitions.push(Transition {
                at_nanos: self.nanos,
                high,
            });
        }
        self.advance(self.ns_per_line_write);
    }
}

impl BusyWait for SimBoard<'_> {
    fn spin(&mut self, iterations: u32) {
        self.advance(iterations as u64 * self.ns_per_iteration);
    }
}
