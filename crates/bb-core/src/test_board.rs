//! Fixed-rate fake board for unit tests.
//!
//! Every busy-wait iteration costs the same fraction of a tick and
//! line writes may be given a cost too, so generator timing can be
//! pinned exactly without a full board simulation.

use crate::board::{BusyWait, OutputLine, TickCountdown};

pub(crate) struct TestBoard<'a> {
    countdown: &'a TickCountdown,
    /// Busy-wait iterations per fake-clock tick.
    iterations_per_tick: u32,
    /// Iteration-equivalents charged per line write (0 = free).
    iterations_per_write: u32,
    carry: u32,
    /// Ticks fired since construction or the last reset.
    pub ticks_fired: u32,
    /// Every line write, in order.
    pub writes: Vec<bool>,
    /// Every spin length, in order.
    pub spins: Vec<u32>,
}

impl<'a> TestBoard<'a> {
    pub fn new(countdown: &'a TickCountdown, iterations_per_tick: u32) -> Self {
        Self::with_write_cost(countdown, iterations_per_tick, 0)
    }

    pub fn with_write_cost(
        countdown: &'a TickCountdown,
        iterations_per_tick: u32,
        iterations_per_write: u32,
    ) -> Self {
        Self {
            countdown,
            iterations_per_tick,
            iterations_per_write,
            carry: 0,
            ticks_fired: 0,
            writes: Vec::new(),
            spins: Vec::new(),
        }
    }

    pub fn reset_counters(&mut self) {
        self.ticks_fired = 0;
        self.writes.clear();
        self.spins.clear();
    }

    fn advance(&mut self, iterations: u32) {
        let total = self.carry as u64 + iterations as u64;
        let ticks = total / self.iterations_per_tick as u64;
        self.carry = (total % self.iterations_per_tick as u64) as u32;
        for _ in 0..ticks {
            self.countdown.tick();
            self.ticks_fired += 1;
        }
    }
}

impl OutputLine for TestBoard<'_> {
    fn set(&mut self, high: bool) {
        self.writes.push(high);
        if self.iterations_per_write > 0 {
            self.advance(self.iterations_per_write);
        }
    }
}

impl BusyWait for TestBoard<'_> {
    fn spin(&mut self, iterations: u32) {
        self.spins.push(iterations);
        self.advance(iterations);
    }
}
