//! Waveform generators.
//!
//! Three voices share the one output line: a square-wave tone, a
//! swept kick, and a noise snare. Tone and snare stop when the armed
//! playback window expires; the kick is a fixed-length transient that
//! deliberately ignores the window, so it lands identically at any
//! tempo.

use crate::board::{BusyWait, OutputLine, TickCountdown};
use crate::calibrate::Calibration;

/// Snare burst length in observed ticks.
const SNARE_TICKS: u32 = 50;

/// Kick sweep shape: the first pulse period is one 400 Hz cycle,
/// rising to four times that over five pulses.
const KICK_BASE_HZ: f32 = 400.0;
const KICK_SWEEP_RATIO: u32 = 4;
const KICK_SWEEP_STEPS: u32 = 5;

const NOISE_SEED: u32 = 0x0BAD_C0DE;

/// xorshift32 noise source for the snare.
///
/// State persists for the life of the engine and is never reseeded,
/// so consecutive snares (and whole song repeats) keep drawing from
/// one stream instead of replaying an identical burst.
#[derive(Clone, Debug)]
pub struct NoisePrng {
    state: u32,
}

impl NoisePrng {
    pub const fn new() -> Self {
        Self { state: NOISE_SEED }
    }

    /// Advance the generator and return the new state.
    pub fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl Default for NoisePrng {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthesis context: the calibration constant plus the persistent
/// noise source. Constructed once at boot and owned by the sequencer
/// so initialization order is explicit rather than ambient.
pub struct Synth {
    calibration: Calibration,
    noise: NoisePrng,
}

impl Synth {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            noise: NoisePrng::new(),
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// One square pulse: high for `on` iterations, low for `off`.
    fn pulse<B: OutputLine + BusyWait>(board: &mut B, on: u32, off: u32) {
        board.set(true);
        board.spin(on);
        board.set(false);
        board.spin(off);
    }

    /// Square-wave melodic voice.
    ///
    /// `cycles` is the full period from pitch conversion;
    /// `duty_shift` splits it: ON span `cycles >> duty_shift`, OFF
    /// span the remainder. Emits pulse pairs until the window
    /// expires, overshooting by at most one period.
    pub fn tone<B: OutputLine + BusyWait>(
        &self,
        board: &mut B,
        countdown: &TickCountdown,
        cycles: u32,
        duty_shift: u8,
    ) {
        let on = cycles >> duty_shift;
        let off = cycles - on;
        while !countdown.is_expired() {
            Self::pulse(board, on, off);
        }
    }

    /// Swept kick transient.
    ///
    /// Five symmetric pulses rising from a 400 Hz period to four
    /// times that. Runs to completion regardless of the armed window;
    /// its length is set by the sweep, not the tempo.
    pub fn kick<B: OutputLine + BusyWait>(&self, board: &mut B) {
        let min = (self.calibration.cycles_per_second() / KICK_BASE_HZ) as u32;
        let max = min * KICK_SWEEP_RATIO;
        let step = (max - min) / KICK_SWEEP_STEPS;

        let mut period = min;
        while period < max {
            Self::pulse(board, period, period);
            period += step;
        }
    }

    /// Noise snare burst.
    ///
    /// Writes the 32 bits of each xorshift draw straight to the line,
    /// for up to fifty observed ticks, stopping early if the window
    /// expires first.
    pub fn snare<B: OutputLine + BusyWait>(&mut self, board: &mut B, countdown: &TickCountdown) {
        let start = countdown.remaining();
        while start - countdown.remaining() < SNARE_TICKS && !countdown.is_expired() {
            let bits = self.noise.next();
            for bit in 0..32 {
                board.set(bits & (1 << bit) != 0);
            }
        }
    }
}
