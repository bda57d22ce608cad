//! Bit-banged square-wave synthesis core.
//!
//! Synthesizes music on a single digital output line toggled in
//! software, timed by busy-waiting against a millisecond tick source.
//! At boot the engine measures its own busy-wait throughput, then
//! converts MIDI pitch into loop-iteration periods and drives the
//! line through square, swept, and noise generators while a packed
//! beat sequence plays on repeat.
//!
//! Hardware access goes through two trait seams (`OutputLine`,
//! `BusyWait`) plus one shared `TickCountdown`, so the same engine
//! runs on a bare-metal board and on the simulated board used by
//! tests and the CLI.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod beat;
mod board;
mod calibrate;
mod pitch;
mod sequencer;
mod song;
mod synth;

#[cfg(test)]
pub(crate) mod test_board;

pub use beat::{decode, encode, Beat, Percussion};
pub use board::{BusyWait, OutputLine, TickCountdown};
pub use calibrate::{
    calibrate, Calibration, CalibrationError, CALIBRATION_ITERATIONS, CALIBRATION_WINDOW_TICKS,
};
pub use pitch::note_to_cycles;
pub use sequencer::Sequencer;
pub use song::{demo_song, Song};
pub use synth::{NoisePrng, Synth};
