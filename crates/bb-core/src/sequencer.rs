//! Beat sequencing.
//!
//! Drives a fixed song through the synthesis voices: decode a step,
//! arm the playback window, fire percussion, then hold the melodic
//! line (or rest) until the window closes. The song replays from the
//! start on exhaustion, with no gap state in between.

use crate::beat::{self, Percussion};
use crate::board::{BusyWait, OutputLine, TickCountdown};
use crate::calibrate::Calibration;
use crate::pitch::note_to_cycles;
use crate::song::Song;
use crate::synth::Synth;

const MILLIS_PER_MINUTE: f32 = 60_000.0;

/// Sequencer state: song position, tempo, and the synthesis context.
///
/// Boot contract: the tick source must already be running and the
/// calibration measured (exactly once) before a sequencer is built;
/// set the tempo before entering [`run`](Self::run).
pub struct Sequencer<'a> {
    song: &'a Song,
    synth: Synth,
    countdown: &'a TickCountdown,
    millis_per_beat: u32,
    position: usize,
}

impl<'a> Sequencer<'a> {
    /// Build a sequencer. Tempo starts from the song's own BPM;
    /// [`set_bpm`](Self::set_bpm) overrides it.
    pub fn new(song: &'a Song, calibration: Calibration, countdown: &'a TickCountdown) -> Self {
        debug_assert!(!song.codes.is_empty(), "song must have at least one step");

        let mut sequencer = Self {
            song,
            synth: Synth::new(calibration),
            countdown,
            millis_per_beat: 0,
            position: 0,
        };
        sequencer.set_bpm(song.bpm);
        sequencer
    }

    /// Set the tempo. Fixed once before playback; changing it
    /// mid-song only affects windows armed afterwards.
    pub fn set_bpm(&mut self, bpm: f32) {
        self.millis_per_beat = (MILLIS_PER_MINUTE / bpm) as u32;
    }

    pub fn millis_per_beat(&self) -> u32 {
        self.millis_per_beat
    }

    /// Index of the next step to play.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Play one step and advance, wrapping at the end of the song.
    pub fn step<B: OutputLine + BusyWait>(&mut self, board: &mut B) {
        let beat = beat::decode(self.song.codes[self.position]);

        self.countdown.arm(self.millis_per_beat * beat.beats as u32);

        match beat.percussion {
            Percussion::Kick => self.synth.kick(board),
            Percussion::Snare => self.synth.snare(board, self.countdown),
            Percussion::None => {}
        }

        if beat.note != 0 {
            let cycles = note_to_cycles(self.synth.calibration(), beat.note);
            self.synth.tone(board, self.countdown, cycles, beat.duty_shift);
        } else {
            // Rest: poll the window out through the busy-wait seam so
            // it stays the only time sink.
            while !self.countdown.is_expired() {
                board.spin(1);
            }
        }

        self.position = (self.position + 1) % self.song.codes.len();
    }

    /// The firmware main loop: play the song forever.
    pub fn run<B: OutputLine + BusyWait>(&mut self, board: &mut B) -> ! {
        loop {
            self.step(board);
        }
    }
}
