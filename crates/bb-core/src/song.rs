//! Song data.
//!
//! A song is an ordered, fixed run of packed beat codes replayed
//! indefinitely. Swapping the melody means substituting the table.

use arrayvec::ArrayString;

use crate::beat::{encode, Percussion};

/// A fixed song: packed steps plus playback defaults.
#[derive(Clone, Debug)]
pub struct Song {
    /// Song title
    pub title: ArrayString<32>,
    /// Default tempo in beats per minute
    pub bpm: f32,
    /// Packed steps in playback order. Must be nonempty.
    pub codes: &'static [u16],
}

impl Song {
    pub fn new(title: &str, bpm: f32, codes: &'static [u16]) -> Self {
        let mut t = ArrayString::new();
        let _ = t.try_push_str(title);
        Self {
            title: t,
            bpm,
            codes,
        }
    }
}

use Percussion::{Kick, None as NoDrum, Snare};

/// The compiled demo melody: three kick-led phrases answered on the
/// backbeat by snares, a long closing note, and a rest before the
/// loop comes round again. 25% duty throughout.
const DEMO_CODES: [u16; 14] = [
    encode(88, 1, 1, Kick),   // E6
    encode(86, 1, 1, NoDrum), // D6
    encode(78, 1, 2, NoDrum), // F#5
    encode(80, 1, 2, Snare),  // G#5
    encode(85, 1, 1, Kick),   // C#6
    encode(83, 1, 1, NoDrum), // B5
    encode(74, 1, 2, NoDrum), // D5
    encode(76, 1, 2, Snare),  // E5
    encode(83, 1, 1, Kick),   // B5
    encode(81, 1, 1, NoDrum), // A5
    encode(73, 1, 2, Snare),  // C#5
    encode(76, 1, 2, Snare),  // E5
    encode(81, 1, 4, Snare),  // A5
    encode(0, 1, 2, NoDrum),  // rest
];

/// The song compiled into the firmware, at its intended 240 BPM.
pub fn demo_song() -> Song {
    Song::new("Demo Loop", 240.0, &DEMO_CODES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beat::decode;

    #[test]
    fn demo_song_has_fourteen_steps() {
        assert_eq!(demo_song().codes.len(), 14);
    }

    #[test]
    fn demo_song_ends_on_a_rest() {
        let song = demo_song();
        let last = decode(*song.codes.last().unwrap());
        assert_eq!(last.note, 0);
        assert_eq!(last.beats, 2);
    }

    #[test]
    fn demo_song_notes_are_in_midi_range() {
        for &code in demo_song().codes {
            assert!(decode(code).note <= 127);
        }
    }

    #[test]
    fn demo_song_phrases_lead_with_kicks() {
        let song = demo_song();
        for index in [0, 4, 8] {
            assert_eq!(decode(song.codes[index]).percussion, Percussion::Kick);
        }
    }

    #[test]
    fn overlong_title_is_dropped_not_panicked() {
        let song = Song::new(
            "a title much longer than the thirty-two byte cap",
            120.0,
            &DEMO_CODES,
        );
        assert!(song.title.is_empty());
    }
}
