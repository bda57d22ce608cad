//! Transition log → PCM.

use crate::board::Transition;

/// Rendered square-wave amplitude.
const AMPLITUDE: i16 = 16_384;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Resample a transition log into mono 16-bit PCM.
///
/// The line holds its level between transitions; each output sample
/// takes the level in effect at its sample instant. Rendering covers
/// `start_nanos..end_nanos` of modeled time (end is normally the
/// board's elapsed time; start lets callers skip the boot phase).
/// A low line renders at negative amplitude, so a resting board is a
/// flat floor rather than digital silence, the same DC level a real
/// speaker would sit at.
pub fn resample(
    transitions: &[Transition],
    start_nanos: u64,
    end_nanos: u64,
    sample_rate: u32,
) -> Vec<i16> {
    let ns_per_sample = NANOS_PER_SECOND / sample_rate as u64;
    let total = (end_nanos.saturating_sub(start_nanos) / ns_per_sample) as usize;

    let mut samples = Vec::with_capacity(total);
    let mut level = false;
    let mut next = 0;

    for n in 0..total {
        let t = start_nanos + n as u64 * ns_per_sample;
        while next < transitions.len() && transitions[next].at_nanos <= t {
            level = transitions[next].high;
            next += 1;
        }
        samples.push(if level { AMPLITUDE } else { -AMPLITUDE });
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    fn tr(at_nanos: u64, high: bool) -> Transition {
        Transition { at_nanos, high }
    }

    #[test]
    fn empty_log_renders_a_low_floor() {
        let samples = resample(&[], 0, 10 * MS, 1000);
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|&s| s == -AMPLITUDE));
    }

    #[test]
    fn sample_count_matches_window_and_rate() {
        let samples = resample(&[], 0, 1_000 * MS, 44_100);
        // 22675 ns/sample over one second.
        assert_eq!(samples.len(), 44_100);
    }

    #[test]
    fn level_holds_between_transitions() {
        let log = [tr(0, true), tr(5 * MS, false)];
        let samples = resample(&log, 0, 10 * MS, 1000);
        assert!(samples[..5].iter().all(|&s| s == AMPLITUDE));
        assert!(samples[5..].iter().all(|&s| s == -AMPLITUDE));
    }

    #[test]
    fn square_wave_alternates() {
        let log: Vec<Transition> = (0..10).map(|i| tr(i * MS, i % 2 == 0)).collect();
        let samples = resample(&log, 0, 10 * MS, 1000);
        for (i, &s) in samples.iter().enumerate() {
            let expected = if i % 2 == 0 { AMPLITUDE } else { -AMPLITUDE };
            assert_eq!(s, expected, "sample {}", i);
        }
    }

    #[test]
    fn start_offset_skips_earlier_activity() {
        let log = [tr(0, true), tr(3 * MS, false), tr(6 * MS, true)];
        let samples = resample(&log, 5 * MS, 10 * MS, 1000);
        // At 5 ms the line is low; it rises again at 6 ms.
        assert_eq!(samples[0], -AMPLITUDE);
        assert!(samples[1..].iter().all(|&s| s == AMPLITUDE));
    }

    #[test]
    fn inverted_window_renders_nothing() {
        let samples = resample(&[], 10 * MS, 5 * MS, 1000);
        assert!(samples.is_empty());
    }
}
