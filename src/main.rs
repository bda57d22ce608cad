//! beatbang CLI: boot the simulated board, then play or export.
//!
//! Usage:
//!   beatbang                   play through the default audio device
//!   beatbang --wav out.wav     render to a WAV file instead
//!   beatbang --loops 4         song passes to render (default 2)
//!   beatbang --bpm 140         override the song's tempo

use bb_audio::{AudioOutput, CpalOutput};
use bb_core::{calibrate, demo_song, Sequencer, TickCountdown};
use bb_sim::{resample, samples_to_wav, SimBoard, Transition};
use std::{env, fs};

const WAV_SAMPLE_RATE: u32 = 44_100;

fn main() {
    let args: Vec<String> = env::args().collect();
    let wav_path = flag_value(&args, "--wav");
    let loops: u32 = flag_value(&args, "--loops")
        .map(|v| parse_or_exit(&v, "--loops"))
        .unwrap_or(2);
    let bpm: Option<f32> = flag_value(&args, "--bpm").map(|v| parse_or_exit(&v, "--bpm"));

    let song = demo_song();
    let countdown = TickCountdown::new();
    let mut board = SimBoard::new(&countdown);

    // Boot contract: tick source running, calibrate once, set tempo,
    // then sequence.
    let calibration = calibrate(&mut board, &countdown).unwrap_or_else(|e| {
        eprintln!("Calibration failed: {}", e);
        std::process::exit(1);
    });

    let mut sequencer = Sequencer::new(&song, calibration, &countdown);
    if let Some(bpm) = bpm {
        sequencer.set_bpm(bpm);
    }

    println!("Title:  {}", song.title);
    println!("Steps:  {}", song.codes.len());
    println!("Tempo:  {} ms/beat", sequencer.millis_per_beat());
    println!(
        "Clock:  {:.0} cycles/s (calibrated)",
        calibration.cycles_per_second()
    );

    let play_start = board.elapsed_nanos();
    for _ in 0..loops {
        for _ in 0..song.codes.len() {
            sequencer.step(&mut board);
        }
    }
    let play_end = board.elapsed_nanos();

    let seconds = (play_end - play_start) as f64 / 1e9;
    println!("Played {} passes ({:.1} s of audio)", loops, seconds);
    println!();

    match wav_path {
        Some(path) => export_wav(board.transitions(), play_start, play_end, &path),
        None => play_audio(board.transitions(), play_start, play_end),
    }
}

fn export_wav(transitions: &[Transition], start: u64, end: u64, path: &str) {
    let samples = resample(transitions, start, end, WAV_SAMPLE_RATE);
    println!("Writing {} at {} Hz...", path, WAV_SAMPLE_RATE);

    let wav = samples_to_wav(&samples, WAV_SAMPLE_RATE);
    fs::write(path, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path, e);
        std::process::exit(1);
    });

    println!("Done ({} bytes).", wav.len());
}

fn play_audio(transitions: &[Transition], start: u64, end: u64) {
    let (mut output, consumer) = CpalOutput::new().unwrap_or_else(|e| {
        eprintln!("Audio init failed: {}", e);
        std::process::exit(1);
    });

    // Resample at whatever rate the device actually runs.
    let samples = resample(transitions, start, end, output.sample_rate());

    if let Err(e) = output.build_stream(consumer).and_then(|_| output.start()) {
        eprintln!("Audio start failed: {}", e);
        std::process::exit(1);
    }

    println!("Playing...");
    for &sample in &samples {
        output.write_spin(sample);
    }
    // Let the tail drain before tearing the stream down.
    for _ in 0..output.sample_rate() / 4 {
        output.write_spin(0);
    }
    let _ = output.stop();
    println!("Done.");
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {}: {}", flag, value);
        std::process::exit(1);
    })
}
