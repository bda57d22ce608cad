//! Simulated board for the beatbang engine.
//!
//! Implements the hardware seams against modeled nanosecond time: a
//! configurable iteration-cost model stands in for the CPU, and a
//! fake tick source fires once per modeled millisecond. Output-line
//! transitions are captured with timestamps and can be resampled into
//! PCM for listening tests and WAV export.

mod board;
mod render;
mod wav;

pub use board::{SimBoard, Transition, NANOS_PER_TICK};
pub use render::resample;
pub use wav::{samples_to_wav, write_wav};
