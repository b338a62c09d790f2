//! Swapstep Audio - Sound effects and level music using kira
//!
//! Implements the core's `AudioSink` seam: gameplay asks for sound event ids,
//! this crate resolves them to clips and plays them.

mod bank;
mod config;
mod error;
mod manager;
mod music;
mod sfx;

pub use bank::SoundBank;
pub use config::AudioConfig;
pub use error::AudioError;
pub use manager::AudioEngine;
pub use music::MusicState;
