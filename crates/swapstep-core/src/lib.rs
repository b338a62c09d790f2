//! Swapstep Core - Core types and utilities for Swapstep
//!
//! This crate provides the foundational types used throughout the game:
//! - Mathematical primitives (re-exported from glam)
//! - Simulation/real dual clock for frozen-time sequences
//! - Facing and bounding-box helpers
//! - Sound event ids and the audio output seam

pub mod sound;
pub mod time;
pub mod types;

pub use glam::Vec2;
pub use sound::{AudioSink, MutedAudio, SoundEvent};
pub use time::{GameTime, RealTimeDelay, TimeConfig};
pub use types::{Aabb, Facing};
