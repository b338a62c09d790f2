//! Camera system module
//!
//! Side-view follow camera with the scripted pan that closes a teleport.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::{smooth_step, CameraController, CameraMode};
