//! Player module
//!
//! The locomotion state machine: ground sensing, jump timers, vertical and
//! horizontal motion, attacks and damage.

mod body;
mod controller;
mod horizontal;
mod jump;
mod movement;
mod state;
mod vertical;

pub use body::{Hitbox, PlayerBody};
pub use controller::PlayerStateMachine;
pub use horizontal::HorizontalMotionController;
pub use jump::JumpTimers;
pub use movement::{HitboxConfig, JumpConfig, MeleeConfig, RunConfig};
pub use state::{PlayerState, StateFlags};
pub use vertical::VerticalMotionController;
