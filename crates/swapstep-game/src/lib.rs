//! Swapstep Game - Player locomotion and level flow
//!
//! Provides the fixed-timestep player state machine, the teleport sequencer,
//! the enemy registry, the follow camera and the `World` that ticks them.

pub mod camera;
pub mod collaborators;
pub mod enemy;
pub mod error;
pub mod input;
pub mod player;
pub mod teleport;
pub mod tuning;
pub mod world;

pub use camera::{CameraConfig, CameraController, CameraMode};
pub use collaborators::{Collaborators, LevelLifecycle, Presentation};
pub use enemy::{Enemy, EnemyHandle, EnemyKind, EnemyRegistry};
pub use error::GameError;
pub use input::InputSnapshot;
pub use player::{
    HitboxConfig, JumpConfig, MeleeConfig, PlayerBody, PlayerState, PlayerStateMachine, RunConfig,
    StateFlags,
};
pub use teleport::{TeleportConfig, TeleportPhase, TeleportSequencer, TeleportSession};
pub use tuning::{LifecycleConfig, PlayerTuning};
pub use world::{LevelOutcome, World, WorldBuilder};
