//! Outward-facing seams of the simulation
//!
//! The core never renders, plays audio or loads scenes itself. It talks to
//! these traits, handed in per call through `Collaborators`.

use swapstep_core::AudioSink;

use crate::enemy::EnemyHandle;
use crate::player::StateFlags;

/// Visual feedback: animator flags, jump trigger and enemy tinting
pub trait Presentation {
    /// Publish the one-hot state flags after every state write
    fn set_state_flags(&mut self, flags: &StateFlags);

    /// Fire the jump animation trigger
    fn trigger_jump_animation(&mut self);

    /// Tint an enemy sprite. `blend` is 0 for no tint and 1 for full tint.
    fn set_tint(&mut self, enemy: EnemyHandle, blend: f32);
}

/// Scene management
pub trait LevelLifecycle {
    fn reload_current_level(&mut self);
}

/// The collaborators one tick may call into
pub struct Collaborators<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub presentation: &'a mut dyn Presentation,
    pub level: &'a mut dyn LevelLifecycle,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        audio: &'a mut dyn AudioSink,
        presentation: &'a mut dyn Presentation,
        level: &'a mut dyn LevelLifecycle,
    ) -> Self {
        Self {
            audio,
            presentation,
            level,
        }
    }
}
