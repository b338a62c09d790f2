//! Movement configuration and constants

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Jump and gravity tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Apex height of a full jump in world units
    pub jump_height: f32,
    /// Seconds from launch to apex
    pub jump_time_to_apex: f32,
    /// Releasing jump while rising cuts the jump short
    pub variable_jump_height: bool,
    /// Upward velocity multiplier applied on an early release
    pub jump_cancel_multiplier: f32,
    /// Coyote time - grace period after leaving ground where you can still jump
    pub coyote_time: f32,
    /// Jump buffer - how long a failed jump input is remembered before landing
    pub jump_buffer: f32,
    /// Total jumps before touching ground again (2 = double jump)
    pub max_jump_count: u32,
    /// Terminal fall velocity (negative)
    pub fastest_fall_speed: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_height: 4.25,
            jump_time_to_apex: 0.4,
            variable_jump_height: true,
            jump_cancel_multiplier: 0.7,
            coyote_time: 0.15,
            jump_buffer: 0.15,
            max_jump_count: 2,
            fastest_fall_speed: -30.0,
        }
    }
}

impl JumpConfig {
    /// Upward velocity that reaches `jump_height` after `jump_time_to_apex`
    pub fn launch_velocity(&self) -> f32 {
        2.0 * self.jump_height / self.jump_time_to_apex
    }

    /// Constant downward acceleration matching the launch velocity
    pub fn gravity(&self) -> f32 {
        2.0 * self.jump_height / (self.jump_time_to_apex * self.jump_time_to_apex)
    }
}

/// Ground running tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Horizontal speed while a direction is held
    pub run_speed: f32,
    /// Without input, facing follows velocity only above this speed
    pub facing_velocity_threshold: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_speed: 7.5,
            facing_velocity_threshold: 1.0,
        }
    }
}

/// Melee hit circle, relative to the player's feet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Offset of the circle center; x is mirrored by facing
    pub reach: Vec2,
    pub radius: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            reach: Vec2::new(0.9, 0.6),
            radius: 0.8,
        }
    }
}

/// Half extents of the two player hitboxes. Both sit on the feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    pub standing: Vec2,
    pub crouching: Vec2,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            standing: Vec2::new(0.4, 0.9),
            crouching: Vec2::new(0.4, 0.55),
        }
    }
}
