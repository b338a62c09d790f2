//! Aggregated gameplay tuning

use serde::{Deserialize, Serialize};
use swapstep_core::TimeConfig;
use swapstep_physics::GroundSensorConfig;

use crate::camera::CameraConfig;
use crate::error::GameError;
use crate::player::{HitboxConfig, JumpConfig, MeleeConfig, RunConfig};
use crate::teleport::TeleportConfig;

/// Real-time delays before the level restarts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub death_reload_delay: f32,
    pub goal_reload_delay: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            death_reload_delay: 2.5,
            goal_reload_delay: 2.0,
        }
    }
}

/// Every tunable the simulation reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub time: TimeConfig,
    pub ground: GroundSensorConfig,
    pub jump: JumpConfig,
    pub run: RunConfig,
    pub melee: MeleeConfig,
    pub hitbox: HitboxConfig,
    pub teleport: TeleportConfig,
    pub camera: CameraConfig,
    pub lifecycle: LifecycleConfig,
}

impl PlayerTuning {
    /// Parse TOML. Missing sections and fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, GameError> {
        let tuning: Self = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let jump = &self.jump;
        ensure(jump.jump_height > 0.0, "jump.jump_height must be positive")?;
        ensure(
            jump.jump_time_to_apex > 0.0,
            "jump.jump_time_to_apex must be positive",
        )?;
        ensure(jump.max_jump_count >= 1, "jump.max_jump_count must be at least 1")?;
        ensure(
            jump.fastest_fall_speed < 0.0,
            "jump.fastest_fall_speed must be negative",
        )?;

        let teleport = &self.teleport;
        ensure(
            teleport.number_of_swaps % 2 == 1,
            "teleport.number_of_swaps must be odd",
        )?;
        ensure(
            teleport.teleport_range > 0.0,
            "teleport.teleport_range must be positive",
        )?;
        ensure(
            teleport.swap_duration >= 0.0,
            "teleport.swap_duration must not be negative",
        )?;

        ensure(
            self.camera.pan_duration >= 0.0,
            "camera.pan_duration must not be negative",
        )?;
        ensure(
            self.lifecycle.death_reload_delay > 0.0 && self.lifecycle.goal_reload_delay > 0.0,
            "lifecycle reload delays must be positive",
        )?;
        ensure(
            self.time.fixed_timestep > 0.0,
            "time.fixed_timestep must be positive",
        )?;
        Ok(())
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), GameError> {
    if condition {
        Ok(())
    } else {
        Err(GameError::InvalidTuning(message.to_string()))
    }
}
