//! Three-probe ground detection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::GroundProbe;

/// Ground sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSensorConfig {
    /// How far below the feet each probe reaches
    pub probe_distance: f32,
    /// Horizontal offset of the left and right probes from the center
    pub half_width: f32,
}

impl Default for GroundSensorConfig {
    fn default() -> Self {
        Self {
            probe_distance: 0.05,
            half_width: 0.4,
        }
    }
}

/// Grounded state for the current and previous tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundResult {
    pub is_grounded: bool,
    pub was_grounded: bool,
}

impl GroundResult {
    /// Grounded this tick but not the one before
    pub fn just_landed(&self) -> bool {
        self.is_grounded && !self.was_grounded
    }
}

/// Samples the ground beneath the player's feet once per fixed tick
#[derive(Debug, Clone)]
pub struct GroundSensor {
    pub config: GroundSensorConfig,
    is_grounded: bool,
    was_grounded: bool,
}

impl GroundSensor {
    /// Sensors start grounded so a level never opens with a landing edge
    pub fn new(config: GroundSensorConfig) -> Self {
        Self {
            config,
            is_grounded: true,
            was_grounded: true,
        }
    }

    /// Left, center and right probe origins for feet at `position`
    pub fn probe_origins(&self, position: Vec2) -> [Vec2; 3] {
        let offset = Vec2::new(self.config.half_width, 0.0);
        [position - offset, position, position + offset]
    }

    /// Recompute grounded state. The previous value becomes `was_grounded`.
    pub fn update<P: GroundProbe + ?Sized>(&mut self, probe: &P, position: Vec2) -> GroundResult {
        self.was_grounded = self.is_grounded;
        self.is_grounded = self
            .probe_origins(position)
            .iter()
            .any(|origin| {
                probe
                    .ground_distance(*origin, self.config.probe_distance)
                    .is_some()
            });
        self.result()
    }

    /// Mark the player as having left the ground this tick (a jump fired)
    pub fn force_airborne(&mut self) {
        self.is_grounded = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn was_grounded(&self) -> bool {
        self.was_grounded
    }

    pub fn result(&self) -> GroundResult {
        GroundResult {
            is_grounded: self.is_grounded,
            was_grounded: self.was_grounded,
        }
    }
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self::new(GroundSensorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsWorld;

    fn ledge() -> PhysicsWorld {
        // Ground surface at y = 0 spanning x in [-5, 5]
        let mut world = PhysicsWorld::new();
        world.add_ground_box(Vec2::new(5.0, 1.0), Vec2::new(0.0, -1.0));
        world
    }

    #[test]
    fn test_grounded_when_standing() {
        let world = ledge();
        let mut sensor = GroundSensor::default();
        let result = sensor.update(&world, Vec2::new(0.0, 0.02));
        assert!(result.is_grounded);
        assert!(result.was_grounded);
        assert!(!result.just_landed());
    }

    #[test]
    fn test_edge_probe_keeps_grounded() {
        let world = ledge();
        let mut sensor = GroundSensor::default();
        // Center is past the edge, left probe still over ground
        let result = sensor.update(&world, Vec2::new(5.3, 0.02));
        assert!(result.is_grounded);

        let result = sensor.update(&world, Vec2::new(5.5, 0.02));
        assert!(!result.is_grounded);
    }

    #[test]
    fn test_landing_edge() {
        let world = ledge();
        let mut sensor = GroundSensor::default();
        sensor.update(&world, Vec2::new(0.0, 2.0));
        let airborne = sensor.result();
        assert!(!airborne.is_grounded);
        assert!(airborne.was_grounded);

        let landed = sensor.update(&world, Vec2::new(0.0, 0.01));
        assert!(landed.just_landed());
    }

    #[test]
    fn test_force_airborne_feeds_next_tick() {
        let world = ledge();
        let mut sensor = GroundSensor::default();
        sensor.force_airborne();
        let result = sensor.update(&world, Vec2::new(0.0, 0.01));
        assert!(result.just_landed());
    }
}
