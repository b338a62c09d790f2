//! Kinematic integration with floor snapping

use glam::Vec2;

use crate::GroundProbe;

/// Result of moving a body for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// New feet position
    pub position: Vec2,
    /// Whether the downward sweep stopped on a floor this tick
    pub hit_floor: bool,
}

/// Integrates velocity and stops downward motion at the ground surface.
///
/// Only floors are resolved. Walls and ceilings are not part of this core.
#[derive(Debug, Clone)]
pub struct FloorMover {
    /// Sweep start height above the feet, so a body resting on the surface
    /// still finds it
    pub skin_width: f32,
    /// Horizontal offset of the outer sweep columns
    pub half_width: f32,
}

impl FloorMover {
    pub fn new(half_width: f32) -> Self {
        Self {
            skin_width: 0.02,
            half_width,
        }
    }

    /// Move feet at `position` by `velocity * dt`
    pub fn step<P: GroundProbe + ?Sized>(
        &self,
        probe: &P,
        position: Vec2,
        velocity: Vec2,
        dt: f32,
    ) -> MoveResult {
        let mut next = position + velocity * dt;
        if velocity.y > 0.0 {
            return MoveResult {
                position: next,
                hit_floor: false,
            };
        }

        let reach = (position.y - next.y) + self.skin_width;
        let top = position.y + self.skin_width;
        let nearest = [-self.half_width, 0.0, self.half_width]
            .into_iter()
            .filter_map(|dx| probe.ground_distance(Vec2::new(next.x + dx, top), reach))
            .reduce(f32::min);

        match nearest {
            Some(distance) => {
                next.y = top - distance;
                MoveResult {
                    position: next,
                    hit_floor: true,
                }
            }
            None => MoveResult {
                position: next,
                hit_floor: false,
            },
        }
    }
}

impl Default for FloorMover {
    fn default() -> Self {
        Self::new(0.4)
    }
}
