//! Core types used throughout Swapstep

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing of a sprite-backed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for the sign of `value`. Zero counts as positive.
    pub fn from_sign(value: f32) -> Self {
        if value < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    /// `-1.0` for left, `+1.0` for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// The facing that looks from `from_x` toward `to_x`
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        Self::from_sign(to_x - from_x)
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Axis-aligned bounding box in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centered on `center` extending `half_extents` in each direction
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Whether the two boxes share any area (touching edges count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Whether a circle touches this box
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_from_sign() {
        assert_eq!(Facing::from_sign(-0.5), Facing::Left);
        assert_eq!(Facing::from_sign(0.0), Facing::Right);
        assert_eq!(Facing::toward(3.0, 1.0), Facing::Left);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Left.flipped(), Facing::Right);
    }

    #[test]
    fn test_aabb_circle_overlap() {
        let aabb = Aabb::from_center(Vec2::new(0.0, 1.0), Vec2::new(0.5, 1.0));
        assert!(aabb.intersects_circle(Vec2::new(0.9, 1.0), 0.5));
        assert!(!aabb.intersects_circle(Vec2::new(2.0, 1.0), 0.5));
        assert!(aabb.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_aabb_normalizes_corners() {
        let aabb = Aabb::new(Vec2::new(2.0, 2.0), Vec2::new(-1.0, 0.0));
        assert_eq!(aabb.min, Vec2::new(-1.0, 0.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 2.0));
        assert!(aabb.intersects(&Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0))));
    }
}
