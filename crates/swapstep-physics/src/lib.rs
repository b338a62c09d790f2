//! Swapstep Physics - Level geometry queries using rapier2d
//!
//! Provides the ground query seam, the three-probe ground sensor, and the
//! floor-snapping mover used by the player each fixed tick.

mod ground_sensor;
mod mover;

pub use ground_sensor::{GroundResult, GroundSensor, GroundSensorConfig};
pub use mover::{FloorMover, MoveResult};

use glam::Vec2;
use nalgebra::Unit;
use rapier2d::prelude::*;

/// Collision group carried by every collider that counts as walkable ground
pub const GROUND_GROUP: Group = Group::GROUP_1;

/// Downward ground query used by the sensor and the mover.
///
/// Kept as a trait so gameplay code can run against rapier geometry or a
/// lightweight stand-in.
pub trait GroundProbe {
    /// Distance from `origin` straight down to the first ground surface,
    /// if one lies within `max_distance`
    fn ground_distance(&self, origin: Vec2, max_distance: f32) -> Option<f32>;
}

/// Static level geometry and the query pipeline over it
pub struct PhysicsWorld {
    /// Rigid body storage (level geometry is parentless, kept for queries)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty level
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure after geometry changes
    pub fn refresh(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider that is not ground (walls, decoration)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.refresh();
        handle
    }

    /// Add a solid ground box centered at `center`
    pub fn add_ground_box(&mut self, half_extents: Vec2, center: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![center.x, center.y])
            .collision_groups(InteractionGroups::new(GROUND_GROUP, Group::ALL))
            .friction(0.0)
            .build();
        self.add_static_collider(collider)
    }

    /// Add an infinite ground plane whose surface sits at height `y`
    pub fn add_ground_plane(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0]);
        let collider = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y])
            .collision_groups(InteractionGroups::new(GROUND_GROUP, Group::ALL))
            .build();
        self.add_static_collider(collider)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(point![origin.x, origin.y], vector![direction.x, direction.y]);

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundProbe for PhysicsWorld {
    fn ground_distance(&self, origin: Vec2, max_distance: f32) -> Option<f32> {
        let filter =
            QueryFilter::default().groups(InteractionGroups::new(Group::ALL, GROUND_GROUP));
        self.raycast(origin, Vec2::NEG_Y, max_distance, filter)
            .map(|(_, distance)| distance)
    }
}
