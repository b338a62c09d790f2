//! The demo level: two platforms over a pit, a goal at the far end

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swapstep_core::Aabb;
use swapstep_game::{Enemy, EnemyKind, GameError, PlayerTuning, WorldBuilder};
use swapstep_physics::PhysicsWorld;

pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 0.0);

/// Left edge of the pit
const PIT_START: f32 = 20.0;
/// Right edge of the pit
const PIT_END: f32 = 24.0;
const LEVEL_END: f32 = 60.0;

/// Ground surfaces, all with their tops at y = 0
pub fn build_geometry() -> PhysicsWorld {
    let mut physics = PhysicsWorld::new();
    let left = (PIT_START + 10.0) * 0.5;
    let right = (LEVEL_END - PIT_END) * 0.5;
    physics.add_ground_box(Vec2::new(left, 1.0), Vec2::new(PIT_START - left, -1.0));
    physics.add_ground_box(Vec2::new(right, 1.0), Vec2::new(PIT_END + right, -1.0));
    physics
}

/// Level contents for one attempt. Enemy placement is seeded so a run can
/// be replayed.
pub fn populate(tuning: PlayerTuning, seed: u64) -> Result<WorldBuilder, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut builder = WorldBuilder::new(tuning)
        .spawn_player(PLAYER_SPAWN)?
        .kill_zone(Aabb::new(
            Vec2::new(PIT_START - 0.5, -8.0),
            Vec2::new(PIT_END + 0.5, -2.0),
        ))
        .goal(Aabb::new(
            Vec2::new(LEVEL_END - 4.0, 0.0),
            Vec2::new(LEVEL_END - 2.0, 3.0),
        ));

    // One wizard guarding the near side of the pit
    let x = rng.gen_range(10.0..16.0);
    builder = builder.enemy(Enemy::new(EnemyKind::Wizard, Vec2::new(x, 0.0)));

    for _ in 0..rng.gen_range(2..=4) {
        let kind = if rng.gen_bool(0.5) {
            EnemyKind::Skeleton
        } else {
            EnemyKind::Wizard
        };
        let x = rng.gen_range(PIT_END + 4.0..LEVEL_END - 6.0);
        builder = builder.enemy(Enemy::new(kind, Vec2::new(x, 0.0)));
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapstep_physics::GroundProbe;

    #[test]
    fn test_pit_has_no_ground() {
        let physics = build_geometry();
        assert!(physics.ground_distance(Vec2::new(0.0, 0.5), 1.0).is_some());
        assert!(physics.ground_distance(Vec2::new(22.0, 0.5), 10.0).is_none());
        assert!(physics.ground_distance(Vec2::new(40.0, 0.5), 1.0).is_some());
        assert!(physics.ground_distance(Vec2::new(-9.5, 0.5), 1.0).is_some());
    }

    #[test]
    fn test_populate_spawns_player() {
        assert!(populate(PlayerTuning::default(), 3).is_ok());
    }
}
