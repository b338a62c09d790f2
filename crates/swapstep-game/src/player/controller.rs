//! Player state machine: sequences the motion controllers, attacks and damage

use glam::Vec2;
use swapstep_core::{Aabb, Facing, SoundEvent};
use swapstep_physics::{FloorMover, GroundProbe, GroundResult, GroundSensor};

use crate::collaborators::Collaborators;
use crate::enemy::{EnemyHandle, EnemyRegistry};
use crate::input::InputSnapshot;
use crate::tuning::PlayerTuning;

use super::body::PlayerBody;
use super::horizontal::HorizontalMotionController;
use super::jump::JumpTimers;
use super::movement::{HitboxConfig, MeleeConfig};
use super::state::PlayerState;
use super::vertical::VerticalMotionController;

/// Owns the player body and everything that moves it
pub struct PlayerStateMachine {
    pub body: PlayerBody,
    sensor: GroundSensor,
    mover: FloorMover,
    vertical: VerticalMotionController,
    horizontal: HorizontalMotionController,
    melee: MeleeConfig,
    hitboxes: HitboxConfig,
}

impl PlayerStateMachine {
    /// Create a player with its feet at `spawn`
    pub fn new(tuning: &PlayerTuning, spawn: Vec2) -> Self {
        Self {
            body: PlayerBody::new(spawn),
            sensor: GroundSensor::new(tuning.ground.clone()),
            mover: FloorMover::new(tuning.ground.half_width),
            vertical: VerticalMotionController::new(tuning.jump.clone()),
            horizontal: HorizontalMotionController::new(tuning.run.clone()),
            melee: tuning.melee.clone(),
            hitboxes: tuning.hitbox.clone(),
        }
    }

    /// Leave the pre-level sentinel and publish the first flags
    pub fn enter_level(&mut self, out: &mut Collaborators<'_>) {
        self.body.set_state(PlayerState::Idle, out.presentation);
    }

    pub fn state(&self) -> PlayerState {
        self.body.state()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_grounded(&self) -> bool {
        self.sensor.is_grounded()
    }

    pub fn ground(&self) -> GroundResult {
        self.sensor.result()
    }

    pub fn jump_timers(&self) -> &JumpTimers {
        self.vertical.timers()
    }

    /// World bounds of the active hitbox
    pub fn bounds(&self) -> Aabb {
        self.body.bounds(&self.hitboxes)
    }

    /// Sample the ground under the current position
    pub fn sense_ground<P: GroundProbe + ?Sized>(&mut self, probe: &P) -> GroundResult {
        self.sensor.update(probe, self.body.position)
    }

    pub fn update_dead(&mut self, out: &mut Collaborators<'_>, dt: f32) {
        self.vertical
            .update_dead(&mut self.body, &self.sensor, out, dt);
    }

    /// Vertical then horizontal motion for one tick
    pub fn update_motion(
        &mut self,
        input: &mut InputSnapshot,
        out: &mut Collaborators<'_>,
        dt: f32,
    ) {
        self.vertical
            .update(&mut self.body, &mut self.sensor, input, out, dt);
        self.horizontal
            .update(&mut self.body, &self.sensor, input, out);
    }

    /// Route a pending attack request into the matching attack state
    pub fn handle_attack_request(&mut self, input: &mut InputSnapshot, out: &mut Collaborators<'_>) {
        if !input.attack_requested {
            return;
        }
        input.attack_requested = false;

        match self.body.state() {
            PlayerState::Jump | PlayerState::Fall => {
                self.body.set_state(PlayerState::JumpAttack, out.presentation);
            }
            PlayerState::Run | PlayerState::Idle => {
                self.body.set_state(PlayerState::Attack, out.presentation);
                self.body.velocity.x = 0.0;
            }
            PlayerState::Crouch => {
                self.body.set_state(PlayerState::CrouchAttack, out.presentation);
                self.body.velocity.x = 0.0;
            }
            _ => {}
        }
    }

    /// The attack animation ended
    pub fn finish_attack(&mut self, out: &mut Collaborators<'_>) {
        let next = match self.body.state() {
            PlayerState::Attack => PlayerState::Idle,
            PlayerState::CrouchAttack => PlayerState::Crouch,
            PlayerState::JumpAttack if self.body.velocity.y > 0.0 => PlayerState::Jump,
            PlayerState::JumpAttack => PlayerState::Fall,
            _ => return,
        };
        self.body.set_state(next, out.presentation);
    }

    /// Center of the melee circle for the current facing
    pub fn melee_center(&self) -> Vec2 {
        self.body.position
            + Vec2::new(self.body.facing.sign() * self.melee.reach.x, self.melee.reach.y)
    }

    /// Kill every enemy touching the melee circle. Returns the kill count.
    pub fn melee_hit(&mut self, enemies: &mut EnemyRegistry, out: &mut Collaborators<'_>) -> usize {
        let center = self.melee_center();
        let radius = self.melee.radius;
        let struck: Vec<EnemyHandle> = enemies
            .iter()
            .filter(|(_, enemy)| {
                enemy.contact_center().distance(center) <= radius + enemy.contact_radius
            })
            .map(|(handle, _)| handle)
            .collect();

        out.audio.play(SoundEvent::Attack);
        for handle in &struck {
            if enemies.unregister(*handle).is_some() {
                out.audio.play(SoundEvent::EnemyDeath);
            }
        }
        struck.len()
    }

    /// Apply a lethal contact from `source`.
    ///
    /// The player always turns toward the source. Returns true if this
    /// contact killed the player.
    pub fn take_damage(&mut self, source: Vec2, out: &mut Collaborators<'_>) -> bool {
        if self.body.state() == PlayerState::Dead {
            return false;
        }
        self.body.facing = Facing::toward(self.body.position.x, source.x);
        if self.body.invincible {
            return false;
        }
        self.body.set_state(PlayerState::Dead, out.presentation);
        self.body.velocity.x = 0.0;
        true
    }

    /// Stop horizontal motion (goal reached)
    pub fn halt(&mut self) {
        self.body.velocity.x = 0.0;
    }

    /// Move by the current velocity, landing on any floor crossed
    pub fn integrate<P: GroundProbe + ?Sized>(&mut self, probe: &P, dt: f32) {
        let result = self
            .mover
            .step(probe, self.body.position, self.body.velocity, dt);
        self.body.position = result.position;
        if result.hit_floor && self.body.velocity.y < 0.0 {
            self.body.velocity.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::{FlatGround, Rig};
    use crate::enemy::{Enemy, EnemyKind};

    const DT: f32 = 1.0 / 60.0;

    fn spawn(rig: &mut Rig) -> PlayerStateMachine {
        let mut player = PlayerStateMachine::new(&PlayerTuning::default(), Vec2::ZERO);
        player.enter_level(&mut rig.out());
        player.sense_ground(&FlatGround);
        player
    }

    fn force(player: &mut PlayerStateMachine, rig: &mut Rig, state: PlayerState) {
        player.body.set_state(state, &mut rig.presentation);
    }

    #[test]
    fn test_enter_level_publishes_idle() {
        let mut rig = Rig::default();
        let player = spawn(&mut rig);
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(rig.presentation.state_trail(), vec![PlayerState::Idle]);
    }

    #[test]
    fn test_attack_routing() {
        let cases = [
            (PlayerState::Idle, PlayerState::Attack, 0.0),
            (PlayerState::Run, PlayerState::Attack, 0.0),
            (PlayerState::Crouch, PlayerState::CrouchAttack, 0.0),
            (PlayerState::Jump, PlayerState::JumpAttack, 7.5),
            (PlayerState::Fall, PlayerState::JumpAttack, 7.5),
            (PlayerState::PreTeleport, PlayerState::PreTeleport, 7.5),
        ];
        for (from, to, vx) in cases {
            let mut rig = Rig::default();
            let mut player = spawn(&mut rig);
            force(&mut player, &mut rig, from);
            player.body.velocity.x = 7.5;

            let mut input = InputSnapshot::new();
            input.request_attack();
            player.handle_attack_request(&mut input, &mut rig.out());

            assert_eq!(player.state(), to, "from {from}");
            assert_eq!(player.body.velocity.x, vx, "from {from}");
            assert!(!input.attack_requested);
        }
    }

    #[test]
    fn test_finish_attack() {
        let cases = [
            (PlayerState::Attack, 0.0, PlayerState::Idle),
            (PlayerState::CrouchAttack, 0.0, PlayerState::Crouch),
            (PlayerState::JumpAttack, 2.0, PlayerState::Jump),
            (PlayerState::JumpAttack, -2.0, PlayerState::Fall),
            (PlayerState::Run, 0.0, PlayerState::Run),
        ];
        for (from, vy, to) in cases {
            let mut rig = Rig::default();
            let mut player = spawn(&mut rig);
            force(&mut player, &mut rig, from);
            player.body.velocity.y = vy;
            player.finish_attack(&mut rig.out());
            assert_eq!(player.state(), to);
        }
    }

    #[test]
    fn test_melee_kills_enemies_in_reach() {
        let mut rig = Rig::default();
        let mut player = spawn(&mut rig);
        let mut enemies = EnemyRegistry::new();
        let near = enemies.register(Enemy::new(EnemyKind::Skeleton, Vec2::new(1.2, 0.5)));
        let behind = enemies.register(Enemy::new(EnemyKind::Skeleton, Vec2::new(-1.2, 0.5)));
        let far = enemies.register(Enemy::new(EnemyKind::Wizard, Vec2::new(6.0, 0.5)));

        let kills = player.melee_hit(&mut enemies, &mut rig.out());
        assert_eq!(kills, 1);
        assert!(!enemies.contains(near));
        assert!(enemies.contains(behind));
        assert!(enemies.contains(far));
        assert_eq!(rig.audio.count(SoundEvent::Attack), 1);
        assert_eq!(rig.audio.count(SoundEvent::EnemyDeath), 1);

        player.body.facing = Facing::Left;
        player.melee_hit(&mut enemies, &mut rig.out());
        assert!(!enemies.contains(behind));
        assert_eq!(rig.audio.count(SoundEvent::Attack), 2);
    }

    #[test]
    fn test_damage_faces_source_and_kills() {
        let mut rig = Rig::default();
        let mut player = spawn(&mut rig);
        player.body.velocity.x = 7.5;

        assert!(player.take_damage(Vec2::new(-3.0, 0.0), &mut rig.out()));
        assert_eq!(player.state(), PlayerState::Dead);
        assert_eq!(player.body.facing, Facing::Left);
        assert_eq!(player.body.velocity.x, 0.0);

        // Already dead
        assert!(!player.take_damage(Vec2::new(3.0, 0.0), &mut rig.out()));
        assert_eq!(player.body.facing, Facing::Left);
    }

    #[test]
    fn test_invincible_player_turns_but_survives() {
        let mut rig = Rig::default();
        let mut player = spawn(&mut rig);
        player.body.invincible = true;
        player.body.facing = Facing::Left;

        assert!(!player.take_damage(Vec2::new(0.0, 5.0), &mut rig.out()));
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.body.facing, Facing::Right);
    }

    #[test]
    fn test_integrate_lands_on_floor() {
        let mut rig = Rig::default();
        let mut player = spawn(&mut rig);
        player.body.position = Vec2::new(0.0, 0.1);
        player.body.velocity = Vec2::new(3.0, -12.0);
        player.integrate(&FlatGround, DT);

        assert!(player.body.position.y.abs() < 1e-5);
        assert!((player.body.position.x - 0.05).abs() < 1e-5);
        assert_eq!(player.body.velocity.y, 0.0);
    }
}
