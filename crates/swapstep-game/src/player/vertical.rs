//! Jumping, falling and gravity

use swapstep_core::SoundEvent;
use swapstep_physics::GroundSensor;

use crate::collaborators::Collaborators;
use crate::input::InputSnapshot;

use super::body::PlayerBody;
use super::jump::JumpTimers;
use super::movement::JumpConfig;
use super::state::PlayerState;

/// Owns the jump timers and the vertical half of the velocity
#[derive(Debug, Clone)]
pub struct VerticalMotionController {
    pub config: JumpConfig,
    timers: JumpTimers,
}

impl VerticalMotionController {
    pub fn new(config: JumpConfig) -> Self {
        Self {
            config,
            timers: JumpTimers::new(),
        }
    }

    pub fn timers(&self) -> &JumpTimers {
        &self.timers
    }

    /// One fixed tick of vertical motion
    pub fn update(
        &mut self,
        body: &mut PlayerBody,
        sensor: &mut GroundSensor,
        input: &mut InputSnapshot,
        out: &mut Collaborators<'_>,
        dt: f32,
    ) {
        self.timers
            .tick(sensor.is_grounded(), self.config.coyote_time, dt);

        if input.jump_requested {
            input.jump_requested = false;
            self.handle_jump_request(body, sensor, out);
        }

        if !sensor.is_grounded() {
            self.update_airborne(body, input, out);
        } else if !sensor.was_grounded() {
            self.land(body, sensor, input, out);
        }

        self.apply_gravity(body, dt);
    }

    /// While dead only gravity and the landing thud remain
    pub fn update_dead(
        &mut self,
        body: &mut PlayerBody,
        sensor: &GroundSensor,
        out: &mut Collaborators<'_>,
        dt: f32,
    ) {
        body.velocity.x = 0.0;
        if !sensor.is_grounded() {
            self.apply_gravity(body, dt);
        } else if !sensor.was_grounded() {
            out.audio.play(SoundEvent::Land);
        }
    }

    fn handle_jump_request(
        &mut self,
        body: &mut PlayerBody,
        sensor: &mut GroundSensor,
        out: &mut Collaborators<'_>,
    ) {
        if body.state().blocks_jump() {
            return;
        }

        if sensor.is_grounded()
            || self.timers.has_coyote()
            || self.timers.can_double_jump(self.config.max_jump_count)
        {
            self.jump(body, sensor, out);
        } else {
            self.timers.arm_buffer(self.config.jump_buffer);
        }
    }

    fn jump(
        &mut self,
        body: &mut PlayerBody,
        sensor: &mut GroundSensor,
        out: &mut Collaborators<'_>,
    ) {
        body.set_state(PlayerState::Jump, out.presentation);
        self.timers.consume(self.config.max_jump_count);
        sensor.force_airborne();
        body.velocity.y = self.config.launch_velocity();
        out.presentation.trigger_jump_animation();
        out.audio.play(SoundEvent::Jump);
    }

    fn update_airborne(
        &mut self,
        body: &mut PlayerBody,
        input: &InputSnapshot,
        out: &mut Collaborators<'_>,
    ) {
        if body.velocity.y < 0.0 && body.state() != PlayerState::JumpAttack {
            body.set_state(PlayerState::Fall, out.presentation);
        }

        if self.config.variable_jump_height && !input.jump_held && body.velocity.y > 0.0 {
            body.velocity.y *= self.config.jump_cancel_multiplier;
        }
    }

    fn land(
        &mut self,
        body: &mut PlayerBody,
        sensor: &mut GroundSensor,
        input: &InputSnapshot,
        out: &mut Collaborators<'_>,
    ) {
        let next = if input.move_x == 0 {
            PlayerState::Idle
        } else {
            PlayerState::Run
        };
        body.set_state(next, out.presentation);
        self.timers.reset_count();
        body.velocity.y = 0.0;
        out.audio.play(SoundEvent::Land);

        if self.timers.has_buffered_jump() {
            self.jump(body, sensor, out);
        }
    }

    /// Constant gravity, clamped at terminal fall speed
    pub fn apply_gravity(&self, body: &mut PlayerBody, dt: f32) {
        body.velocity.y -= self.config.gravity() * dt;
        body.velocity.y = body.velocity.y.max(self.config.fastest_fall_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::{FlatGround, Rig, Void};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    struct Fixture {
        rig: Rig,
        body: PlayerBody,
        sensor: GroundSensor,
        vertical: VerticalMotionController,
        input: InputSnapshot,
    }

    impl Fixture {
        fn grounded() -> Self {
            let mut rig = Rig::default();
            let mut body = PlayerBody::new(Vec2::ZERO);
            body.set_state(PlayerState::Idle, &mut rig.presentation);
            let mut sensor = GroundSensor::default();
            sensor.update(&FlatGround, body.position);
            Self {
                rig,
                body,
                sensor,
                vertical: VerticalMotionController::new(JumpConfig::default()),
                input: InputSnapshot::new(),
            }
        }

        fn tick(&mut self) {
            let mut out = self.rig.out();
            self.vertical
                .update(&mut self.body, &mut self.sensor, &mut self.input, &mut out, DT);
        }

        /// Sense empty air, then tick
        fn tick_airborne(&mut self) {
            self.sensor.update(&Void, self.body.position);
            self.tick();
        }

        /// Sense the floor, then tick
        fn tick_grounded(&mut self) {
            self.sensor.update(&FlatGround, Vec2::ZERO);
            self.tick();
        }
    }

    #[test]
    fn test_grounded_jump_launch() {
        let mut f = Fixture::grounded();
        f.input.press_jump();
        f.tick();

        let gravity = f.vertical.config.gravity();
        assert!((f.body.velocity.y + gravity * DT - 21.25).abs() < 1e-4);
        assert_eq!(f.body.state(), PlayerState::Jump);
        assert_eq!(f.vertical.timers().count(), 1);
        assert!(!f.sensor.is_grounded());
        assert!(!f.input.jump_requested);
        assert_eq!(f.rig.presentation.jump_triggers, 1);
        assert_eq!(f.rig.audio.count(SoundEvent::Jump), 1);
    }

    #[test]
    fn test_coyote_jump_after_leaving_ledge() {
        let mut f = Fixture::grounded();
        f.tick_grounded();
        // 0.1 s of free fall stays inside the 0.15 s window
        for _ in 0..6 {
            f.tick_airborne();
        }
        assert_eq!(f.vertical.timers().count(), 0);

        f.input.press_jump();
        f.tick_airborne();
        assert_eq!(f.body.state(), PlayerState::Jump);
        assert_eq!(f.vertical.timers().count(), 1);
    }

    #[test]
    fn test_late_ledge_jump_is_buffered() {
        let mut f = Fixture::grounded();
        f.tick_grounded();
        for _ in 0..12 {
            f.tick_airborne();
        }
        assert!(!f.vertical.timers().has_coyote());

        f.input.press_jump();
        f.tick_airborne();
        assert_eq!(f.body.state(), PlayerState::Fall);
        assert!(f.vertical.timers().has_buffered_jump());
    }

    #[test]
    fn test_early_release_cuts_rise() {
        let mut f = Fixture::grounded();
        f.input.press_jump();
        f.tick();
        let rising = f.body.velocity.y;

        f.input.release_jump();
        f.tick_airborne();
        let gravity = f.vertical.config.gravity();
        assert!((f.body.velocity.y - (rising * 0.7 - gravity * DT)).abs() < 1e-4);
    }

    #[test]
    fn test_fall_after_apex() {
        let mut f = Fixture::grounded();
        f.input.press_jump();
        f.tick();
        for _ in 0..30 {
            f.tick_airborne();
        }
        assert!(f.body.velocity.y < 0.0);
        assert_eq!(f.body.state(), PlayerState::Fall);
    }

    #[test]
    fn test_jump_attack_is_not_preempted_by_fall() {
        let mut f = Fixture::grounded();
        f.sensor.update(&Void, f.body.position);
        f.body.velocity.y = -2.0;
        f.body.set_state(PlayerState::JumpAttack, &mut f.rig.presentation);

        f.tick_airborne();
        assert_eq!(f.body.state(), PlayerState::JumpAttack);
    }

    #[test]
    fn test_landing_resets_and_fires_buffered_jump() {
        let mut f = Fixture::grounded();
        f.input.press_jump();
        f.tick();
        f.input.press_jump();
        f.tick_airborne();
        assert_eq!(f.vertical.timers().count(), 2);

        // Third press while airborne is buffered
        f.input.press_jump();
        f.tick_airborne();
        assert_eq!(f.vertical.timers().count(), 2);
        assert!(f.vertical.timers().has_buffered_jump());

        f.tick_grounded();
        assert_eq!(f.rig.audio.count(SoundEvent::Land), 1);
        assert_eq!(f.body.state(), PlayerState::Jump);
        assert_eq!(f.vertical.timers().count(), 1);
        assert!(f.body.velocity.y > 20.0);
    }

    #[test]
    fn test_expired_buffer_does_not_fire_on_landing() {
        let mut f = Fixture::grounded();
        f.input.press_jump();
        f.tick();
        f.input.press_jump();
        f.tick_airborne();

        f.input.press_jump();
        f.tick_airborne();
        assert!(f.vertical.timers().has_buffered_jump());

        // 10 ticks is longer than the 0.15 s buffer
        for _ in 0..10 {
            f.tick_airborne();
        }
        assert!(!f.vertical.timers().has_buffered_jump());

        f.tick_grounded();
        assert_eq!(f.rig.audio.count(SoundEvent::Land), 1);
        assert_eq!(f.rig.audio.count(SoundEvent::Jump), 2);
        assert_eq!(f.body.state(), PlayerState::Idle);
        assert_eq!(f.vertical.timers().count(), 0);
    }

    #[test]
    fn test_landing_without_buffer_goes_idle_or_run() {
        let mut f = Fixture::grounded();
        f.tick_airborne();
        f.input.move_x = 1;
        f.tick_grounded();
        assert_eq!(f.body.state(), PlayerState::Run);
        assert_eq!(f.vertical.timers().count(), 0);
        assert!(f.body.velocity.y <= 0.0);
    }

    #[test]
    fn test_blocked_states_drop_jump() {
        let mut f = Fixture::grounded();
        f.body.set_state(PlayerState::Attack, &mut f.rig.presentation);

        f.input.press_jump();
        f.tick();
        assert_eq!(f.body.state(), PlayerState::Attack);
        assert!(!f.input.jump_requested);
        assert!(!f.vertical.timers().has_buffered_jump());
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let mut f = Fixture::grounded();
        for _ in 0..600 {
            f.tick_airborne();
            assert!(f.body.velocity.y >= f.vertical.config.fastest_fall_speed);
        }
        assert_eq!(f.body.velocity.y, f.vertical.config.fastest_fall_speed);
    }

    #[test]
    fn test_dead_body_only_falls() {
        let mut f = Fixture::grounded();
        f.body.velocity = Vec2::new(5.0, 0.0);
        f.sensor.update(&Void, f.body.position);
        let mut out = f.rig.out();
        f.vertical.update_dead(&mut f.body, &f.sensor, &mut out, DT);
        drop(out);
        assert_eq!(f.body.velocity.x, 0.0);
        assert!(f.body.velocity.y < 0.0);

        f.sensor.update(&FlatGround, Vec2::ZERO);
        let mut out = f.rig.out();
        f.vertical.update_dead(&mut f.body, &f.sensor, &mut out, DT);
        drop(out);
        assert_eq!(f.rig.audio.count(SoundEvent::Land), 1);
    }
}
