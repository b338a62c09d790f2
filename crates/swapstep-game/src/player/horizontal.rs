//! Running, facing and crouching

use swapstep_core::Facing;
use swapstep_physics::GroundSensor;

use crate::collaborators::Collaborators;
use crate::input::InputSnapshot;

use super::body::PlayerBody;
use super::movement::RunConfig;
use super::state::PlayerState;

/// Drives the horizontal half of the velocity and the facing
#[derive(Debug, Clone, Default)]
pub struct HorizontalMotionController {
    pub config: RunConfig,
}

impl HorizontalMotionController {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// One fixed tick of horizontal motion
    pub fn update(
        &mut self,
        body: &mut PlayerBody,
        sensor: &GroundSensor,
        input: &InputSnapshot,
        out: &mut Collaborators<'_>,
    ) {
        if body.state().locks_horizontal() {
            return;
        }

        self.update_facing(body, input, out);

        if input.move_y < 0 && sensor.is_grounded() {
            body.set_state(PlayerState::Crouch, out.presentation);
            body.velocity.x = 0.0;
            return;
        }

        if sensor.is_grounded() {
            let next = if input.move_x == 0 {
                PlayerState::Idle
            } else {
                PlayerState::Run
            };
            body.set_state(next, out.presentation);
        }

        body.velocity.x = f32::from(input.move_x) * self.config.run_speed;
    }

    fn update_facing(
        &self,
        body: &mut PlayerBody,
        input: &InputSnapshot,
        out: &mut Collaborators<'_>,
    ) {
        let facing = if input.move_x != 0 {
            Facing::from_sign(f32::from(input.move_x))
        } else if body.velocity.x.abs() > self.config.facing_velocity_threshold {
            Facing::from_sign(body.velocity.x)
        } else {
            return;
        };

        if facing == body.facing {
            return;
        }
        body.facing = facing;

        // Turning around cancels an air attack
        if body.state() == PlayerState::JumpAttack {
            if body.velocity.y > 0.0 {
                body.set_state(PlayerState::Jump, out.presentation);
                out.presentation.trigger_jump_animation();
            } else {
                body.set_state(PlayerState::Fall, out.presentation);
            }
        }
    }
}
