//! The player's kinematic body and its state setter

use glam::Vec2;
use swapstep_core::{Aabb, Facing};
use tracing::debug;

use crate::collaborators::Presentation;

use super::movement::HitboxConfig;
use super::state::{PlayerState, StateFlags};

/// Which of the two hitboxes is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hitbox {
    #[default]
    Standing,
    Crouching,
}

/// Position, velocity and the canonical locomotion state
#[derive(Debug, Clone)]
pub struct PlayerBody {
    /// Feet position
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Contacts still turn the player but never kill
    pub invincible: bool,
    state: PlayerState,
    hitbox: Hitbox,
}

impl PlayerBody {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            invincible: false,
            state: PlayerState::None,
            hitbox: Hitbox::Standing,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn hitbox(&self) -> Hitbox {
        self.hitbox
    }

    /// Write the state.
    ///
    /// A value change swaps hitboxes when crouch membership flips. The one-hot
    /// flags are published on every call, changed or not.
    pub fn set_state(&mut self, next: PlayerState, presentation: &mut dyn Presentation) {
        if next != self.state {
            if next.is_crouching() != self.state.is_crouching() {
                self.hitbox = if next.is_crouching() {
                    Hitbox::Crouching
                } else {
                    Hitbox::Standing
                };
            }
            debug!("Player state {} -> {}", self.state, next);
            self.state = next;
        }
        presentation.set_state_flags(&StateFlags::one_hot(self.state));
    }

    /// World bounds of the active hitbox
    pub fn bounds(&self, hitboxes: &HitboxConfig) -> Aabb {
        let half = match self.hitbox {
            Hitbox::Standing => hitboxes.standing,
            Hitbox::Crouching => hitboxes.crouching,
        };
        Aabb::from_center(self.position + Vec2::new(0.0, half.y), half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::RecordingPresentation;

    #[test]
    fn test_every_write_publishes() {
        let mut presentation = RecordingPresentation::default();
        let mut body = PlayerBody::new(Vec2::ZERO);
        body.set_state(PlayerState::Idle, &mut presentation);
        body.set_state(PlayerState::Idle, &mut presentation);
        body.set_state(PlayerState::Run, &mut presentation);

        assert_eq!(presentation.published.len(), 3);
        assert!(presentation.published.iter().all(|f| f.count_set() == 1));
        assert_eq!(
            presentation.state_trail(),
            vec![PlayerState::Idle, PlayerState::Run]
        );
    }

    #[test]
    fn test_hitbox_follows_crouch_membership() {
        let mut presentation = RecordingPresentation::default();
        let mut body = PlayerBody::new(Vec2::ZERO);
        body.set_state(PlayerState::Crouch, &mut presentation);
        assert_eq!(body.hitbox(), Hitbox::Crouching);

        body.set_state(PlayerState::CrouchAttack, &mut presentation);
        assert_eq!(body.hitbox(), Hitbox::Crouching);

        body.set_state(PlayerState::Idle, &mut presentation);
        assert_eq!(body.hitbox(), Hitbox::Standing);
    }

    #[test]
    fn test_bounds_rest_on_feet() {
        let hitboxes = HitboxConfig::default();
        let mut presentation = RecordingPresentation::default();
        let mut body = PlayerBody::new(Vec2::new(2.0, 1.0));

        let standing = body.bounds(&hitboxes);
        assert!((standing.min.y - 1.0).abs() < 1e-6);
        assert!((standing.max.y - 2.8).abs() < 1e-6);

        body.set_state(PlayerState::Crouch, &mut presentation);
        let crouching = body.bounds(&hitboxes);
        assert!((crouching.max.y - 2.1).abs() < 1e-6);
        assert!((crouching.min.x - 1.6).abs() < 1e-6);
    }
}
