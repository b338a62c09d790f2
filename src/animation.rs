//! Stand-in animator for the headless demo
//!
//! Plays no sprites. It watches the published state flags and, like the
//! animation graph would, fires timed events back into the world.

use swapstep_game::{EnemyHandle, PlayerState, Presentation, StateFlags};
use tracing::{debug, trace};

/// Seconds before the melee hit frame
const ATTACK_HIT_TIME: f32 = 0.1;
/// Length of every attack clip
const ATTACK_CLIP: f32 = 0.3;
/// Length of the teleport wind-up clip
const PRE_TELEPORT_CLIP: f32 = 0.4;

/// Events raised by finished clips or marked frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    MeleeHit,
    AttackFinished,
    PreTeleportFinished,
}

#[derive(Debug, Default)]
pub struct DemoAnimator {
    state: PlayerState,
    clip_time: f32,
    pending: Vec<(f32, AnimationEvent)>,
}

impl DemoAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Advance the current clip by `dt` simulation seconds
    pub fn advance(&mut self, dt: f32) -> Vec<AnimationEvent> {
        self.clip_time += dt;
        let now = self.clip_time;
        let (due, later): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = later;
        due.into_iter().map(|(_, event)| event).collect()
    }

    fn enter(&mut self, state: PlayerState) {
        self.state = state;
        self.clip_time = 0.0;
        self.pending.clear();
        match state {
            PlayerState::Attack | PlayerState::CrouchAttack | PlayerState::JumpAttack => {
                self.pending.push((ATTACK_HIT_TIME, AnimationEvent::MeleeHit));
                self.pending.push((ATTACK_CLIP, AnimationEvent::AttackFinished));
            }
            PlayerState::PreTeleport => {
                self.pending
                    .push((PRE_TELEPORT_CLIP, AnimationEvent::PreTeleportFinished));
            }
            _ => {}
        }
    }
}

impl Presentation for DemoAnimator {
    fn set_state_flags(&mut self, flags: &StateFlags) {
        let state = flags.active();
        if state != self.state {
            self.enter(state);
        }
    }

    fn trigger_jump_animation(&mut self) {
        trace!("Jump animation triggered");
    }

    fn set_tint(&mut self, enemy: EnemyHandle, blend: f32) {
        debug!("Tint enemy {} at {:.1}", enemy, blend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_clip_events() {
        let mut animator = DemoAnimator::new();
        animator.set_state_flags(&StateFlags::one_hot(PlayerState::Attack));

        assert!(animator.advance(0.05).is_empty());
        assert_eq!(animator.advance(0.1), vec![AnimationEvent::MeleeHit]);
        assert_eq!(animator.advance(0.2), vec![AnimationEvent::AttackFinished]);
        assert!(animator.advance(1.0).is_empty());
    }

    #[test]
    fn test_state_change_cancels_clip() {
        let mut animator = DemoAnimator::new();
        animator.set_state_flags(&StateFlags::one_hot(PlayerState::JumpAttack));
        animator.set_state_flags(&StateFlags::one_hot(PlayerState::Fall));
        assert!(animator.advance(1.0).is_empty());
    }

    #[test]
    fn test_repeated_flags_do_not_restart() {
        let mut animator = DemoAnimator::new();
        animator.set_state_flags(&StateFlags::one_hot(PlayerState::PreTeleport));
        animator.advance(0.3);
        animator.set_state_flags(&StateFlags::one_hot(PlayerState::PreTeleport));
        assert_eq!(
            animator.advance(0.2),
            vec![AnimationEvent::PreTeleportFinished]
        );
    }
}
