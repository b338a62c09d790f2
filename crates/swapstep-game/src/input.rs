//! Per-tick input snapshot
//!
//! Device mapping lives outside the core. Whatever reads the keyboard or pad
//! fills an `InputSnapshot` each tick, and the controllers consume the one-shot
//! request flags as they act on them.

/// Input for one fixed tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Horizontal axis, one of -1, 0, 1
    pub move_x: i8,
    /// Vertical axis, one of -1, 0, 1 (negative is down)
    pub move_y: i8,
    /// Edge-triggered, cleared by the vertical controller
    pub jump_requested: bool,
    /// Edge-triggered, cleared by the attack router
    pub attack_requested: bool,
    /// Edge-triggered, cleared by the teleport sequencer
    pub teleport_requested: bool,
    /// Level-held jump button, drives the early jump cut
    pub jump_held: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both axes from analog values, snapping each to -1, 0 or 1
    pub fn set_move(&mut self, x: f32, y: f32) {
        self.move_x = snap_axis(x);
        self.move_y = snap_axis(y);
    }

    /// Jump button went down this tick
    pub fn press_jump(&mut self) {
        self.jump_requested = true;
        self.jump_held = true;
    }

    /// Jump button went up
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    pub fn request_attack(&mut self) {
        self.attack_requested = true;
    }

    pub fn request_teleport(&mut self) {
        self.teleport_requested = true;
    }

    /// Whether any one-shot request is still waiting for a consumer
    pub fn has_pending_requests(&self) -> bool {
        self.jump_requested || self.attack_requested || self.teleport_requested
    }

    /// Drop every unconsumed one-shot request
    pub fn clear_requests(&mut self) {
        self.jump_requested = false;
        self.attack_requested = false;
        self.teleport_requested = false;
    }
}

fn snap_axis(value: f32) -> i8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(-1.0, 1.0) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_move_snaps_axes() {
        let mut input = InputSnapshot::new();
        input.set_move(0.8, -0.3);
        assert_eq!((input.move_x, input.move_y), (1, 0));

        input.set_move(-3.0, -0.6);
        assert_eq!((input.move_x, input.move_y), (-1, -1));

        input.set_move(f32::NAN, 0.0);
        assert_eq!(input.move_x, 0);
    }

    #[test]
    fn test_jump_press_and_release() {
        let mut input = InputSnapshot::new();
        input.press_jump();
        assert!(input.jump_requested);
        assert!(input.jump_held);

        input.jump_requested = false;
        input.release_jump();
        assert!(!input.jump_held);
        assert!(!input.has_pending_requests());
    }

    #[test]
    fn test_clear_requests_keeps_held_state() {
        let mut input = InputSnapshot::new();
        input.press_jump();
        input.request_attack();
        input.request_teleport();
        assert!(input.has_pending_requests());

        input.clear_requests();
        assert!(!input.has_pending_requests());
        assert!(input.jump_held);
    }
}
