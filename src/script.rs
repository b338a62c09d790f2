//! Scripted input for the headless demo

use swapstep_game::InputSnapshot;

/// A single input change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Hold a horizontal direction (-1, 0, 1)
    Move(i8),
    /// Hold or release down
    Crouch(bool),
    PressJump,
    ReleaseJump,
    Attack,
    Teleport,
}

/// Timed actions, replayed against simulation time
#[derive(Debug, Clone)]
pub struct InputScript {
    steps: Vec<(f32, Action)>,
    cursor: usize,
}

impl InputScript {
    pub fn new(mut steps: Vec<(f32, Action)>) -> Self {
        steps.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { steps, cursor: 0 }
    }

    /// The run the demo plays: warp to the guard, cut through, hop the pit
    pub fn demo() -> Self {
        use Action::*;
        Self::new(vec![
            (0.3, Teleport),
            (1.6, Move(1)),
            (2.0, Attack),
            (2.6, PressJump),
            (2.9, ReleaseJump),
            (3.6, Crouch(true)),
            (3.9, Crouch(false)),
            (4.2, Teleport),
            (5.4, Move(1)),
            (5.8, PressJump),
            (6.2, PressJump),
            (6.6, ReleaseJump),
            (7.5, Attack),
            (8.2, Teleport),
            (9.5, Move(1)),
        ])
    }

    /// Apply every step due by `elapsed` seconds
    pub fn apply(&mut self, elapsed: f32, input: &mut InputSnapshot) {
        while let Some((at, action)) = self.steps.get(self.cursor).copied() {
            if at > elapsed {
                break;
            }
            self.cursor += 1;
            match action {
                Action::Move(x) => input.move_x = x.clamp(-1, 1),
                Action::Crouch(down) => input.move_y = if down { -1 } else { 0 },
                Action::PressJump => input.press_jump(),
                Action::ReleaseJump => input.release_jump(),
                Action::Attack => input.request_attack(),
                Action::Teleport => input.request_teleport(),
            }
        }
    }

    /// Start over for a new attempt
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_fire_in_time_order() {
        let mut script = InputScript::new(vec![
            (1.0, Action::PressJump),
            (0.5, Action::Move(-1)),
            (2.0, Action::Teleport),
        ]);
        let mut input = InputSnapshot::new();

        script.apply(0.4, &mut input);
        assert_eq!(input, InputSnapshot::new());

        script.apply(1.0, &mut input);
        assert_eq!(input.move_x, -1);
        assert!(input.jump_requested);
        assert!(!input.teleport_requested);
        assert!(!script.is_finished());

        script.apply(5.0, &mut input);
        assert!(input.teleport_requested);
        assert!(script.is_finished());

        script.rewind();
        assert!(!script.is_finished());
    }
}
