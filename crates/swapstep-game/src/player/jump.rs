//! Coyote time, jump buffer and jump count

/// Timers that decide whether a jump request fires now, later or never
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JumpTimers {
    coyote: f32,
    buffer: f32,
    count: u32,
}

impl JumpTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-tick decay. Coyote refills while grounded; the buffer always drains.
    pub fn tick(&mut self, grounded: bool, coyote_time: f32, dt: f32) {
        if grounded {
            self.coyote = coyote_time;
        } else {
            self.coyote = (self.coyote - dt).max(0.0);
        }
        self.buffer = (self.buffer - dt).max(0.0);
    }

    /// Remember a jump that could not fire
    pub fn arm_buffer(&mut self, duration: f32) {
        self.buffer = duration.max(0.0);
    }

    /// A jump fired: count it and spend both grace windows
    pub fn consume(&mut self, max_jump_count: u32) {
        self.count = (self.count + 1).min(max_jump_count);
        self.coyote = 0.0;
        self.buffer = 0.0;
    }

    /// Back on the ground
    pub fn reset_count(&mut self) {
        self.count = 0;
    }

    /// Airborne with at least one jump spent and one left
    pub fn can_double_jump(&self, max_jump_count: u32) -> bool {
        self.count > 0 && self.count < max_jump_count
    }

    pub fn has_coyote(&self) -> bool {
        self.coyote > 0.0
    }

    pub fn has_buffered_jump(&self) -> bool {
        self.buffer > 0.0
    }

    pub fn coyote(&self) -> f32 {
        self.coyote
    }

    pub fn buffer(&self) -> f32 {
        self.buffer
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_coyote_refills_on_ground_and_decays_in_air() {
        let mut timers = JumpTimers::new();
        timers.tick(true, 0.15, DT);
        assert_eq!(timers.coyote(), 0.15);

        for _ in 0..5 {
            timers.tick(false, 0.15, DT);
        }
        assert!((timers.coyote() - (0.15 - 5.0 * DT)).abs() < 1e-5);

        for _ in 0..20 {
            timers.tick(false, 0.15, DT);
        }
        assert_eq!(timers.coyote(), 0.0);
        assert!(!timers.has_coyote());
    }

    #[test]
    fn test_buffer_drains_even_when_grounded() {
        let mut timers = JumpTimers::new();
        timers.arm_buffer(0.1);
        timers.tick(true, 0.15, 0.06);
        assert!(timers.has_buffered_jump());
        timers.tick(true, 0.15, 0.06);
        assert!(!timers.has_buffered_jump());
        assert_eq!(timers.buffer(), 0.0);
    }

    #[test]
    fn test_consume_spends_windows_and_caps_count() {
        let mut timers = JumpTimers::new();
        timers.tick(true, 0.15, DT);
        timers.arm_buffer(0.15);
        timers.consume(2);
        assert_eq!(timers.count(), 1);
        assert!(!timers.has_coyote());
        assert!(!timers.has_buffered_jump());
        assert!(timers.can_double_jump(2));

        timers.consume(2);
        timers.consume(2);
        assert_eq!(timers.count(), 2);
        assert!(!timers.can_double_jump(2));

        timers.reset_count();
        assert_eq!(timers.count(), 0);
        assert!(!timers.can_double_jump(2));
    }
}
