//! Time system for Swapstep
//!
//! Two clocks run side by side. The simulation clock drives fixed physics
//! steps and can be frozen (scale 0) during the goal and teleport sequences.
//! The real clock always advances and paces the scripted sequences that run
//! while the simulation is frozen.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulation seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Simulation and real time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Simulation seconds since level start
    pub sim_time: f64,
    /// Real seconds since level start (keeps advancing while frozen)
    pub real_time: f64,
    /// Simulation delta for this frame (0 while frozen)
    pub delta_time: f32,
    /// Real delta for this frame (clamped)
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the simulation clock is frozen
    frozen: bool,
    /// Accumulated simulation time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            sim_time: 0.0,
            real_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            frozen: false,
            fixed_accumulator: 0.0,
        }
    }

    /// Update both clocks with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.real_time += self.unscaled_delta_time as f64;
        self.frame_count += 1;

        if self.frozen {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.sim_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Take one fixed timestep out of the accumulator, if a whole one is
    /// available. Steps not taken stay banked for later frames.
    pub fn take_fixed_step(&mut self) -> bool {
        if self.fixed_accumulator < self.config.fixed_timestep {
            return false;
        }
        self.fixed_accumulator -= self.config.fixed_timestep;
        true
    }

    /// Whole fixed timesteps waiting in the accumulator
    pub fn pending_fixed_steps(&self) -> u32 {
        (self.fixed_accumulator / self.config.fixed_timestep) as u32
    }

    /// The fixed physics timestep
    pub fn fixed_delta(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Stop the simulation clock. Real time keeps advancing.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Restart the simulation clock at the configured scale
    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    /// Whether the simulation clock is currently stopped
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Effective simulation rate (0.0 while frozen)
    pub fn time_scale(&self) -> f32 {
        if self.frozen {
            0.0
        } else {
            self.config.time_scale
        }
    }
}

/// A one-shot countdown stepped with real (unscaled) delta time.
///
/// Scripted waits are modelled with this instead of suspending: the owner
/// ticks it once per frame and resumes its sequence when it reports done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealTimeDelay {
    duration: f32,
    elapsed: f32,
}

impl RealTimeDelay {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` real seconds. Returns `true` once the delay has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds left before the delay elapses
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed
    }

    /// Start counting again from zero
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);
    }

    #[test]
    fn test_frozen_clock_has_no_fixed_steps() {
        let mut time = GameTime::default();
        time.freeze();
        time.update(0.1);

        assert_eq!(time.delta_time, 0.0);
        assert!(!time.take_fixed_step());
        assert!((time.real_time - 0.1).abs() < 1e-6);
        assert_eq!(time.sim_time, 0.0);
        assert_eq!(time.time_scale(), 0.0);
    }

    #[test]
    fn test_thaw_resumes_fixed_steps() {
        let mut time = GameTime::default();
        time.freeze();
        time.update(0.05);
        time.thaw();
        time.update(0.06);

        let mut steps = 0;
        while time.take_fixed_step() {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert!((time.real_time - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_untaken_steps_stay_banked() {
        let mut time = GameTime::default();
        time.update(0.06);
        assert_eq!(time.pending_fixed_steps(), 3);

        assert!(time.take_fixed_step());
        time.freeze();
        time.update(0.05);
        assert_eq!(time.pending_fixed_steps(), 2);

        time.thaw();
        time.update(0.0);
        assert!(time.take_fixed_step());
        assert!(time.take_fixed_step());
        assert!(!time.take_fixed_step());
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.unscaled_delta_time, 0.25);
    }

    #[test]
    fn test_real_time_delay() {
        let mut delay = RealTimeDelay::new(0.2);
        assert!(!delay.tick(0.1));
        assert!((delay.remaining() - 0.1).abs() < 1e-6);
        assert!(delay.tick(0.1));
        assert!(delay.is_finished());

        delay.restart();
        assert!(!delay.is_finished());
    }
}
