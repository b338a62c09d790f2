//! Follow camera with real-time pans

use glam::Vec2;
use tracing::debug;

use super::CameraConfig;

/// What the camera is doing this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Locked to the player on the configured axes
    Follow,
    /// Easing toward `to` over the configured pan duration
    Panning { from: Vec2, to: Vec2, elapsed: f32 },
}

impl CameraMode {
    pub fn is_panning(&self) -> bool {
        matches!(self, CameraMode::Panning { .. })
    }
}

/// Camera controller
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    /// Current camera mode
    pub mode: CameraMode,
    /// Camera world position
    position: Vec2,
    /// Raised when a pan lands, cleared by `take_pan_finished`
    pan_finished: bool,
}

impl CameraController {
    /// Create a camera centered on `position`
    pub fn new(config: CameraConfig, position: Vec2) -> Self {
        Self {
            config,
            mode: CameraMode::Follow,
            position,
            pan_finished: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Begin easing toward `target`. Completion is reported once through
    /// `take_pan_finished`.
    pub fn start_pan(&mut self, target: Vec2) {
        debug!("Camera pan {:?} -> {:?}", self.position, target);
        self.pan_finished = false;
        self.mode = CameraMode::Panning {
            from: self.position,
            to: target,
            elapsed: 0.0,
        };
    }

    pub fn is_panning(&self) -> bool {
        self.mode.is_panning()
    }

    /// One-shot pan completion signal
    pub fn take_pan_finished(&mut self) -> bool {
        std::mem::take(&mut self.pan_finished)
    }

    /// Per-frame update.
    ///
    /// Follows `player` while the simulation runs. While it is frozen only an
    /// active pan moves the camera, paced by `real_dt`.
    pub fn update(&mut self, player: Vec2, sim_frozen: bool, real_dt: f32) {
        match self.mode {
            CameraMode::Follow => {
                if !sim_frozen {
                    self.follow(player);
                }
            }
            CameraMode::Panning { from, to, elapsed } => {
                let elapsed = elapsed + real_dt;
                let t = if self.config.pan_duration > 0.0 {
                    (elapsed / self.config.pan_duration).min(1.0)
                } else {
                    1.0
                };

                if self.config.follow_x {
                    self.position.x = smooth_step(from.x, to.x, t);
                }
                if self.config.follow_y {
                    self.position.y = smooth_step(from.y, to.y, t);
                }

                if t >= 1.0 {
                    self.mode = CameraMode::Follow;
                    self.pan_finished = true;
                } else {
                    self.mode = CameraMode::Panning { from, to, elapsed };
                }
            }
        }
    }

    fn follow(&mut self, player: Vec2) {
        if self.config.follow_x {
            self.position.x = player.x;
        }
        if self.config.follow_y {
            self.position.y = player.y;
        }
    }
}

/// Hermite ease between `from` and `to`, `t` clamped to [0, 1]
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}
