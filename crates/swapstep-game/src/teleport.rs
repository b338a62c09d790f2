//! Teleport sequencer
//!
//! Picks the nearest enemy in range, and on request runs the swap sequence:
//! an animation-gated wind-up in live time, then a run of position swaps with
//! the simulation clock frozen, then a camera pan. Each stage is a phase that
//! is stepped either by fixed ticks or by real-time frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use swapstep_core::{GameTime, RealTimeDelay, SoundEvent};
use tracing::{debug, info};

use crate::camera::CameraController;
use crate::collaborators::{Collaborators, Presentation};
use crate::enemy::{EnemyHandle, EnemyRegistry};
use crate::input::InputSnapshot;
use crate::player::{PlayerBody, PlayerState};

/// Tint applied to the current target while idle
const TARGET_TINT: f32 = 0.5;
/// Tint applied while the target is locked in
const LOCKED_TINT: f32 = 1.0;

/// Teleport tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    /// Position exchanges per teleport. Must be odd.
    pub number_of_swaps: u32,
    /// Real seconds between swaps
    pub swap_duration: f32,
    /// Farthest a target may be
    pub teleport_range: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            number_of_swaps: 5,
            swap_duration: 1.0 / 12.0,
            teleport_range: 17.5,
        }
    }
}

/// Where the sequencer is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeleportPhase {
    /// Searching for the nearest target every tick
    #[default]
    Idle,
    /// Waiting for the wind-up animation to finish
    PreTeleport,
    /// Clock frozen, exchanging positions between real-time pauses
    Swapping,
    /// Clock frozen, waiting for the camera to arrive
    Panning,
}

/// Transient per-teleport values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeleportSession {
    pub closest_target: Option<EnemyHandle>,
    pub is_pre_teleport_finished: bool,
    pub swaps_remaining: u32,
}

pub struct TeleportSequencer {
    pub config: TeleportConfig,
    session: TeleportSession,
    phase: TeleportPhase,
    swap_pause: RealTimeDelay,
    swaps_performed: u32,
    pre_teleport_done: bool,
}

impl TeleportSequencer {
    pub fn new(config: TeleportConfig) -> Self {
        let swap_pause = RealTimeDelay::new(config.swap_duration);
        Self {
            config,
            session: TeleportSession::default(),
            phase: TeleportPhase::Idle,
            swap_pause,
            swaps_performed: 0,
            pre_teleport_done: false,
        }
    }

    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    pub fn session(&self) -> &TeleportSession {
        &self.session
    }

    pub fn target(&self) -> Option<EnemyHandle> {
        self.session.closest_target
    }

    /// Swaps carried out by the current or most recent sequence
    pub fn swaps_performed(&self) -> u32 {
        self.swaps_performed
    }

    /// Whether the frozen part of the sequence is running
    pub fn is_frozen_phase(&self) -> bool {
        matches!(self.phase, TeleportPhase::Swapping | TeleportPhase::Panning)
    }

    /// Queue the wind-up animation's completion. Applied on the next tick.
    pub fn notify_pre_teleport_animation_done(&mut self) {
        self.pre_teleport_done = true;
    }

    /// Fixed-tick step
    pub fn update(
        &mut self,
        body: &mut PlayerBody,
        grounded: bool,
        enemies: &mut EnemyRegistry,
        input: &mut InputSnapshot,
        time: &mut GameTime,
        out: &mut Collaborators<'_>,
    ) {
        if std::mem::take(&mut self.pre_teleport_done) {
            if self.phase == TeleportPhase::PreTeleport && body.state() == PlayerState::PreTeleport {
                self.session.is_pre_teleport_finished = true;
                body.set_state(PlayerState::Teleport, out.presentation);
            } else {
                debug!("Dropping pre-teleport signal outside the wind-up");
            }
        }

        if self.phase == TeleportPhase::Idle {
            self.refresh_target(body.position, enemies, out.presentation);
        }

        if input.teleport_requested {
            input.teleport_requested = false;
            self.handle_request(body, grounded, enemies, out);
        }

        if self.session.is_pre_teleport_finished {
            self.begin_swaps(body, enemies, time, out);
        }
    }

    /// Real-time step, runs every frame even while the clock is frozen
    pub fn advance_real(
        &mut self,
        real_dt: f32,
        body: &mut PlayerBody,
        enemies: &mut EnemyRegistry,
        camera: &mut CameraController,
        time: &mut GameTime,
        out: &mut Collaborators<'_>,
    ) {
        match self.phase {
            TeleportPhase::Swapping => {
                if !self.swap_pause.tick(real_dt) {
                    return;
                }
                if self.session.swaps_remaining > 0 {
                    self.swap(body, enemies);
                    self.swap_pause.restart();
                } else {
                    camera.start_pan(body.position);
                    self.phase = TeleportPhase::Panning;
                }
            }
            TeleportPhase::Panning => {
                if camera.take_pan_finished() {
                    self.finish(body, enemies, time, out);
                }
            }
            TeleportPhase::Idle | TeleportPhase::PreTeleport => {}
        }
    }

    /// Drop an unfinished wind-up (the player died) and clear the target tint
    pub fn abandon(&mut self, enemies: &EnemyRegistry, presentation: &mut dyn Presentation) {
        self.untint_target(enemies, presentation);
        if self.phase == TeleportPhase::PreTeleport {
            debug!("Teleport wind-up abandoned");
            self.phase = TeleportPhase::Idle;
        }
        self.session.is_pre_teleport_finished = false;
        self.pre_teleport_done = false;
    }

    pub fn untint_target(&self, enemies: &EnemyRegistry, presentation: &mut dyn Presentation) {
        tint(self.session.closest_target, 0.0, enemies, presentation);
    }

    /// Nearest enemy within range of `position`, if any
    pub fn find_target(&self, position: Vec2, enemies: &EnemyRegistry) -> Option<EnemyHandle> {
        enemies
            .nearest(position)
            .filter(|(_, distance)| *distance <= self.config.teleport_range)
            .map(|(handle, _)| handle)
    }

    fn refresh_target(
        &mut self,
        position: Vec2,
        enemies: &EnemyRegistry,
        presentation: &mut dyn Presentation,
    ) {
        let nearest = self.find_target(position, enemies);
        let previous = self.session.closest_target;
        if nearest != previous {
            tint(nearest, TARGET_TINT, enemies, presentation);
            tint(previous, 0.0, enemies, presentation);
        }
        self.session.closest_target = nearest;
    }

    fn handle_request(
        &mut self,
        body: &mut PlayerBody,
        grounded: bool,
        enemies: &EnemyRegistry,
        out: &mut Collaborators<'_>,
    ) {
        if self.phase != TeleportPhase::Idle || body.state().is_teleporting() || !grounded {
            return;
        }
        let Some(target) = self.session.closest_target.filter(|h| enemies.contains(*h)) else {
            return;
        };

        debug!("Teleport wind-up toward {}", target);
        body.set_state(PlayerState::PreTeleport, out.presentation);
        body.velocity = Vec2::ZERO;
        tint(Some(target), LOCKED_TINT, enemies, out.presentation);
        out.audio.play(SoundEvent::PreTeleport);
        self.phase = TeleportPhase::PreTeleport;
    }

    fn begin_swaps(
        &mut self,
        body: &mut PlayerBody,
        enemies: &mut EnemyRegistry,
        time: &mut GameTime,
        out: &mut Collaborators<'_>,
    ) {
        self.session.is_pre_teleport_finished = false;
        self.session.swaps_remaining = self.config.number_of_swaps;
        self.swaps_performed = 0;

        time.freeze();
        out.audio.play(SoundEvent::Teleport);
        info!(
            "Teleporting: {} swaps with {:?}",
            self.config.number_of_swaps, self.session.closest_target
        );

        self.phase = TeleportPhase::Swapping;
        self.swap(body, enemies);
        self.swap_pause = RealTimeDelay::new(self.config.swap_duration);
    }

    fn swap(&mut self, body: &mut PlayerBody, enemies: &mut EnemyRegistry) {
        if self.session.swaps_remaining == 0 {
            return;
        }
        self.session.swaps_remaining -= 1;

        let Some(enemy) = self.session.closest_target.and_then(|h| enemies.get_mut(h)) else {
            debug!(
                "Teleport target vanished, skipping {} swaps",
                self.session.swaps_remaining + 1
            );
            self.session.swaps_remaining = 0;
            return;
        };

        std::mem::swap(&mut body.position, &mut enemy.position);
        if enemy.always_faces_player() {
            enemy.face_toward(body.position.x);
        }
        self.swaps_performed += 1;
    }

    fn finish(
        &mut self,
        body: &mut PlayerBody,
        enemies: &EnemyRegistry,
        time: &mut GameTime,
        out: &mut Collaborators<'_>,
    ) {
        time.thaw();
        self.phase = TeleportPhase::Idle;
        self.session.swaps_remaining = 0;
        info!("Teleport finished after {} swaps", self.swaps_performed);

        tint(self.session.closest_target, TARGET_TINT, enemies, out.presentation);
        body.set_state(PlayerState::Idle, out.presentation);
        self.refresh_target(body.position, enemies, out.presentation);
    }
}

fn tint(
    target: Option<EnemyHandle>,
    blend: f32,
    enemies: &EnemyRegistry,
    presentation: &mut dyn Presentation,
) {
    if let Some(handle) = target.filter(|h| enemies.contains(*h)) {
        presentation.set_tint(handle, blend);
    }
}
