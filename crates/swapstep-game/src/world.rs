//! Level world and tick driver
//!
//! `World` owns everything that lives for one level attempt: the clock, the
//! player, the enemies, the camera and the hazards. A fresh `World` is built
//! for every reload.

use glam::Vec2;
use swapstep_core::{Aabb, GameTime, RealTimeDelay, SoundEvent};
use swapstep_physics::GroundProbe;
use tracing::{debug, error, info};

use crate::camera::CameraController;
use crate::collaborators::Collaborators;
use crate::enemy::{Enemy, EnemyHandle, EnemyRegistry};
use crate::error::GameError;
use crate::input::InputSnapshot;
use crate::player::{JumpTimers, PlayerBody, PlayerState, PlayerStateMachine};
use crate::teleport::{TeleportPhase, TeleportSequencer};
use crate::tuning::PlayerTuning;

/// How the current attempt is going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Playing,
    Died,
    ReachedGoal,
}

/// Animation events waiting for the next fixed tick
#[derive(Debug, Clone, Copy, Default)]
struct AnimationSignals {
    attack_finished: bool,
    melee_hit: bool,
}

/// Collects the contents of a level before it starts
pub struct WorldBuilder {
    tuning: PlayerTuning,
    spawn: Option<Vec2>,
    enemies: Vec<Enemy>,
    kill_zones: Vec<Aabb>,
    goal: Option<Aabb>,
}

impl WorldBuilder {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            spawn: None,
            enemies: Vec::new(),
            kill_zones: Vec::new(),
            goal: None,
        }
    }

    /// Place the player. A level holds exactly one.
    pub fn spawn_player(mut self, position: Vec2) -> Result<Self, GameError> {
        if let Some(existing) = self.spawn {
            error!(
                "Second player spawn at {:?} (already spawned at {:?})",
                position, existing
            );
            return Err(GameError::DuplicatePlayer);
        }
        self.spawn = Some(position);
        Ok(self)
    }

    pub fn enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Touching this box kills the player
    pub fn kill_zone(mut self, zone: Aabb) -> Self {
        self.kill_zones.push(zone);
        self
    }

    pub fn goal(mut self, zone: Aabb) -> Self {
        self.goal = Some(zone);
        self
    }

    /// Validate and start the level. The player enters `Idle`.
    pub fn build(
        self,
        geometry: Box<dyn GroundProbe>,
        out: &mut Collaborators<'_>,
    ) -> Result<World, GameError> {
        self.tuning.validate()?;
        let Some(spawn) = self.spawn else {
            error!("Level built without a player");
            return Err(GameError::MissingPlayer);
        };

        let mut enemies = EnemyRegistry::new();
        for enemy in self.enemies {
            enemies.register(enemy);
        }

        let mut player = PlayerStateMachine::new(&self.tuning, spawn);
        player.enter_level(out);

        info!(
            "Level started: player at {:?}, {} enemies, {} kill zones",
            spawn,
            enemies.len(),
            self.kill_zones.len()
        );

        Ok(World {
            time: GameTime::new(self.tuning.time.clone()),
            player,
            teleport: TeleportSequencer::new(self.tuning.teleport.clone()),
            camera: CameraController::new(self.tuning.camera.clone(), spawn),
            enemies,
            geometry,
            kill_zones: self.kill_zones,
            goal: self.goal,
            signals: AnimationSignals::default(),
            outcome: LevelOutcome::Playing,
            reload: None,
            reload_requested: false,
            tuning: self.tuning,
        })
    }
}

/// One running level attempt
pub struct World {
    tuning: PlayerTuning,
    time: GameTime,
    player: PlayerStateMachine,
    teleport: TeleportSequencer,
    enemies: EnemyRegistry,
    camera: CameraController,
    geometry: Box<dyn GroundProbe>,
    kill_zones: Vec<Aabb>,
    goal: Option<Aabb>,
    signals: AnimationSignals,
    outcome: LevelOutcome,
    reload: Option<RealTimeDelay>,
    reload_requested: bool,
}

impl World {
    /// Advance one frame of `raw_dt` real seconds: as many fixed ticks as the
    /// simulation clock allows, then real-time bookkeeping.
    pub fn frame(&mut self, raw_dt: f32, input: &mut InputSnapshot, out: &mut Collaborators<'_>) {
        self.time.update(raw_dt);
        while !self.time.is_frozen() && self.time.take_fixed_step() {
            self.fixed_update(input, out);
        }
        let real_dt = self.time.unscaled_delta_time;
        self.advance_real(real_dt, out);
    }

    /// One physics tick. Does nothing while the simulation clock is frozen.
    pub fn fixed_update(&mut self, input: &mut InputSnapshot, out: &mut Collaborators<'_>) {
        if self.time.is_frozen() {
            return;
        }
        let dt = self.time.fixed_delta();

        self.player.sense_ground(self.geometry.as_ref());

        if self.player.state() == PlayerState::Dead {
            self.signals = AnimationSignals::default();
            self.player.update_dead(out, dt);
            self.player.integrate(self.geometry.as_ref(), dt);
            return;
        }

        self.drain_signals(out);

        let grounded = self.player.is_grounded();
        self.teleport.update(
            &mut self.player.body,
            grounded,
            &mut self.enemies,
            input,
            &mut self.time,
            out,
        );
        if self.player.state().is_teleporting() {
            // The wind-up runs in live time, so hazards still reach the player
            if self.teleport.phase() == TeleportPhase::PreTeleport {
                self.check_contacts(out);
            }
            return;
        }

        self.player.update_motion(input, out, dt);
        self.player.handle_attack_request(input, out);
        self.player.integrate(self.geometry.as_ref(), dt);
        self.check_contacts(out);
    }

    /// Real-time bookkeeping, runs every frame even while the clock is frozen
    pub fn advance_real(&mut self, real_dt: f32, out: &mut Collaborators<'_>) {
        let player_x = self.player.position().x;
        for (_, enemy) in self.enemies.iter_mut() {
            if enemy.always_faces_player() {
                enemy.face_toward(player_x);
            }
        }

        self.camera
            .update(self.player.position(), self.time.is_frozen(), real_dt);

        self.teleport.advance_real(
            real_dt,
            &mut self.player.body,
            &mut self.enemies,
            &mut self.camera,
            &mut self.time,
            out,
        );

        if let Some(delay) = self.reload.as_mut() {
            if delay.tick(real_dt) && !self.reload_requested {
                self.reload_requested = true;
                info!("Reloading level");
                out.level.reload_current_level();
            }
        }
    }

    /// The wind-up animation finished
    pub fn notify_pre_teleport_animation_done(&mut self) {
        self.teleport.notify_pre_teleport_animation_done();
    }

    /// An attack animation finished
    pub fn notify_attack_animation_done(&mut self) {
        self.signals.attack_finished = true;
    }

    /// The attack animation reached its hit frame
    pub fn notify_melee_hit_frame(&mut self) {
        self.signals.melee_hit = true;
    }

    /// A projectile fired from `source` touched the player
    pub fn report_projectile_hit(&mut self, source: Vec2, out: &mut Collaborators<'_>) {
        self.damage_player(source, out);
    }

    /// Lethal contact from `source`. One hit kills unless invincible.
    pub fn damage_player(&mut self, source: Vec2, out: &mut Collaborators<'_>) {
        if self.outcome != LevelOutcome::Playing {
            return;
        }
        if self.teleport.is_frozen_phase() {
            debug!("Ignoring damage during the teleport swap");
            return;
        }
        if !self.player.take_damage(source, out) {
            return;
        }

        info!("Player died at {:?}", self.player.position());
        self.teleport.abandon(&self.enemies, out.presentation);
        out.audio.stop_music();
        out.audio.play(SoundEvent::PlayerDeath);
        out.audio.play(SoundEvent::PlayerDeathGrunt);
        out.audio.play(SoundEvent::PlayerDeathHit);
        self.finish_attempt(LevelOutcome::Died, self.tuning.lifecycle.death_reload_delay);
    }

    /// End the level in victory
    pub fn reach_goal(&mut self, out: &mut Collaborators<'_>) {
        if self.outcome != LevelOutcome::Playing || self.player.state() == PlayerState::Dead {
            return;
        }

        info!("Goal reached at {:?}", self.player.position());
        self.time.freeze();
        out.audio.stop_music();
        out.audio.play(SoundEvent::ReachedGoal);
        self.player.halt();
        self.teleport.untint_target(&self.enemies, out.presentation);
        self.finish_attempt(LevelOutcome::ReachedGoal, self.tuning.lifecycle.goal_reload_delay);
    }

    fn finish_attempt(&mut self, outcome: LevelOutcome, reload_delay: f32) {
        self.outcome = outcome;
        self.reload = Some(RealTimeDelay::new(reload_delay));
    }

    fn drain_signals(&mut self, out: &mut Collaborators<'_>) {
        let signals = std::mem::take(&mut self.signals);
        if signals.melee_hit {
            let kills = self.player.melee_hit(&mut self.enemies, out);
            if kills > 0 {
                debug!("Melee hit killed {} enemies", kills);
            }
        }
        if signals.attack_finished {
            self.player.finish_attack(out);
        }
    }

    fn check_contacts(&mut self, out: &mut Collaborators<'_>) {
        if self.outcome != LevelOutcome::Playing {
            return;
        }
        let bounds = self.player.bounds();

        if self.goal.is_some_and(|goal| goal.intersects(&bounds)) {
            self.reach_goal(out);
            return;
        }

        let zone = self
            .kill_zones
            .iter()
            .find(|zone| zone.intersects(&bounds))
            .map(|zone| zone.center());
        if let Some(source) = zone {
            self.damage_player(source, out);
            return;
        }

        let enemy = self
            .enemies
            .iter()
            .find(|(_, enemy)| bounds.intersects_circle(enemy.contact_center(), enemy.contact_radius))
            .map(|(_, enemy)| enemy.position);
        if let Some(source) = enemy {
            self.damage_player(source, out);
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn time(&self) -> &GameTime {
        &self.time
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player.body
    }

    /// Mutable access for external effects (knockback, invincibility)
    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player.body
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.player.is_grounded()
    }

    pub fn jump_timers(&self) -> &JumpTimers {
        self.player.jump_timers()
    }

    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    /// Enemies spawn, move and die outside the core
    pub fn enemies_mut(&mut self) -> &mut EnemyRegistry {
        &mut self.enemies
    }

    pub fn teleport_target(&self) -> Option<EnemyHandle> {
        self.teleport.target()
    }

    pub fn teleport_phase(&self) -> TeleportPhase {
        self.teleport.phase()
    }

    pub fn teleport_swaps(&self) -> u32 {
        self.teleport.swaps_performed()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn outcome(&self) -> LevelOutcome {
        self.outcome
    }

    /// Whether the reload has been handed to the level lifecycle
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }
}
