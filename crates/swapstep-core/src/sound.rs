//! Sound event ids and the audio collaborator seam

use serde::{Deserialize, Serialize};

/// Every one-shot sound the gameplay core can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEvent {
    Attack,
    EnemyDeath,
    Jump,
    Land,
    ReachedGoal,
    PlayerDeath,
    PlayerDeathGrunt,
    PlayerDeathHit,
    PreTeleport,
    Teleport,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 10] = [
        SoundEvent::Attack,
        SoundEvent::EnemyDeath,
        SoundEvent::Jump,
        SoundEvent::Land,
        SoundEvent::ReachedGoal,
        SoundEvent::PlayerDeath,
        SoundEvent::PlayerDeathGrunt,
        SoundEvent::PlayerDeathHit,
        SoundEvent::PreTeleport,
        SoundEvent::Teleport,
    ];

    /// Stable name, matching the serialized form
    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::Attack => "attack",
            SoundEvent::EnemyDeath => "enemy_death",
            SoundEvent::Jump => "jump",
            SoundEvent::Land => "land",
            SoundEvent::ReachedGoal => "reached_goal",
            SoundEvent::PlayerDeath => "player_death",
            SoundEvent::PlayerDeathGrunt => "player_death_grunt",
            SoundEvent::PlayerDeathHit => "player_death_hit",
            SoundEvent::PreTeleport => "pre_teleport",
            SoundEvent::Teleport => "teleport",
        }
    }
}

/// Fire-and-forget audio output.
///
/// Implementations must never fail the caller: an event that cannot be
/// resolved or played is logged and skipped.
pub trait AudioSink {
    fn play(&mut self, event: SoundEvent);

    /// Stop the level music loop, if one is playing
    fn stop_music(&mut self) {}
}

/// Audio sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedAudio;

impl AudioSink for MutedAudio {
    fn play(&mut self, _event: SoundEvent) {}
}
