use std::time::Duration;

use kira::manager::{AudioManager, AudioManagerSettings};
use kira::manager::backend::DefaultBackend;
use swapstep_core::{AudioSink, SoundEvent};
use tracing::{info, warn};

use crate::bank::SoundBank;
use crate::config::AudioConfig;
use crate::error::AudioError;
use crate::music::{LevelMusic, MusicState};
use crate::sfx::EventClips;

/// How quickly the level music fades when a death or goal cuts it
const MUSIC_CUT_FADE: Duration = Duration::from_millis(50);

/// The main audio engine. Wraps kira's AudioManager and resolves gameplay
/// sound events through a `SoundBank`.
pub struct AudioEngine {
    manager: AudioManager<DefaultBackend>,
    music: LevelMusic,
    clips: EventClips,
    bank: SoundBank,
}

impl AudioEngine {
    /// Create a new AudioEngine with the given config and clip bank.
    pub fn new(config: AudioConfig, bank: SoundBank) -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::InitFailed(e.to_string()))?;

        info!("Audio engine initialized (clips under {:?})", bank.root());

        Ok(Self {
            manager,
            music: LevelMusic::new(config.effective_music_volume()),
            clips: EventClips::new(config.effective_sfx_volume()),
            bank,
        })
    }

    /// Start the bank's level music loop for a new attempt.
    pub fn play_level_music(&mut self, fade_in: Duration) -> Result<(), AudioError> {
        let track = self.bank.music_track().ok_or(AudioError::NoMusicTrack)?;
        self.music.start(&mut self.manager, &track, fade_in)
    }

    pub fn music_state(&self) -> MusicState {
        self.music.state()
    }

    /// Call each frame to clean up finished sounds.
    pub fn update(&mut self) {
        self.clips.cleanup();
    }
}

impl AudioSink for AudioEngine {
    fn play(&mut self, event: SoundEvent) {
        if let Err(e) = self.clips.play(&mut self.manager, &self.bank, event) {
            warn!("Skipping sound event '{}': {}", event.name(), e);
        }
    }

    fn stop_music(&mut self) {
        self.music.cut(MUSIC_CUT_FADE);
    }
}
