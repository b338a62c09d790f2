use std::path::Path;
use std::time::Duration;

use kira::manager::AudioManager;
use kira::manager::backend::DefaultBackend;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::tween::Tween;

use crate::error::AudioError;

/// Where the level music is in an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Silent,
    Playing,
    /// Death or goal ended the attempt. Stays cut until the next level start.
    Cut,
}

impl MusicState {
    /// Move to `Cut`. Returns `true` only for the call that actually cut a
    /// playing track.
    pub fn cut(&mut self) -> bool {
        let was_playing = *self == MusicState::Playing;
        if was_playing {
            *self = MusicState::Cut;
        }
        was_playing
    }
}

/// The looping track for the current level attempt
pub struct LevelMusic {
    handle: Option<StaticSoundHandle>,
    state: MusicState,
    volume: f64,
}

impl LevelMusic {
    pub fn new(volume: f64) -> Self {
        Self {
            handle: None,
            state: MusicState::Silent,
            volume,
        }
    }

    /// Start the track from the top for a new attempt, fading in
    pub fn start(
        &mut self,
        manager: &mut AudioManager<DefaultBackend>,
        track: &Path,
        fade_in: Duration,
    ) -> Result<(), AudioError> {
        self.release(Duration::ZERO);

        let data = StaticSoundData::from_file(track)
            .map_err(|e| AudioError::LoadFailed(track.to_path_buf(), e.to_string()))?
            .with_settings(StaticSoundSettings::new().volume(0.0).loop_region(..));
        let mut handle = manager
            .play(data)
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        handle.set_volume(
            self.volume,
            Tween {
                duration: fade_in,
                ..Default::default()
            },
        );

        self.handle = Some(handle);
        self.state = MusicState::Playing;
        Ok(())
    }

    /// Cut the track at the end of an attempt. Later cuts are no-ops.
    pub fn cut(&mut self, fade_out: Duration) {
        if self.state.cut() {
            self.release(fade_out);
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    fn release(&mut self, fade_out: Duration) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween {
                duration: fade_out,
                ..Default::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_only_once_per_attempt() {
        let mut state = MusicState::Playing;
        assert!(state.cut());
        assert_eq!(state, MusicState::Cut);
        assert!(!state.cut());
        assert_eq!(state, MusicState::Cut);
    }

    #[test]
    fn silent_music_is_not_cut() {
        let mut state = MusicState::default();
        assert!(!state.cut());
        assert_eq!(state, MusicState::Silent);
    }
}
