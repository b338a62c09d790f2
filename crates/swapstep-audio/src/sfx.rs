//! Per-event sound effect playback

use std::collections::HashMap;

use kira::manager::AudioManager;
use kira::manager::backend::DefaultBackend;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::sound::PlaybackState;
use kira::tween::Tween;
use swapstep_core::SoundEvent;
use tracing::debug;

use crate::bank::SoundBank;
use crate::error::AudioError;

/// Overlapping voices allowed for one event before the oldest is cut
const MAX_VOICES_PER_EVENT: usize = 3;

/// What is known about an event's clip
enum Clip {
    Ready(StaticSoundData),
    /// Unassigned or failed to decode. Not retried this session.
    Unavailable,
}

/// Decodes each event's clip once and keeps track of the voices it started
pub struct EventClips {
    clips: HashMap<SoundEvent, Clip>,
    voices: Vec<(SoundEvent, StaticSoundHandle)>,
    volume: f64,
}

impl EventClips {
    pub fn new(volume: f64) -> Self {
        Self {
            clips: HashMap::new(),
            voices: Vec::new(),
            volume,
        }
    }

    /// Start `event`'s clip. The first failure for an event is returned;
    /// after that the event is skipped silently.
    pub fn play(
        &mut self,
        manager: &mut AudioManager<DefaultBackend>,
        bank: &SoundBank,
        event: SoundEvent,
    ) -> Result<(), AudioError> {
        let data = match self.clips.get(&event) {
            Some(Clip::Ready(data)) => data.clone(),
            Some(Clip::Unavailable) => return Ok(()),
            None => match decode(bank, event) {
                Ok(data) => {
                    self.clips.insert(event, Clip::Ready(data.clone()));
                    data
                }
                Err(e) => {
                    self.clips.insert(event, Clip::Unavailable);
                    return Err(e);
                }
            },
        };

        let active: Vec<SoundEvent> = self.voices.iter().map(|(e, _)| *e).collect();
        if let Some(index) = voice_to_steal(&active, event, MAX_VOICES_PER_EVENT) {
            let (_, mut oldest) = self.voices.remove(index);
            oldest.stop(Tween::default());
            debug!("Voice limit reached for '{}'", event.name());
        }

        let handle = manager
            .play(data.with_settings(StaticSoundSettings::new().volume(self.volume)))
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        self.voices.push((event, handle));
        Ok(())
    }

    /// Forget voices that have finished
    pub fn cleanup(&mut self) {
        self.voices
            .retain(|(_, handle)| handle.state() != PlaybackState::Stopped);
    }
}

fn decode(bank: &SoundBank, event: SoundEvent) -> Result<StaticSoundData, AudioError> {
    let path = bank
        .resolve(event)
        .ok_or(AudioError::Unassigned(event.name()))?;
    StaticSoundData::from_file(&path).map_err(|e| AudioError::LoadFailed(path, e.to_string()))
}

/// Index of the oldest voice of `event` to stop so a new one fits under
/// `limit`, or `None` when there is room. `active` is ordered oldest first.
fn voice_to_steal(active: &[SoundEvent], event: SoundEvent, limit: usize) -> Option<usize> {
    let count = active.iter().filter(|e| **e == event).count();
    if count < limit.max(1) {
        return None;
    }
    active.iter().position(|e| *e == event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_left_under_limit() {
        let active = [SoundEvent::Jump, SoundEvent::Land, SoundEvent::Jump];
        assert_eq!(voice_to_steal(&active, SoundEvent::Jump, 3), None);
        assert_eq!(voice_to_steal(&active, SoundEvent::Attack, 3), None);
    }

    #[test]
    fn oldest_voice_of_the_same_event_is_stolen() {
        let active = [
            SoundEvent::Land,
            SoundEvent::Jump,
            SoundEvent::Attack,
            SoundEvent::Jump,
            SoundEvent::Jump,
        ];
        assert_eq!(voice_to_steal(&active, SoundEvent::Jump, 3), Some(1));
        assert_eq!(voice_to_steal(&active, SoundEvent::Land, 1), Some(0));
    }

    #[test]
    fn zero_limit_still_allows_one_voice() {
        assert_eq!(voice_to_steal(&[], SoundEvent::Teleport, 0), None);
        assert_eq!(
            voice_to_steal(&[SoundEvent::Teleport], SoundEvent::Teleport, 0),
            Some(0)
        );
    }
}
