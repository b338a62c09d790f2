use std::collections::HashMap;
use std::path::{Path, PathBuf};

use swapstep_core::SoundEvent;

/// Maps sound event ids to clip files under a root directory.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    root: PathBuf,
    clips: HashMap<SoundEvent, PathBuf>,
    music: Option<PathBuf>,
}

impl SoundBank {
    /// An empty bank rooted at `root`. Every event is unresolved until assigned.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clips: HashMap::new(),
            music: None,
        }
    }

    /// The conventional layout: `<root>/<event_name>.ogg` and `<root>/music.ogg`
    pub fn with_default_layout(root: impl Into<PathBuf>) -> Self {
        let mut bank = Self::new(root);
        for event in SoundEvent::ALL {
            bank.assign(event, format!("{}.ogg", event.name()));
        }
        bank.music = Some(PathBuf::from("music.ogg"));
        bank
    }

    /// Assign a clip (relative to the root) to an event
    pub fn assign(&mut self, event: SoundEvent, clip: impl Into<PathBuf>) {
        self.clips.insert(event, clip.into());
    }

    /// Forget the clip for an event
    pub fn unassign(&mut self, event: SoundEvent) {
        self.clips.remove(&event);
    }

    /// Full path of the clip for `event`, if one is assigned
    pub fn resolve(&self, event: SoundEvent) -> Option<PathBuf> {
        self.clips.get(&event).map(|clip| self.root.join(clip))
    }

    /// Full path of the level music track, if one is assigned
    pub fn music_track(&self) -> Option<PathBuf> {
        self.music.as_ref().map(|track| self.root.join(track))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_resolves_every_event() {
        let bank = SoundBank::with_default_layout("assets/sounds");
        for event in SoundEvent::ALL {
            assert!(bank.resolve(event).is_some(), "{event:?} unresolved");
        }
        assert_eq!(
            bank.resolve(SoundEvent::PreTeleport),
            Some(PathBuf::from("assets/sounds/pre_teleport.ogg"))
        );
        assert_eq!(
            bank.music_track(),
            Some(PathBuf::from("assets/sounds/music.ogg"))
        );
    }

    #[test]
    fn unassigned_event_is_unresolved() {
        let mut bank = SoundBank::with_default_layout("sfx");
        bank.unassign(SoundEvent::Land);
        assert!(bank.resolve(SoundEvent::Land).is_none());
        assert!(SoundBank::new("sfx").resolve(SoundEvent::Jump).is_none());
    }
}
