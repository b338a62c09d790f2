//! Game settings with persistence
//!
//! Settings are saved to `~/.config/swapstep/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use swapstep_audio::AudioConfig;
use swapstep_game::PlayerTuning;
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub audio: AudioSettings,
    pub demo: DemoSettings,
    pub tuning: PlayerTuning,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("swapstep"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Whether a settings file already exists
    pub fn is_saved() -> bool {
        Self::settings_path().is_some_and(|path| path.exists())
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse and validate settings text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 to 1.0)
    pub master: f32,
    /// Music volume (0.0 to 1.0)
    pub music: f32,
    /// Sound effects volume (0.0 to 1.0)
    pub sfx: f32,
    /// Directory holding `<event>.ogg` clips and `music.ogg`
    pub sound_dir: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 0.8,
            sfx: 1.0,
            sound_dir: PathBuf::from("assets/sounds"),
        }
    }
}

impl AudioSettings {
    pub fn to_config(&self) -> AudioConfig {
        AudioConfig {
            master_volume: f64::from(self.master),
            music_volume: f64::from(self.music),
            sfx_volume: f64::from(self.sfx),
        }
    }
}

/// Headless demo run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Seed for enemy placement; each attempt offsets it
    pub seed: u64,
    /// Level attempts before the demo gives up
    pub max_attempts: u32,
    /// Simulated frames per real second
    pub frame_rate: f32,
    /// Longest a single attempt may run, in real seconds
    pub attempt_timeout: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 7,
            max_attempts: 3,
            frame_rate: 60.0,
            attempt_timeout: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = GameSettings::parse(
            r#"
            [audio]
            music = 0.25

            [tuning.teleport]
            teleport_range = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.audio.music, 0.25);
        assert_eq!(settings.audio.sfx, 1.0);
        assert_eq!(settings.tuning.teleport.teleport_range, 10.0);
        assert_eq!(settings.tuning.teleport.number_of_swaps, 5);
        assert_eq!(settings.demo.max_attempts, 3);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        assert!(GameSettings::parse("[tuning.jump]\njump_time_to_apex = 0.0\n").is_err());
    }

    #[test]
    fn test_round_trip() {
        let text = toml::to_string_pretty(&GameSettings::default()).unwrap();
        let settings = GameSettings::parse(&text).unwrap();
        assert_eq!(settings.audio.sound_dir, PathBuf::from("assets/sounds"));
    }
}
