//! Swapstep - A side-scrolling platformer with swap-teleports
//!
//! Headless demo: builds the demo level, drives it with a scripted run at a
//! fixed frame rate and reloads it after every death until the goal is
//! reached or the attempts run out.

mod animation;
mod level;
mod script;
mod settings;

use std::time::Duration;

use anyhow::{Context, Result};
use swapstep_audio::{AudioEngine, MusicState, SoundBank};
use swapstep_core::{AudioSink, MutedAudio};
use swapstep_game::{Collaborators, InputSnapshot, LevelLifecycle, LevelOutcome, World};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use animation::{AnimationEvent, DemoAnimator};
use script::InputScript;
use settings::GameSettings;

const MUSIC_FADE_IN: Duration = Duration::from_millis(500);

/// Records the reload request so the driver can rebuild the level
#[derive(Debug, Default)]
struct ReloadLatch {
    requested: bool,
}

impl LevelLifecycle for ReloadLatch {
    fn reload_current_level(&mut self) {
        self.requested = true;
    }
}

/// Real audio when a device is available, silence otherwise
struct Audio {
    engine: Option<AudioEngine>,
    muted: MutedAudio,
}

impl Audio {
    fn open(settings: &GameSettings) -> Self {
        let bank = SoundBank::with_default_layout(settings.audio.sound_dir.clone());
        let engine = match AudioEngine::new(settings.audio.to_config(), bank) {
            Ok(engine) => Some(engine),
            Err(e) => {
                warn!("Audio unavailable, running muted: {}", e);
                None
            }
        };
        Self {
            engine,
            muted: MutedAudio,
        }
    }

    fn sink(&mut self) -> &mut dyn AudioSink {
        match self.engine.as_mut() {
            Some(engine) => engine,
            None => &mut self.muted,
        }
    }

    fn start_music(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.play_level_music(MUSIC_FADE_IN) {
                warn!("Level music not started: {}", e);
            }
        }
    }

    fn update(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.update();
        }
    }

    fn music_state(&self) -> Option<MusicState> {
        self.engine.as_ref().map(AudioEngine::music_state)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Swapstep demo...");

    let settings = GameSettings::load();
    if !GameSettings::is_saved() {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {}", e);
        }
    }
    let mut audio = Audio::open(&settings);
    let mut script = InputScript::demo();

    for attempt in 1..=settings.demo.max_attempts {
        let seed = settings.demo.seed.wrapping_add(u64::from(attempt));
        info!("Attempt {} (seed {})", attempt, seed);

        let outcome = run_attempt(&settings, seed, &mut audio, &mut script)?;
        match outcome {
            LevelOutcome::ReachedGoal => {
                info!("Goal reached on attempt {}", attempt);
                return Ok(());
            }
            LevelOutcome::Died => info!("Attempt {} ended in death", attempt),
            LevelOutcome::Playing => info!("Attempt {} timed out", attempt),
        }
    }

    info!("Demo finished without reaching the goal");
    Ok(())
}

/// Play one level attempt until it asks for a reload or times out
fn run_attempt(
    settings: &GameSettings,
    seed: u64,
    audio: &mut Audio,
    script: &mut InputScript,
) -> Result<LevelOutcome> {
    let mut animator = DemoAnimator::new();
    let mut reload = ReloadLatch::default();
    let mut input = InputSnapshot::new();
    script.rewind();

    let mut world = {
        let mut out = Collaborators::new(audio.sink(), &mut animator, &mut reload);
        level::populate(settings.tuning.clone(), seed)
            .and_then(|builder| builder.build(Box::new(level::build_geometry()), &mut out))
            .context("Failed to build demo level")?
    };
    audio.start_music();

    let frame_dt = 1.0 / settings.demo.frame_rate.max(1.0);
    while !reload.requested && world.time().real_time < f64::from(settings.demo.attempt_timeout) {
        script.apply(world.time().sim_time as f32, &mut input);

        {
            let mut out = Collaborators::new(audio.sink(), &mut animator, &mut reload);
            world.frame(frame_dt, &mut input, &mut out);
        }

        for event in animator.advance(world.time().delta_time) {
            forward(&mut world, event);
        }
        audio.update();
    }

    info!(
        "Attempt over: {:?} at {:?}, {} enemies left, {:.2}s simulated",
        world.outcome(),
        world.player().position,
        world.enemies().len(),
        world.time().sim_time
    );
    if let Some(music) = audio.music_state() {
        debug!("Level music at attempt end: {:?}", music);
    }
    Ok(world.outcome())
}

fn forward(world: &mut World, event: AnimationEvent) {
    match event {
        AnimationEvent::MeleeHit => world.notify_melee_hit_frame(),
        AnimationEvent::AttackFinished => world.notify_attack_animation_done(),
        AnimationEvent::PreTeleportFinished => world.notify_pre_teleport_animation_done(),
    }
}
