//! Sound effect routing
//!
//! The simulation only emits `GameEvent`s. `AudioManager` maps them to
//! `SoundEffect`s, applies volume and mute, and hands them to whatever
//! `AudioSink` the front end provides. Synthesis is the sink's business.

use crate::settings::Settings;
use crate::sim::enemy::EnemyTag;
use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jump,
    DoubleJump,
    Land,
    /// First touch of a platform
    PlatformScore,
    ComboBonus,
    Hurt,
    /// Shield absorbed a hit
    ShieldHit,
    LifeLost,
    PowerUpCollect,
    /// Strike turned dangerous
    Thunder,
    /// Surveillance unit entered the level
    DroneAlert,
    LavaSplash,
    LevelComplete,
    GameOver,
    Victory,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Asset key of the sample
    pub fn key(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "sfx/jump",
            SoundEffect::DoubleJump => "sfx/double_jump",
            SoundEffect::Land => "sfx/land",
            SoundEffect::PlatformScore => "sfx/platform",
            SoundEffect::ComboBonus => "sfx/combo",
            SoundEffect::Hurt => "sfx/hurt",
            SoundEffect::ShieldHit => "sfx/shield",
            SoundEffect::LifeLost => "sfx/life_lost",
            SoundEffect::PowerUpCollect => "sfx/powerup",
            SoundEffect::Thunder => "sfx/thunder",
            SoundEffect::DroneAlert => "sfx/drone",
            SoundEffect::LavaSplash => "sfx/lava_splash",
            SoundEffect::LevelComplete => "sfx/level_complete",
            SoundEffect::GameOver => "sfx/game_over",
            SoundEffect::Victory => "sfx/victory",
            SoundEffect::HighScore => "sfx/high_score",
        }
    }

    /// Sound for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::DoubleJump => SoundEffect::DoubleJump,
            GameEvent::Land => SoundEffect::Land,
            GameEvent::PlatformTouched { .. } => SoundEffect::PlatformScore,
            GameEvent::ComboBonus { .. } => SoundEffect::ComboBonus,
            GameEvent::Damaged { .. } => SoundEffect::Hurt,
            GameEvent::ShieldHit => SoundEffect::ShieldHit,
            GameEvent::LifeLost { .. } => SoundEffect::LifeLost,
            GameEvent::PowerUpCollected { .. } => SoundEffect::PowerUpCollect,
            GameEvent::EnemySpawned {
                tag: EnemyTag::SurveillanceUnit,
            } => SoundEffect::DroneAlert,
            GameEvent::EnemySpawned { .. } => return None,
            GameEvent::StrikeActive => SoundEffect::Thunder,
            GameEvent::LavaSplash => SoundEffect::LavaSplash,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelComplete,
            // GameOver carries the sound
            GameEvent::Death => return None,
            GameEvent::GameOver => SoundEffect::GameOver,
            GameEvent::Victory => SoundEffect::Victory,
        };
        Some(effect)
    }
}

/// Output device for sound effects
pub trait AudioSink {
    /// `volume` is already scaled, in (0, 1]
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Keeps what was played, for demos and tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<(SoundEffect, f32)>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volumes and mute from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sounds for a batch of events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that stays inspectable after being boxed
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for SharedSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_to_sounds() {
        let sink = SharedSink::default();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.handle_events(&[
            GameEvent::Jump,
            GameEvent::EnemySpawned {
                tag: EnemyTag::FallingHazard,
            },
            GameEvent::EnemySpawned {
                tag: EnemyTag::SurveillanceUnit,
            },
            GameEvent::Death,
            GameEvent::GameOver,
        ]);
        let played: Vec<SoundEffect> = sink.0.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            played,
            vec![SoundEffect::Jump, SoundEffect::DroneAlert, SoundEffect::GameOver]
        );
    }

    #[test]
    fn test_volume_and_mute() {
        let sink = SharedSink::default();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Land);
        assert_eq!(sink.0.borrow()[0], (SoundEffect::Land, 0.5));

        audio.set_muted(true);
        audio.play(SoundEffect::Land);
        assert_eq!(sink.0.borrow().len(), 1);
    }

    #[test]
    fn test_apply_settings() {
        let mut audio = AudioManager::default();
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        audio.apply_settings(&settings);
        assert_eq!(audio.effective_volume(), 0.25);
    }
}
