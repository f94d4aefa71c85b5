//! Sound cues for simulation events
//!
//! The simulation only raises `GameEvent`s. This module turns them into
//! cues (asset file plus final volume) and queues them for whatever
//! playback backend the platform provides.

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Enemy fires
    EnemyShoot,
    Explosion,
    /// Powerup collected
    Powerup,
    /// Shield absorbed a hit
    ShieldHit,
    LevelComplete,
    GameOver,
}

impl SoundEffect {
    /// Every cue has exactly one event kind behind it
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Shoot => SoundEffect::Shoot,
            GameEvent::EnemyShoot => SoundEffect::EnemyShoot,
            GameEvent::Explosion { .. } => SoundEffect::Explosion,
            GameEvent::PowerupCollected(_) => SoundEffect::Powerup,
            GameEvent::ShieldHit => SoundEffect::ShieldHit,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelComplete,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }

    /// Asset file name
    pub fn file(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "laserSmall_000.ogg",
            SoundEffect::EnemyShoot => "laserSmall_001.ogg",
            SoundEffect::Explosion => "explosionCrunch_000.ogg",
            SoundEffect::Powerup => "laserRetro_003.ogg",
            SoundEffect::ShieldHit => "forceField_000.ogg",
            SoundEffect::LevelComplete => "laserLarge_003.ogg",
            SoundEffect::GameOver => "lowFrequency_explosion_000.ogg",
        }
    }

    /// Mix level before settings are applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::LevelComplete => 0.3,
            _ => 0.7,
        }
    }
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    queue: Vec<Cue>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut audio = Self::default();
        audio.apply_settings(settings);
        audio
    }

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

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect (dropped when silent)
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = effect.base_volume() * self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.queue.push(Cue { effect, volume });
    }

    /// Queue the cues for a tick's events
    pub fn trigger(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Hand queued cues to the playback backend
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerupKind;
    use glam::Vec2;

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.trigger(&[
            GameEvent::Shoot,
            GameEvent::Explosion { pos: Vec2::ZERO },
            GameEvent::PowerupCollected(PowerupKind::Shield),
        ]);
        let cues = audio.drain();
        let effects: Vec<SoundEffect> = cues.iter().map(|c| c.effect).collect();
        assert_eq!(
            effects,
            vec![SoundEffect::Shoot, SoundEffect::Explosion, SoundEffect::Powerup]
        );
        assert!((cues[0].volume - 0.7 * 0.8).abs() < 1e-6);
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_level_complete_is_quieter() {
        assert!(SoundEffect::LevelComplete.base_volume() < SoundEffect::Shoot.base_volume());
        assert_eq!(SoundEffect::ShieldHit.file(), "forceField_000.ogg");
    }

    #[test]
    fn test_muted_queues_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(&settings);
        audio.trigger(&[GameEvent::GameOver]);
        assert!(audio.drain().is_empty());
    }
}
