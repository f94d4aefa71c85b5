//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the physics
//! constants. Loaded from JSON; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::PowerupKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Asteroids ===
    /// Large asteroids on level 1
    pub starting_asteroids: u32,
    /// Extra asteroids per level after the first
    pub asteroids_per_level: u32,
    /// Level-start asteroids never spawn closer than this to the player
    pub asteroid_safe_distance: f32,
    /// Speed multiplier gained per level (`1 + (level-1) * step`)
    pub level_speed_step: f32,

    // === Powerups ===
    /// Chance a destroyed asteroid / enemy drops a powerup
    pub powerup_drop_chance: f64,
    /// Kinds a drop picks uniformly from
    pub powerup_drops: Vec<PowerupKind>,
    /// Only drop shields while the player has none
    pub shield_drop_requires_no_shields: bool,

    // === Enemies ===
    /// First level with enemy ships
    pub enemies_from_level: u32,
    /// Maximum enemies alive at once
    pub max_enemies: usize,
    /// Every Nth level opens with a boss (0 disables bosses)
    pub boss_level_interval: u32,

    // === Flow ===
    /// Ticks between "level complete" and the next level
    pub level_transition_ticks: u32,
    pub level_complete_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            starting_asteroids: 4,
            asteroids_per_level: 2,
            asteroid_safe_distance: 100.0,
            level_speed_step: 0.1,

            powerup_drop_chance: 0.3,
            powerup_drops: vec![PowerupKind::Shield, PowerupKind::SpreadShot],
            shield_drop_requires_no_shields: false,

            enemies_from_level: 2,
            max_enemies: 1,
            boss_level_interval: 5,

            level_transition_ticks: 180,
            level_complete_bonus: 1000,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents are fine)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Load from a file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.world_width > 0.0) {
            self.world_width = defaults.world_width;
        }
        if !(self.world_height > 0.0) {
            self.world_height = defaults.world_height;
        }
        self.powerup_drop_chance = self.powerup_drop_chance.clamp(0.0, 1.0);
        self.asteroid_safe_distance = self.asteroid_safe_distance.max(0.0);
        self.level_speed_step = self.level_speed_step.max(0.0);
        self
    }

    /// Asteroids spawned at the start of `level`
    pub fn asteroid_count(&self, level: u32) -> u32 {
        self.starting_asteroids + level.saturating_sub(1) * self.asteroids_per_level
    }

    pub fn is_boss_level(&self, level: u32) -> bool {
        self.boss_level_interval > 0 && level % self.boss_level_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asteroid_count_grows_per_level() {
        let t = Tuning::default();
        assert_eq!(t.asteroid_count(1), 4);
        assert_eq!(t.asteroid_count(2), 6);
        assert_eq!(t.asteroid_count(5), 12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "starting_asteroids": 3, "asteroids_per_level": 1 }"#).unwrap();
        assert_eq!(t.asteroid_count(3), 5);
        assert_eq!(t.world_width, WORLD_WIDTH);
        assert_eq!(t.powerup_drops, Tuning::default().powerup_drops);
    }

    #[test]
    fn test_drop_table_from_json() {
        let t = Tuning::from_json(r#"{ "powerup_drops": ["rapid_fire", "invincibility"] }"#).unwrap();
        assert_eq!(t.powerup_drops, vec![PowerupKind::RapidFire, PowerupKind::Invincibility]);
    }

    #[test]
    fn test_bad_values_are_sanitized() {
        let t = Tuning::from_json(r#"{ "world_width": -5, "powerup_drop_chance": 4.0 }"#).unwrap();
        assert_eq!(t.world_width, WORLD_WIDTH);
        assert_eq!(t.powerup_drop_chance, 1.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load("/definitely/not/here/tuning.json");
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_boss_levels() {
        let t = Tuning::default();
        assert!(!t.is_boss_level(4));
        assert!(t.is_boss_level(5));
        assert!(t.is_boss_level(10));
        let off = Tuning {
            boss_level_interval: 0,
            ..Tuning::default()
        };
        assert!(!off.is_boss_level(5));
    }
}
