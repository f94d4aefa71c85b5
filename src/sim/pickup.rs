//! Collectible powerups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::advance;
use crate::consts::*;

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    Shield,
    SpreadShot,
    RapidFire,
    Invincibility,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Shield => "shield",
            PowerupKind::SpreadShot => "spread_shot",
            PowerupKind::RapidFire => "rapid_fire",
            PowerupKind::Invincibility => "invincibility",
        }
    }
}

/// A value ping-ponging between 0 and 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub value: f32,
    pub rising: bool,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            value: 0.0,
            rising: true,
        }
    }
}

impl Pulse {
    pub fn advance(&mut self, step: f32) {
        if self.rising {
            self.value += step;
            if self.value >= 1.0 {
                self.value = 1.0;
                self.rising = false;
            }
        } else {
            self.value -= step;
            if self.value <= 0.0 {
                self.value = 0.0;
                self.rising = true;
            }
        }
    }
}

/// A powerup floating in the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    /// Angle (degrees) around the drift circle
    pub drift_angle: f32,
    pub ttl_ticks: u32,
    pub pulse: Pulse,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            drift_angle: 0.0,
            ttl_ticks: POWERUP_LIFETIME,
            pulse: Pulse::default(),
        }
    }

    /// Collision half-extent
    #[inline]
    pub fn half_extent(&self) -> f32 {
        POWERUP_SIZE / 2.0
    }

    pub fn tick(&mut self, bounds: Vec2) {
        // Small circular drift
        self.drift_angle = (self.drift_angle + POWERUP_DRIFT_SPEED) % 360.0;
        let rad = self.drift_angle.to_radians();
        let offset = Vec2::new(rad.cos(), rad.sin()) * POWERUP_DRIFT_RADIUS;
        self.pos = advance(self.pos, offset, bounds);

        self.pulse.advance(POWERUP_PULSE_SPEED);
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.ttl_ticks == 0
    }
}
