//! Data-driven game balance
//!
//! Every field defaults to the shipped balance in [`crate::consts`]. A tuning
//! file only needs to name the fields it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Survival duration (whole seconds)
    pub session_seconds: u32,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Chance a spawn attempt produces an enemy rather than an obstacle
    pub enemy_spawn_chance: f32,
    pub spawn_x: f32,
    pub spawn_y_range: f32,
    pub despawn_x: f32,
    /// Scroll speed shared by all entities (units/s)
    pub base_game_speed: f32,
    pub obstacle_size: Vec2,
    pub knight_size: Vec2,
    pub knight_start: Vec2,
    /// Vertical limit for AI-driven enemies
    pub ai_lane_limit: f32,
    pub score_per_health: u64,
    /// Progress below which the early-game spawn table is used
    pub early_progress: f32,
    /// Progress at or above which the late-game spawn table is used
    pub late_progress: f32,

    // === Knight controller ===
    pub knight_move_speed: f32,
    /// Knight y is kept within [-knight_lane_limit, knight_lane_limit]
    pub knight_lane_limit: f32,
    /// Length of one sword swing (seconds)
    pub attack_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_seconds: SESSION_SECONDS,
            spawn_interval: 2.0,
            enemy_spawn_chance: 0.6,
            spawn_x: SPAWN_X,
            spawn_y_range: SPAWN_Y_RANGE,
            despawn_x: DESPAWN_X,
            base_game_speed: BASE_GAME_SPEED,
            obstacle_size: OBSTACLE_SIZE,
            knight_size: KNIGHT_SIZE,
            knight_start: KNIGHT_START,
            ai_lane_limit: AI_LANE_LIMIT,
            score_per_health: SCORE_PER_HEALTH,
            early_progress: 0.3,
            late_progress: 0.7,

            knight_move_speed: 5.0,
            knight_lane_limit: 2.0,
            attack_duration: 0.6,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every knob is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.session_seconds == 0 {
            return Err(invalid("session_seconds", "must be at least 1"));
        }
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("base_game_speed", self.base_game_speed),
            ("knight_move_speed", self.knight_move_speed),
            ("attack_duration", self.attack_duration),
            ("ai_lane_limit", self.ai_lane_limit),
            ("knight_lane_limit", self.knight_lane_limit),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        let sizes = [
            ("obstacle_size", self.obstacle_size),
            ("knight_size", self.knight_size),
        ];
        for (field, size) in sizes {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(invalid(field, format!("must be non-empty, got {size}")));
            }
        }
        if !(0.0..=1.0).contains(&self.enemy_spawn_chance) {
            return Err(invalid(
                "enemy_spawn_chance",
                format!("must be in [0, 1], got {}", self.enemy_spawn_chance),
            ));
        }
        if self.spawn_y_range < 0.0 {
            return Err(invalid("spawn_y_range", "must not be negative"));
        }
        if !(0.0 <= self.early_progress
            && self.early_progress <= self.late_progress
            && self.late_progress <= 1.0)
        {
            return Err(invalid(
                "late_progress",
                "progress thresholds must satisfy 0 <= early <= late <= 1",
            ));
        }
        if self.despawn_x >= self.spawn_x {
            return Err(invalid("despawn_x", "must be left of spawn_x"));
        }
        Ok(())
    }
}
