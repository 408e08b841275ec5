//! Knight controller
//!
//! Turns per-frame button state into a knight position and an attack window.
//! The knight never moves horizontally; it dodges up and down its lane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, Entity};
use crate::tuning::Tuning;

/// Button state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnightInput {
    pub up: bool,
    pub down: bool,
    /// Swing the sword (ignored while a swing is already running)
    pub attack: bool,
}

/// The player's knight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knight {
    pub pos: Vec2,
    pub size: Vec2,
    /// Seconds left in the current swing (0 when idle)
    attack_timer: f32,
}

impl Knight {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.knight_start,
            size: tuning.knight_size,
            attack_timer: 0.0,
        }
    }

    /// Back to the start position with no swing in progress
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    /// Progress through the current swing in [0, 1] (0 when idle)
    pub fn attack_progress(&self, tuning: &Tuning) -> f32 {
        if !self.is_attacking() {
            return 0.0;
        }
        (1.0 - self.attack_timer / tuning.attack_duration).clamp(0.0, 1.0)
    }

    /// Apply one frame of input
    pub fn update(&mut self, input: &KnightInput, dt: f32, tuning: &Tuning) {
        if !(dt > 0.0) {
            return;
        }

        let dir = input.up as i32 - input.down as i32;
        if dir != 0 {
            let y = self.pos.y + dir as f32 * tuning.knight_move_speed * dt;
            self.pos.y = y.clamp(-tuning.knight_lane_limit, tuning.knight_lane_limit);
        }

        if self.is_attacking() {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        } else if input.attack {
            self.attack_timer = tuning.attack_duration;
        }
    }
}

impl Collider for Knight {
    fn entity(&self) -> Entity {
        Entity::new(self.pos, self.size)
    }
}
