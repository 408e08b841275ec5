//! Knight Survival - a side-scrolling survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (spawning, enemy AI, collisions, session state)
//! - `game`: Frame-level facade tying the knight, session and world together
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Event-to-sound cue mixing for an external audio sink
//! - `render`: Flattened sprite instances for an external renderer

pub mod audio;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameReport, Game};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Survival duration in whole seconds
    pub const SESSION_SECONDS: u32 = 120;

    /// Knight bounding box (width, height)
    pub const KNIGHT_SIZE: Vec2 = Vec2::new(1.0, 1.5);
    /// Knight spawn point at session start
    pub const KNIGHT_START: Vec2 = Vec2::new(-6.0, 0.0);

    /// Obstacle bounding box
    pub const OBSTACLE_SIZE: Vec2 = Vec2::new(1.0, 1.0);

    /// Horizontal scroll speed shared by every entity (units/s)
    pub const BASE_GAME_SPEED: f32 = 2.0;
    /// Enemy speeds are expressed relative to this reference speed
    pub const REFERENCE_ENEMY_SPEED: f32 = 2.5;

    /// Spawn line (right edge of the play field)
    pub const SPAWN_X: f32 = 15.0;
    /// Spawned entities land at y in [-SPAWN_Y_RANGE, SPAWN_Y_RANGE)
    pub const SPAWN_Y_RANGE: f32 = 2.0;
    /// Entities left of this line are pruned
    pub const DESPAWN_X: f32 = -10.0;

    /// Vertical limit for AI-driven enemy movement
    pub const AI_LANE_LIMIT: f32 = 3.0;

    /// Points per point of max health on defeat
    pub const SCORE_PER_HEALTH: u64 = 100;

    /// Frame deltas above this are clamped by the frame loop
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Upper bound on spawn attempts a single tick may make
    pub const MAX_SPAWNS_PER_TICK: u32 = 8;
}

/// Sign of `value` with zero mapped to zero (unlike `f32::signum`)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Clamp a vertical coordinate into `[-limit, limit]`
#[inline]
pub fn clamp_lane(y: f32, limit: f32) -> f32 {
    y.clamp(-limit, limit)
}

/// Offset from `from` to `to` on the vertical axis
#[inline]
pub fn vertical_delta(from: Vec2, to: Vec2) -> f32 {
    to.y - from.y
}
