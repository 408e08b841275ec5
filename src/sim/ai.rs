//! Enemy AI policies
//!
//! One closed-form rule per archetype. Each policy only steers vertically and
//! sets `direction`; horizontal scrolling is applied by the tick. Policies
//! never touch health or the defeated flag.
//!
//! Oscillating terms are driven by the simulation clock (seconds since the
//! session started), so a replay with the same seed and deltas reproduces the
//! same paths.

use glam::Vec2;

use super::archetype::EnemyKind;
use super::state::Enemy;
use crate::{clamp_lane, sign, vertical_delta};

/// Soldier wobble amplitude (units/s)
pub const SOLDIER_WOBBLE: f32 = 0.5;
/// Soldier wobble frequency (rad/s)
pub const SOLDIER_WOBBLE_RATE: f32 = 3.0;

/// Archer stays at least this far from the knight vertically
pub const ARCHER_MIN_RANGE: f32 = 2.5;
/// Archer closes in beyond this range
pub const ARCHER_MAX_RANGE: f32 = 3.5;
/// Archer correction speed (units/s)
pub const ARCHER_CORRECTION_SPEED: f32 = 1.5;
pub const ARCHER_ERRATIC: f32 = 0.8;
pub const ARCHER_ERRATIC_RATE: f32 = 8.0;

/// Berserker vertical charge speed before aggression scaling
pub const BERSERKER_CHARGE_SPEED: f32 = 2.5;

/// Guard tracking gain
pub const GUARD_TRACKING: f32 = 0.3;
pub const GUARD_SWAY: f32 = 0.3;
pub const GUARD_SWAY_RATE: f32 = 2.0;

/// Inputs shared by every policy for one tick
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub knight_pos: Vec2,
    pub delta: f32,
    /// Simulation seconds since session start
    pub clock: f32,
    /// Vertical limit for archer/berserker/guard
    pub lane_limit: f32,
}

/// Run the archetype's policy on `enemy` in place
pub fn update_enemy(enemy: &mut Enemy, ctx: &AiContext) {
    enemy.attack_cooldown = (enemy.attack_cooldown - ctx.delta).max(0.0);

    match enemy.kind {
        EnemyKind::Soldier => soldier(enemy, ctx),
        EnemyKind::Archer => archer(enemy, ctx),
        EnemyKind::Berserker => berserker(enemy, ctx),
        EnemyKind::Guard => guard(enemy, ctx),
    }
}

/// Near-straight path with a small wobble; ignores the knight
fn soldier(enemy: &mut Enemy, ctx: &AiContext) {
    let wobble = (ctx.clock * SOLDIER_WOBBLE_RATE).sin() * SOLDIER_WOBBLE;
    enemy.pos.y += wobble * ctx.delta;
}

/// Keeps a band of vertical distance from the knight, plus erratic jitter
fn archer(enemy: &mut Enemy, ctx: &AiContext) {
    let distance = vertical_delta(ctx.knight_pos, enemy.pos).abs();
    let above = enemy.pos.y > ctx.knight_pos.y;

    let direction = if distance < ARCHER_MIN_RANGE {
        // Too close, back off
        if above { 1.0 } else { -1.0 }
    } else if distance > ARCHER_MAX_RANGE {
        // Too far, close in
        if above { -1.0 } else { 1.0 }
    } else {
        0.0
    };

    let erratic = (ctx.clock * ARCHER_ERRATIC_RATE).sin() * ARCHER_ERRATIC;
    let velocity = direction * ARCHER_CORRECTION_SPEED + erratic;

    enemy.direction = direction;
    enemy.pos.y = clamp_lane(enemy.pos.y + velocity * ctx.delta, ctx.lane_limit);
}

/// Charges straight at the knight's row
fn berserker(enemy: &mut Enemy, ctx: &AiContext) {
    let direction = sign(vertical_delta(enemy.pos, ctx.knight_pos));
    let speed = BERSERKER_CHARGE_SPEED * enemy.aggression;

    enemy.direction = direction;
    enemy.pos.y = clamp_lane(enemy.pos.y + direction * speed * ctx.delta, ctx.lane_limit);
}

/// Slow partial tracking with a defensive sway
fn guard(enemy: &mut Enemy, ctx: &AiContext) {
    let direction = sign(vertical_delta(enemy.pos, ctx.knight_pos)) * GUARD_TRACKING;
    let sway = (ctx.clock * GUARD_SWAY_RATE).sin() * GUARD_SWAY;

    enemy.direction = direction;
    enemy.pos.y = clamp_lane(enemy.pos.y + (direction + sway) * ctx.delta, ctx.lane_limit);
}
