//! Idle/demo mode: a simple AI that plays the knight
//!
//! Swings at enemies about to reach the knight and sidesteps obstacles in its
//! row. Good enough to make a headless run last a while, not to win reliably.

use super::knight::{Knight, KnightInput};
use super::state::World;
use crate::tuning::Tuning;

/// How far ahead (world units) the autopilot watches for obstacles
pub const LOOKAHEAD: f32 = 4.0;
/// Start a swing when an enemy's leading edge is this close
pub const SWING_REACH: f32 = 1.0;
/// Extra vertical clearance kept from obstacles
const CLEARANCE: f32 = 0.2;

/// Decide this frame's buttons
pub fn autopilot(knight: &Knight, world: &World, tuning: &Tuning) -> KnightInput {
    let mut input = KnightInput::default();
    let front = knight.pos.x + knight.size.x / 2.0;
    let back = knight.pos.x - knight.size.x / 2.0;

    // Swing at anything undefeated that is about to hit us in our row
    input.attack = world.enemies().iter().filter(|e| !e.defeated).any(|e| {
        let leading = e.pos.x - e.size.x / 2.0;
        let rows_meet = (e.pos.y - knight.pos.y).abs() < (e.size.y + knight.size.y) / 2.0;
        rows_meet && leading < front + SWING_REACH && e.pos.x + e.size.x / 2.0 > back
    });

    // Sidestep the nearest obstacle sharing our row
    let threat = world
        .obstacles()
        .iter()
        .filter(|o| {
            let rows_meet = (o.pos.y - knight.pos.y).abs()
                < (o.size.y + knight.size.y) / 2.0 + CLEARANCE;
            let trailing = o.pos.x + o.size.x / 2.0;
            rows_meet && trailing > back && o.pos.x - front < LOOKAHEAD
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(obstacle) = threat {
        let limit = tuning.knight_lane_limit;
        let go_down = if obstacle.pos.y >= knight.pos.y {
            knight.pos.y > -limit + 0.01
        } else {
            knight.pos.y >= limit - 0.01
        };
        if go_down {
            input.down = true;
        } else {
            input.up = true;
        }
    }

    input
}
