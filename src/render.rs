//! Render bridge
//!
//! Flattens the live game into plain sprite instances a GPU renderer can
//! upload as-is. Defeated enemies are never emitted.

use bytemuck::{Pod, Zeroable};

use crate::game::Game;
use crate::sim::{Enemy, Knight, Obstacle};

/// Sprite kind tags (matches `EnemyKind::index` offset by `ENEMY_BASE`)
pub mod kinds {
    pub const KNIGHT: u32 = 0;
    pub const OBSTACLE: u32 = 1;
    /// Enemies are `ENEMY_BASE + EnemyKind::index()`
    pub const ENEMY_BASE: u32 = 2;
}

/// Colors for game elements
pub mod colors {
    pub const KNIGHT: [f32; 4] = [0.25, 0.41, 0.88, 1.0]; // Royal blue
    pub const OBSTACLE: [f32; 4] = [0.55, 0.27, 0.07, 1.0]; // Brown
}

/// One drawable box
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    pub kind: u32,
    /// Remaining health fraction (1.0 for things without health)
    pub health: f32,
    /// Knight swing progress or enemy heading, depending on kind
    pub anim: f32,
    pub _pad: f32,
}

impl SpriteInstance {
    pub fn knight(knight: &Knight, attack_progress: f32) -> Self {
        Self {
            position: knight.pos.to_array(),
            size: knight.size.to_array(),
            color: colors::KNIGHT,
            kind: kinds::KNIGHT,
            health: 1.0,
            anim: attack_progress,
            _pad: 0.0,
        }
    }

    pub fn enemy(enemy: &Enemy) -> Self {
        Self {
            position: enemy.pos.to_array(),
            size: enemy.size.to_array(),
            color: enemy.kind.stats().color,
            kind: kinds::ENEMY_BASE + enemy.kind.index(),
            health: enemy.health_fraction(),
            anim: enemy.direction,
            _pad: 0.0,
        }
    }

    pub fn obstacle(obstacle: &Obstacle) -> Self {
        Self {
            position: obstacle.pos.to_array(),
            size: obstacle.size.to_array(),
            color: colors::OBSTACLE,
            kind: kinds::OBSTACLE,
            health: 1.0,
            anim: 0.0,
            _pad: 0.0,
        }
    }
}

/// Build the instance list for the current frame (knight first)
pub fn snapshot(game: &Game) -> Vec<SpriteInstance> {
    let enemies = game.enemies().iter().filter(|e| !e.defeated);
    let mut out = Vec::with_capacity(1 + game.enemies().len() + game.obstacles().len());

    out.push(SpriteInstance::knight(
        game.knight(),
        game.knight().attack_progress(game.tuning()),
    ));
    out.extend(game.obstacles().iter().map(SpriteInstance::obstacle));
    out.extend(enemies.map(SpriteInstance::enemy));
    out
}

/// Raw bytes for a GPU instance buffer
pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
