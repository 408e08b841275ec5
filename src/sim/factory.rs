//! Entity construction

use glam::Vec2;

use super::archetype::EnemyKind;
use super::state::{Enemy, Obstacle, World};

/// Build a fresh enemy of the given archetype at `pos`
pub fn create_enemy(world: &mut World, kind: EnemyKind, pos: Vec2) -> Enemy {
    let stats = kind.stats();
    Enemy {
        id: world.next_entity_id(),
        kind,
        pos,
        size: stats.size,
        health: stats.health,
        max_health: stats.health,
        speed: stats.speed,
        defeated: false,
        attack_cooldown: 0.0,
        direction: 0.0,
        aggression: stats.aggression,
    }
}

/// Build an obstacle at `pos`
pub fn create_obstacle(world: &mut World, pos: Vec2, size: Vec2) -> Obstacle {
    Obstacle {
        id: world.next_entity_id(),
        pos,
        size,
    }
}
