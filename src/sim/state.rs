//! Simulation entities and the per-session world
//!
//! The world owns the live enemy and obstacle collections plus the timers and
//! RNG the spawner needs. It is rebuilt from scratch for every session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::archetype::EnemyKind;
use super::collision::{Collider, Entity};

/// Unique entity identifier, stable for the entity's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    /// Once set, never cleared
    pub defeated: bool,
    /// Seconds until the enemy may attack again (never negative)
    pub attack_cooldown: f32,
    /// AI heading bias in [-1, 1]
    pub direction: f32,
    /// Fixed at creation from the archetype
    pub aggression: f32,
}

impl Enemy {
    /// Apply one point of damage; returns true if this hit defeated the enemy
    pub fn take_hit(&mut self) -> bool {
        if self.defeated {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.defeated = true;
        }
        self.defeated
    }

    /// Remaining health as a fraction of max (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

impl Collider for Enemy {
    fn entity(&self) -> Entity {
        Entity::new(self.pos, self.size)
    }
}

/// A static hazard; touching one is always fatal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Collider for Obstacle {
    fn entity(&self) -> Entity {
        Entity::new(self.pos, self.size)
    }
}

/// Signals emitted by a tick for audio/effects collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: EntityId, kind: EnemyKind },
    ObstacleSpawned { id: EntityId },
    /// Enemy took a hit but survived
    EnemyHit { id: EntityId },
    EnemyDefeated { id: EntityId, kind: EnemyKind, points: u64 },
    /// Fatal collision with an enemy or obstacle
    KnightDamaged,
    /// Survival timer ran out
    Victory,
}

/// Live simulation state for one session
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Live enemies (sorted by id)
    pub(crate) enemies: Vec<Enemy>,
    /// Live obstacles (sorted by id)
    pub(crate) obstacles: Vec<Obstacle>,
    /// Seconds accumulated toward the next countdown step
    pub(crate) countdown_timer: f32,
    /// Seconds accumulated toward the next spawn attempt
    pub(crate) spawn_timer: f32,
    /// Simulation seconds since the session started
    pub(crate) clock: f32,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Create an empty world with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            enemies: Vec::new(),
            obstacles: Vec::new(),
            countdown_timer: 0.0,
            spawn_timer: 0.0,
            clock: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Simulation seconds since the session started
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Insert an enemy directly (scripted setups and tests)
    pub fn push_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
        self.enemies.sort_by_key(|e| e.id);
    }

    /// Insert an obstacle directly (scripted setups and tests)
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
        self.obstacles.sort_by_key(|o| o.id);
    }
}
