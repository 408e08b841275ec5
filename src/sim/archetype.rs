//! Enemy archetype registry
//!
//! Base stats for each enemy type. This table is fixed for the whole process;
//! the factory and the AI policies read from it, nothing writes to it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Basic enemy, near-straight path
    Soldier,
    /// Keeps its distance, moves erratically
    Archer,
    /// Fast and aggressive, charges the knight
    Berserker,
    /// Slow but tough, defensive sway
    Guard,
}

/// Base stats row for one archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub health: u32,
    pub speed: f32,
    pub size: Vec2,
    pub aggression: f32,
    /// Display color (linear RGBA)
    pub color: [f32; 4],
}

const SOLDIER: ArchetypeStats = ArchetypeStats {
    health: 1,
    speed: 2.5,
    size: Vec2::new(1.0, 1.5),
    aggression: 0.5,
    color: [0.86, 0.08, 0.24, 1.0], // Crimson
};

const ARCHER: ArchetypeStats = ArchetypeStats {
    health: 1,
    speed: 1.8,
    size: Vec2::new(0.8, 1.4),
    aggression: 0.3,
    color: [0.13, 0.55, 0.13, 1.0], // Forest green
};

const BERSERKER: ArchetypeStats = ArchetypeStats {
    health: 2,
    speed: 3.5,
    size: Vec2::new(1.2, 1.8),
    aggression: 0.9,
    color: [0.55, 0.0, 0.0, 1.0], // Dark red
};

const GUARD: ArchetypeStats = ArchetypeStats {
    health: 3,
    speed: 1.5,
    size: Vec2::new(1.3, 2.0),
    aggression: 0.2,
    color: [0.29, 0.0, 0.51, 1.0], // Indigo
};

impl EnemyKind {
    /// Every archetype, in registry order
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Soldier,
        EnemyKind::Archer,
        EnemyKind::Berserker,
        EnemyKind::Guard,
    ];

    pub fn stats(&self) -> &'static ArchetypeStats {
        match self {
            EnemyKind::Soldier => &SOLDIER,
            EnemyKind::Archer => &ARCHER,
            EnemyKind::Berserker => &BERSERKER,
            EnemyKind::Guard => &GUARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Soldier => "soldier",
            EnemyKind::Archer => "archer",
            EnemyKind::Berserker => "berserker",
            EnemyKind::Guard => "guard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "soldier" => Some(EnemyKind::Soldier),
            "archer" => Some(EnemyKind::Archer),
            "berserker" => Some(EnemyKind::Berserker),
            "guard" => Some(EnemyKind::Guard),
            _ => None,
        }
    }

    /// Stable index used by the render bridge
    pub fn index(&self) -> u32 {
        match self {
            EnemyKind::Soldier => 0,
            EnemyKind::Archer => 1,
            EnemyKind::Berserker => 2,
            EnemyKind::Guard => 3,
        }
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
