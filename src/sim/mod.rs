//! Simulation core
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod archetype;
pub mod autopilot;
pub mod collision;
pub mod factory;
pub mod knight;
pub mod session;
pub mod state;
pub mod tick;

pub use ai::{AiContext, update_enemy};
pub use archetype::{ArchetypeStats, EnemyKind};
pub use autopilot::autopilot;
pub use collision::{Collider, Entity, collides, overlaps};
pub use factory::{create_enemy, create_obstacle};
pub use knight::{Knight, KnightInput};
pub use session::{GamePhase, Session};
pub use state::{Enemy, EntityId, GameEvent, Obstacle, World};
pub use tick::{Terminal, TickInput, TickReport, choose_enemy_kind, tick};
