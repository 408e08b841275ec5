//! Axis-aligned collision detection
//!
//! Every collidable thing in the game is a box centered on its position.
//! Touching edges do not count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A positioned, sized box in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Center of the box
    pub pos: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Entity {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Lower-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.size / 2.0
    }

    /// Upper-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Anything that occupies a box in the world
pub trait Collider {
    fn entity(&self) -> Entity;
}

impl Collider for Entity {
    fn entity(&self) -> Entity {
        *self
    }
}

/// Check whether two boxes intersect on both axes
///
/// Strict inequalities: boxes sharing only an edge do not overlap.
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// `overlaps` for any pair of colliders
#[inline]
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    overlaps(&a.entity(), &b.entity())
}
