//! Projectiles fired by the player and the boss

use glam::Vec2;

use super::aabb::Aabb;
use crate::tuning::Tuning;

/// Bolt dimensions
const BOLT_WIDTH: f32 = 10.0;
const BOLT_HEIGHT: f32 = 5.0;

/// Which side fired a bolt, and therefore which side it can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A directional bolt. Expires once it leaves the visible window; the
/// orchestrator removes it, it never removes itself.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub aabb: Aabb,
    /// +1.0 rightward, -1.0 leftward
    pub direction: f32,
    pub speed: f32,
    pub damage: i32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    /// Spawn a bolt with its top-left corner at `pos`.
    pub fn new(pos: Vec2, direction: f32, owner: ProjectileOwner, tuning: &Tuning) -> Self {
        Self {
            aabb: Aabb::new(pos.x, pos.y, BOLT_WIDTH, BOLT_HEIGHT),
            direction,
            speed: tuning.projectile_speed,
            damage: tuning.projectile_damage,
            owner,
        }
    }

    /// Advance one frame. Returns true once the bolt is fully outside the
    /// window `[scroll_x, scroll_x + view_width]`.
    pub fn update(&mut self, scroll_x: f32, view_width: f32) -> bool {
        self.aabb.min.x += self.speed * self.direction;
        self.aabb.right() < scroll_x || self.aabb.left() > scroll_x + view_width
    }
}
