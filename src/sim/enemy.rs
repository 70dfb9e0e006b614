//! Patrolling enemies and the end-of-run boss

use glam::Vec2;

use super::aabb::Aabb;
use super::projectile::{Projectile, ProjectileOwner};
use crate::tuning::Tuning;

const ENEMY_SIZE: f32 = 50.0;
const BOSS_SIZE: f32 = 100.0;

/// A ground enemy walking back and forth around its spawn point.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub aabb: Aabb,
    /// Patrol origin; the walk reverses at `start_x ± patrol_range`
    pub start_x: f32,
    pub speed: f32,
    pub direction: f32,
    pub patrol_range: f32,
    pub health: i32,
    pub max_health: i32,
    pub contact_damage: i32,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            aabb: Aabb::new(pos.x, pos.y, ENEMY_SIZE, ENEMY_SIZE),
            start_x: pos.x,
            speed: tuning.enemy_speed,
            direction: 1.0,
            patrol_range: tuning.enemy_patrol_range,
            health: tuning.enemy_health,
            max_health: tuning.enemy_health,
            contact_damage: tuning.enemy_contact_damage,
        }
    }

    /// Walk one patrol step, reversing at either boundary. Returns true
    /// when the enemy is fully outside the visible window.
    ///
    /// The window test is symmetric: enemies far ahead of the camera are
    /// culled just like ones left behind it.
    pub fn update(&mut self, scroll_x: f32, view_width: f32) -> bool {
        self.aabb.min.x += self.speed * self.direction;

        if self.aabb.min.x >= self.start_x + self.patrol_range {
            self.direction = -1.0;
        } else if self.aabb.min.x <= self.start_x - self.patrol_range {
            self.direction = 1.0;
        }

        self.aabb.right() < scroll_x || self.aabb.left() > scroll_x + view_width
    }

    /// Enemies have no damage immunity.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// The final-level boss: bigger, tougher, and armed. Instead of patrolling
/// it closes on the player until within its keep distance, firing bolts on
/// a cooldown.
#[derive(Debug, Clone)]
pub struct Boss {
    pub aabb: Aabb,
    pub speed: f32,
    pub direction: f32,
    pub health: i32,
    pub max_health: i32,
    pub contact_damage: i32,
    pub keep_distance: f32,
    shoot_cooldown: u32,
    shoot_cooldown_max: u32,
}

impl Boss {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            aabb: Aabb::new(pos.x, pos.y, BOSS_SIZE, BOSS_SIZE),
            speed: tuning.boss_speed,
            direction: 1.0,
            health: tuning.boss_health,
            max_health: tuning.boss_health,
            contact_damage: tuning.boss_contact_damage,
            keep_distance: tuning.boss_keep_distance,
            shoot_cooldown: 0,
            shoot_cooldown_max: tuning.boss_shoot_cooldown,
        }
    }

    /// Step toward the player while farther than the keep distance, and
    /// tick down the shot cooldown. Same symmetric offscreen report as
    /// [`Enemy::update`].
    pub fn update(&mut self, scroll_x: f32, view_width: f32, player_x: f32) -> bool {
        if (player_x - self.aabb.min.x).abs() > self.keep_distance {
            self.direction = if player_x > self.aabb.min.x { 1.0 } else { -1.0 };
            self.aabb.min.x += self.speed * self.direction;
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        self.aabb.right() < scroll_x || self.aabb.left() > scroll_x + view_width
    }

    /// Fire a bolt from the boss's center toward the player's side of the
    /// screen, if the cooldown has run out.
    pub fn shoot(&mut self, player_x: f32, tuning: &Tuning) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = self.shoot_cooldown_max;
        let direction = if player_x > self.aabb.center().x {
            1.0
        } else {
            -1.0
        };
        Some(Projectile::new(
            self.aabb.center(),
            direction,
            ProjectileOwner::Enemy,
            tuning,
        ))
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}
