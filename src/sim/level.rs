//! Levels: solid geometry, pickups, and one-shot procedural generation
//!
//! Generation runs exactly once at construction and is deterministic for
//! a given RNG. Spawn candidates without a supporting platform are
//! skipped, never retried, so entity counts are upper bounds.

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::enemy::{Boss, Enemy};
use crate::tuning::Tuning;

/// Ground strip thickness
const GROUND_HEIGHT: i32 = 50;
/// Floating platform thickness
const PLATFORM_HEIGHT: f32 = 20.0;
/// Pickup box edge length
const COLLECTIBLE_SIZE: f32 = 30.0;

/// Static solid geometry.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub aabb: Aabb,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            aabb: Aabb::new(x, y, width, height),
        }
    }
}

/// What touching a collectible does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    HealthBoost(i32),
    ExtraLife,
    ScoreBoost(u64),
}

/// A static pickup, removed by the orchestrator the frame the player
/// touches it.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub aabb: Aabb,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn new(x: f32, y: f32, kind: CollectibleKind) -> Self {
        Self {
            aabb: Aabb::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            kind,
        }
    }
}

/// One stage of the run.
#[derive(Debug, Clone)]
pub struct Level {
    pub level_number: u32,
    /// Total horizontal extent in world units
    pub length: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub boss: Option<Boss>,
    /// Set when the boss falls on the final level
    pub victory: bool,
}

impl Level {
    /// Build a level: ground strip with mid-level gaps, floating
    /// platforms, enemies and pickups over resolved supports, and the
    /// boss near the end of the final level.
    pub fn generate(level_number: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let length: i32 = if level_number < 3 { 3000 } else { 4000 };
        let screen_height = tuning.screen_height as i32;
        let ground_y = screen_height - GROUND_HEIGHT;

        let mut level = Self {
            level_number,
            length: length as f32,
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            boss: None,
            victory: false,
        };

        // Ground strip. Gaps appear only in the middle region so both the
        // start and the approach to the exit stay walkable.
        let mut x = 0;
        while x < length {
            let segment = rng.random_range(3..=8) * 100;
            level.platforms.push(Platform::new(
                x as f32,
                ground_y as f32,
                segment as f32,
                GROUND_HEIGHT as f32,
            ));
            if x > 500 && x < length - 800 {
                x += segment + rng.random_range(100..=200);
            } else {
                x += segment;
            }
        }

        // Floating platforms, denser on later levels.
        let platform_count = 15 + level_number * 5;
        for _ in 0..platform_count {
            let x = rng.random_range(400..=length - 400);
            let y = rng.random_range(screen_height - 350..=screen_height - 150);
            let width = rng.random_range(100..=200);
            level.platforms.push(Platform::new(
                x as f32,
                y as f32,
                width as f32,
                PLATFORM_HEIGHT,
            ));
        }

        // Enemies stand on whatever platform resolves under their x.
        // A candidate with no support is skipped, never retried.
        let enemy_count = 10 + level_number * 5;
        for _ in 0..enemy_count {
            let x = rng.random_range(500..=length - 500);
            match level.platform_top_at(x as f32) {
                Some(top) => level
                    .enemies
                    .push(Enemy::new(Vec2::new(x as f32, top - 50.0), tuning)),
                None => log::debug!("no support at x={x}, enemy spawn skipped"),
            }
        }

        // Pickups float above a resolved support.
        let collectible_count = 5 + level_number;
        for _ in 0..collectible_count {
            let x = rng.random_range(400..=length - 400);
            match level.platform_top_at(x as f32) {
                Some(top) => {
                    let y = top - rng.random_range(100..=200) as f32;
                    let kind = match rng.random_range(0..3) {
                        0 => CollectibleKind::HealthBoost(25),
                        1 => CollectibleKind::ExtraLife,
                        _ => CollectibleKind::ScoreBoost(100),
                    };
                    level.collectibles.push(Collectible::new(x as f32, y, kind));
                }
                None => log::debug!("no support at x={x}, pickup spawn skipped"),
            }
        }

        // The boss guards the end of the final level.
        if level_number == tuning.total_levels {
            let boss_x = (length - 500) as f32;
            match level.platform_top_at(boss_x) {
                Some(top) => {
                    level.boss = Some(Boss::new(Vec2::new(boss_x, top - 100.0), tuning));
                }
                None => log::debug!("no support under the boss arena, spawn skipped"),
            }
        }

        level
    }

    /// Top y of the highest platform whose span contains `x`, or `None`
    /// when nothing spans it. `None` means "place nothing here", never a
    /// default height.
    pub fn platform_top_at(&self, x: f32) -> Option<f32> {
        self.platforms
            .iter()
            .filter(|p| p.aabb.left() <= x && x <= p.aabb.right())
            .map(|p| p.aabb.top())
            .reduce(f32::min)
    }
}
