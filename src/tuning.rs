//! Data-driven game balance
//!
//! Every number the simulation used to hard-code lives here, so a run can
//! be rebalanced from a JSON file without touching the sim. Defaults
//! reproduce the shipped balance exactly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Balance and world configuration, passed into [`crate::Game::new`] and
/// threaded through the simulation instead of process-wide globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Visible window width in world units (also the cull window for
    /// projectiles and enemies)
    pub screen_width: f32,
    /// Falling past this y ends the run
    pub screen_height: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Camera lead distance before the view scrolls
    pub scroll_threshold: f32,
    /// Number of levels in a full run
    pub total_levels: u32,
    /// Reaching `level_length - completion_margin` completes the level
    pub completion_margin: f32,

    // === Scoring ===
    pub kill_score: u64,
    pub boss_kill_score: u64,
    pub level_bonus: u64,

    // === Player ===
    pub player_spawn: Vec2,
    pub player_speed: f32,
    pub player_jump_power: f32,
    pub player_max_health: i32,
    pub player_lives: u32,
    /// Frames between shots
    pub shoot_cooldown: u32,
    /// Frames of damage immunity after a hit
    pub invincibility_frames: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_damage: i32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub enemy_contact_damage: i32,
    /// Half-range of the patrol walk from the spawn point
    pub enemy_patrol_range: f32,

    // === Boss ===
    pub boss_speed: f32,
    pub boss_health: i32,
    pub boss_contact_damage: i32,
    /// The boss holds position once within this horizontal distance
    pub boss_keep_distance: f32,
    pub boss_shoot_cooldown: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: consts::SCREEN_WIDTH,
            screen_height: consts::SCREEN_HEIGHT,
            gravity: consts::GRAVITY,
            max_fall_speed: consts::MAX_FALL_SPEED,
            scroll_threshold: consts::SCROLL_THRESHOLD,
            total_levels: 3,
            completion_margin: 200.0,

            kill_score: 50,
            boss_kill_score: 500,
            level_bonus: 1000,

            player_spawn: Vec2::new(100.0, consts::SCREEN_HEIGHT - 200.0),
            player_speed: 8.0,
            player_jump_power: 20.0,
            player_max_health: 100,
            player_lives: 3,
            shoot_cooldown: 15,
            invincibility_frames: 60,

            projectile_speed: 15.0,
            projectile_damage: 20,

            enemy_speed: 3.0,
            enemy_health: 50,
            enemy_contact_damage: 20,
            enemy_patrol_range: 150.0,

            boss_speed: 2.0,
            boss_health: 200,
            boss_contact_damage: 30,
            boss_keep_distance: 300.0,
            boss_shoot_cooldown: 60,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults, so a
    /// file may override just the values it cares about.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse tuning from JSON, falling back to defaults (with a logged
    /// warning) when the input does not parse.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("invalid tuning JSON, using defaults: {err}");
                Self::default()
            }
        }
    }
}
