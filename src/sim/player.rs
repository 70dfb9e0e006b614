//! The player: movement, platforming, combat, and pickups

use glam::Vec2;

use super::aabb::Aabb;
use super::enemy::Enemy;
use super::game::{FrameInput, GameEvent};
use super::level::{Collectible, CollectibleKind, Platform};
use super::projectile::{Projectile, ProjectileOwner};
use crate::tuning::Tuning;

const PLAYER_WIDTH: f32 = 50.0;
const PLAYER_HEIGHT: f32 = 80.0;

/// Invincibility flash cycle length in frames (lit for the first half)
const FLASH_CYCLE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Player {
    pub aabb: Aabb,
    /// Facing: +1.0 right, -1.0 left
    pub direction: f32,
    pub vel_y: f32,
    /// Set on jump, cleared on landing
    pub jumping: bool,
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub shoot_cooldown: u32,
    pub invincibility: u32,
    /// Blink phase while invincible, for the renderer
    pub flashing: bool,
    speed: f32,
    jump_power: f32,
    shoot_cooldown_max: u32,
    invincibility_frames: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            aabb: Aabb::new(
                tuning.player_spawn.x,
                tuning.player_spawn.y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            direction: 1.0,
            vel_y: 0.0,
            jumping: false,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            lives: tuning.player_lives,
            shoot_cooldown: 0,
            invincibility: 0,
            flashing: false,
            speed: tuning.player_speed,
            jump_power: tuning.player_jump_power,
            shoot_cooldown_max: tuning.shoot_cooldown,
            invincibility_frames: tuning.invincibility_frames,
        }
    }

    /// Put the player back at the level spawn point with motion and timers
    /// cleared. Health, lives, and facing stats carry over.
    pub fn reset_for_level(&mut self, tuning: &Tuning) {
        self.aabb.min = tuning.player_spawn;
        self.direction = 1.0;
        self.vel_y = 0.0;
        self.jumping = false;
        self.shoot_cooldown = 0;
        self.invincibility = 0;
        self.flashing = false;
    }

    /// Advance the player one frame: movement intent, gravity, platform
    /// resolution, timers, enemy contact, and the pickup sweep.
    ///
    /// Horizontal and vertical motion are resolved against platforms
    /// independently per axis: a platform in the way sideways zeroes the
    /// horizontal delta, while a platform in the way vertically snaps the
    /// player flush against it and kills vertical velocity. The two passes
    /// do not see each other, which leaves the usual one-frame diagonal
    /// corner ambiguity; that trade-off is intentional.
    ///
    /// Returns the indices of collectibles consumed this frame, ascending.
    /// Their stat effects are applied here; removal from the level and
    /// score totalling are the caller's job.
    pub fn update(
        &mut self,
        input: &FrameInput,
        platforms: &[Platform],
        enemies: &[Enemy],
        collectibles: &[Collectible],
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) -> Vec<usize> {
        let mut dx = 0.0;
        if input.left {
            dx = -self.speed;
            self.direction = -1.0;
        }
        if input.right {
            dx = self.speed;
            self.direction = 1.0;
        }

        if input.jump && !self.jumping {
            self.vel_y = -self.jump_power;
            self.jumping = true;
        }

        self.vel_y = (self.vel_y + tuning.gravity).min(tuning.max_fall_speed);
        let mut dy = self.vel_y;

        for platform in platforms {
            if platform.aabb.overlaps(&self.aabb.translated(Vec2::new(dx, 0.0))) {
                dx = 0.0;
            }
            if platform.aabb.overlaps(&self.aabb.translated(Vec2::new(0.0, dy))) {
                if self.vel_y < 0.0 {
                    // Rising: bump the head against the underside.
                    dy = platform.aabb.bottom() - self.aabb.top();
                    self.vel_y = 0.0;
                } else {
                    // Falling: land on top.
                    dy = platform.aabb.top() - self.aabb.bottom();
                    self.vel_y = 0.0;
                    self.jumping = false;
                }
            }
        }

        self.aabb.min.x += dx;
        self.aabb.min.y += dy;

        // The world has no left edge to fall off.
        if self.aabb.min.x < 0.0 {
            self.aabb.min.x = 0.0;
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if self.invincibility > 0 {
            self.invincibility -= 1;
            self.flashing = self.invincibility % FLASH_CYCLE < FLASH_CYCLE / 2;
        } else {
            self.flashing = false;
        }

        if self.invincibility == 0 {
            for enemy in enemies {
                if self.aabb.overlaps(&enemy.aabb) {
                    self.take_damage(enemy.contact_damage, events);
                }
            }
        }

        let mut consumed = Vec::new();
        for (index, collectible) in collectibles.iter().enumerate() {
            if self.aabb.overlaps(&collectible.aabb) {
                match collectible.kind {
                    CollectibleKind::HealthBoost(amount) => {
                        self.health = (self.health + amount).min(self.max_health);
                    }
                    CollectibleKind::ExtraLife => {
                        self.lives += 1;
                    }
                    CollectibleKind::ScoreBoost(_) => {}
                }
                consumed.push(index);
            }
        }
        consumed
    }

    /// Apply damage unless invincible. Dropping to zero health costs a
    /// life; with lives remaining the player respawns in place at full
    /// health.
    pub fn take_damage(&mut self, amount: i32, events: &mut Vec<GameEvent>) {
        if self.invincibility > 0 {
            return;
        }
        self.health = (self.health - amount).max(0);
        self.invincibility = self.invincibility_frames;
        events.push(GameEvent::PlayerDamaged { amount });

        if self.health == 0 {
            self.lives = self.lives.saturating_sub(1);
            events.push(GameEvent::LifeLost { lives: self.lives });
            if self.lives > 0 {
                self.health = self.max_health;
            }
        }
    }

    /// Fire a bolt from the facing edge, if the cooldown has run out.
    pub fn shoot(&mut self, tuning: &Tuning) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = self.shoot_cooldown_max;
        let x = if self.direction > 0.0 {
            self.aabb.right()
        } else {
            self.aabb.left()
        };
        Some(Projectile::new(
            Vec2::new(x, self.aabb.center().y),
            self.direction,
            ProjectileOwner::Player,
            tuning,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn ground(tuning: &Tuning) -> Platform {
        Platform::new(0.0, tuning.screen_height - 50.0, 3000.0, 50.0)
    }

    fn step(
        player: &mut Player,
        input: &FrameInput,
        platforms: &[Platform],
        tuning: &Tuning,
    ) -> Vec<usize> {
        player.update(input, platforms, &[], &[], tuning, &mut Vec::new())
    }

    #[test]
    fn gravity_accelerates_to_terminal_speed() {
        let t = tuning();
        let mut p = Player::new(&t);
        let input = FrameInput::default();
        for _ in 0..4 {
            step(&mut p, &input, &[], &t);
        }
        assert_eq!(p.vel_y, 4.0);
        for _ in 0..20 {
            step(&mut p, &input, &[], &t);
        }
        assert_eq!(p.vel_y, t.max_fall_speed);
    }

    #[test]
    fn falls_onto_a_platform_and_rests_flush() {
        let t = tuning();
        let mut p = Player::new(&t);
        let floor = ground(&t);
        let input = FrameInput::default();
        for _ in 0..60 {
            step(&mut p, &input, &[floor], &t);
        }
        assert_eq!(p.aabb.bottom(), floor.aabb.top());
        assert_eq!(p.vel_y, 0.0);
        assert!(!p.jumping);
        assert!(!p.aabb.overlaps(&floor.aabb));
    }

    #[test]
    fn jump_only_from_the_ground() {
        let t = tuning();
        let mut p = Player::new(&t);
        let floor = ground(&t);
        let idle = FrameInput::default();
        let jump = FrameInput {
            jump: true,
            ..FrameInput::default()
        };

        // Settle onto the floor first.
        for _ in 0..60 {
            step(&mut p, &idle, &[floor], &t);
        }

        step(&mut p, &jump, &[floor], &t);
        assert!(p.jumping);
        assert_eq!(p.vel_y, -t.player_jump_power + t.gravity);
        let rising_vel = p.vel_y;

        // A second press while airborne does nothing.
        step(&mut p, &jump, &[floor], &t);
        assert_eq!(p.vel_y, rising_vel + t.gravity);
    }

    #[test]
    fn walking_into_a_wall_stops_short() {
        let t = tuning();
        let mut p = Player::new(&t);
        let floor = ground(&t);
        let wall = Platform::new(250.0, 570.0, 50.0, 80.0);
        let right = FrameInput {
            right: true,
            ..FrameInput::default()
        };

        let idle = FrameInput::default();
        for _ in 0..60 {
            step(&mut p, &idle, &[floor], &t);
        }
        for _ in 0..30 {
            step(&mut p, &right, &[floor, wall], &t);
            assert!(!p.aabb.overlaps(&wall.aabb));
        }
        // Blocked one sub-step shy of the wall face.
        assert_eq!(p.aabb.min.x, 196.0);
    }

    #[test]
    fn left_edge_of_the_world_is_solid() {
        let t = tuning();
        let mut p = Player::new(&t);
        let left = FrameInput {
            left: true,
            ..FrameInput::default()
        };
        for _ in 0..40 {
            step(&mut p, &left, &[], &t);
        }
        assert_eq!(p.aabb.min.x, 0.0);
        assert_eq!(p.direction, -1.0);
    }

    #[test]
    fn contact_damage_respects_the_invincibility_window() {
        // Zero gravity keeps the overlap in place for the whole window.
        let mut t = tuning();
        t.gravity = 0.0;
        let mut p = Player::new(&t);
        let enemy = Enemy::new(p.aabb.min, &t);
        let input = FrameInput::default();
        let mut events = Vec::new();

        p.update(&input, &[], &[enemy.clone()], &[], &t, &mut events);
        assert_eq!(p.health, 80);

        // Still overlapping for the whole window: no further loss.
        for _ in 0..59 {
            p.update(&input, &[], &[enemy.clone()], &[], &t, &mut events);
        }
        assert_eq!(p.health, 80);

        // Window expired: the next contact bites again.
        p.update(&input, &[], &[enemy], &[], &t, &mut events);
        assert_eq!(p.health, 60);
    }

    #[test]
    fn losing_a_life_refills_health_in_place() {
        let t = tuning();
        let mut p = Player::new(&t);
        let pos = p.aabb.min;
        p.health = 10;
        let mut events = Vec::new();
        p.take_damage(20, &mut events);
        assert_eq!(p.lives, 2);
        assert_eq!(p.health, p.max_health);
        assert_eq!(p.aabb.min, pos);
    }

    #[test]
    fn last_life_lost_leaves_health_at_zero() {
        let t = tuning();
        let mut p = Player::new(&t);
        p.lives = 1;
        p.health = 20;
        let mut events = Vec::new();
        p.take_damage(20, &mut events);
        assert_eq!(p.lives, 0);
        assert_eq!(p.health, 0);
        assert!(events.contains(&GameEvent::LifeLost { lives: 0 }));
    }

    #[test]
    fn flash_phase_alternates_through_the_window() {
        let t = tuning();
        let mut p = Player::new(&t);
        let input = FrameInput::default();
        let mut events = Vec::new();
        p.take_damage(20, &mut events);
        assert_eq!(p.invincibility, 60);

        step(&mut p, &input, &[], &t);
        assert!(!p.flashing); // 59
        for _ in 0..5 {
            step(&mut p, &input, &[], &t);
        }
        assert!(p.flashing); // 54
    }

    #[test]
    fn pickups_apply_and_report() {
        let t = tuning();
        let mut p = Player::new(&t);
        p.health = 90;
        let at = p.aabb.min;
        let items = vec![
            Collectible::new(at.x, at.y, CollectibleKind::HealthBoost(25)),
            Collectible::new(at.x, at.y, CollectibleKind::ExtraLife),
            Collectible::new(at.x, at.y, CollectibleKind::ScoreBoost(100)),
            Collectible::new(at.x + 500.0, at.y, CollectibleKind::ExtraLife),
        ];
        let consumed = p.update(
            &FrameInput::default(),
            &[],
            &[],
            &items,
            &t,
            &mut Vec::new(),
        );
        assert_eq!(consumed, vec![0, 1, 2]);
        assert_eq!(p.health, p.max_health); // capped, not 115
        assert_eq!(p.lives, 4);
    }

    #[test]
    fn shoot_spawns_at_the_facing_edge_and_cools_down() {
        let t = tuning();
        let mut p = Player::new(&t);

        let bolt = p.shoot(&t).unwrap();
        assert_eq!(bolt.owner, ProjectileOwner::Player);
        assert_eq!(bolt.direction, 1.0);
        assert_eq!(bolt.aabb.min.x, p.aabb.right());
        assert_eq!(bolt.aabb.min.y, p.aabb.center().y);

        assert!(p.shoot(&t).is_none());

        for _ in 0..15 {
            step(&mut p, &FrameInput::default(), &[], &t);
        }
        p.direction = -1.0;
        let bolt = p.shoot(&t).unwrap();
        assert_eq!(bolt.direction, -1.0);
        assert_eq!(bolt.aabb.min.x, p.aabb.left());
    }

    proptest! {
        #[test]
        fn falling_never_ends_a_frame_inside_a_platform(
            specs in proptest::collection::vec(
                (0f32..400f32, 600f32..660f32, 50f32..400f32, 10f32..40f32),
                1..10,
            ),
        ) {
            let t = tuning();
            let mut p = Player::new(&t);
            let platforms: Vec<Platform> = specs
                .iter()
                .map(|&(x, y, w, h)| Platform::new(x, y, w, h))
                .collect();
            let input = FrameInput::default();
            for _ in 0..300 {
                step(&mut p, &input, &platforms, &t);
                for platform in &platforms {
                    prop_assert!(!p.aabb.overlaps(&platform.aabb));
                }
            }
        }

        #[test]
        fn running_and_jumping_on_ground_never_clips_it(
            jump_every in 10u32..40,
            frames in 1u32..240,
        ) {
            let t = tuning();
            let mut p = Player::new(&t);
            let floor = ground(&t);
            for frame in 0..frames {
                let input = FrameInput {
                    right: true,
                    jump: frame % jump_every == 0,
                    ..FrameInput::default()
                };
                step(&mut p, &input, &[floor], &t);
                prop_assert!(!p.aabb.overlaps(&floor.aabb));
            }
        }

        #[test]
        fn health_stays_clamped_under_any_damage_sequence(
            amounts in proptest::collection::vec(0i32..80, 0..64),
        ) {
            let t = tuning();
            let mut p = Player::new(&t);
            let mut events = Vec::new();
            for amount in amounts {
                p.invincibility = 0;
                p.take_damage(amount, &mut events);
                prop_assert!(p.health >= 0);
                prop_assert!(p.health <= p.max_health);
            }
        }
    }
}
