//! Top-level game state machine and per-frame orchestration
//!
//! `Game` is the single mutable root: it owns the level, the player, the
//! projectile pools, and the camera, and advances them in a fixed order
//! each frame. Every pass that removes entities collects first and
//! applies afterwards, so nothing is deleted out from under an iteration.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::{CollectibleKind, Level};
use super::player::Player;
use super::projectile::{Projectile, ProjectileOwner};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Between levels, waiting for confirm
    LevelComplete,
    /// Run lost
    GameOver,
    /// Run won
    Victory,
}

/// Decoded input snapshot for one frame. Movement and fire are held
/// state; confirm and cancel are edge-triggered by the caller. A field
/// the input layer cannot provide stays false.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub confirm: bool,
    pub cancel: bool,
}

/// Semantic events emitted during a frame, for the presentation layer to
/// map to sound and effects. Drained with [`Game::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired(ProjectileOwner),
    PickupCollected(CollectibleKind),
    PlayerDamaged { amount: i32 },
    LifeLost { lives: u32 },
    EnemyKilled,
    BossDefeated,
    LevelCompleted { level: u32 },
    GameOver { score: u64 },
    RunComplete { score: u64 },
}

/// The whole game. Single-threaded; mutated only through [`Game::update`].
#[derive(Debug)]
pub struct Game {
    pub phase: GamePhase,
    pub level: Level,
    pub player: Player,
    pub level_number: u32,
    /// Camera offset, subtracted from world x to get screen x
    pub scroll_x: f32,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub score: u64,
    pub seed: u64,
    pub tuning: Tuning,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::generate(1, &tuning, &mut rng);
        let player = Player::new(&tuning);
        Self {
            phase: GamePhase::Menu,
            level,
            player,
            level_number: 1,
            scroll_x: 0.0,
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            score: 0,
            seed,
            tuning,
            rng,
            events: Vec::new(),
        }
    }

    /// Advance one frame from the given input snapshot.
    pub fn update(&mut self, input: &FrameInput) {
        match self.phase {
            GamePhase::Menu => {
                if input.confirm {
                    self.start_run();
                }
            }
            GamePhase::Playing => {
                if input.cancel {
                    self.phase = GamePhase::Menu;
                    return;
                }
                self.playing_frame(input);
            }
            GamePhase::LevelComplete => {
                if input.confirm {
                    self.advance_level();
                }
            }
            GamePhase::GameOver | GamePhase::Victory => {
                if input.confirm {
                    self.phase = GamePhase::Menu;
                }
            }
        }
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh run: level 1, zero score, a brand-new player.
    fn start_run(&mut self) {
        self.score = 0;
        self.level_number = 1;
        self.player = Player::new(&self.tuning);
        self.load_level(1);
        self.phase = GamePhase::Playing;
        log::info!("run started, seed {}", self.seed);
    }

    /// Swap in a freshly generated level. Player stats carry over; the
    /// projectile pools and the camera always start empty and at zero.
    fn load_level(&mut self, level_number: u32) {
        self.level_number = level_number;
        self.level = Level::generate(level_number, &self.tuning, &mut self.rng);
        self.player.reset_for_level(&self.tuning);
        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.scroll_x = 0.0;
        log::info!(
            "level {} loaded: {} platforms, {} enemies, {} pickups, boss {}",
            level_number,
            self.level.platforms.len(),
            self.level.enemies.len(),
            self.level.collectibles.len(),
            self.level.boss.is_some(),
        );
    }

    fn advance_level(&mut self) {
        let next = self.level_number + 1;
        if next > self.tuning.total_levels {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::RunComplete { score: self.score });
            log::info!("run complete, final score {}", self.score);
        } else {
            self.load_level(next);
            self.phase = GamePhase::Playing;
        }
    }

    /// The gameplay frame body. Order matters: the player moves first,
    /// then pickups are committed, the camera follows, the projectile and
    /// enemy passes run, and the completion and game-over predicates are
    /// evaluated last.
    fn playing_frame(&mut self, input: &FrameInput) {
        let view_width = self.tuning.screen_width;

        // Fire intent, ahead of movement so the bolt travels this frame.
        if input.shoot {
            if let Some(bolt) = self.player.shoot(&self.tuning) {
                self.projectiles.push(bolt);
                self.events.push(GameEvent::ShotFired(ProjectileOwner::Player));
            }
        }

        // Movement, platforming, enemy contact, pickup sweep.
        let consumed = self.player.update(
            input,
            &self.level.platforms,
            &self.level.enemies,
            &self.level.collectibles,
            &self.tuning,
            &mut self.events,
        );

        // Commit consumed pickups: remove from the level, total the score.
        for index in consumed.into_iter().rev() {
            let item = self.level.collectibles.remove(index);
            if let CollectibleKind::ScoreBoost(amount) = item.kind {
                self.score += amount;
            }
            self.events.push(GameEvent::PickupCollected(item.kind));
        }

        // Camera follows once the player's right edge leads far enough.
        let lead = self.player.aabb.right() - self.scroll_x;
        if lead > self.tuning.scroll_threshold {
            self.scroll_x = self.player.aabb.right() - self.tuning.scroll_threshold;
        }

        // Player bolts: advance, expire, and resolve hits. A bolt is spent
        // by hitting either side's target but damages at most one enemy.
        let mut spent = Vec::new();
        for (index, bolt) in self.projectiles.iter_mut().enumerate() {
            if bolt.update(self.scroll_x, view_width) {
                spent.push(index);
                continue;
            }

            let mut hit = false;
            let mut killed = None;
            for (enemy_index, enemy) in self.level.enemies.iter_mut().enumerate() {
                if bolt.aabb.overlaps(&enemy.aabb) {
                    enemy.take_damage(bolt.damage);
                    hit = true;
                    if enemy.is_dead() {
                        killed = Some(enemy_index);
                    }
                    break;
                }
            }
            if let Some(enemy_index) = killed {
                self.level.enemies.remove(enemy_index);
                self.score += self.tuning.kill_score;
                self.events.push(GameEvent::EnemyKilled);
            }

            let mut boss_down = false;
            if let Some(boss) = self.level.boss.as_mut() {
                if bolt.aabb.overlaps(&boss.aabb) {
                    boss.take_damage(bolt.damage);
                    hit = true;
                    boss_down = boss.is_dead();
                }
            }
            if boss_down {
                self.level.boss = None;
                self.score += self.tuning.boss_kill_score;
                self.events.push(GameEvent::BossDefeated);
                if self.level_number == self.tuning.total_levels {
                    self.level.victory = true;
                }
            }

            if hit {
                spent.push(index);
            }
        }
        for index in spent.into_iter().rev() {
            self.projectiles.remove(index);
        }

        // Enemy patrol and cull.
        let mut gone = Vec::new();
        for (index, enemy) in self.level.enemies.iter_mut().enumerate() {
            if enemy.update(self.scroll_x, view_width) {
                gone.push(index);
            }
        }
        for index in gone.into_iter().rev() {
            self.level.enemies.remove(index);
        }

        // Boss chase and fire.
        let player_x = self.player.aabb.min.x;
        let mut boss_gone = false;
        let mut boss_bolt = None;
        if let Some(boss) = self.level.boss.as_mut() {
            if boss.update(self.scroll_x, view_width, player_x) {
                boss_gone = true;
            } else {
                boss_bolt = boss.shoot(player_x, &self.tuning);
            }
        }
        if boss_gone {
            self.level.boss = None;
        }
        if let Some(bolt) = boss_bolt {
            self.enemy_projectiles.push(bolt);
            self.events.push(GameEvent::ShotFired(ProjectileOwner::Enemy));
        }

        // Enemy bolts: advance, expire, and resolve against the player.
        let mut spent = Vec::new();
        for (index, bolt) in self.enemy_projectiles.iter_mut().enumerate() {
            if bolt.update(self.scroll_x, view_width) {
                spent.push(index);
            } else if bolt.aabb.overlaps(&self.player.aabb) {
                self.player.take_damage(bolt.damage, &mut self.events);
                spent.push(index);
            }
        }
        for index in spent.into_iter().rev() {
            self.enemy_projectiles.remove(index);
        }

        // Completion: past the exit margin, or the boss fell.
        if self.player.aabb.min.x > self.level.length - self.tuning.completion_margin
            || self.level.victory
        {
            self.phase = GamePhase::LevelComplete;
            self.score += self.tuning.level_bonus;
            self.events.push(GameEvent::LevelCompleted {
                level: self.level_number,
            });
            log::info!("level {} complete, score {}", self.level_number, self.score);
        }

        // Game over: out of lives, or fell out of the world. Checked after
        // completion, so a same-frame death overrides the level clear.
        if self.player.lives == 0 || self.player.aabb.top() > self.tuning.screen_height {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("game over, score {}", self.score);
        }
    }
}
