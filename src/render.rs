//! Read-only scene snapshots for an external renderer
//!
//! Built after the update phase completes; nothing here mutates the
//! simulation. Sprites carry the entity's world-space box, an identity
//! tag, and the decoration hints a renderer needs (facing, blink phase,
//! health bars). World x minus [`Scene::scroll_x`] gives screen x.

use crate::sim::{Aabb, CollectibleKind, Game, GamePhase};

/// What a sprite is, plus its variant-specific decoration hints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    Player { facing: f32, flashing: bool },
    Enemy { health_ratio: f32 },
    Boss { health_ratio: f32 },
    Platform,
    Collectible(CollectibleKind),
    PlayerBolt,
    EnemyBolt,
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub aabb: Aabb,
    pub kind: SpriteKind,
}

/// Heads-up display values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health_ratio: f32,
    pub lives: u32,
    pub score: u64,
    pub level: u32,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub phase: GamePhase,
    pub score: u64,
    pub scroll_x: f32,
    /// Back-to-front draw order
    pub sprites: Vec<Sprite>,
    /// Present only while the world is visible
    pub hud: Option<Hud>,
}

/// Fraction of health remaining, guarded against a zero maximum.
pub fn health_ratio(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    health.max(0) as f32 / max_health as f32
}

/// Snapshot the current frame. The world is drawn while playing and on
/// the level-complete overlay; the other phases are text-only screens
/// the presentation layer composes from `phase` and `score`.
pub fn scene(game: &Game) -> Scene {
    let mut sprites = Vec::new();
    let mut hud = None;

    if matches!(game.phase, GamePhase::Playing | GamePhase::LevelComplete) {
        for platform in &game.level.platforms {
            sprites.push(Sprite {
                aabb: platform.aabb,
                kind: SpriteKind::Platform,
            });
        }
        for item in &game.level.collectibles {
            sprites.push(Sprite {
                aabb: item.aabb,
                kind: SpriteKind::Collectible(item.kind),
            });
        }
        for enemy in &game.level.enemies {
            sprites.push(Sprite {
                aabb: enemy.aabb,
                kind: SpriteKind::Enemy {
                    health_ratio: health_ratio(enemy.health, enemy.max_health),
                },
            });
        }
        if let Some(boss) = &game.level.boss {
            sprites.push(Sprite {
                aabb: boss.aabb,
                kind: SpriteKind::Boss {
                    health_ratio: health_ratio(boss.health, boss.max_health),
                },
            });
        }
        for bolt in &game.projectiles {
            sprites.push(Sprite {
                aabb: bolt.aabb,
                kind: SpriteKind::PlayerBolt,
            });
        }
        for bolt in &game.enemy_projectiles {
            sprites.push(Sprite {
                aabb: bolt.aabb,
                kind: SpriteKind::EnemyBolt,
            });
        }
        sprites.push(Sprite {
            aabb: game.player.aabb,
            kind: SpriteKind::Player {
                facing: game.player.direction,
                flashing: game.player.flashing,
            },
        });

        hud = Some(Hud {
            health_ratio: health_ratio(game.player.health, game.player.max_health),
            lives: game.player.lives,
            score: game.score,
            level: game.level_number,
        });
    }

    Scene {
        phase: game.phase,
        score: game.score,
        scroll_x: game.scroll_x,
        sprites,
        hud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FrameInput;
    use crate::tuning::Tuning;

    #[test]
    fn ratio_is_clamped_and_guarded() {
        assert_eq!(health_ratio(50, 100), 0.5);
        assert_eq!(health_ratio(-20, 100), 0.0);
        assert_eq!(health_ratio(100, 100), 1.0);
        assert_eq!(health_ratio(100, 0), 0.0);
    }

    #[test]
    fn menu_scene_has_no_world() {
        let game = Game::new(Tuning::default(), 1);
        let scene = scene(&game);
        assert_eq!(scene.phase, GamePhase::Menu);
        assert!(scene.sprites.is_empty());
        assert!(scene.hud.is_none());
    }

    #[test]
    fn playing_scene_draws_the_player_last_with_hints() {
        let mut game = Game::new(Tuning::default(), 1);
        game.update(&FrameInput {
            confirm: true,
            ..FrameInput::default()
        });

        let scene = scene(&game);
        assert!(!scene.sprites.is_empty());
        let last = scene.sprites.last().unwrap();
        assert_eq!(
            last.kind,
            SpriteKind::Player {
                facing: 1.0,
                flashing: false
            }
        );

        let hud = scene.hud.unwrap();
        assert_eq!(hud.health_ratio, 1.0);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.level, 1);
    }

    #[test]
    fn enemy_sprites_carry_their_health_bars() {
        let mut game = Game::new(Tuning::default(), 1);
        game.update(&FrameInput {
            confirm: true,
            ..FrameInput::default()
        });
        let mut enemy = crate::sim::Enemy::new(glam::Vec2::new(700.0, 600.0), &game.tuning);
        enemy.take_damage(25);
        game.level.enemies.push(enemy);

        let scene = scene(&game);
        let ratios: Vec<f32> = scene
            .sprites
            .iter()
            .filter_map(|s| match s.kind {
                SpriteKind::Enemy { health_ratio } => Some(health_ratio),
                _ => None,
            })
            .collect();
        assert!(!ratios.is_empty());
        assert!(ratios.iter().any(|&r| r == 0.5));
    }
}
