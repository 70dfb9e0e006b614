//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed per-frame timestep only
//! - Seeded RNG only
//! - Entity collections owned by `Game`/`Level`, mutated only inside the
//!   update phase, with collect-then-remove for every culling pass
//! - No rendering or platform dependencies

pub mod aabb;
pub mod enemy;
pub mod game;
pub mod level;
pub mod player;
pub mod projectile;

pub use aabb::Aabb;
pub use enemy::{Boss, Enemy};
pub use game::{FrameInput, Game, GameEvent, GamePhase};
pub use level::{Collectible, CollectibleKind, Level, Platform};
pub use player::Player;
pub use projectile::{Projectile, ProjectileOwner};
