//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. The module stays free of rendering,
//! audio and platform concerns:
//! - Seeded RNG only (one `Pcg32` per session)
//! - Stable iteration order (spawn order within each collection)
//! - Side effects reported as `GameEvent`s

pub mod collision;
pub mod enemy;
pub mod formation;
pub mod hazard;
pub mod player;
pub mod projectile;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Aabb, clamp_to_field, collide_group};
pub use enemy::{Boss, BossPhase, EnemyKind, FormationEnemy};
pub use formation::{FormationController, FormationId};
pub use hazard::{Meteor, Pickup, PickupKind};
pub use player::Player;
pub use projectile::{Explosion, Owner, Projectile};
pub use starfield::{Star, Starfield};
pub use state::{EntityIds, GameEvent, Outcome, Session};
pub use tick::{TickInput, meteor_interval};
pub use wave::{Pattern, WaveManager};
