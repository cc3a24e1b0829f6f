//! Straight-line projectiles and cosmetic explosions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{EXPLOSION_DURATION, EXPLOSION_FRAMES};

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A bullet moving at constant velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub owner: Owner,
}

impl Projectile {
    pub const PLAYER_SIZE: Vec2 = Vec2::new(10.0, 18.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(10.0, 16.0);
    pub const BOSS_SIZE: Vec2 = Vec2::new(12.0, 20.0);

    pub fn new(id: u32, pos: Vec2, vel: Vec2, owner: Owner) -> Self {
        let size = match owner {
            Owner::Player => Self::PLAYER_SIZE,
            Owner::Enemy => Self::ENEMY_SIZE,
        };
        Self {
            id,
            pos,
            vel,
            size,
            owner,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Advance; returns false once the projectile has fully left the field
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        !self.bounds().is_outside_field()
    }
}

/// A short-lived visual burst left behind by a kill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            elapsed: 0.0,
            duration: EXPLOSION_DURATION,
        }
    }

    /// Advance; returns false once the effect has run its course
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed < self.duration
    }

    /// Animation frame index in `0..EXPLOSION_FRAMES`
    pub fn frame(&self) -> u32 {
        let p = (self.elapsed / self.duration).clamp(0.0, 1.0);
        (p * (EXPLOSION_FRAMES - 1) as f32) as u32
    }
}
