//! Formation enemies and the boss

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::formation::{FormationController, FormationId};
use super::projectile::{Owner, Projectile};
use crate::consts::*;

/// Formation enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Light,
    Heavy,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Light => Vec2::new(68.0, 44.0),
            EnemyKind::Heavy => Vec2::new(74.0, 50.0),
        }
    }

    pub fn max_health(self) -> i32 {
        match self {
            EnemyKind::Light => ENEMY_HP_LIGHT,
            EnemyKind::Heavy => ENEMY_HP_HEAVY,
        }
    }

    /// Base wait between shots, seconds
    pub fn fire_interval(self) -> (f32, f32) {
        match self {
            EnemyKind::Light => (1.35, 2.25),
            EnemyKind::Heavy => (0.85, 1.55),
        }
    }

    /// Downward bullet speed multiplier
    pub fn bullet_speed_mult(self) -> f32 {
        match self {
            EnemyKind::Light => 0.90,
            EnemyKind::Heavy => 1.05,
        }
    }

    pub fn score(self) -> u64 {
        match self {
            EnemyKind::Light => SCORE_LIGHT,
            EnemyKind::Heavy => SCORE_HEAVY,
        }
    }
}

/// An enemy riding a formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationEnemy {
    pub id: u32,
    pub formation: FormationId,
    /// Position inside the formation, fixed for life
    pub base: Vec2,
    /// Current world center
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: i32,
    /// Fire-rate multiplier (higher = shorter waits)
    pub fire_rate: f32,
    pub fire_timer: f32,
}

impl FormationEnemy {
    pub fn new(
        id: u32,
        controller: &FormationController,
        base: Vec2,
        kind: EnemyKind,
        fire_rate: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut enemy = Self {
            id,
            formation: controller.id,
            base,
            pos: controller.place(base),
            kind,
            health: kind.max_health(),
            fire_rate,
            fire_timer: 0.0,
        };
        enemy.reset_fire_timer(rng);
        enemy
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.size())
    }

    fn reset_fire_timer(&mut self, rng: &mut impl Rng) {
        let (lo, hi) = self.kind.fire_interval();
        self.fire_timer = rng.random_range(lo..hi) / self.fire_rate.max(ENEMY_FIRE_RATE_FLOOR);
    }

    /// Tick the fire timer and follow the formation (when it is still the live one)
    pub fn update(&mut self, dt: f32, controller: Option<&FormationController>) {
        self.fire_timer -= dt;
        if let Some(c) = controller.filter(|c| c.id == self.formation) {
            self.pos = c.place(self.base);
        }
    }

    /// Apply damage; returns true when this kills the enemy
    pub fn damage(&mut self, amount: u32) -> bool {
        self.health -= amount as i32;
        self.health <= 0
    }

    /// Fire an aimed shot if the timer has expired
    pub fn try_shoot(
        &mut self,
        next_id: impl FnOnce() -> u32,
        player_pos: Vec2,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        if self.fire_timer > 0.0 {
            return None;
        }

        let dx = player_pos.x - self.pos.x;
        let vx = dx / dx.abs().max(1.0) * BULLET_SPEED_ENEMY * ENEMY_AIM_FACTOR;
        let vy = BULLET_SPEED_ENEMY * self.kind.bullet_speed_mult();
        self.reset_fire_timer(rng);

        let muzzle = Vec2::new(self.pos.x, self.bounds().bottom() - 2.0);
        Some(Projectile::new(next_id(), muzzle, Vec2::new(vx, vy), Owner::Enemy))
    }
}

/// Boss behaviour phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending onto the field
    Entering,
    /// Patrolling side to side
    Fighting,
}

/// The boss ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub phase: BossPhase,
    /// Horizontal patrol velocity
    pub patrol_vx: f32,
    pub fire_timer: f32,
}

impl Boss {
    pub const SIZE: Vec2 = Vec2::new(BOSS_WIDTH, BOSS_HEIGHT);

    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(FIELD_WIDTH / 2.0, BOSS_START_TOP + BOSS_HEIGHT / 2.0),
            health: BOSS_HP,
            max_health: BOSS_HP,
            phase: BossPhase::Entering,
            patrol_vx: BOSS_PATROL_SPEED,
            fire_timer: BOSS_FIRST_VOLLEY,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::SIZE)
    }

    pub fn update(&mut self, dt: f32) {
        match self.phase {
            BossPhase::Entering => {
                self.pos.y += BOSS_ENTRY_SPEED * dt;
                if self.bounds().top() >= BOSS_ENTRY_Y {
                    self.pos.y = BOSS_ENTRY_Y + BOSS_HEIGHT / 2.0;
                    self.phase = BossPhase::Fighting;
                    log::debug!("Boss {} reached the field", self.id);
                }
            }
            BossPhase::Fighting => {
                self.pos.x += self.patrol_vx * dt;
                let half = BOSS_WIDTH / 2.0;
                if self.bounds().left() < BOSS_PATROL_MARGIN {
                    self.pos.x = BOSS_PATROL_MARGIN + half;
                    self.patrol_vx = self.patrol_vx.abs();
                }
                if self.bounds().right() > FIELD_WIDTH - BOSS_PATROL_MARGIN {
                    self.pos.x = FIELD_WIDTH - BOSS_PATROL_MARGIN - half;
                    self.patrol_vx = -self.patrol_vx.abs();
                }
            }
        }

        self.fire_timer -= dt;
    }

    /// Apply damage; returns true when this kills the boss
    pub fn damage(&mut self, amount: u32) -> bool {
        self.health -= amount as i32;
        self.health <= 0
    }

    /// Fire the five-bullet fan if the timer has expired
    pub fn try_shoot(&mut self, mut next_id: impl FnMut() -> u32, rng: &mut impl Rng) -> Option<Vec<Projectile>> {
        if self.fire_timer > 0.0 {
            return None;
        }
        self.fire_timer = rng.random_range(0.55..0.95);

        let muzzle = Vec2::new(self.pos.x, self.bounds().bottom() - 6.0);
        let vy = BULLET_SPEED_ENEMY * BOSS_BULLET_MULT;
        Some(
            BOSS_VOLLEY_SPREAD
                .iter()
                .map(|&vx| {
                    Projectile::new(next_id(), muzzle, Vec2::new(vx, vy), Owner::Enemy)
                        .with_size(Projectile::BOSS_SIZE)
                })
                .collect(),
        )
    }
}
