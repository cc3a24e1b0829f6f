//! The player's ship: movement, energy, weapon tiers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, clamp_to_field};
use super::projectile::{Owner, Projectile};
use super::tick::TickInput;
use crate::consts::*;

/// Shot fan per weapon tier: (lateral offset, horizontal velocity)
const TIER_PATTERNS: [&[(f32, f32)]; WEAPON_TIER_MAX as usize] = [
    &[(0.0, 0.0)],
    &[(-14.0, -160.0), (14.0, 160.0)],
    &[(-18.0, -190.0), (0.0, 0.0), (18.0, 190.0)],
    &[(-22.0, -220.0), (-8.0, -70.0), (8.0, 70.0), (22.0, 220.0)],
];

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub energy: f32,
    /// Weapon tier, 1..=WEAPON_TIER_MAX
    pub weapon_tier: u8,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_SPAWN_LIFT),
            health: PLAYER_HP_MAX,
            max_health: PLAYER_HP_MAX,
            energy: ENERGY_MAX,
            weapon_tier: 1,
            fire_cooldown: 0.0,
        }
    }
}

impl Player {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::SIZE)
    }

    /// Regenerate energy, apply boost, move, clamp to the field and tick the cooldown
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        let dt = dt.max(0.0);
        self.energy = (self.energy + ENERGY_REGEN_PER_SEC * dt).min(ENERGY_MAX);

        let mut speed = PLAYER_SPEED;
        if input.boost && self.energy > 0.0 {
            speed *= BOOST_MULT;
            self.energy = (self.energy - ENERGY_BOOST_COST_PER_SEC * dt).max(0.0);
        }

        let mut dir = Vec2::ZERO;
        if input.move_up {
            dir.y -= 1.0;
        }
        if input.move_down {
            dir.y += 1.0;
        }
        if input.move_left {
            dir.x -= 1.0;
        }
        if input.move_right {
            dir.x += 1.0;
        }
        if dir.x != 0.0 && dir.y != 0.0 {
            speed *= std::f32::consts::FRAC_1_SQRT_2;
        }

        self.pos = clamp_to_field(self.pos + dir * speed * dt, Self::SIZE);
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    /// Energy needed for one trigger pull at the current tier
    pub fn shot_cost(&self) -> f32 {
        ENERGY_SHOT_COST * self.weapon_tier as f32
    }

    pub fn can_shoot(&self) -> bool {
        self.fire_cooldown <= 0.0 && self.energy >= self.shot_cost()
    }

    /// Fire the current tier's fan. Callers check `can_shoot` first.
    pub fn shoot(&mut self, mut next_id: impl FnMut() -> u32) -> Vec<Projectile> {
        self.fire_cooldown = PLAYER_FIRE_COOLDOWN;
        self.energy = (self.energy - self.shot_cost()).max(0.0);

        let muzzle_y = self.bounds().top() + 2.0;
        let tier = self.weapon_tier.clamp(1, WEAPON_TIER_MAX) as usize;
        TIER_PATTERNS[tier - 1]
            .iter()
            .map(|&(x_off, vx)| {
                Projectile::new(
                    next_id(),
                    Vec2::new(self.pos.x + x_off, muzzle_y),
                    Vec2::new(vx, -BULLET_SPEED_PLAYER),
                    Owner::Player,
                )
            })
            .collect()
    }

    /// Take `amount` hits; health floors at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn upgrade_weapon(&mut self) {
        self.weapon_tier = (self.weapon_tier + 1).min(WEAPON_TIER_MAX);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Energy as a fraction of the maximum, for the HUD bar
    pub fn energy_fraction(&self) -> f32 {
        (self.energy / ENERGY_MAX).clamp(0.0, 1.0)
    }
}
