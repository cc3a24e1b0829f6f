//! Free-floating hazards and collectibles: meteors and pickups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the (square) meteor
    pub size: f32,
    pub health: i32,
}

impl Meteor {
    /// Roll a new meteor above the field; `wave` speeds up its fall
    pub fn spawn(id: u32, wave: u32, rng: &mut impl Rng) -> Self {
        let size = METEOR_SIZES[rng.random_range(0..METEOR_SIZES.len())];
        let x = rng.random_range(40..=(FIELD_WIDTH as i32 - 40)) as f32;
        let y = -(rng.random_range(90..=280) as f32);
        let vy = rng.random_range(METEOR_SPEED_MIN..=METEOR_SPEED_MAX) as f32
            + wave as f32 * METEOR_SPEED_PER_WAVE;
        let vx = rng.random_range(-METEOR_DRIFT_MAX..=METEOR_DRIFT_MAX) as f32;

        Self {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size,
            health: Self::health_for_size(size),
        }
    }

    /// The largest bucket takes three hits, the others two
    pub fn health_for_size(size: f32) -> i32 {
        if size >= 80.0 { 3 } else { 2 }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Drift and bounce off the side walls; returns false once it has fallen out
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;

        let b = self.bounds();
        if b.left() < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if b.right() > FIELD_WIDTH {
            self.vel.x = -self.vel.x.abs();
        }

        b.top() <= FIELD_HEIGHT + 60.0
    }

    /// Apply damage; returns true when this destroys the meteor
    pub fn damage(&mut self, amount: u32) -> bool {
        self.health -= amount as i32;
        self.health <= 0
    }
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores one health point
    Health,
    /// Raises the weapon tier by one
    WeaponUpgrade,
}

impl PickupKind {
    pub fn size(self) -> Vec2 {
        match self {
            PickupKind::Health => Vec2::new(36.0, 36.0),
            PickupKind::WeaponUpgrade => Vec2::new(38.0, 38.0),
        }
    }

    /// Roll the drop table after a kill; `None` when nothing drops
    pub fn roll_drop(rng: &mut impl Rng) -> Option<Self> {
        if rng.random::<f32>() >= DROP_CHANCE {
            return None;
        }
        if rng.random::<f32>() < DROP_HP_WEIGHT {
            Some(PickupKind::Health)
        } else {
            Some(PickupKind::WeaponUpgrade)
        }
    }
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub fall_speed: f32,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            fall_speed: PICKUP_FALL_SPEED,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.size())
    }

    /// Fall; returns false once well below the field
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos.y += self.fall_speed * dt;
        self.bounds().top() <= FIELD_HEIGHT + 50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_meteor_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(77);
        for wave in 1..6 {
            let m = Meteor::spawn(1, wave, &mut rng);
            assert!(METEOR_SIZES.contains(&m.size));
            assert_eq!(m.health, if m.size >= 80.0 { 3 } else { 2 });
            assert!(m.pos.x >= 40.0 && m.pos.x <= FIELD_WIDTH - 40.0);
            assert!(m.pos.y <= -90.0 && m.pos.y >= -280.0);
            let min_vy = METEOR_SPEED_MIN as f32 + wave as f32 * METEOR_SPEED_PER_WAVE;
            assert!(m.vel.y >= min_vy);
            assert!(m.vel.x.abs() <= METEOR_DRIFT_MAX as f32);
        }
    }

    #[test]
    fn test_meteor_bounces_horizontally_only() {
        let mut m = Meteor {
            id: 1,
            pos: Vec2::new(30.0, 100.0),
            vel: Vec2::new(-100.0, 50.0),
            size: 52.0,
            health: 2,
        };
        assert!(m.update(0.1));
        assert_eq!(m.vel.x, 100.0);
        assert_eq!(m.vel.y, 50.0);

        m.pos.x = FIELD_WIDTH - 10.0;
        m.update(0.01);
        assert_eq!(m.vel.x, -100.0);
    }

    #[test]
    fn test_meteor_falls_out() {
        let mut m = Meteor {
            id: 1,
            pos: Vec2::new(300.0, FIELD_HEIGHT + 80.0),
            vel: Vec2::new(0.0, 200.0),
            size: 66.0,
            health: 2,
        };
        assert!(m.update(0.01));
        assert!(!m.update(0.2));
    }

    #[test]
    fn test_pickup_falls_and_expires() {
        let mut p = Pickup::new(1, PickupKind::Health, Vec2::new(100.0, FIELD_HEIGHT));
        assert!(p.update(0.1));
        assert!(!p.update(1.0));
    }

    #[test]
    fn test_drop_table_hits_both_kinds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let drops: Vec<PickupKind> = (0..2000).filter_map(|_| PickupKind::roll_drop(&mut rng)).collect();
        // Roughly DROP_CHANCE of the rolls produce something
        assert!(drops.len() > 200 && drops.len() < 550);
        assert!(drops.contains(&PickupKind::Health));
        assert!(drops.contains(&PickupKind::WeaponUpgrade));
    }
}
