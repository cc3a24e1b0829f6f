//! Axis-aligned bounding boxes and group collision helpers
//!
//! Every entity derives its box from its center position and a fixed
//! per-kind size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// An axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap test (touching edges do not collide)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True once no part of the box is inside the field
    pub fn is_outside_field(&self) -> bool {
        self.right() < 0.0 || self.left() > FIELD_WIDTH || self.bottom() < 0.0 || self.top() > FIELD_HEIGHT
    }
}

/// Clamp a center position so that a box of `size` stays fully inside the field
pub fn clamp_to_field(center: Vec2, size: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        center.x.clamp(half.x, FIELD_WIDTH - half.x),
        center.y.clamp(half.y, FIELD_HEIGHT - half.y),
    )
}

/// Resolve a group of targets against a group of projectiles.
///
/// Targets are visited in order; each one claims every still-unclaimed
/// projectile overlapping it. Claimed projectiles are removed from
/// `shots`. Returns the number of projectiles claimed per target.
pub fn collide_group(targets: &[Aabb], shots: &mut Vec<Projectile>) -> Vec<u32> {
    let mut consumed = vec![false; shots.len()];
    let mut hits = vec![0u32; targets.len()];

    for (ti, target) in targets.iter().enumerate() {
        for (si, shot) in shots.iter().enumerate() {
            if !consumed[si] && target.overlaps(&shot.bounds()) {
                consumed[si] = true;
                hits[ti] += 1;
            }
        }
    }

    let mut flags = consumed.into_iter();
    shots.retain(|_| !flags.next().unwrap_or(false));
    hits
}

/// Remove every projectile overlapping `target`; returns how many were removed
pub fn consume_overlapping(target: &Aabb, shots: &mut Vec<Projectile>) -> usize {
    let before = shots.len();
    shots.retain(|s| !target.overlaps(&s.bounds()));
    before - shots.len()
}
