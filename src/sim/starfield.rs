//! Scrolling background stars (visual only)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Default number of stars
pub const STAR_COUNT: usize = 170;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Grey level; brighter stars also fall faster
    pub brightness: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..FIELD_WIDTH),
                    rng.random_range(0.0..FIELD_HEIGHT),
                ),
                brightness: rng.random_range(40..=220),
            })
            .collect();
        Self { stars }
    }

    /// Scroll down at `speed`; stars leaving the bottom re-enter above the top
    pub fn update(&mut self, dt: f32, speed: f32, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos.y += (speed + star.brightness as f32) * dt * 0.35;
            if star.pos.y > FIELD_HEIGHT {
                star.pos = Vec2::new(rng.random_range(0.0..FIELD_WIDTH), -rng.random_range(0.0..80.0));
                star.brightness = rng.random_range(40..=220);
            }
        }
    }
}
