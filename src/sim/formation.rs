//! Shared sweep motion for a grid formation
//!
//! The controller owns only an offset; enemies keep their own base
//! position and look the controller up by `FormationId` every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FIELD_WIDTH;

/// Handle from an enemy to the formation that drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormationId(pub u32);

/// Bouncing horizontal sweep with a drop at each wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationController {
    pub id: FormationId,
    /// World offset added to every member's base position
    pub offset: Vec2,
    /// +1 sweeping right, -1 sweeping left
    pub direction: f32,
    /// Leftmost member x in local space
    pub left_extent: f32,
    /// Rightmost member x in local space
    pub right_extent: f32,
}

impl FormationController {
    pub fn new(id: FormationId, left_extent: f32, right_extent: f32, start_y: f32) -> Self {
        Self {
            id,
            offset: Vec2::new(0.0, start_y),
            direction: 1.0,
            left_extent,
            right_extent,
        }
    }

    /// World-space x of the leftmost and rightmost members
    pub fn world_span(&self) -> (f32, f32) {
        (
            self.offset.x + self.left_extent,
            self.offset.x + self.right_extent,
        )
    }

    /// World position of a member with the given base position
    pub fn place(&self, base: Vec2) -> Vec2 {
        base + self.offset
    }

    pub fn update(&mut self, dt: f32, speed: f32, drop: f32, margin: f32) {
        self.offset.x += self.direction * speed * dt;

        let (_, right) = self.world_span();
        if right > FIELD_WIDTH - margin {
            self.offset.x -= right - (FIELD_WIDTH - margin);
            self.direction = -self.direction;
            self.offset.y += drop;
        }

        let (left, _) = self.world_span();
        if left < margin {
            self.offset.x += margin - left;
            self.direction = -self.direction;
            self.offset.y += drop;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FORMATION_DROP, FORMATION_MARGIN};
    use proptest::prelude::*;

    #[test]
    fn test_bounce_on_right_wall() {
        // Members span 200..1200 in local space
        let mut f = FormationController::new(FormationId(1), 200.0, 1200.0, 70.0);
        f.update(1.0, 100.0, FORMATION_DROP, FORMATION_MARGIN);

        let (_, right) = f.world_span();
        assert!((right - (FIELD_WIDTH - FORMATION_MARGIN)).abs() < 0.001);
        assert_eq!(f.direction, -1.0);
        assert_eq!(f.offset.y, 70.0 + FORMATION_DROP);
    }

    #[test]
    fn test_bounce_on_left_wall() {
        let mut f = FormationController::new(FormationId(1), 60.0, 400.0, 0.0);
        f.direction = -1.0;
        f.update(1.0, 100.0, FORMATION_DROP, FORMATION_MARGIN);

        let (left, _) = f.world_span();
        assert!((left - FORMATION_MARGIN).abs() < 0.001);
        assert_eq!(f.direction, 1.0);
        assert_eq!(f.offset.y, FORMATION_DROP);
    }

    #[test]
    fn test_no_drop_mid_field() {
        let mut f = FormationController::new(FormationId(1), 400.0, 800.0, 70.0);
        f.update(0.5, 80.0, FORMATION_DROP, FORMATION_MARGIN);
        assert_eq!(f.offset, Vec2::new(40.0, 70.0));
        assert_eq!(f.direction, 1.0);
    }

    #[test]
    fn test_place_adds_offset() {
        let mut f = FormationController::new(FormationId(7), 0.0, 10.0, 70.0);
        f.offset.x = 12.0;
        assert_eq!(f.place(Vec2::new(100.0, 5.0)), Vec2::new(112.0, 75.0));
    }

    proptest! {
        #[test]
        fn prop_span_stays_inside_margins(
            left in 100.0f32..500.0,
            width in 0.0f32..700.0,
            speed in 10.0f32..400.0,
            dts in prop::collection::vec(0.0f32..0.1, 1..200),
        ) {
            let mut f = FormationController::new(FormationId(1), left, left + width, 70.0);
            let mut last_y = f.offset.y;
            for dt in dts {
                f.update(dt, speed, FORMATION_DROP, FORMATION_MARGIN);
                let (l, r) = f.world_span();
                prop_assert!(l >= FORMATION_MARGIN - 0.01);
                prop_assert!(r <= FIELD_WIDTH - FORMATION_MARGIN + 0.01);
                prop_assert!(f.offset.y >= last_y);
                last_y = f.offset.y;
            }
        }
    }
}
