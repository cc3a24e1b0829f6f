//! Input latching and scripted input

use crate::sim::{Session, TickInput};

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Boost,
    Pause,
    Confirm,
    Cancel,
    Quit,
}

/// Accumulates host key events between frames.
///
/// Movement, fire and boost follow the held state; pause, confirm, cancel
/// and quit fire once per press and are cleared by `snapshot`.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: TickInput,
}

impl InputState {
    pub fn set(&mut self, action: Action, down: bool) {
        let h = &mut self.held;
        match action {
            Action::Up => h.move_up = down,
            Action::Down => h.move_down = down,
            Action::Left => h.move_left = down,
            Action::Right => h.move_right = down,
            Action::Fire => h.fire = down,
            Action::Boost => h.boost = down,
            // One-shot: only the press registers
            Action::Pause => h.pause |= down,
            Action::Confirm => h.confirm |= down,
            Action::Cancel => h.cancel |= down,
            Action::Quit => h.quit |= down,
        }
    }

    /// Input for this frame; clears one-shot inputs
    pub fn snapshot(&mut self) -> TickInput {
        let input = self.held.clone();
        self.held.pause = false;
        self.held.confirm = false;
        self.held.cancel = false;
        self.held.quit = false;
        input
    }
}

/// Simple pilot for headless runs: holds fire, tracks the lowest enemy
/// (or the boss) and sidesteps shots about to land.
#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    const DEADZONE: f32 = 8.0;
    const DODGE_RANGE: f32 = 140.0;
    const DODGE_WIDTH: f32 = 48.0;

    pub fn drive(&self, session: &Session) -> TickInput {
        let me = session.player.pos;

        let target_x = session
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x)
            .or_else(|| session.boss().map(|b| b.pos.x))
            .unwrap_or(me.x);

        let threat = session.enemy_shots.iter().find(|s| {
            let above = me.y - s.pos.y;
            above > 0.0 && above < Self::DODGE_RANGE && (s.pos.x - me.x).abs() < Self::DODGE_WIDTH
        });

        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };
        if let Some(shot) = threat {
            // Step away from the incoming shot
            if shot.pos.x >= me.x {
                input.move_left = true;
            } else {
                input.move_right = true;
            }
            input.boost = session.player.energy > 40.0;
        } else if target_x < me.x - Self::DEADZONE {
            input.move_left = true;
        } else if target_x > me.x + Self::DEADZONE {
            input.move_right = true;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Owner, Projectile};
    use glam::Vec2;

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut state = InputState::default();
        state.set(Action::Pause, true);
        state.set(Action::Fire, true);
        state.set(Action::Pause, false);

        let first = state.snapshot();
        assert!(first.pause && first.fire);
        let second = state.snapshot();
        assert!(!second.pause && second.fire);

        state.set(Action::Fire, false);
        assert!(!state.snapshot().fire);
    }

    #[test]
    fn test_autopilot_fires_and_tracks() {
        let mut session = Session::new(21, 0);
        session.player.pos.x = 100.0;
        let input = Autopilot.drive(&session);
        assert!(input.fire);
        assert!(input.move_right);
    }

    #[test]
    fn test_autopilot_dodges() {
        let mut session = Session::new(21, 0);
        let me = session.player.pos;
        session
            .enemy_shots
            .push(Projectile::new(1, me + Vec2::new(10.0, -60.0), Vec2::ZERO, Owner::Enemy));
        let input = Autopilot.drive(&session);
        assert!(input.move_left);
    }
}
