//! Platform layer
//!
//! Handles the host-facing side of the loop:
//! - Frame timing and pacing
//! - Input latching (level vs edge-triggered)
//! - Scripted input for headless runs

pub mod input;
pub mod time;

pub use input::{Action, Autopilot, InputState};
pub use time::FrameClock;
