//! Rendering module
//!
//! The simulation is turned into a flat draw list plus HUD values; sinks
//! decide how (or whether) to put them on screen.

pub mod frame;
pub mod headless;

pub use frame::{DrawItem, EntityKind, Frame, Hud, Overlay, build_frame};
pub use headless::{CaptureSink, HeadlessRenderer, RenderSink};
