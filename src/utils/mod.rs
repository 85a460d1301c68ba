//! # Utilities Module
//!
//! Easing curves, pulse math and the wall-clock abstraction used by the renderer.

pub mod clock;
pub mod math;

pub use clock::*;
pub use math::*;
