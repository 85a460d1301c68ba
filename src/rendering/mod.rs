//! # Rendering Module
//!
//! Card drawing on top of a canvas-like [`Surface`], with a macroquad
//! backend for the demo table and a recording backend for tests.

pub mod card_face;
pub mod display;
pub mod hands;
pub mod layout;
pub mod recorder;
pub mod renderer;
pub mod settings;
pub mod surface;
pub mod ui;

pub use card_face::*;
pub use display::*;
pub use layout::*;
pub use recorder::*;
pub use renderer::*;
pub use settings::*;
pub use surface::*;
pub use ui::*;
