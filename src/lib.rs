//! # Tien Len Card Renderer
//!
//! Drawing routines for a Tien Len (Vietnamese climbing card game) table.
//!
//! ## Architecture Overview
//!
//! The crate is a thin presentation layer. An external controller owns the
//! drawing surface, the authoritative game state and the animation list; each
//! frame it hands a normalized state snapshot to the [`CardRenderer`] and asks
//! it to draw the visual regions of the table:
//!
//! - **Cards**: validated card values, rank symbols and display ordering
//! - **Game**: the normalized state snapshot and the renderer's mirror of it
//! - **Rendering**: the drawing surface abstraction, layout geometry and the
//!   draw routines for cards, hands, the play area and overlays
//! - **Animation**: data-only animation values advanced by wall-clock time
//!
//! Every layout computation is a pure function of its inputs, so the
//! returned [`CardRect`]s can be used directly for hit-testing.

pub mod animation;
pub mod cards;
pub mod game;
pub mod rendering;
pub mod scenes;
pub mod utils;

pub use animation::*;
pub use cards::*;
pub use game::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the card renderer.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Card rank outside of 2..=14 (15 is accepted as the legacy "2")
    #[error("Invalid card rank: {0}")]
    InvalidRank(i64),

    /// Suit text that does not name one of the four suits
    #[error("Invalid card suit: {0:?}")]
    InvalidSuit(String),

    /// Render configuration is inconsistent
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the renderer.
pub type RenderResult<T> = Result<T, RenderError>;

/// Version information for the renderer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed table constants.
pub mod config {
    /// Seat index of the viewing (human) player
    pub const VIEWER_INDEX: usize = 0;

    /// Player-hand card width in pixels
    pub const PLAYER_CARD_WIDTH: f32 = 72.0;

    /// Player-hand card height in pixels
    pub const PLAYER_CARD_HEIGHT: f32 = 101.0;

    /// Table and bot card width in pixels
    pub const TABLE_CARD_WIDTH: f32 = 60.0;

    /// Table and bot card height in pixels
    pub const TABLE_CARD_HEIGHT: f32 = 84.0;

    /// Horizontal margin kept free around the player's hand
    pub const HAND_MARGIN: f32 = 60.0;
}
