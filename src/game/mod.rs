//! # Game Module
//!
//! The read-only view of game state that influences drawing.
//!
//! The authoritative game model lives outside this crate. It hands the
//! renderer a [`GameSnapshot`] each frame; the renderer keeps a
//! [`GameStateMirror`] of the fields it needs for highlight decisions.

pub mod snapshot;
pub mod state;

pub use snapshot::*;
pub use state::*;
