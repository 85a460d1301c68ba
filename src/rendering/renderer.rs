//! # Card Renderer Façade
//!
//! The object the controller talks to once per frame.

use crate::game::{GameSnapshot, GameStateMirror};
use crate::rendering::settings::RenderConfig;
use crate::utils::{Clock, SystemClock};
use crate::Card;
use log::debug;

/// Stateless drawing routines plus a mirror of the game state.
///
/// Apart from the mirror, the renderer keeps no state between frames: hands
/// are laid out from scratch on every call and animations are owned by the
/// caller. All wall-clock reads go through the renderer's [`Clock`].
///
/// # Examples
///
/// ```
/// use tienlen_render::{Card, CardRenderer, CardStyle, RecordingSurface, RenderConfig, Suit};
///
/// let renderer = CardRenderer::new(RenderConfig::default());
/// let mut surface = RecordingSurface::new();
/// let card = Card::new(12, Suit::Hearts).unwrap();
/// let rect = renderer.draw_card_face(&mut surface, &card, 100.0, 400.0, CardStyle::player());
/// assert_eq!((rect.width, rect.height), (72.0, 101.0));
/// ```
#[derive(Debug)]
pub struct CardRenderer<C: Clock = SystemClock> {
    config: RenderConfig,
    clock: C,
    state: GameStateMirror,
}

impl CardRenderer<SystemClock> {
    /// Creates a renderer reading the system clock.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> CardRenderer<C> {
    /// Creates a renderer with an explicit time source.
    pub fn with_clock(config: RenderConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            state: GameStateMirror::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current mirror of the game state.
    pub fn game_state(&self) -> &GameStateMirror {
        &self.state
    }

    /// Overwrites the mirror with a fresh snapshot.
    pub fn update_game_state(&mut self, snapshot: &GameSnapshot) {
        let previous = self.state.requires_three_spades;
        self.state.overwrite(snapshot);
        if previous != self.state.requires_three_spades {
            debug!(
                "Opening three-of-spades rule now {} (round {})",
                if self.state.requires_three_spades { "active" } else { "inactive" },
                self.state.round_number
            );
        }
    }

    /// See [`GameStateMirror::should_highlight_three_spades`].
    pub fn should_highlight_three_spades(&self, card: Option<&Card>, is_player_card: bool) -> bool {
        self.state.should_highlight_three_spades(card, is_player_card)
    }

    pub(crate) fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;
    use crate::Suit;
    use serde_json::json;

    #[test]
    fn test_update_game_state_replaces_mirror() {
        let mut renderer = CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0));
        let three = Card::new(3, Suit::Spades).unwrap();

        renderer.update_game_state(&GameSnapshot::from_loose_json(&json!({
            "round_number": 1,
            "rules_info": { "requires_three_spades": true },
            "current_player_index": 0,
        })));
        assert!(renderer.should_highlight_three_spades(Some(&three), true));

        renderer.update_game_state(&GameSnapshot::from_loose_json(&json!({
            "round_number": 1,
            "rules_info": { "requires_three_spades": true },
            "current_player_index": 1,
        })));
        assert!(!renderer.should_highlight_three_spades(Some(&three), true));
        assert_eq!(renderer.game_state().current_player_index, Some(1));
    }
}
