//! # Game State Mirror
//!
//! The renderer's cached copy of the few state fields that affect drawing.
//!
//! The mirror is overwritten wholesale on every update; there is no merging
//! or reconciliation with earlier snapshots.

use crate::config::VIEWER_INDEX;
use crate::game::{AutoWin, GameSnapshot};
use crate::{is_three_of_spades, Card};
use serde::{Deserialize, Serialize};

/// Last-write-wins copy of the state the renderer reads while drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateMirror {
    /// True during round 1
    pub is_first_round: bool,
    /// Whether the opening play must contain the three of spades
    pub requires_three_spades: bool,
    /// Seat holding the three of spades, if known
    pub three_spades_player: Option<usize>,
    /// Seat whose turn it is
    pub current_player_index: Option<usize>,
    /// Seat that opened the round
    pub first_player_index: Option<usize>,
    /// Current round number
    pub round_number: u32,
    /// Automatic winner, once declared
    pub auto_winner: Option<AutoWin>,
}

impl Default for GameStateMirror {
    fn default() -> Self {
        Self::from(&GameSnapshot::default())
    }
}

impl From<&GameSnapshot> for GameStateMirror {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            is_first_round: snapshot.is_first_round(),
            requires_three_spades: snapshot.requires_three_spades,
            three_spades_player: snapshot.three_spades_player,
            current_player_index: snapshot.current_player_index,
            first_player_index: snapshot.first_player_index,
            round_number: snapshot.round_number,
            auto_winner: snapshot.auto_winner.clone(),
        }
    }
}

impl GameStateMirror {
    /// Replaces every field with the values of `snapshot`.
    pub fn overwrite(&mut self, snapshot: &GameSnapshot) {
        *self = Self::from(snapshot);
    }

    /// Whether the opening-play constraint currently applies to the viewer.
    ///
    /// True in round 1 while the rule is active, it is the viewer's turn, and
    /// the three of spades (when its holder is known) sits in the viewer's hand.
    pub fn viewer_must_open_with_three_spades(&self) -> bool {
        self.is_first_round
            && self.requires_three_spades
            && self.current_player_index == Some(VIEWER_INDEX)
            && self.three_spades_player.map_or(true, |p| p == VIEWER_INDEX)
    }

    /// Decides whether a three of spades gets the pulsing green highlight.
    ///
    /// Cards outside the viewer's hand are always highlighted; cards in the
    /// viewer's hand only while the opening constraint applies to the viewer.
    pub fn should_highlight_three_spades(&self, card: Option<&Card>, is_player_card: bool) -> bool {
        if !is_three_of_spades(card) {
            return false;
        }
        !is_player_card || self.viewer_must_open_with_three_spades()
    }

    /// Whether a player-hand card gets the automatic-win glow, and which one.
    pub fn auto_win_cue(&self, card: &Card) -> Option<AutoWinCue> {
        match card.rank() {
            2 => Some(AutoWinCue::Two),
            3 if self.is_first_round => Some(AutoWinCue::OpeningThree),
            _ => None,
        }
    }
}

/// Ranks flagged as triggering an automatic win elsewhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoWinCue {
    /// Any "2" card, glows gold
    Two,
    /// A "3" during round 1, glows green
    OpeningThree,
}
