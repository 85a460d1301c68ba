//! # State Snapshot Adapter
//!
//! Normalizes the loosely shaped state records sent by the different game
//! servers into a single [`GameSnapshot`].
//!
//! Producers disagree on naming: some send snake_case, some camelCase, some
//! nest the opening-rule flags under `rules_info`/`rulesInfo`/`rules` and
//! others keep them flat. All of that is absorbed here so the renderer only
//! ever sees the normalized shape.

use crate::RenderResult;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An automatic win announced by the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoWin {
    /// Seat index of the winner, when the producer sent one
    pub player_index: Option<usize>,
    /// Display name of the winner
    pub player_name: String,
    /// Human readable reason, e.g. "Four 2s"
    pub reason: String,
}

/// Normalized game state consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Round number, starting at 1
    pub round_number: u32,
    /// Whether the opening play must contain the three of spades
    pub requires_three_spades: bool,
    /// Seat holding the three of spades, if known
    pub three_spades_player: Option<usize>,
    /// Seat whose turn it is
    pub current_player_index: Option<usize>,
    /// Seat that opened the round
    pub first_player_index: Option<usize>,
    /// Display name of the seat whose turn it is
    pub current_player_name: Option<String>,
    /// Automatic winner, once declared
    pub auto_winner: Option<AutoWin>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            round_number: 1,
            requires_three_spades: false,
            three_spades_player: None,
            current_player_index: None,
            first_player_index: None,
            current_player_name: None,
            auto_winner: None,
        }
    }
}

const RULE_CONTAINERS: [&str; 3] = ["rules_info", "rulesInfo", "rules"];
const INFO_CONTAINERS: [&str; 3] = ["game_info", "gameInfo", "game"];

impl GameSnapshot {
    /// Parses a JSON document and normalizes it.
    pub fn from_json_str(text: &str) -> RenderResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_loose_json(&value))
    }

    /// Builds a snapshot from a loosely shaped state record.
    ///
    /// Missing or mistyped fields fall back to defaults (round 1, no opening
    /// rule, no current player) rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tienlen_render::GameSnapshot;
    ///
    /// let snapshot = GameSnapshot::from_loose_json(&json!({
    ///     "round_number": 1,
    ///     "rules_info": { "requires_three_spades": true },
    ///     "current_player_index": 0,
    /// }));
    /// assert!(snapshot.requires_three_spades);
    /// assert_eq!(snapshot.current_player_index, Some(0));
    /// ```
    pub fn from_loose_json(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(root) = value.as_object() else {
            debug!("State snapshot is not an object; using defaults");
            return defaults;
        };

        let rules = RULE_CONTAINERS
            .iter()
            .find_map(|key| root.get(*key).and_then(Value::as_object));
        let info = INFO_CONTAINERS
            .iter()
            .find_map(|key| root.get(*key).and_then(Value::as_object));

        let round_number = lookup_u64(root, &["round_number", "roundNumber", "round"])
            .or_else(|| info.and_then(|i| lookup_u64(i, &["round", "round_number", "roundNumber"])))
            .map(|r| r.max(1) as u32)
            .unwrap_or_else(|| {
                debug!("State snapshot has no round number; assuming round 1");
                defaults.round_number
            });

        let rule_keys = ["requires_three_spades", "requiresThreeSpades"];
        let requires_three_spades = rules
            .and_then(|r| lookup_bool(r, &rule_keys))
            .or_else(|| lookup_bool(root, &rule_keys))
            .unwrap_or(false);

        let holder_keys = ["three_spades_player", "threeSpadesPlayer"];
        let three_spades_player = rules
            .and_then(|r| lookup_index(r, &holder_keys))
            .or_else(|| lookup_index(root, &holder_keys));

        let current_player_index = lookup_index(
            root,
            &["current_player_index", "currentPlayerIndex", "current_player"],
        );
        let first_player_index =
            lookup_index(root, &["first_player_index", "firstPlayerIndex", "first_player"]);

        let current_player_name = lookup_str(
            root,
            &["current_player_name", "currentPlayerName", "current_player"],
        )
        .or_else(|| info.and_then(|i| lookup_str(i, &["current_player", "currentPlayer"])));

        let auto_winner = ["auto_winner", "autoWinner", "automatic_winner", "automaticWinner"]
            .iter()
            .find_map(|key| root.get(*key))
            .and_then(parse_auto_win);

        Self {
            round_number,
            requires_three_spades,
            three_spades_player,
            current_player_index,
            first_player_index,
            current_player_name,
            auto_winner,
        }
    }

    /// True while the first round of a game is in progress.
    pub fn is_first_round(&self) -> bool {
        self.round_number <= 1
    }
}

fn lookup_u64(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_u64))
}

fn lookup_index(map: &Map<String, Value>, keys: &[&str]) -> Option<usize> {
    lookup_u64(map, keys).map(|v| v as usize)
}

fn lookup_bool(map: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_bool))
}

fn lookup_str(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Accepts `null`, a bare winner name, or an object with name/index/reason.
fn parse_auto_win(value: &Value) -> Option<AutoWin> {
    match value {
        Value::String(name) if !name.is_empty() => Some(AutoWin {
            player_index: None,
            player_name: name.clone(),
            reason: String::new(),
        }),
        Value::Object(map) => {
            let player_index = lookup_index(map, &["player_index", "playerIndex", "index"]);
            let player_name = lookup_str(map, &["player_name", "playerName", "name", "player"])
                .or_else(|| player_index.map(|i| format!("Player {}", i + 1)))?;
            let reason = lookup_str(map, &["reason", "win_reason", "winReason"]).unwrap_or_default();
            Some(AutoWin {
                player_index,
                player_name,
                reason,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case_nested_rules() {
        let snapshot = GameSnapshot::from_loose_json(&json!({
            "round_number": 1,
            "rules_info": { "requires_three_spades": true, "three_spades_player": 2 },
            "current_player_index": 2,
            "first_player_index": 2,
        }));
        assert_eq!(snapshot.round_number, 1);
        assert!(snapshot.requires_three_spades);
        assert_eq!(snapshot.three_spades_player, Some(2));
        assert_eq!(snapshot.current_player_index, Some(2));
        assert_eq!(snapshot.first_player_index, Some(2));
    }

    #[test]
    fn test_camel_case_flat_fields() {
        let snapshot = GameSnapshot::from_loose_json(&json!({
            "roundNumber": 3,
            "requiresThreeSpades": false,
            "currentPlayerIndex": 1,
            "currentPlayerName": "Bot 1",
        }));
        assert_eq!(snapshot.round_number, 3);
        assert!(!snapshot.requires_three_spades);
        assert_eq!(snapshot.current_player_index, Some(1));
        assert_eq!(snapshot.current_player_name.as_deref(), Some("Bot 1"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        assert_eq!(GameSnapshot::from_loose_json(&json!({})), GameSnapshot::default());
        assert_eq!(GameSnapshot::from_loose_json(&json!(42)), GameSnapshot::default());
    }

    #[test]
    fn test_round_from_game_info() {
        let snapshot = GameSnapshot::from_loose_json(&json!({
            "game_info": { "round": 4, "current_player": "You" },
        }));
        assert_eq!(snapshot.round_number, 4);
        assert!(!snapshot.is_first_round());
        assert_eq!(snapshot.current_player_name.as_deref(), Some("You"));
    }

    #[test]
    fn test_current_player_as_name_or_index() {
        let by_name = GameSnapshot::from_loose_json(&json!({ "current_player": "Bot 2" }));
        assert_eq!(by_name.current_player_index, None);
        assert_eq!(by_name.current_player_name.as_deref(), Some("Bot 2"));

        let by_index = GameSnapshot::from_loose_json(&json!({ "current_player": 3 }));
        assert_eq!(by_index.current_player_index, Some(3));
    }

    #[test]
    fn test_auto_winner_shapes() {
        let named = GameSnapshot::from_loose_json(&json!({ "auto_winner": "Bot 3" }));
        assert_eq!(named.auto_winner.unwrap().player_name, "Bot 3");

        let full = GameSnapshot::from_loose_json(&json!({
            "autoWinner": { "playerIndex": 1, "reason": "Four 2s" }
        }));
        let winner = full.auto_winner.unwrap();
        assert_eq!(winner.player_index, Some(1));
        assert_eq!(winner.player_name, "Player 2");
        assert_eq!(winner.reason, "Four 2s");

        let none = GameSnapshot::from_loose_json(&json!({ "auto_winner": null }));
        assert!(none.auto_winner.is_none());
    }

    #[test]
    fn test_from_json_str_reports_syntax_errors() {
        assert!(GameSnapshot::from_json_str("{not json").is_err());
        assert!(GameSnapshot::from_json_str(r#"{"round": 2}"#).is_ok());
    }
}
