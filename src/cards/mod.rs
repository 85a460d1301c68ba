//! # Cards Module
//!
//! Validated card values and the display helpers the renderer needs.
//!
//! Ranks use the natural encoding 2..=14 (11..=14 are J, Q, K and A). Some
//! producers encode the "2" card as 15 because it is the strongest rank in
//! Tien Len; [`Card::new`] accepts that encoding and normalizes it to 2 so the
//! rest of the renderer sees a single representation.

use crate::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest valid rank value.
pub const MIN_RANK: u8 = 2;

/// Highest natural rank value (the ace).
pub const MAX_RANK: u8 = 14;

/// Legacy rank value used for the "2" card by some state producers.
pub const LEGACY_TWO_RANK: u8 = 15;

const RANK_SYMBOLS: [&str; 13] = [
    "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A",
];

const RANK_NAMES: [&str; 13] = [
    "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Jack", "Queen",
    "King", "Ace",
];

/// Converts a rank value to the glyph printed on the card face.
///
/// # Examples
///
/// ```
/// use tienlen_render::rank_to_symbol;
///
/// assert_eq!(rank_to_symbol(11).unwrap(), "J");
/// assert_eq!(rank_to_symbol(14).unwrap(), "A");
/// assert_eq!(rank_to_symbol(2).unwrap(), "2");
/// assert_eq!(rank_to_symbol(15).unwrap(), "2");
/// assert!(rank_to_symbol(1).is_err());
/// ```
pub fn rank_to_symbol(rank: u8) -> RenderResult<&'static str> {
    let rank = normalize_rank(rank as i64)?;
    Ok(RANK_SYMBOLS[(rank - MIN_RANK) as usize])
}

fn normalize_rank(rank: i64) -> RenderResult<u8> {
    match rank {
        r if r == LEGACY_TWO_RANK as i64 => Ok(MIN_RANK),
        r if (MIN_RANK as i64..=MAX_RANK as i64).contains(&r) => Ok(r as u8),
        r => Err(RenderError::InvalidRank(r)),
    }
}

/// The four French suits, in Tien Len tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "♣")]
    Clubs,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♥")]
    Hearts,
}

impl Suit {
    /// All suits from weakest to strongest.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    /// Glyph drawn on the card face.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
        }
    }

    /// English suit name.
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
        }
    }

    /// Hearts and diamonds are printed in red.
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Tie-break order within a rank (spades lowest).
    pub fn order(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Suit {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "♠" | "s" | "spade" | "spades" => Ok(Suit::Spades),
            "♣" | "c" | "club" | "clubs" => Ok(Suit::Clubs),
            "♦" | "d" | "diamond" | "diamonds" => Ok(Suit::Diamonds),
            "♥" | "h" | "heart" | "hearts" => Ok(Suit::Hearts),
            _ => Err(RenderError::InvalidSuit(s.to_string())),
        }
    }
}

/// Wire shape of a card as sent by state producers, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CardRecord {
    rank: i64,
    suit: String,
    #[serde(default)]
    index: Option<usize>,
}

/// An immutable playing card.
///
/// # Examples
///
/// ```
/// use tienlen_render::{Card, Suit};
///
/// let card = Card::new(3, Suit::Spades).unwrap();
/// assert_eq!(card.to_string(), "3♠");
/// assert_eq!(card.name(), "Three of Spades");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    rank: u8,
    suit: Suit,
    index: Option<usize>,
}

impl TryFrom<CardRecord> for Card {
    type Error = RenderError;

    fn try_from(raw: CardRecord) -> Result<Self, Self::Error> {
        let suit = raw.suit.parse()?;
        let card = Card {
            rank: normalize_rank(raw.rank)?,
            suit,
            index: None,
        };
        Ok(match raw.index {
            Some(index) => card.with_index(index),
            None => card,
        })
    }
}

impl Card {
    /// Creates a card, rejecting ranks outside 2..=14 (15 maps to 2).
    pub fn new(rank: u8, suit: Suit) -> RenderResult<Self> {
        Ok(Self {
            rank: normalize_rank(rank as i64)?,
            suit,
            index: None,
        })
    }

    /// Parses a short label such as `"10♥"`, `"Q♣"` or `"3S"`.
    pub fn parse(label: &str) -> RenderResult<Self> {
        let label = label.trim();
        let split = label
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| RenderError::InvalidSuit(label.to_string()))?;
        let (rank_text, suit_text) = label.split_at(split);
        let suit: Suit = suit_text.parse()?;
        let rank = match rank_text.to_uppercase().as_str() {
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            "A" => 14,
            digits => digits
                .parse::<i64>()
                .map_err(|_| RenderError::InvalidRank(-1))?,
        };
        Ok(Self {
            rank: normalize_rank(rank)?,
            suit,
            index: None,
        })
    }

    /// Returns a copy tagged with a logical position index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Rank glyph for the card face.
    pub fn rank_symbol(&self) -> &'static str {
        RANK_SYMBOLS[(self.rank - MIN_RANK) as usize]
    }

    /// Full English name, e.g. "Queen of Hearts".
    pub fn name(&self) -> String {
        format!(
            "{} of {}",
            RANK_NAMES[(self.rank - MIN_RANK) as usize],
            self.suit.name()
        )
    }

    /// Jacks, queens, kings and aces.
    pub fn is_face_card(&self) -> bool {
        (11..=14).contains(&self.rank)
    }

    /// Tien Len strength of the rank: 3 is weakest (1), 2 is strongest (13).
    pub fn tien_len_value(&self) -> u8 {
        if self.rank == MIN_RANK {
            13
        } else {
            self.rank - 2
        }
    }

    /// Key ordering cards for display: by Tien Len strength, then suit.
    pub fn display_sort_key(&self) -> (u8, u8) {
        (self.tien_len_value(), self.suit.order())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_symbol(), self.suit)
    }
}

/// True iff the card is the three of spades. `None` is never the three of spades.
pub fn is_three_of_spades(card: Option<&Card>) -> bool {
    card.is_some_and(|c| c.rank == 3 && c.suit == Suit::Spades)
}

/// Sorts cards weakest first in Tien Len order, for display only.
pub fn sort_for_display(cards: &mut [Card]) {
    cards.sort_by_key(Card::display_sort_key);
}

/// Builds a standard 52-card deck, suit by suit.
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (MIN_RANK..=MAX_RANK).map(move |rank| Card { rank, suit, index: None }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_symbols() {
        assert_eq!(rank_to_symbol(11).unwrap(), "J");
        assert_eq!(rank_to_symbol(12).unwrap(), "Q");
        assert_eq!(rank_to_symbol(13).unwrap(), "K");
        assert_eq!(rank_to_symbol(14).unwrap(), "A");
        assert_eq!(rank_to_symbol(2).unwrap(), "2");
        for rank in 3..=10u8 {
            assert_eq!(rank_to_symbol(rank).unwrap(), rank.to_string());
        }
    }

    #[test]
    fn test_invalid_ranks_are_rejected() {
        assert!(matches!(rank_to_symbol(0), Err(RenderError::InvalidRank(0))));
        assert!(matches!(rank_to_symbol(16), Err(RenderError::InvalidRank(16))));
        assert!(Card::new(1, Suit::Hearts).is_err());
    }

    #[test]
    fn test_legacy_two_is_normalized() {
        let card = Card::new(15, Suit::Clubs).unwrap();
        assert_eq!(card.rank(), 2);
        assert_eq!(card, Card::new(2, Suit::Clubs).unwrap());
    }

    #[test]
    fn test_three_of_spades_detection() {
        let three_spades = Card::new(3, Suit::Spades).unwrap();
        let three_clubs = Card::new(3, Suit::Clubs).unwrap();
        let four_spades = Card::new(4, Suit::Spades).unwrap();

        assert!(is_three_of_spades(Some(&three_spades)));
        assert!(!is_three_of_spades(Some(&three_clubs)));
        assert!(!is_three_of_spades(Some(&four_spades)));
        assert!(!is_three_of_spades(None));
    }

    #[test]
    fn test_suit_parsing() {
        assert_eq!("♠".parse::<Suit>().unwrap(), Suit::Spades);
        assert_eq!("H".parse::<Suit>().unwrap(), Suit::Hearts);
        assert_eq!("diamonds".parse::<Suit>().unwrap(), Suit::Diamonds);
        assert!("x".parse::<Suit>().is_err());
    }

    #[test]
    fn test_card_label_parsing() {
        assert_eq!(Card::parse("10♥").unwrap().to_string(), "10♥");
        assert_eq!(Card::parse("QC").unwrap().to_string(), "Q♣");
        assert!(Card::parse("Z♠").is_err());
        assert!(Card::parse("").is_err());
    }

    #[test]
    fn test_card_deserializes_from_producer_json() {
        let card: Card = serde_json::from_str(r#"{"rank": 15, "suit": "♦", "index": 4}"#).unwrap();
        assert_eq!(card.rank(), 2);
        assert_eq!(card.suit(), Suit::Diamonds);
        assert_eq!(card.index(), Some(4));

        assert!(serde_json::from_str::<Card>(r#"{"rank": 20, "suit": "♦"}"#).is_err());
        assert!(serde_json::from_str::<Card>(r#"{"rank": 5, "suit": "?"}"#).is_err());
    }

    #[test]
    fn test_display_sort_puts_twos_last() {
        let mut cards = vec![
            Card::new(2, Suit::Spades).unwrap(),
            Card::new(14, Suit::Hearts).unwrap(),
            Card::new(3, Suit::Hearts).unwrap(),
            Card::new(3, Suit::Spades).unwrap(),
        ];
        sort_for_display(&mut cards);
        let labels: Vec<String> = cards.iter().map(Card::to_string).collect();
        assert_eq!(labels, vec!["3♠", "3♥", "A♥", "2♠"]);
    }

    #[test]
    fn test_standard_deck() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);
        let faces = deck.iter().filter(|c| c.is_face_card()).count();
        assert_eq!(faces, 16);
    }
}
