//! Card token parsing and formatting.
//!
//! A token is the rank character followed by the suit character:
//! ranks `A 2 3 4 5 6 7 J N K`, suits `O` (coins), `C` (cups),
//! `S` (swords), `B` (clubs). Example: `KO` is the King of Coins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Rank {
    pub const fn token(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Jack => 'J',
            Rank::Knight => 'N',
            Rank::King => 'K',
        }
    }

    fn from_token(ch: char) -> Option<Self> {
        Rank::ALL.into_iter().find(|r| r.token() == ch)
    }
}

impl Suit {
    pub const fn token(self) -> char {
        match self {
            Suit::Coins => 'O',
            Suit::Cups => 'C',
            Suit::Swords => 'S',
            Suit::Clubs => 'B',
        }
    }

    fn from_token(ch: char) -> Option<Self> {
        Suit::ALL.into_iter().find(|s| s.token() == ch)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.token())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("bad card token: {s:?}"),
            ));
        };
        let rank = Rank::from_token(rank_ch).ok_or_else(|| {
            DomainError::validation(ValidationKind::ParseCard, format!("bad rank in {s:?}"))
        })?;
        let suit = Suit::from_token(suit_ch).ok_or_else(|| {
            DomainError::validation(ValidationKind::ParseCard, format!("bad suit in {s:?}"))
        })?;
        Ok(Card { suit, rank })
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: DomainError| serde::de::Error::custom(e.to_string()))
    }
}

/// Parse a list of tokens, failing on the first bad one.
pub fn parse_cards(tokens: &[&str]) -> Result<Vec<Card>, DomainError> {
    tokens.iter().map(|t| t.parse()).collect()
}

/// Render a hand as space-separated tokens (for logs and rationale text).
pub fn format_hand(hand: &[Card]) -> String {
    hand.iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
