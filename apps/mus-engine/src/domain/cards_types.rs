//! Core card-related types: Card, Rank, Suit

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Suit {
    Coins,
    Cups,
    Swords,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Coins, Suit::Cups, Suit::Swords, Suit::Clubs];
}

/// The ten ranks of the 40-card Spanish deck.
///
/// Point values are not monotonic in declaration order: Ace and Two share
/// value 1, Three and King share value 12.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Jack,
    Knight,
    King,
}

impl Rank {
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Jack,
        Rank::Knight,
        Rank::King,
    ];

    /// Point value used for grande, chica and pares comparisons.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace | Rank::Two => 1,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Jack => 10,
            Rank::Knight => 11,
            Rank::Three | Rank::King => 12,
        }
    }

    /// Value counted towards juego/punto. Face ranks count 10.
    pub const fn game_value(self) -> u8 {
        let v = self.value();
        if v >= 10 {
            10
        } else {
            v
        }
    }

    /// Highest-value ranks (King, Three).
    pub const fn is_top_tier(self) -> bool {
        self.value() == 12
    }

    /// Lowest-value ranks (Ace, Two).
    pub const fn is_second_tier(self) -> bool {
        self.value() == 1
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    pub const fn game_value(self) -> u8 {
        self.rank.game_value()
    }
}

// Note: Ord on Card is only for stable sorting: suit order then declaration order.
// Never use it for lance comparisons; those go through `Rank::value`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
