//! Deck construction, seeded shuffling and dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate the 40-card deck in suit-major order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(Suit::ALL.len() * Rank::ALL.len());
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle driven by a seeded ChaCha stream.
pub fn shuffle_with_seed(cards: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    cards.shuffle(&mut rng);
}

/// Remaining draw pile. Cards are taken from the front.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled full deck.
    pub fn new() -> Self {
        Self { cards: full_deck() }
    }

    /// Full deck in a seed-determined uniform permutation.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = full_deck();
        shuffle_with_seed(&mut cards, seed);
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deal four cards to each of exactly four players, one card at a time.
    ///
    /// Consumes 16 cards; the rest stay in the deck.
    pub fn deal(&mut self, player_count: usize) -> Result<[Vec<Card>; PLAYERS], DomainError> {
        if player_count != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("Player count must be {PLAYERS}, got {player_count}"),
            ));
        }
        let needed = PLAYERS * HAND_SIZE;
        if self.cards.len() < needed {
            return Err(DomainError::validation_other(format!(
                "Deck has {} cards, {needed} needed to deal",
                self.cards.len()
            )));
        }

        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        for (i, card) in self.cards.drain(..needed).enumerate() {
            hands[i % PLAYERS].push(card);
        }
        Ok(hands)
    }

    /// Take up to `n` cards from the front. Returns fewer when the deck runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Put `cards` at the bottom and reshuffle the whole pile with `seed`.
    pub fn refill(&mut self, cards: Vec<Card>, seed: u64) {
        self.cards.extend(cards);
        shuffle_with_seed(&mut self.cards, seed);
    }
}
