//! Fixed house rules for this Mus variant.

use std::ops::RangeInclusive;

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 4;

/// Cumulative team score that ends the game.
pub const WINNING_SCORE: u16 = 40;

/// Smallest game total that counts as juego.
pub const JUEGO_MIN: u8 = 31;
/// Best possible juego.
pub const JUEGO_BEST: u8 = 31;
/// Second-best juego.
pub const JUEGO_SECOND: u8 = 32;

/// Smallest bet or raise increment ("envido").
pub const MIN_BET: u8 = 2;

/// Points for a lance nobody bet on (grande, chica, punto).
pub const EN_PASO_POINTS: u16 = 1;

/// Consolation for a rejected opening bet.
pub const FIRST_BET_FALLBACK: u8 = 1;

/// Bonus for the punto lance, on top of any stake.
pub const PUNTO_BONUS: u16 = 1;

/// Legal increments for `Bet`, given the amount already on the table.
///
/// The ceiling keeps the total at or below the winning score; the range is
/// empty once no further raise fits.
pub fn valid_bet_range(outstanding: u8) -> RangeInclusive<u8> {
    let ceiling = (WINNING_SCORE as u8).saturating_sub(outstanding);
    MIN_BET..=ceiling
}

/// Discard size bounds for a hand with the given game value.
pub fn discard_range(game_value: u8) -> RangeInclusive<usize> {
    if game_value == JUEGO_BEST {
        0..=HAND_SIZE
    } else {
        1..=HAND_SIZE
    }
}
