//! Per-lance winner resolution.
//!
//! Every resolver takes players in mano-first order and folds left to right:
//! the first player seeds the leader and only a strictly better challenger
//! replaces it, so ties always stay with the player closest to mano.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::hand_eval::{game_value, highest_card, lowest_card, pair_category};
use crate::domain::rules::{JUEGO_BEST, JUEGO_MIN, JUEGO_SECOND};
use crate::domain::state::{Player, PlayerId};

/// The scoring categories contested each round, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lance {
    Grande,
    Chica,
    Pares,
    Juego,
    /// Juego played on totals when nobody reaches 31.
    Punto,
}

impl Lance {
    pub const ALL: [Lance; 5] = [
        Lance::Grande,
        Lance::Chica,
        Lance::Pares,
        Lance::Juego,
        Lance::Punto,
    ];

    pub const fn index(self) -> usize {
        match self {
            Lance::Grande => 0,
            Lance::Chica => 1,
            Lance::Pares => 2,
            Lance::Juego => 3,
            Lance::Punto => 4,
        }
    }
}

/// Fold keeping the leader unless `better(challenger, leader)` holds.
fn fold_strict<'a, K, F>(players: &[&'a Player], key: K, better: F) -> Option<PlayerId>
where
    K: Fn(&'a Player) -> Option<u16>,
    F: Fn(u16, u16) -> bool,
{
    let mut leader: Option<(PlayerId, u16)> = None;
    for p in players {
        let Some(k) = key(p) else { continue };
        match leader {
            Some((_, best)) if !better(k, best) => {}
            _ => leader = Some((p.id, k)),
        }
    }
    leader.map(|(id, _)| id)
}

/// Highest card value wins.
pub fn grande_winner(players: &[&Player]) -> Option<PlayerId> {
    fold_strict(
        players,
        |p| highest_card(&p.hand).map(|c| c.value() as u16),
        |challenger, leader| challenger > leader,
    )
}

/// Lowest card value wins.
pub fn chica_winner(players: &[&Player]) -> Option<PlayerId> {
    fold_strict(
        players,
        |p| lowest_card(&p.hand).map(|c| c.value() as u16),
        |challenger, leader| challenger < leader,
    )
}

/// Best pairing category among holders; `None` when nobody holds pares.
pub fn pares_winner(players: &[&Player]) -> Option<PlayerId> {
    let mut leader: Option<(PlayerId, _)> = None;
    for p in players {
        let cat = pair_category(&p.hand);
        if !cat.is_some() {
            continue;
        }
        match leader {
            Some((_, best)) if cat.compare(best) != Ordering::Greater => {}
            _ => leader = Some((p.id, cat)),
        }
    }
    leader.map(|(id, _)| id)
}

/// Ordering key for a juego total: 31 first, then 32, then the rest by value.
pub fn juego_rank(total: u8) -> u16 {
    match total {
        JUEGO_BEST => 200,
        JUEGO_SECOND => 199,
        other => other as u16,
    }
}

/// Juego among holders; punto (highest total) when nobody has juego.
pub fn juego_winner(players: &[&Player]) -> Option<PlayerId> {
    let any_juego = players.iter().any(|p| game_value(&p.hand) >= JUEGO_MIN);
    if any_juego {
        fold_strict(
            players,
            |p| {
                let total = game_value(&p.hand);
                (total >= JUEGO_MIN).then(|| juego_rank(total))
            },
            |challenger, leader| challenger > leader,
        )
    } else {
        punto_winner(players)
    }
}

/// Highest total wins.
pub fn punto_winner(players: &[&Player]) -> Option<PlayerId> {
    fold_strict(
        players,
        |p| Some(game_value(&p.hand) as u16),
        |challenger, leader| challenger > leader,
    )
}

pub fn resolve(lance: Lance, players: &[&Player]) -> Option<PlayerId> {
    match lance {
        Lance::Grande => grande_winner(players),
        Lance::Chica => chica_winner(players),
        Lance::Pares => pares_winner(players),
        Lance::Juego => juego_winner(players),
        Lance::Punto => punto_winner(players),
    }
}
