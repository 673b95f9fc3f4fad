use serde::{Deserialize, Serialize};

use crate::domain::actions::GameAction;
use crate::domain::dealing::Deck;
use crate::domain::lances::Lance;
use crate::domain::rules::{PLAYERS, WINNING_SCORE};
use crate::domain::scoring::RoundSummary;
use crate::domain::Card;
use crate::errors::domain::DomainError;

pub type PlayerId = u8; // 0..=3
pub type Seat = u8; // 0..=3, positional alias for PlayerId

/// Partnerships sit opposite each other: seats 0 & 2 against 1 & 3.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const fn of(seat: PlayerId) -> Team {
        if seat % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    pub const fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub const fn seats(self) -> [PlayerId; 2] {
        match self {
            Team::A => [0, 2],
            Team::B => [1, 3],
        }
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Table seated, nothing dealt yet.
    PreRound,
    /// Players choose between another discard round and playing the hand.
    MusDecision,
    /// Everyone picks cards to exchange.
    Discard,
    Grande,
    Chica,
    /// Players declare whether they hold pares.
    ParesCheck,
    Pares,
    /// Players declare whether they hold juego.
    JuegoCheck,
    Juego,
    /// Nobody holds juego; totals are contested instead.
    Punto,
    /// Round scored; waiting for the next deal.
    RoundOver,
    /// A team reached the winning score.
    GameOver,
}

impl Phase {
    /// The lance contested in this phase, for betting phases.
    pub const fn lance(self) -> Option<Lance> {
        match self {
            Phase::Grande => Some(Lance::Grande),
            Phase::Chica => Some(Lance::Chica),
            Phase::Pares => Some(Lance::Pares),
            Phase::Juego => Some(Lance::Juego),
            Phase::Punto => Some(Lance::Punto),
            _ => None,
        }
    }

    pub const fn is_betting(self) -> bool {
        self.lance().is_some()
    }

    pub const fn is_check(self) -> bool {
        matches!(self, Phase::ParesCheck | Phase::JuegoCheck)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub team: Team,
    pub is_human: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, hand: Vec<Card>) -> Self {
        Self {
            id,
            name: name.into(),
            hand,
            team: Team::of(id),
            is_human: false,
        }
    }
}

/// Outstanding bet in the current lance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetInfo {
    /// Total stake if accepted.
    pub amount: u8,
    /// Awarded to the proposer's team if every opponent rejects.
    pub fallback: u8,
    pub proposer: PlayerId,
    /// Opponent who must answer next.
    pub responder: PlayerId,
    /// All-or-nothing bet.
    pub ordago: bool,
    /// Opponents who already rejected.
    pub declined: Vec<PlayerId>,
}

/// How a lance was settled during play. Points are assigned at round end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanceOutcome {
    /// Every eligible player passed.
    EnPaso,
    /// A bet was accepted with this stake.
    Accepted { stake: u8 },
    /// Every opponent rejected; `team` takes `points`.
    Rejected { team: Team, points: u8 },
    /// Only one team held the category, no betting took place.
    Uncontested(Team),
    /// Nobody held the category.
    Skipped,
    /// An all-in was accepted; the winner takes the game.
    Ordago { winner: Team },
}

/// Display-only signal shown to teammates after a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    HasPares,
    NoPares,
    HasJuego,
    NoJuego,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    pub a: u16,
    pub b: u16,
}

impl TeamScores {
    pub const fn get(&self, team: Team) -> u16 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    pub fn add(&mut self, team: Team, points: u16) {
        match team {
            Team::A => self.a = self.a.saturating_add(points),
            Team::B => self.b = self.b.saturating_add(points),
        }
    }

    /// Team that has reached the winning score, if any.
    pub fn leader_at_target(&self) -> Option<Team> {
        if self.a >= WINNING_SCORE {
            Some(Team::A)
        } else if self.b >= WINNING_SCORE {
            Some(Team::B)
        } else {
            None
        }
    }
}

/// One accepted action, kept for audit and replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub round_no: u32,
    pub phase: Phase,
    pub player: PlayerId,
    pub action: GameAction,
}

/// Entire table state. Cloned on every transition; never mutated in place
/// by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub players: [Player; PLAYERS],
    pub deck: Deck,
    pub discard_pile: Vec<Card>,
    pub phase: Phase,
    /// Player expected to act.
    pub turn: PlayerId,
    /// First player of the round; wins ties.
    pub mano: PlayerId,
    pub bet: Option<BetInfo>,
    pub scores: TeamScores,
    /// Players who passed in the current lance.
    pub passed: Vec<PlayerId>,
    /// ContinueMus answers gathered in the current mus decision.
    pub mus_votes: u8,
    /// Discard selections confirmed in the current discard phase.
    pub pending_discards: [Option<Vec<Card>>; PLAYERS],
    /// Answers given in the pares check.
    pub pares_declared: [Option<bool>; PLAYERS],
    /// Answers given in the juego check.
    pub juego_declared: [Option<bool>; PLAYERS],
    pub gestures: [Option<Gesture>; PLAYERS],
    pub outcomes: [Option<LanceOutcome>; 5],
    /// Accepted actions of the current round, starting with the deal.
    pub history: Vec<ActionRecord>,
    /// Accepted actions since the table was created. Never reset.
    pub step: usize,
    /// 1-based; 0 before the first deal.
    pub round_no: u32,
    /// Completed discard rounds in the current round.
    pub mus_rounds: u32,
    pub game_seed: u64,
    pub winner: Option<Team>,
    pub bet_selector_open: bool,
    /// Scoring of the most recently completed round.
    pub last_summary: Option<RoundSummary>,
}

impl GameState {
    /// Fresh table in `PreRound`. `first_mano` takes the first deal.
    pub fn new(game_seed: u64, first_mano: PlayerId, names: [String; PLAYERS]) -> Self {
        let [n0, n1, n2, n3] = names;
        let mano = first_mano % PLAYERS as u8;
        Self {
            players: [
                Player::new(0, n0, Vec::new()),
                Player::new(1, n1, Vec::new()),
                Player::new(2, n2, Vec::new()),
                Player::new(3, n3, Vec::new()),
            ],
            deck: Deck::new(),
            discard_pile: Vec::new(),
            phase: Phase::PreRound,
            turn: mano,
            mano,
            bet: None,
            scores: TeamScores::default(),
            passed: Vec::new(),
            mus_votes: 0,
            pending_discards: Default::default(),
            pares_declared: [None; PLAYERS],
            juego_declared: [None; PLAYERS],
            gestures: [None; PLAYERS],
            outcomes: [None; 5],
            history: Vec::new(),
            step: 0,
            round_no: 0,
            mus_rounds: 0,
            game_seed,
            winner: None,
            bet_selector_open: false,
            last_summary: None,
        }
    }

    /// Table restored from saved scores. The first deal goes to the seat
    /// after `last_mano`.
    pub fn resumed(
        game_seed: u64,
        names: [String; PLAYERS],
        scores: TeamScores,
        last_mano: PlayerId,
    ) -> Self {
        let mut state = Self::new(game_seed, next_player(last_mano % PLAYERS as u8), names);
        state.scores = scores;
        state
    }

    /// Default seat names "Player 1".."Player 4".
    pub fn with_default_names(game_seed: u64, first_mano: PlayerId) -> Self {
        Self::new(game_seed, first_mano, default_names())
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.players.get(id as usize).ok_or_else(|| {
            DomainError::validation_other(format!("Invariant violated: no player {id}"))
        })
    }

    pub fn hand(&self, id: PlayerId) -> &[Card] {
        self.players
            .get(id as usize)
            .map(|p| p.hand.as_slice())
            .unwrap_or(&[])
    }

    /// Players starting at mano and going clockwise.
    pub fn mano_order(&self) -> Vec<&Player> {
        seats_from(self.mano)
            .into_iter()
            .map(|s| &self.players[s as usize])
            .collect()
    }

    pub fn outcome(&self, lance: Lance) -> Option<LanceOutcome> {
        self.outcomes[lance.index()]
    }

    pub(crate) fn set_outcome(&mut self, lance: Lance, outcome: LanceOutcome) {
        self.outcomes[lance.index()] = Some(outcome);
    }

    pub fn team_score(&self, team: Team) -> u16 {
        self.scores.get(team)
    }
}

pub fn default_names() -> [String; PLAYERS] {
    std::array::from_fn(|i| format!("Player {}", i + 1))
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: PlayerId, delta: i8) -> PlayerId {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as PlayerId
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_player(p: PlayerId) -> PlayerId {
    seat_offset(p, 1)
}

/// Partner across the table.
#[inline]
pub fn partner_of(p: PlayerId) -> PlayerId {
    seat_offset(p, 2)
}

/// All four seats starting at `start`, clockwise.
pub fn seats_from(start: PlayerId) -> [PlayerId; PLAYERS] {
    std::array::from_fn(|i| seat_offset(start, i as i8))
}

/// Mano for a 1-based round number: one seat clockwise per round.
#[inline]
pub fn mano_for_round(first_mano: PlayerId, round_no: u32) -> PlayerId {
    let steps = round_no.saturating_sub(1) % PLAYERS as u32;
    seat_offset(first_mano, steps as i8)
}

pub fn require_bet<'a>(
    state: &'a GameState,
    ctx: &'static str,
) -> Result<&'a BetInfo, DomainError> {
    state.bet.as_ref().ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: bet must be set ({ctx})"))
    })
}

pub fn require_lance(state: &GameState, ctx: &'static str) -> Result<Lance, DomainError> {
    state.phase.lance().ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: phase {:?} is not a betting phase ({ctx})",
            state.phase
        ))
    })
}
