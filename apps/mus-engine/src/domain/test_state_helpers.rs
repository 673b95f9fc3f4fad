//! Test-only game state helpers for domain unit tests.

use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::dealing::{full_deck, Deck};
use crate::domain::game_flow::apply_action;
use crate::domain::legals::{bet_range, discard_sizes, legal_actions};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::{parse_cards, Card};

/// Round 1 in `MusDecision` with fixed hands; the deck holds exactly the
/// remaining 24 cards.
pub fn table_with_hands(mano: PlayerId, hands: [&[&str]; PLAYERS]) -> GameState {
    let mut state = GameState::with_default_names(42, mano);
    state = apply_action(&state, mano, GameAction::Continue).expect("first deal");
    set_hands(&mut state, hands);
    state
}

/// Replace every hand and rebuild the deck from the cards left over.
pub fn set_hands(state: &mut GameState, hands: [&[&str]; PLAYERS]) {
    let mut used: Vec<Card> = Vec::new();
    for (seat, tokens) in hands.iter().enumerate() {
        let hand = parse_cards(tokens).expect("valid tokens");
        used.extend(hand.iter().copied());
        state.players[seat].hand = hand;
    }
    let rest: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !used.contains(c))
        .collect();
    state.deck = Deck::from_cards(rest);
    state.discard_pile.clear();
}

/// Apply a legal action, panicking with context otherwise.
pub fn play(state: &GameState, actor: PlayerId, action: GameAction) -> GameState {
    match apply_action(state, actor, action.clone()) {
        Ok(next) => next,
        Err(e) => panic!("{action} by {actor} in {:?} rejected: {e}", state.phase),
    }
}

/// Apply a script of (actor, action) pairs.
pub fn play_all(state: &GameState, script: &[(PlayerId, GameAction)]) -> GameState {
    script
        .iter()
        .fold(state.clone(), |s, (actor, action)| play(&s, *actor, action.clone()))
}

/// Turn an advertised kind into a concrete action with a valid payload.
pub fn materialize(state: &GameState, kind: ActionKind) -> GameAction {
    let who = state.turn;
    match kind {
        ActionKind::ContinueMus => GameAction::ContinueMus,
        ActionKind::StopMus => GameAction::StopMus,
        ActionKind::ConfirmDiscard => {
            let n = *discard_sizes(state, who).start();
            GameAction::ConfirmDiscard(state.hand(who)[..n].to_vec())
        }
        ActionKind::Pass => GameAction::Pass,
        ActionKind::Bet => GameAction::Bet(*bet_range(state).start()),
        ActionKind::Accept => GameAction::Accept,
        ActionKind::Reject => GameAction::Reject,
        ActionKind::AllIn => GameAction::AllIn,
        ActionKind::DeclareHave => GameAction::DeclareHave,
        ActionKind::DeclareNone => GameAction::DeclareNone,
        ActionKind::ToggleBetSelector => GameAction::ToggleBetSelector,
        ActionKind::CancelBetSelector => GameAction::CancelBetSelector,
        ActionKind::Continue => GameAction::Continue,
        ActionKind::NewGame => GameAction::NewGame,
    }
}

/// Pass every betting lance and answer every check truthfully until the
/// round is scored.
pub fn pass_out_round(state: &GameState) -> GameState {
    let mut s = state.clone();
    for _ in 0..64 {
        if matches!(s.phase, Phase::RoundOver | Phase::GameOver) {
            return s;
        }
        let kinds = legal_actions(&s);
        let kind = if s.phase == Phase::MusDecision {
            ActionKind::StopMus
        } else if kinds.contains(&ActionKind::Pass) {
            ActionKind::Pass
        } else {
            kinds[0]
        };
        let action = materialize(&s, kind);
        s = play(&s, s.turn, action);
    }
    panic!("round did not finish; stuck in {:?}", s.phase);
}

/// All 40 cards are accounted for across hands, deck and discard pile.
pub fn card_count(state: &GameState) -> usize {
    state.players.iter().map(|p| p.hand.len()).sum::<usize>()
        + state.deck.len()
        + state.discard_pile.len()
}
