//! Player inputs accepted by the state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Ask for another discard round.
    ContinueMus,
    /// Play the hand as dealt.
    StopMus,
    /// Cards to exchange; may be empty only for a hand totalling 31.
    ConfirmDiscard(Vec<Card>),
    Pass,
    /// Open or raise by this many points on top of the outstanding bet.
    Bet(u8),
    Accept,
    Reject,
    /// Ordago.
    AllIn,
    DeclareHave,
    DeclareNone,
    /// UI intent: show or hide the bet amount selector.
    ToggleBetSelector,
    CancelBetSelector,
    /// Deal the next round.
    Continue,
    NewGame,
}

/// Payload-free discriminant of [`GameAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    ContinueMus,
    StopMus,
    ConfirmDiscard,
    Pass,
    Bet,
    Accept,
    Reject,
    AllIn,
    DeclareHave,
    DeclareNone,
    ToggleBetSelector,
    CancelBetSelector,
    Continue,
    NewGame,
}

impl ActionKind {
    pub const fn is_ui_intent(self) -> bool {
        matches!(self, ActionKind::ToggleBetSelector | ActionKind::CancelBetSelector)
    }
}

impl GameAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::ContinueMus => ActionKind::ContinueMus,
            GameAction::StopMus => ActionKind::StopMus,
            GameAction::ConfirmDiscard(_) => ActionKind::ConfirmDiscard,
            GameAction::Pass => ActionKind::Pass,
            GameAction::Bet(_) => ActionKind::Bet,
            GameAction::Accept => ActionKind::Accept,
            GameAction::Reject => ActionKind::Reject,
            GameAction::AllIn => ActionKind::AllIn,
            GameAction::DeclareHave => ActionKind::DeclareHave,
            GameAction::DeclareNone => ActionKind::DeclareNone,
            GameAction::ToggleBetSelector => ActionKind::ToggleBetSelector,
            GameAction::CancelBetSelector => ActionKind::CancelBetSelector,
            GameAction::Continue => ActionKind::Continue,
            GameAction::NewGame => ActionKind::NewGame,
        }
    }

    /// UI-only intents that never move the turn.
    pub fn is_ui_intent(&self) -> bool {
        self.kind().is_ui_intent()
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::ConfirmDiscard(cards) => {
                write!(f, "ConfirmDiscard(")?;
                for (i, c) in cards.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")")
            }
            GameAction::Bet(n) => write!(f, "Bet({n})"),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}
