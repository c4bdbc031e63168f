use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cheats::{CheatKind, CheatOutcome};
use crate::record::{Payout, ShowdownEntry};
use crate::round::Street;
use crate::rules::ValidatedAction;

/// Something that happened at the table.
///
/// Public events are broadcast to every controller. `CheatResolved`,
/// `CheatRejected` and `DecisionRejected` only reach the seat they concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    HandStarted {
        hand: u32,
        dealer: usize,
        small_blind: usize,
        big_blind: usize,
    },
    BlindPosted {
        seat: usize,
        amount: u32,
    },
    Action {
        seat: usize,
        street: Street,
        action: ValidatedAction,
    },
    StreetDealt {
        street: Street,
        board: Vec<Card>,
    },
    /// A seat was caught cheating (public)
    CheatDetected {
        seat: usize,
        kind: CheatKind,
        hp_penalty: u32,
    },
    CheatResolved {
        seat: usize,
        kind: CheatKind,
        outcome: CheatOutcome,
    },
    CheatRejected {
        seat: usize,
        reason: String,
    },
    DecisionRejected {
        seat: usize,
        reason: String,
    },
    Showdown {
        entries: Vec<ShowdownEntry>,
    },
    HandSettled {
        pot: u32,
        payouts: Vec<Payout>,
    },
}
