use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cheats::CheatKind;
use crate::errors::GameError;
use crate::events::TableEvent;
use crate::round::Street;
use crate::seat::{PlayerDecision, SeatKind, Temperament, SEAT_COUNT};

/// What a controller wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Act(PlayerDecision),
    /// Only honoured for the human seat; the turn continues afterwards
    Cheat {
        kind: CheatKind,
        target: Option<usize>,
    },
}

/// Public information about a seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub id: usize,
    pub kind: SeatKind,
    pub hp: u32,
    pub street_bet: u32,
    pub committed: u32,
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
}

/// Detection estimate for one possible use of a cheat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetEstimate {
    /// `None` for abilities without a target
    pub target: Option<usize>,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheatOffer {
    pub kind: CheatKind,
    /// Hands left before it can be used (0 when ready)
    pub cooldown: u32,
    pub estimates: Vec<TargetEstimate>,
}

/// Everything a seat is allowed to see when deciding.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnView {
    pub seat: usize,
    pub hand_number: u32,
    pub street: Street,
    pub hole: [Card; 2],
    pub hp: u32,
    pub temperament: Temperament,
    pub board: Vec<Card>,
    pub pot: u32,
    pub to_call: u32,
    pub min_raise: u32,
    /// Largest raise the table suggests; advisory
    pub max_bet: u32,
    pub street_max: u32,
    pub street_bet: u32,
    pub raises_this_street: u32,
    pub seats: [SeatSummary; SEAT_COUNT],
    pub vigilance: f64,
    /// Empty for AI seats
    pub cheat_offers: Vec<CheatOffer>,
}

impl TurnView {
    pub fn cards(&self) -> Vec<Card> {
        let mut all = self.hole.to_vec();
        all.extend_from_slice(&self.board);
        all
    }

    pub fn offer(&self, kind: CheatKind) -> Option<&CheatOffer> {
        self.cheat_offers.iter().find(|o| o.kind == kind)
    }
}

/// Source of decisions for one seat (human input, AI policy, scripted tests).
pub trait SeatController {
    fn name(&self) -> &str;

    /// Called once per turn. Returning an error aborts the hand.
    fn decide(&mut self, view: &TurnView) -> Result<Intent, GameError>;

    fn observe(&mut self, _event: &TableEvent) {}
}

/// One controller per seat, indexed by seat id.
pub type Controllers<'a> = [Box<dyn SeatController + 'a>; SEAT_COUNT];
