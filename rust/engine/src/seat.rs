use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cheats::CheatKind;

/// The table always has four seats.
pub const SEAT_COUNT: usize = 4;
/// Seat 0 belongs to the human; seats 1..=3 are AI opponents.
pub const HUMAN_SEAT: usize = 0;

/// Default starting HP for the human seat
pub const HUMAN_STARTING_HP: u32 = 100;
/// Default starting HP for each AI seat
pub const AI_STARTING_HP: u32 = 80;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum SeatKind {
    Human,
    Ai,
}

/// A decision a seat submits for its turn, before legality checks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerDecision {
    Fold,
    /// Match the street maximum (a check when nothing is owed)
    Call,
    /// Call, then add this many HP on top
    Raise(u32),
    AllIn,
}

/// Behavior scalars read by the AI controller, each in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperament {
    pub aggression: f64,
    pub tightness: f64,
    pub suspicion: f64,
}

impl Default for Temperament {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            tightness: 0.5,
            suspicion: 0.0,
        }
    }
}

/// One of the four participants. HP persists across hands; everything else
/// about the hand (cards, folded, all-in) is reset by [`Seat::clear_hand`].
#[derive(Debug, Clone)]
pub struct Seat {
    id: usize,
    kind: SeatKind,
    hp: u32,
    hole: Option<[Card; 2]>,
    folded: bool,
    all_in: bool,
    temperament: Temperament,
    /// tightness to restore once the hand is settled
    base_tightness: f64,
    cooldowns: HashMap<CheatKind, u32>,
}

impl Seat {
    pub fn new(id: usize, kind: SeatKind, hp: u32) -> Self {
        let temperament = Temperament::default();
        Self {
            id,
            kind,
            hp,
            hole: None,
            folded: false,
            all_in: false,
            temperament,
            base_tightness: temperament.tightness,
            cooldowns: HashMap::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn kind(&self) -> SeatKind {
        self.kind
    }
    pub fn is_human(&self) -> bool {
        self.kind == SeatKind::Human
    }
    pub fn hp(&self) -> u32 {
        self.hp
    }
    pub fn hole(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn temperament(&self) -> Temperament {
        self.temperament
    }

    /// Out of HP. An all-in seat at 0 HP still contests the pot it is in.
    pub fn is_eliminated(&self) -> bool {
        self.hp == 0
    }

    /// Dealt into the current hand and not folded.
    pub fn in_hand(&self) -> bool {
        self.hole.is_some() && !self.folded
    }

    /// In the hand with HP left to commit.
    pub fn can_act(&self) -> bool {
        self.in_hand() && !self.all_in && self.hp > 0
    }

    pub fn deal(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
        self.folded = false;
        self.all_in = false;
    }

    pub(crate) fn replace_hole(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub fn clear_hand(&mut self) {
        self.hole = None;
        self.folded = false;
        self.all_in = false;
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Takes up to `amount` HP from the seat and returns what was taken.
    /// Emptying the stack while in a hand marks the seat all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.hp);
        self.hp -= taken;
        if self.hp == 0 && self.in_hand() {
            self.all_in = true;
        }
        taken
    }

    pub fn award(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount);
    }

    /// HP lost outside the pot, e.g. a detected cheat.
    pub fn penalize(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        if self.hp == 0 && self.in_hand() {
            self.all_in = true;
        }
        lost
    }

    pub fn raise_tightness(&mut self, delta: f64) {
        self.temperament.tightness = (self.temperament.tightness + delta).min(1.0);
    }

    pub fn raise_suspicion(&mut self, delta: f64, cap: f64) {
        self.temperament.suspicion = (self.temperament.suspicion + delta).min(cap);
    }

    pub fn restore_tightness(&mut self) {
        self.temperament.tightness = self.base_tightness;
    }

    pub fn set_temperament(&mut self, temperament: Temperament) {
        self.temperament = temperament;
        self.base_tightness = temperament.tightness;
    }

    /// Hands left before `kind` can be used again (0 when ready).
    pub fn cooldown(&self, kind: CheatKind) -> u32 {
        self.cooldowns.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn start_cooldown(&mut self, kind: CheatKind, hands: u32) {
        self.cooldowns.insert(kind, hands);
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        for left in self.cooldowns.values_mut() {
            *left = left.saturating_sub(1);
        }
    }
}
