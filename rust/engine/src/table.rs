use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cheats::{
    CheatEffect, CheatKind, CheatMonitor, CheatOutcome, BLUFF_BOOST_TIGHTNESS,
    FORCE_FOLD_TIGHTNESS, MAX_SUSPICION, SUSPICION_PER_DETECT,
};
use crate::controller::{CheatOffer, TargetEstimate};
use crate::deck::Deck;
use crate::errors::{CheatError, GameError};
use crate::round::Street;
use crate::seat::{Seat, SeatKind, AI_STARTING_HP, HUMAN_SEAT, HUMAN_STARTING_HP, SEAT_COUNT};

/// Mixed into the game seed so detection rolls do not mirror the shuffle.
const DETECTION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Table parameters that stay fixed for a whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub human_hp: u32,
    pub ai_hp: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Upper bound the AI uses when sizing raises
    pub max_bet: u32,
    /// Action turns allowed per street before it is closed
    pub action_cap: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            human_hp: HUMAN_STARTING_HP,
            ai_hp: AI_STARTING_HP,
            small_blind: 1,
            big_blind: 2,
            max_bet: 20,
            action_cap: 20,
        }
    }
}

/// State that persists across hands: seats, deck, button and cheat monitor.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    seats: [Seat; SEAT_COUNT],
    deck: Deck,
    monitor: CheatMonitor,
    dealer: usize,
    hands_played: u32,
    seed: u64,
}

impl Table {
    pub fn new(seed: u64, config: TableConfig) -> Self {
        let seats = std::array::from_fn(|id| {
            if id == HUMAN_SEAT {
                Seat::new(id, SeatKind::Human, config.human_hp)
            } else {
                Seat::new(id, SeatKind::Ai, config.ai_hp)
            }
        });
        Self {
            config,
            seats,
            deck: Deck::new_with_seed(seed),
            monitor: CheatMonitor::new(seed ^ DETECTION_STREAM),
            dealer: 0,
            hands_played: 0,
            seed,
        }
    }

    /// Places the button on `dealer` (taken modulo the seat count).
    pub fn with_dealer(mut self, dealer: usize) -> Self {
        self.dealer = dealer % SEAT_COUNT;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    pub fn seats(&self) -> &[Seat; SEAT_COUNT] {
        &self.seats
    }
    pub fn seat(&self, id: usize) -> &Seat {
        &self.seats[id]
    }
    pub fn seat_mut(&mut self, id: usize) -> &mut Seat {
        &mut self.seats[id]
    }
    pub fn monitor(&self) -> &CheatMonitor {
        &self.monitor
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Makes the next hand deal `top` first: hole pairs clockwise from the
    /// dealer's left, then burn and board cards street by street.
    pub fn arrange_next_deal(&mut self, top: &[Card]) {
        self.deck.arrange_next(top);
    }

    pub(crate) fn seats_mut(&mut self) -> &mut [Seat; SEAT_COUNT] {
        &mut self.seats
    }
    pub(crate) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }
    pub(crate) fn monitor_mut(&mut self) -> &mut CheatMonitor {
        &mut self.monitor
    }
    pub(crate) fn set_dealer(&mut self, dealer: usize) {
        self.dealer = dealer;
    }
    pub(crate) fn next_hand_number(&mut self) -> u32 {
        self.hands_played += 1;
        self.hands_played
    }

    /// First seat clockwise after `from` that still has HP.
    pub fn next_live_seat(&self, from: usize) -> Option<usize> {
        (1..=SEAT_COUNT)
            .map(|step| (from + step) % SEAT_COUNT)
            .find(|&id| !self.seats[id].is_eliminated())
    }

    pub fn live_seats(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_eliminated()).count()
    }

    /// The human is out, or every AI is.
    pub fn is_game_over(&self) -> bool {
        self.seats[HUMAN_SEAT].is_eliminated()
            || self
                .seats
                .iter()
                .filter(|s| !s.is_human())
                .all(|s| s.is_eliminated())
    }

    /// Moves the button to the next seat with HP.
    pub(crate) fn advance_dealer(&mut self) {
        if let Some(next) = self.next_live_seat(self.dealer) {
            self.dealer = next;
        }
    }

    fn valid_target(&self, target: usize) -> bool {
        target < SEAT_COUNT && !self.seats[target].is_human() && self.seats[target].hole().is_some()
    }

    /// Detection chance for `kind` against `target` on `street`, as the
    /// caster would be told before committing.
    pub fn detection_estimate(&self, kind: CheatKind, target: Option<usize>, street: Street) -> f64 {
        let suspicion = target
            .filter(|&t| t < SEAT_COUNT)
            .map(|t| self.seats[t].temperament().suspicion)
            .unwrap_or(0.0);
        self.monitor.detection_probability(kind, suspicion, street)
    }

    /// Every catalog entry with its cooldown and, per legal target, the
    /// current detection estimate.
    pub fn cheat_offers(&self, caster: usize, street: Street) -> Vec<CheatOffer> {
        CheatKind::ALL
            .into_iter()
            .map(|kind| {
                let estimates = if kind.spec().needs_target {
                    (0..SEAT_COUNT)
                        .filter(|&t| self.valid_target(t))
                        .map(|t| TargetEstimate {
                            target: Some(t),
                            probability: self.detection_estimate(kind, Some(t), street),
                        })
                        .collect()
                } else {
                    vec![TargetEstimate {
                        target: None,
                        probability: self.detection_estimate(kind, None, street),
                    }]
                };
                CheatOffer {
                    kind,
                    cooldown: self.seats[caster].cooldown(kind),
                    estimates,
                }
            })
            .collect()
    }

    /// Resolves one cheat attempt by `caster`.
    ///
    /// Rejections (`Err`) leave the table untouched. Otherwise detection is
    /// rolled: a detected cheat costs the caster its HP penalty and raises
    /// vigilance and AI suspicion, an undetected one applies its effect.
    /// Either way the cooldown starts and the use enters the recent history.
    pub fn attempt_cheat(
        &mut self,
        kind: CheatKind,
        caster: usize,
        target: Option<usize>,
        street: Street,
    ) -> Result<CheatOutcome, CheatError> {
        let spec = kind.spec();
        if caster >= SEAT_COUNT || !self.seats[caster].is_human() {
            return Err(CheatError::NotPermitted);
        }
        let rounds = self.seats[caster].cooldown(kind);
        if rounds > 0 {
            return Err(CheatError::OnCooldown {
                name: kind.name(),
                rounds,
            });
        }
        let target = if spec.needs_target {
            match target {
                Some(t) if self.valid_target(t) => Some(t),
                _ => return Err(CheatError::InvalidTarget { name: kind.name() }),
            }
        } else {
            None
        };
        let cards_needed = match kind {
            CheatKind::SwapHands => 2,
            CheatKind::MuckSwap => 1,
            _ => 0,
        };
        if self.deck.remaining() < cards_needed {
            return Err(CheatError::DeckTooThin { name: kind.name() });
        }

        let probability = self.detection_estimate(kind, target, street);
        let detected = self.monitor.roll(probability);
        self.seats[caster].start_cooldown(kind, spec.cooldown);
        self.monitor.record_use(kind);

        if detected {
            let lost = self.seats[caster].penalize(spec.hp_penalty);
            self.monitor.on_detected();
            for seat in self.seats.iter_mut().filter(|s| !s.is_human()) {
                seat.raise_suspicion(SUSPICION_PER_DETECT, MAX_SUSPICION);
            }
            tracing::warn!(
                seat = caster,
                cheat = kind.name(),
                hp_penalty = lost,
                vigilance = self.monitor.vigilance(),
                "cheat detected"
            );
            return Ok(CheatOutcome::Detected { hp_penalty: lost });
        }

        let effect = self.apply_effect(kind, caster, target)?;
        tracing::debug!(seat = caster, cheat = kind.name(), "cheat succeeded");
        Ok(CheatOutcome::Succeeded(effect))
    }

    fn apply_effect(
        &mut self,
        kind: CheatKind,
        caster: usize,
        target: Option<usize>,
    ) -> Result<CheatEffect, CheatError> {
        let thin = |_: GameError| CheatError::DeckTooThin { name: kind.name() };
        let invalid = || CheatError::InvalidTarget { name: kind.name() };
        let effect = match kind {
            CheatKind::SwapHands => {
                let cards = self.deck.draw_pair().map_err(thin)?;
                self.seats[caster].replace_hole(cards);
                CheatEffect::HoleRedrawn { cards }
            }
            CheatKind::PeekOpponentHole => {
                let t = target.ok_or_else(invalid)?;
                let cards = self.seats[t].hole().ok_or_else(invalid)?;
                CheatEffect::HoleRevealed { target: t, cards }
            }
            CheatKind::MuckSwap => {
                self.deck.burn().map_err(thin)?;
                self.deck.shuffle();
                CheatEffect::NextCardMucked
            }
            CheatKind::ForceFold => {
                let t = target.ok_or_else(invalid)?;
                let seat = &mut self.seats[t];
                seat.raise_tightness(FORCE_FOLD_TIGHTNESS);
                CheatEffect::TemperamentShaken {
                    target: t,
                    tightness: seat.temperament().tightness,
                }
            }
            CheatKind::StackPeek => {
                let t = target.ok_or_else(invalid)?;
                let seat = &self.seats[t];
                CheatEffect::ProfileRevealed {
                    target: t,
                    hp: seat.hp(),
                    temperament: seat.temperament(),
                }
            }
            CheatKind::CardMarking => {
                self.deck.shuffle();
                CheatEffect::DeckReshuffled
            }
            CheatKind::BluffBoost => {
                for seat in self.seats.iter_mut().filter(|s| !s.is_human()) {
                    seat.raise_tightness(BLUFF_BOOST_TIGHTNESS);
                }
                CheatEffect::TableTightened
            }
        };
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_live_seat_skips_eliminated() {
        let mut t = Table::new(1, TableConfig::default());
        t.seat_mut(1).penalize(1_000);
        assert_eq!(t.next_live_seat(0), Some(2));
        assert_eq!(t.next_live_seat(3), Some(0));
    }

    #[test]
    fn game_over_when_all_ai_are_out() {
        let mut t = Table::new(1, TableConfig::default());
        assert!(!t.is_game_over());
        for id in 1..SEAT_COUNT {
            t.seat_mut(id).penalize(1_000);
        }
        assert!(t.is_game_over());
    }

    #[test]
    fn untargeted_offers_have_a_single_estimate() {
        let t = Table::new(1, TableConfig::default());
        let offers = t.cheat_offers(HUMAN_SEAT, Street::PreFlop);
        assert_eq!(offers.len(), CheatKind::ALL.len());
        let swap = offers.iter().find(|o| o.kind == CheatKind::SwapHands);
        assert_eq!(swap.map(|o| o.estimates.len()), Some(1));
        // no one is dealt in yet, so targeted cheats have no legal target
        let peek = offers.iter().find(|o| o.kind == CheatKind::PeekOpponentHole);
        assert_eq!(peek.map(|o| o.estimates.len()), Some(0));
    }
}
