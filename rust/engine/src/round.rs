use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::betting::{broadcast, in_hand_count, BettingEngine, StreetOutcome};
use crate::cards::Card;
use crate::controller::Controllers;
use crate::errors::GameError;
use crate::events::TableEvent;
use crate::hand::evaluate_hand;
use crate::record::{ActionRecord, CheatRecord, HandRecord, Payout, ShowdownEntry};
use crate::seat::{Seat, HUMAN_SEAT, SEAT_COUNT};
use crate::table::Table;

/// Stage of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn label(self) -> &'static str {
        match self {
            Street::PreFlop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }

    /// Cards revealed when the street is dealt.
    fn reveals(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::PreFlop | Street::Showdown => 0,
        }
    }
}

/// Pot and bet bookkeeping for the hand in progress.
///
/// `pot` always equals the sum of `committed` until the hand is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub hand: u32,
    pub pot: u32,
    pub street_bets: [u32; SEAT_COUNT],
    pub committed: [u32; SEAT_COUNT],
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
    pub street: Street,
    pub board: Vec<Card>,
    /// Raises that lifted the street maximum
    pub raises: u32,
    pub min_raise: u32,
}

impl RoundState {
    pub fn new(hand: u32, dealer: usize, small_blind: usize, big_blind: usize, min_raise: u32) -> Self {
        Self {
            hand,
            pot: 0,
            street_bets: [0; SEAT_COUNT],
            committed: [0; SEAT_COUNT],
            dealer,
            small_blind,
            big_blind,
            street: Street::PreFlop,
            board: Vec::with_capacity(5),
            raises: 0,
            min_raise,
        }
    }

    pub fn street_max(&self) -> u32 {
        self.street_bets.iter().copied().max().unwrap_or(0)
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.street_max().saturating_sub(self.street_bets[seat])
    }

    /// Moves up to `amount` HP from `seat` into the pot; returns what moved.
    pub fn commit(&mut self, id: usize, seat: &mut Seat, amount: u32) -> u32 {
        let taken = seat.commit(amount);
        self.street_bets[id] += taken;
        self.committed[id] += taken;
        self.pot += taken;
        taken
    }

    pub fn start_street(&mut self, street: Street) {
        self.street = street;
        self.street_bets = [0; SEAT_COUNT];
        self.raises = 0;
    }
}

/// Actions and cheats collected while the hand runs.
#[derive(Debug, Default)]
pub struct HandLog {
    pub actions: Vec<ActionRecord>,
    pub cheats: Vec<CheatRecord>,
}

/// Sequences one hand from the deal to settlement.
pub struct RoundOrchestrator<'t, 'c, 'a> {
    table: &'t mut Table,
    controllers: &'c mut Controllers<'a>,
    log: HandLog,
}

impl<'t, 'c, 'a> RoundOrchestrator<'t, 'c, 'a> {
    pub fn new(table: &'t mut Table, controllers: &'c mut Controllers<'a>) -> Self {
        Self {
            table,
            controllers,
            log: HandLog::default(),
        }
    }

    /// Plays PreFlop through Showdown and settles the pot.
    ///
    /// # Errors
    ///
    /// [`GameError::NotEnoughSeats`] when fewer than two seats have HP; any
    /// controller error or [`GameError::DeckExhausted`] aborts the hand.
    pub fn run(mut self) -> Result<HandRecord, GameError> {
        let mut state = self.start_hand()?;

        for street in [Street::PreFlop, Street::Flop, Street::Turn, Street::River] {
            if street != Street::PreFlop {
                self.deal_street(&mut state, street)?;
            }
            let mut engine = BettingEngine::new(self.table.config().action_cap);
            let outcome = engine.run(self.table, &mut state, self.controllers, &mut self.log)?;
            tracing::debug!(street = ?street, ?outcome, turns = engine.turns(), pot = state.pot, "street closed");
            if outcome == StreetOutcome::HandDecided || in_hand_count(self.table) <= 1 {
                break;
            }
        }

        Ok(self.settle(state))
    }

    fn start_hand(&mut self) -> Result<RoundState, GameError> {
        if self.table.live_seats() < 2 {
            return Err(GameError::NotEnoughSeats);
        }
        let mut dealer = self.table.dealer();
        if self.table.seat(dealer).is_eliminated() {
            dealer = self
                .table
                .next_live_seat(dealer)
                .ok_or(GameError::NotEnoughSeats)?;
            self.table.set_dealer(dealer);
        }
        let small_blind = self
            .table
            .next_live_seat(dealer)
            .ok_or(GameError::NotEnoughSeats)?;
        let big_blind = self
            .table
            .next_live_seat(small_blind)
            .ok_or(GameError::NotEnoughSeats)?;

        self.table.deck_mut().reset();
        for seat in self.table.seats_mut().iter_mut() {
            seat.clear_hand();
        }
        for step in 1..=SEAT_COUNT {
            let id = (dealer + step) % SEAT_COUNT;
            if !self.table.seat(id).is_eliminated() {
                let cards = self.table.deck_mut().draw_pair()?;
                self.table.seat_mut(id).deal(cards);
            }
        }

        let hand = self.table.next_hand_number();
        let config = *self.table.config();
        let mut state = RoundState::new(hand, dealer, small_blind, big_blind, config.big_blind);
        tracing::debug!(hand, dealer, small_blind, big_blind, "hand started");
        broadcast(
            self.controllers,
            &TableEvent::HandStarted {
                hand,
                dealer,
                small_blind,
                big_blind,
            },
        );

        for (seat, blind) in [(small_blind, config.small_blind), (big_blind, config.big_blind)] {
            let amount = state.commit(seat, self.table.seat_mut(seat), blind);
            broadcast(self.controllers, &TableEvent::BlindPosted { seat, amount });
        }
        Ok(state)
    }

    fn deal_street(&mut self, state: &mut RoundState, street: Street) -> Result<(), GameError> {
        let deck = self.table.deck_mut();
        deck.burn()?;
        let cards = deck.draw_n(street.reveals())?;
        state.board.extend(cards);
        state.start_street(street);
        tracing::debug!(street = ?street, board = ?state.board, "street dealt");
        broadcast(
            self.controllers,
            &TableEvent::StreetDealt {
                street,
                board: state.board.clone(),
            },
        );
        Ok(())
    }

    fn settle(mut self, mut state: RoundState) -> HandRecord {
        debug_assert_eq!(state.pot, state.committed.iter().sum::<u32>());
        let contenders: Vec<usize> = (0..SEAT_COUNT)
            .filter(|&id| self.table.seat(id).in_hand())
            .collect();

        let mut showdown = Vec::new();
        let winners: Vec<usize> = if contenders.len() > 1 {
            state.street = Street::Showdown;
            let mut best = None;
            let mut winners = Vec::new();
            for &id in &contenders {
                let Some(hole) = self.table.seat(id).hole() else {
                    continue;
                };
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&state.board);
                let value = evaluate_hand(&cards);
                showdown.push(ShowdownEntry {
                    seat: id,
                    hole,
                    category: value.category,
                    label: value.description.clone(),
                });
                match best.as_ref().map(|b| value.cmp(b)) {
                    None | Some(std::cmp::Ordering::Greater) => {
                        best = Some(value);
                        winners = vec![id];
                    }
                    Some(std::cmp::Ordering::Equal) => winners.push(id),
                    Some(std::cmp::Ordering::Less) => {}
                }
            }
            winners
        } else {
            contenders
        };

        let pot = state.pot;
        let payouts = split_pot(pot, &winners, state.dealer);
        for p in &payouts {
            self.table.seat_mut(p.seat).award(p.amount);
        }
        state.pot = 0;
        state.street_bets = [0; SEAT_COUNT];

        let human_won = payouts.iter().any(|p| p.seat == HUMAN_SEAT);
        self.table.monitor_mut().after_hand(human_won);
        for seat in self.table.seats_mut().iter_mut() {
            seat.tick_cooldowns();
            seat.restore_tightness();
        }
        self.table.advance_dealer();

        if !showdown.is_empty() {
            broadcast(
                self.controllers,
                &TableEvent::Showdown {
                    entries: showdown.clone(),
                },
            );
        }
        broadcast(
            self.controllers,
            &TableEvent::HandSettled {
                pot,
                payouts: payouts.clone(),
            },
        );
        tracing::info!(
            hand = state.hand,
            pot,
            winners = ?payouts,
            vigilance = self.table.monitor().vigilance(),
            "hand settled"
        );

        HandRecord {
            hand: state.hand,
            seed: self.table.seed(),
            dealer: state.dealer,
            small_blind: state.small_blind,
            big_blind: state.big_blind,
            actions: self.log.actions,
            board: state.board,
            showdown,
            winners: payouts,
            cheats: self.log.cheats,
            pot,
            committed: state.committed.to_vec(),
            hp_after: self.table.seats().iter().map(|s| s.hp()).collect(),
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Plays one hand at `table` with one controller per seat.
pub fn play_hand(table: &mut Table, controllers: &mut Controllers<'_>) -> Result<HandRecord, GameError> {
    RoundOrchestrator::new(table, controllers).run()
}

/// Even split; the odd HP goes to the first winner clockwise from the dealer.
fn split_pot(pot: u32, winners: &[usize], dealer: usize) -> Vec<Payout> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut ordered = winners.to_vec();
    ordered.sort_by_key(|&id| (id + SEAT_COUNT - dealer - 1) % SEAT_COUNT);
    let share = pot / ordered.len() as u32;
    let odd = pot % ordered.len() as u32;
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, seat)| Payout {
            seat,
            amount: if i == 0 { share + odd } else { share },
        })
        .collect()
}
