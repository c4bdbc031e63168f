use crate::cheats::CheatOutcome;
use crate::controller::{Controllers, Intent, SeatSummary, TurnView};
use crate::errors::GameError;
use crate::events::TableEvent;
use crate::record::{ActionRecord, CheatRecord};
use crate::round::{HandLog, RoundState, Street};
use crate::rules::{validate_action, ValidatedAction};
use crate::seat::SEAT_COUNT;
use crate::table::Table;

/// Rejected intents in a row before an AI controller is considered stuck.
/// The human seat is re-prompted without limit; it ends the session by
/// quitting instead.
pub const MAX_REJECTIONS: u32 = 10;

/// How a betting street ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetOutcome {
    /// Every seat that can act has acted and matches the street maximum
    Completed,
    /// At most one seat is left in the hand
    HandDecided,
    /// The action cap closed the street early
    CapReached,
}

/// State machine for one betting street.
#[derive(Debug)]
pub struct BettingEngine {
    has_acted: [bool; SEAT_COUNT],
    turns: u32,
    cap: u32,
}

impl BettingEngine {
    pub fn new(cap: u32) -> Self {
        Self {
            has_acted: [false; SEAT_COUNT],
            turns: 0,
            cap,
        }
    }

    /// Action turns taken on the last street run.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Runs the betting for `state.street` until it closes.
    ///
    /// Seats are asked in clockwise order from the first seat to act. Only
    /// seat HP, the pot and the bet bookkeeping in `state` are changed here;
    /// cheats go through [`Table::attempt_cheat`].
    pub fn run(
        &mut self,
        table: &mut Table,
        state: &mut RoundState,
        controllers: &mut Controllers<'_>,
        log: &mut HandLog,
    ) -> Result<StreetOutcome, GameError> {
        self.has_acted = [false; SEAT_COUNT];
        self.turns = 0;

        if in_hand_count(table) <= 1 {
            return Ok(StreetOutcome::HandDecided);
        }
        let actors: Vec<usize> = (0..SEAT_COUNT)
            .filter(|&id| table.seat(id).can_act())
            .collect();
        match actors.as_slice() {
            [] => return Ok(StreetOutcome::Completed),
            [only] if state.to_call(*only) == 0 => return Ok(StreetOutcome::Completed),
            _ => {}
        }

        let mut seat = self.first_to_act(table, state);
        loop {
            if self.street_complete(table, state) {
                return Ok(StreetOutcome::Completed);
            }
            if self.turns >= self.cap {
                tracing::warn!(
                    street = ?state.street,
                    turns = self.turns,
                    "action cap reached, closing the street"
                );
                return Ok(StreetOutcome::CapReached);
            }
            if table.seat(seat).can_act() && self.needs_to_act(seat, state) {
                self.take_turn(seat, table, state, controllers, log)?;
                self.turns += 1;
                if in_hand_count(table) <= 1 {
                    return Ok(StreetOutcome::HandDecided);
                }
            }
            seat = (seat + 1) % SEAT_COUNT;
        }
    }

    /// Pre-flop the seat after the big blind opens; later streets start at
    /// the small blind.
    fn first_to_act(&self, table: &Table, state: &RoundState) -> usize {
        let from = match state.street {
            Street::PreFlop => (state.big_blind + 1) % SEAT_COUNT,
            _ => state.small_blind,
        };
        (0..SEAT_COUNT)
            .map(|step| (from + step) % SEAT_COUNT)
            .find(|&id| table.seat(id).can_act())
            .unwrap_or(from)
    }

    fn needs_to_act(&self, seat: usize, state: &RoundState) -> bool {
        state.street_bets[seat] < state.street_max() || !self.has_acted[seat]
    }

    fn street_complete(&self, table: &Table, state: &RoundState) -> bool {
        let max = state.street_max();
        (0..SEAT_COUNT)
            .filter(|&id| table.seat(id).can_act())
            .all(|id| self.has_acted[id] && state.street_bets[id] == max)
    }

    /// Asks `seat` until it submits a legal action. Cheat attempts are
    /// resolved in place and the seat is asked again. Rejections change no
    /// state.
    fn take_turn(
        &mut self,
        seat: usize,
        table: &mut Table,
        state: &mut RoundState,
        controllers: &mut Controllers<'_>,
        log: &mut HandLog,
    ) -> Result<(), GameError> {
        let mut rejections = 0;
        loop {
            let Some(view) = turn_view(table, state, seat) else {
                return Ok(());
            };
            let rejection = match controllers[seat].decide(&view)? {
                Intent::Cheat { kind, target } => {
                    match table.attempt_cheat(kind, seat, target, state.street) {
                        Ok(outcome) => {
                            let detected = matches!(outcome, CheatOutcome::Detected { .. });
                            log.cheats.push(CheatRecord {
                                seat,
                                street: state.street,
                                kind,
                                detected,
                            });
                            if let CheatOutcome::Detected { hp_penalty } = outcome {
                                broadcast(
                                    controllers,
                                    &TableEvent::CheatDetected {
                                        seat,
                                        kind,
                                        hp_penalty,
                                    },
                                );
                            }
                            controllers[seat].observe(&TableEvent::CheatResolved {
                                seat,
                                kind,
                                outcome,
                            });
                            // a penalty can leave the caster all-in at 0 HP
                            if !table.seat(seat).can_act() {
                                self.has_acted[seat] = true;
                                return Ok(());
                            }
                            None
                        }
                        Err(e) => {
                            let reason = e.to_string();
                            controllers[seat].observe(&TableEvent::CheatRejected {
                                seat,
                                reason: reason.clone(),
                            });
                            Some(reason)
                        }
                    }
                }
                Intent::Act(decision) => {
                    let stack = table.seat(seat).hp();
                    match validate_action(stack, state.to_call(seat), state.min_raise, decision) {
                        Ok(action) => {
                            self.apply(seat, action, table, state, controllers, log);
                            return Ok(());
                        }
                        Err(e) => {
                            let reason = e.to_string();
                            controllers[seat].observe(&TableEvent::DecisionRejected {
                                seat,
                                reason: reason.clone(),
                            });
                            Some(reason)
                        }
                    }
                }
            };
            if let Some(reason) = rejection {
                rejections += 1;
                tracing::debug!(seat, rejections, %reason, "intent rejected");
                if rejections >= MAX_REJECTIONS && !table.seat(seat).is_human() {
                    return Err(GameError::ControllerStalled { seat });
                }
            }
        }
    }

    fn apply(
        &mut self,
        seat: usize,
        action: ValidatedAction,
        table: &mut Table,
        state: &mut RoundState,
        controllers: &mut Controllers<'_>,
        log: &mut HandLog,
    ) {
        let before = state.street_max();
        match action {
            ValidatedAction::Fold => table.seat_mut(seat).fold(),
            ValidatedAction::Check => {}
            ValidatedAction::Call(n)
            | ValidatedAction::AllIn(n)
            | ValidatedAction::Raise { total: n, .. } => {
                state.commit(seat, table.seat_mut(seat), n);
            }
        }
        self.has_acted[seat] = true;
        if state.street_max() > before {
            state.raises += 1;
            for (id, acted) in self.has_acted.iter_mut().enumerate() {
                if id != seat {
                    *acted = false;
                }
            }
        }

        tracing::debug!(seat, street = ?state.street, ?action, pot = state.pot, "action");
        log.actions.push(ActionRecord {
            seat,
            street: state.street,
            action,
        });
        broadcast(
            controllers,
            &TableEvent::Action {
                seat,
                street: state.street,
                action,
            },
        );
    }
}

/// Sends a public event to every seat.
pub(crate) fn broadcast(controllers: &mut Controllers<'_>, event: &TableEvent) {
    for controller in controllers.iter_mut() {
        controller.observe(event);
    }
}

pub(crate) fn in_hand_count(table: &Table) -> usize {
    table.seats().iter().filter(|s| s.in_hand()).count()
}

/// The acting seat's view of the table; `None` if it holds no cards.
pub fn turn_view(table: &Table, state: &RoundState, seat: usize) -> Option<TurnView> {
    let me = table.seat(seat);
    let hole = me.hole()?;
    let seats = std::array::from_fn(|id| {
        let s = table.seat(id);
        SeatSummary {
            id,
            kind: s.kind(),
            hp: s.hp(),
            street_bet: state.street_bets[id],
            committed: state.committed[id],
            in_hand: s.in_hand(),
            folded: s.is_folded(),
            all_in: s.is_all_in(),
        }
    });
    let cheat_offers = if me.is_human() {
        table.cheat_offers(seat, state.street)
    } else {
        Vec::new()
    };
    Some(TurnView {
        seat,
        hand_number: state.hand,
        street: state.street,
        hole,
        hp: me.hp(),
        temperament: me.temperament(),
        board: state.board.clone(),
        pot: state.pot,
        to_call: state.to_call(seat),
        min_raise: state.min_raise,
        max_bet: table.config().max_bet,
        street_max: state.street_max(),
        street_bet: state.street_bets[seat],
        raises_this_street: state.raises,
        seats,
        vigilance: table.monitor().vigilance(),
        cheat_offers,
    })
}
