//! The human seat: a line menu on the terminal.
//!
//! [`HumanController`] narrates every event it observes and, on its turn,
//! keeps prompting until the input resolves to a decision or a cheat attempt.
//! Bad input only re-prompts. Quitting or reaching the end of input ends the
//! session with [`GameError::SessionEnded`].

use crate::formatters::{
    format_action, format_board, format_cards, format_cheat_effect, format_hp_bar,
    format_probability, seat_name,
};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{MenuInput, parse_amount, parse_confirmation, parse_menu_input, parse_target};
use bloodgamble_engine::cheats::{CheatKind, CheatOutcome};
use bloodgamble_engine::controller::{Intent, SeatController, TurnView};
use bloodgamble_engine::errors::GameError;
use bloodgamble_engine::events::TableEvent;
use bloodgamble_engine::seat::PlayerDecision;
use std::io::{BufRead, Write};

pub struct HumanController<'io> {
    input: &'io mut dyn BufRead,
    out: &'io mut dyn Write,
    err: &'io mut dyn Write,
    color: bool,
    /// Starting HP per seat, for the status bars
    starting_hp: [u32; 4],
}

impl<'io> HumanController<'io> {
    pub fn new(
        input: &'io mut dyn BufRead,
        out: &'io mut dyn Write,
        err: &'io mut dyn Write,
        color: bool,
        starting_hp: [u32; 4],
    ) -> Self {
        Self {
            input,
            out,
            err,
            color,
            starting_hp,
        }
    }

    fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(read_stdin_line(self.input))
    }

    fn write_menu(&mut self, view: &TurnView) -> std::io::Result<()> {
        let rule = "=".repeat(ui::RULE_WIDTH);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(
            self.out,
            "YOUR TURN! Current bet to call: {} HP",
            view.to_call
        )?;
        writeln!(
            self.out,
            "Hand: {}  Board: {}  Pot: {} HP  Your HP: {}",
            format_cards(&view.hole, self.color),
            format_board(&view.board, self.color),
            view.pot,
            view.hp
        )?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "1. Fold")?;
        if view.to_call == 0 {
            writeln!(self.out, "2. Check")?;
        } else {
            writeln!(self.out, "2. Call ({} HP)", view.to_call.min(view.hp))?;
        }
        writeln!(self.out, "3. Raise (min {} HP)", view.min_raise)?;
        writeln!(self.out, "4. All-in ({} HP)", view.hp)?;
        writeln!(self.out, "5. Cheat list")?;
        writeln!(self.out, "6. Use cheat")?;
        writeln!(self.out, "7. Status")?;
        writeln!(self.out, "{}", rule)
    }

    fn write_cheat_list(&mut self, view: &TurnView) -> std::io::Result<()> {
        ui::write_section(self.out, "CHEATS")?;
        writeln!(
            self.out,
            "Table vigilance: {:.2}",
            view.vigilance
        )?;
        for offer in &view.cheat_offers {
            let spec = offer.kind.spec();
            let state = if offer.cooldown > 0 {
                format!("cooldown {} hand(s)", offer.cooldown)
            } else {
                "ready".to_string()
            };
            let chances: Vec<String> = offer
                .estimates
                .iter()
                .map(|e| match e.target {
                    Some(t) => format!("{} {}", seat_name(t), format_probability(e.probability)),
                    None => format_probability(e.probability),
                })
                .collect();
            let chances = if chances.is_empty() {
                "no target".to_string()
            } else {
                chances.join(", ")
            };
            writeln!(
                self.out,
                "{:<17} -{:>2} HP  [{}]  detection: {}",
                offer.kind.name(),
                spec.hp_penalty,
                state,
                chances
            )?;
            writeln!(self.out, "    {}", spec.description)?;
        }
        Ok(())
    }

    fn write_status(&mut self, view: &TurnView) -> std::io::Result<()> {
        ui::write_section(self.out, "STATUS")?;
        writeln!(
            self.out,
            "Hand {} - {}  Pot: {} HP  Raises this street: {}",
            view.hand_number,
            view.street.label(),
            view.pot,
            view.raises_this_street
        )?;
        for s in &view.seats {
            let flag = if s.hp == 0 && !s.all_in {
                "out"
            } else if s.folded {
                "folded"
            } else if s.all_in {
                "all-in"
            } else {
                "in"
            };
            writeln!(
                self.out,
                "{:<4} {}  bet {:>3}  ({})",
                seat_name(s.id),
                format_hp_bar(s.hp, self.starting_hp[s.id]),
                s.street_bet,
                flag
            )?;
        }
        Ok(())
    }

    /// Asks for the rest of a cheat: name, target and confirmation.
    ///
    /// `Ok(None)` means the human backed out or gave bad input.
    fn resolve_cheat(
        &mut self,
        view: &TurnView,
        name: Option<String>,
        target: Option<usize>,
    ) -> Result<Option<Intent>, GameError> {
        let name = match name {
            Some(n) => n,
            None => self.ask("Enter cheat name: ")?,
        };
        let Some(kind) = CheatKind::from_name(&name) else {
            self.complain(&format!("Unknown cheat: '{}'", name));
            return Ok(None);
        };
        let target = if kind.spec().needs_target {
            let t = match target {
                Some(t) => t,
                None => {
                    let line = self.ask("Enter target seat (1-3): ")?;
                    match parse_target(&line) {
                        Ok(t) => t,
                        Err(msg) => {
                            self.complain(&msg);
                            return Ok(None);
                        }
                    }
                }
            };
            Some(t)
        } else {
            None
        };

        let estimate = view
            .offer(kind)
            .and_then(|o| o.estimates.iter().find(|e| e.target == target))
            .map(|e| e.probability);
        let question = match estimate {
            Some(p) => format!(
                "{}: detection chance {}, penalty {} HP. Proceed? [y/N] ",
                kind.name(),
                format_probability(p),
                kind.spec().hp_penalty
            ),
            None => format!("{}: no estimate available. Proceed? [y/N] ", kind.name()),
        };
        let answer = self.ask(&question)?;
        if !parse_confirmation(&answer) {
            self.note("Cheat cancelled.");
            return Ok(None);
        }
        Ok(Some(Intent::Cheat { kind, target }))
    }

    /// Prompts once; EOF or a broken terminal ends the session.
    fn ask(&mut self, text: &str) -> Result<String, GameError> {
        match self.prompt(text) {
            Ok(Some(line)) => Ok(line),
            _ => Err(GameError::SessionEnded),
        }
    }

    fn complain(&mut self, msg: &str) {
        let _ = ui::write_error(self.err, msg);
    }

    fn note(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{}", msg);
    }

    fn narrate(&mut self, event: &TableEvent) -> std::io::Result<()> {
        let color = self.color;
        match event {
            TableEvent::HandStarted {
                hand,
                dealer,
                small_blind,
                big_blind,
            } => {
                ui::write_banner(self.out, &format!("HAND {}", hand))?;
                writeln!(
                    self.out,
                    "Dealer: {}  Small blind: {}  Big blind: {}",
                    seat_name(*dealer),
                    seat_name(*small_blind),
                    seat_name(*big_blind)
                )
            }
            TableEvent::BlindPosted { seat, amount } => {
                writeln!(self.out, "{}: blind {} HP", seat_name(*seat), amount)
            }
            TableEvent::Action { seat, action, .. } => {
                writeln!(self.out, "{}: {}", seat_name(*seat), format_action(action))
            }
            TableEvent::StreetDealt { street, board } => {
                ui::write_section(self.out, &street.label().to_uppercase())?;
                writeln!(self.out, "Board: {}", format_board(board, color))
            }
            TableEvent::CheatDetected {
                seat,
                kind,
                hp_penalty,
            } => writeln!(
                self.out,
                "!! {} caught using {}! -{} HP",
                seat_name(*seat),
                kind.name(),
                hp_penalty
            ),
            TableEvent::CheatResolved { kind, outcome, .. } => match outcome {
                CheatOutcome::Succeeded(effect) => writeln!(
                    self.out,
                    "{} worked: {}",
                    kind.name(),
                    format_cheat_effect(effect, color)
                ),
                // reported through the public CheatDetected event
                CheatOutcome::Detected { .. } => Ok(()),
            },
            TableEvent::CheatRejected { reason, .. } => {
                ui::write_error(self.err, &format!("Cheat rejected: {}", reason))
            }
            TableEvent::DecisionRejected { reason, .. } => {
                ui::write_error(self.err, &format!("Invalid action: {}", reason))
            }
            TableEvent::Showdown { entries } => {
                ui::write_section(self.out, "SHOWDOWN")?;
                for e in entries {
                    writeln!(
                        self.out,
                        "{}: {} - {}",
                        seat_name(e.seat),
                        format_cards(&e.hole, color),
                        e.label
                    )?;
                }
                Ok(())
            }
            TableEvent::HandSettled { payouts, .. } => {
                for p in payouts {
                    writeln!(self.out, "Pot to {}: {} HP", seat_name(p.seat), p.amount)?;
                }
                Ok(())
            }
        }
    }
}

impl SeatController for HumanController<'_> {
    fn name(&self) -> &str {
        "You"
    }

    fn decide(&mut self, view: &TurnView) -> Result<Intent, GameError> {
        self.write_menu(view).map_err(|_| GameError::SessionEnded)?;
        loop {
            let line = self.ask("Choose (1-7, q): ")?;
            let decision = match parse_menu_input(&line) {
                MenuInput::Fold => PlayerDecision::Fold,
                MenuInput::Call => PlayerDecision::Call,
                MenuInput::AllIn => PlayerDecision::AllIn,
                MenuInput::Raise(Some(n)) => PlayerDecision::Raise(n),
                MenuInput::Raise(None) => {
                    let amount = self.ask("Enter raise amount: ")?;
                    match parse_amount(&amount) {
                        Ok(n) => PlayerDecision::Raise(n),
                        Err(msg) => {
                            self.complain(&msg);
                            continue;
                        }
                    }
                }
                MenuInput::CheatList => {
                    self.write_cheat_list(view)
                        .map_err(|_| GameError::SessionEnded)?;
                    continue;
                }
                MenuInput::UseCheat { name, target } => {
                    match self.resolve_cheat(view, name, target)? {
                        Some(intent) => return Ok(intent),
                        None => continue,
                    }
                }
                MenuInput::Status => {
                    self.write_status(view).map_err(|_| GameError::SessionEnded)?;
                    continue;
                }
                MenuInput::Quit => return Err(GameError::SessionEnded),
                MenuInput::Invalid(msg) => {
                    self.complain(&msg);
                    continue;
                }
            };
            return Ok(Intent::Act(decision));
        }
    }

    fn observe(&mut self, event: &TableEvent) {
        // a broken stdout surfaces on the next prompt
        let _ = self.narrate(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgamble_engine::betting::turn_view;
    use bloodgamble_engine::deck::Deck;
    use bloodgamble_engine::round::{RoundState, Street};
    use bloodgamble_engine::seat::HUMAN_SEAT;
    use bloodgamble_engine::table::{Table, TableConfig};
    use std::io::Cursor;

    fn human_view() -> TurnView {
        let mut table = Table::new(11, TableConfig::default());
        let mut deck = Deck::new_with_seed(5);
        for id in 0..4 {
            let cards = deck.draw_pair().unwrap();
            table.seat_mut(id).deal(cards);
        }
        let mut state = RoundState::new(1, 0, 1, 2, 2);
        state.start_street(Street::PreFlop);
        turn_view(&table, &state, HUMAN_SEAT).unwrap()
    }

    fn decide_with(input: &str) -> (Result<Intent, GameError>, String, String) {
        let view = human_view();
        let mut input = Cursor::new(input.to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = {
            let mut human =
                HumanController::new(&mut input, &mut out, &mut err, false, [100, 80, 80, 80]);
            human.decide(&view)
        };
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn call_by_number() {
        let (result, out, _) = decide_with("2\n");
        assert_eq!(result, Ok(Intent::Act(PlayerDecision::Call)));
        assert!(out.contains("YOUR TURN!"));
    }

    #[test]
    fn invalid_input_reprompts() {
        let (result, out, err) = decide_with("banana\nraise\nabc\nraise\n5\n");
        assert_eq!(result, Ok(Intent::Act(PlayerDecision::Raise(5))));
        assert!(err.contains("Unrecognized choice"));
        assert!(err.contains("Invalid amount"));
        assert_eq!(out.matches("Choose (1-7, q)").count(), 3);
    }

    #[test]
    fn quit_and_eof_end_the_session() {
        assert_eq!(decide_with("q\n").0, Err(GameError::SessionEnded));
        assert_eq!(decide_with("").0, Err(GameError::SessionEnded));
        assert_eq!(decide_with("status\n").0, Err(GameError::SessionEnded));
    }

    #[test]
    fn status_and_cheat_list_do_not_end_the_turn() {
        let (result, out, _) = decide_with("7\n5\nf\n");
        assert_eq!(result, Ok(Intent::Act(PlayerDecision::Fold)));
        assert!(out.contains("=== STATUS ==="));
        assert!(out.contains("=== CHEATS ==="));
        assert!(out.contains("PeekOpponentHole"));
    }

    #[test]
    fn targeted_cheat_asks_for_seat_and_confirmation() {
        let (result, out, _) = decide_with("6\npeekopponenthole\n2\ny\n");
        assert_eq!(
            result,
            Ok(Intent::Cheat {
                kind: CheatKind::PeekOpponentHole,
                target: Some(2)
            })
        );
        assert!(out.contains("detection chance"));
    }

    #[test]
    fn declined_cheat_returns_to_the_menu() {
        let (result, out, _) = decide_with("cheat swaphands\nn\n1\n");
        assert_eq!(result, Ok(Intent::Act(PlayerDecision::Fold)));
        assert!(out.contains("Cheat cancelled."));
    }

    #[test]
    fn unknown_cheat_is_reported() {
        let (result, _, err) = decide_with("cheat teleport\ncall\n");
        assert_eq!(result, Ok(Intent::Act(PlayerDecision::Call)));
        assert!(err.contains("Unknown cheat: 'teleport'"));
    }

    #[test]
    fn events_are_narrated() {
        let mut input = Cursor::new(String::new());
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut human =
                HumanController::new(&mut input, &mut out, &mut err, false, [100, 80, 80, 80]);
            human.observe(&TableEvent::HandStarted {
                hand: 3,
                dealer: 1,
                small_blind: 2,
                big_blind: 3,
            });
            human.observe(&TableEvent::CheatDetected {
                seat: 0,
                kind: CheatKind::MuckSwap,
                hp_penalty: 15,
            });
        }
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("HAND 3"));
        assert!(out.contains("Dealer: AI 1"));
        assert!(out.contains("You caught using MuckSwap! -15 HP"));
    }
}
