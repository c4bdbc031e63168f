//! # Play Command
//!
//! Interactive BloodGamble session: the human holds seat 0 against three
//! temperament-driven AI seats. Hands continue until the human or every AI is
//! out of HP, the optional hand limit is reached, or the human quits (`q` or
//! end of input).

use super::{ai_seat, new_table, resolve_seed, starting_hp};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hp_bar, seat_name};
use crate::human::HumanController;
use crate::ui;
use bloodgamble_engine::controller::Controllers;
use bloodgamble_engine::errors::GameError;
use bloodgamble_engine::round::play_hand;
use bloodgamble_engine::seat::HUMAN_SEAT;
use bloodgamble_engine::table::Table;
use std::io::{BufRead, Write};

/// How a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    HumanEliminated,
    AiEliminated,
    HandLimit,
    Quit,
}

/// Handle the play command: interactive gameplay
///
/// # Arguments
///
/// * `seed` - RNG seed for reproducibility (default: config, then random)
/// * `hands` - Hand limit (must be >= 1 when given)
/// * `no_color` - Disable ANSI colours
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for the human's choices
///
/// # Returns
///
/// * `Ok(())` when the session ends normally, including quitting and elimination
/// * `Err(CliError)` for bad arguments, an invalid config, engine or I/O errors
pub fn handle_play_command(
    seed: Option<u64>,
    hands: Option<u32>,
    no_color: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == Some(0) {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let config = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = resolve_seed(seed, &config);
    let color = config.color && !no_color;
    let max_hp = starting_hp(&config);

    writeln!(out, "=== BLOOD GAMBLE ===")?;
    writeln!(out, "A poker game where lives are the stakes!")?;
    writeln!(out, "Seed: {}", seed)?;

    let mut table = new_table(seed, &config, false);
    let mut played = 0u32;

    let end = loop {
        if table.seat(HUMAN_SEAT).is_eliminated() {
            break SessionEnd::HumanEliminated;
        }
        if table.is_game_over() {
            break SessionEnd::AiEliminated;
        }
        if hands.is_some_and(|limit| played >= limit) {
            break SessionEnd::HandLimit;
        }

        let result = {
            let mut controllers: Controllers<'_> = [
                Box::new(HumanController::new(
                    &mut *stdin,
                    &mut *out,
                    &mut *err,
                    color,
                    max_hp,
                )),
                ai_seat(1)?,
                ai_seat(2)?,
                ai_seat(3)?,
            ];
            play_hand(&mut table, &mut controllers)
        };
        match result {
            Ok(record) => {
                played += 1;
                tracing::debug!(hand = record.hand, pot = record.pot, "hand finished");
                write_standings(out, &table, &max_hp)?;
            }
            Err(GameError::SessionEnded) => break SessionEnd::Quit,
            Err(e) => {
                ui::write_error(err, &format!("Hand aborted: {}", e))?;
                return Err(e.into());
            }
        }
    };

    write_summary(out, &table, end, played)?;
    Ok(())
}

fn write_standings(out: &mut dyn Write, table: &Table, max_hp: &[u32; 4]) -> std::io::Result<()> {
    writeln!(out)?;
    for seat in table.seats() {
        let status = if seat.is_eliminated() { "  (eliminated)" } else { "" };
        writeln!(
            out,
            "{:<4} {}{}",
            seat_name(seat.id()),
            format_hp_bar(seat.hp(), max_hp[seat.id()]),
            status
        )?;
    }
    Ok(())
}

fn write_summary(
    out: &mut dyn Write,
    table: &Table,
    end: SessionEnd,
    played: u32,
) -> std::io::Result<()> {
    match end {
        SessionEnd::Quit => {
            writeln!(out, "\nSession ended.")?;
        }
        SessionEnd::HandLimit => {
            writeln!(out, "\nHand limit reached.")?;
        }
        SessionEnd::HumanEliminated => {
            ui::write_banner(out, "GAME OVER")?;
            writeln!(out, "You have been eliminated! The Hell Soldiers have won.")?;
        }
        SessionEnd::AiEliminated => {
            ui::write_banner(out, "GAME OVER")?;
            writeln!(out, "Congratulations! You have defeated all Hell Soldiers!")?;
        }
    }
    writeln!(out, "Your final HP: {}", table.seat(HUMAN_SEAT).hp())?;
    writeln!(out, "Final vigilance level: {:.2}", table.monitor().vigilance())?;
    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn play(input: &str, seed: u64, hands: Option<u32>) -> (Result<(), CliError>, String, String) {
        unsafe {
            std::env::remove_var(config::CONFIG_ENV);
            std::env::remove_var(config::SEED_ENV);
            std::env::remove_var(config::COLOR_ENV);
        }
        let mut stdin = Cursor::new(input.to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_play_command(Some(seed), hands, true, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn quitting_ends_the_session_cleanly() {
        let (result, out, _) = play("q\n", 42, None);
        assert!(result.is_ok());
        assert!(out.contains("Seed: 42"));
        assert!(out.contains("HAND 1"));
        assert!(out.contains("Session ended."));
    }

    #[test]
    #[serial]
    fn end_of_input_is_a_quit() {
        let (result, out, _) = play("", 7, None);
        assert!(result.is_ok());
        assert!(out.contains("Hands played:"));
    }

    #[test]
    #[serial]
    fn zero_hands_is_rejected() {
        let (result, _, err) = play("", 1, Some(0));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("hands must be >= 1"));
    }

    #[test]
    #[serial]
    fn hand_limit_stops_the_session() {
        let input = "fold\n".repeat(50);
        let (result, out, _) = play(&input, 5, Some(2));
        assert!(result.is_ok());
        assert!(out.contains("Hand limit reached."));
        assert!(out.contains("Hands played: 2"));
        assert!(out.contains("HAND 2"));
        assert!(!out.contains("HAND 3"));
    }

    #[test]
    #[serial]
    fn no_color_keeps_output_plain() {
        let (_, out, _) = play("q\n", 3, None);
        assert!(!out.contains('\x1b'));
    }
}
