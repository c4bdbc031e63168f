//! Simulation command: four AI seats play each other.
//!
//! Seat 0 keeps its human starting HP but is driven by the AI, so the
//! cheat system stays idle. Each hand prints a summary line, or with
//! `--json` the full [`HandRecord`](bloodgamble_engine::record::HandRecord)
//! as one JSON line.

use super::{ai_seat, new_table, resolve_seed};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, seat_name};
use crate::ui;
use bloodgamble_engine::controller::Controllers;
use bloodgamble_engine::round::play_hand;
use bloodgamble_engine::record::HandRecord;
use std::io::Write;

/// Handle the sim command.
///
/// # Arguments
///
/// * `seed` - RNG seed (default: config, then random)
/// * `hands` - Number of hands (must be >= 1); fewer are played if the game ends
/// * `json` - Emit JSON lines instead of text
/// * `out` - Output stream for results
/// * `err` - Error stream for warnings and errors
pub fn handle_sim_command(
    seed: Option<u64>,
    hands: u32,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let config = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = resolve_seed(seed, &config);

    let mut table = new_table(seed, &config, true);
    let mut controllers: Controllers<'static> = [ai_seat(0)?, ai_seat(1)?, ai_seat(2)?, ai_seat(3)?];

    let mut played = 0u32;
    while played < hands && !table.is_game_over() {
        let record = play_hand(&mut table, &mut controllers)?;
        played += 1;
        if json {
            writeln!(out, "{}", record.to_json()?)?;
        } else {
            writeln!(out, "{}", summary_line(&record))?;
        }
    }

    if !json {
        writeln!(out, "Seed: {}", seed)?;
        writeln!(out, "Hands played: {}", played)?;
        let hp: Vec<String> = table
            .seats()
            .iter()
            .map(|s| format!("{}={}", seat_name(s.id()), s.hp()))
            .collect();
        writeln!(out, "Final HP: {}", hp.join(" "))?;
    }
    if played < hands {
        ui::display_warning(
            err,
            &format!("game over after {} of {} hands", played, hands),
        )?;
    }
    Ok(())
}

fn summary_line(record: &HandRecord) -> String {
    let winners: Vec<String> = record
        .winners
        .iter()
        .map(|p| format!("{} +{}", seat_name(p.seat), p.amount))
        .collect();
    let hand = record
        .showdown
        .iter()
        .find(|e| record.won_by(e.seat))
        .map(|e| format!(" with {}", e.label))
        .unwrap_or_default();
    format!(
        "Hand {}: board {} pot {} -> {}{}",
        record.hand,
        format_board(&record.board, false),
        record.pot,
        winners.join(", "),
        hand
    )
}
