//! Deal command handler for single hand dealing and display.
//!
//! Deals all four seats and a full board from a seeded deck, burning before
//! each street the way a real hand does, then evaluates every seat and names
//! the winner(s). No betting happens.

use super::resolve_seed;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_cards, seat_name};
use bloodgamble_engine::deck::Deck;
use bloodgamble_engine::hand::{HandValue, evaluate_hand};
use bloodgamble_engine::seat::SEAT_COUNT;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional RNG seed for deterministic dealing
/// * `out` - Output stream for command results
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let config = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = resolve_seed(seed, &config);
    let color = config.color;

    let mut deck = Deck::new_with_seed(seed);
    let mut holes = Vec::with_capacity(SEAT_COUNT);
    for _ in 0..SEAT_COUNT {
        holes.push(deck.draw_pair()?);
    }
    let mut board = Vec::with_capacity(5);
    for reveal in [3, 1, 1] {
        deck.burn()?;
        board.extend(deck.draw_n(reveal)?);
    }

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Board: {}", format_board(&board, color))?;
    let values: Vec<HandValue> = holes
        .iter()
        .map(|hole| {
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&board);
            evaluate_hand(&cards)
        })
        .collect();
    for (id, (hole, value)) in holes.iter().zip(&values).enumerate() {
        writeln!(
            out,
            "{:<4} {}  {}",
            seat_name(id),
            format_cards(hole, color),
            value.description
        )?;
    }

    if let Some(best) = values.iter().max() {
        let winners: Vec<String> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| *v == best)
            .map(|(id, _)| seat_name(id))
            .collect();
        writeln!(out, "Winner: {} with {}", winners.join(", "), best.description)?;
    }
    Ok(())
}
