//! Card, board, and action formatters for terminal display.
//!
//! Cards print as rank then suit letter (`AH`, `10D`, `QS`). With colour
//! enabled, hearts and diamonds are wrapped in red ANSI escapes; the
//! plain form is used for logs, JSON-adjacent output and `--no-color`.
//!
//! ## Example
//!
//! ```rust
//! use bloodgamble_engine::cards::{Card, Rank, Suit};
//! use bloodgamble_cli::formatters::{format_board, format_card};
//!
//! let ten = Card::new(Rank::Ten, Suit::Diamonds);
//! assert_eq!(format_card(&ten, false), "10D");
//! assert_eq!(format_card(&ten, true), "\x1b[31m10D\x1b[0m");
//! assert_eq!(format_board(&[ten], false), "[10D]");
//! ```

use bloodgamble_engine::cards::{Card, Rank, Suit};
use bloodgamble_engine::cheats::CheatEffect;
use bloodgamble_engine::rules::ValidatedAction;
use bloodgamble_engine::seat::HUMAN_SEAT;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub fn format_rank(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn format_suit(suit: Suit) -> char {
    match suit {
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
        Suit::Clubs => 'C',
        Suit::Spades => 'S',
    }
}

/// Format a Card as rank followed by suit letter, red suits coloured when `color` is set.
pub fn format_card(card: &Card, color: bool) -> String {
    let text = format!("{}{}", format_rank(card.rank), format_suit(card.suit));
    if color && card.suit.is_red() {
        format!("{RED}{text}{RESET}")
    } else {
        text
    }
}

/// Space-separated cards, `--` for none.
pub fn format_cards(cards: &[Card], color: bool) -> String {
    if cards.is_empty() {
        return "--".to_string();
    }
    cards
        .iter()
        .map(|c| format_card(c, color))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a board as `[AH KD 10C]`.
pub fn format_board(board: &[Card], color: bool) -> String {
    let cards: Vec<String> = board.iter().map(|c| format_card(c, color)).collect();
    format!("[{}]", cards.join(" "))
}

/// "You" for the human seat, "AI n" otherwise.
pub fn seat_name(seat: usize) -> String {
    if seat == HUMAN_SEAT {
        "You".to_string()
    } else {
        format!("AI {}", seat)
    }
}

/// Action phrase in third person, e.g. `raises by 4 (puts in 6 HP)`.
pub fn format_action(action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => "folds".to_string(),
        ValidatedAction::Check => "checks".to_string(),
        ValidatedAction::Call(n) => format!("calls {} HP", n),
        ValidatedAction::Raise { total, raise_by } => {
            format!("raises by {} (puts in {} HP)", raise_by, total)
        }
        ValidatedAction::AllIn(n) => format!("goes all-in for {} HP", n),
    }
}

/// Percentage with no decimals.
pub fn format_probability(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}

/// HP as a ten-segment bar, e.g. `[#####-----] 40/80`.
pub fn format_hp_bar(hp: u32, max: u32) -> String {
    let max = max.max(1);
    let filled = ((hp.min(max) as u64 * 10).div_ceil(max as u64)) as usize;
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        hp,
        max
    )
}

pub fn format_cheat_effect(effect: &CheatEffect, color: bool) -> String {
    match effect {
        CheatEffect::HoleRedrawn { cards } => {
            format!("your new hole cards: {}", format_cards(cards, color))
        }
        CheatEffect::HoleRevealed { target, cards } => format!(
            "{} holds {}",
            seat_name(*target),
            format_cards(cards, color)
        ),
        CheatEffect::NextCardMucked => "the next card was mucked and the deck reshuffled".into(),
        CheatEffect::TemperamentShaken { target, tightness } => format!(
            "{} is rattled (tightness {:.2})",
            seat_name(*target),
            tightness
        ),
        CheatEffect::ProfileRevealed {
            target,
            hp,
            temperament,
        } => format!(
            "{}: {} HP, aggression {:.2}, tightness {:.2}, suspicion {:.2}",
            seat_name(*target),
            hp,
            temperament.aggression,
            temperament.tightness,
            temperament.suspicion
        ),
        CheatEffect::DeckReshuffled => "the deck was reshuffled".into(),
        CheatEffect::TableTightened => "every AI plays more cautiously this hand".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgamble_engine::seat::Temperament;

    #[test]
    fn cards_use_rank_then_suit_letter() {
        let cases = [
            (Card::new(Rank::Ace, Suit::Hearts), "AH"),
            (Card::new(Rank::Ten, Suit::Diamonds), "10D"),
            (Card::new(Rank::Two, Suit::Clubs), "2C"),
            (Card::new(Rank::Queen, Suit::Spades), "QS"),
        ];
        for (card, expected) in cases {
            assert_eq!(format_card(&card, false), expected);
        }
    }

    #[test]
    fn only_red_suits_are_coloured() {
        let spade = Card::new(Rank::King, Suit::Spades);
        let heart = Card::new(Rank::King, Suit::Hearts);
        assert_eq!(format_card(&spade, true), "KS");
        assert_eq!(format_card(&heart, true), "\x1b[31mKH\x1b[0m");
    }

    #[test]
    fn empty_collections() {
        assert_eq!(format_cards(&[], false), "--");
        assert_eq!(format_board(&[], false), "[]");
    }

    #[test]
    fn actions_read_as_phrases() {
        assert_eq!(format_action(&ValidatedAction::Check), "checks");
        assert_eq!(format_action(&ValidatedAction::Call(2)), "calls 2 HP");
        assert_eq!(
            format_action(&ValidatedAction::Raise {
                total: 6,
                raise_by: 4
            }),
            "raises by 4 (puts in 6 HP)"
        );
        assert_eq!(
            format_action(&ValidatedAction::AllIn(13)),
            "goes all-in for 13 HP"
        );
    }

    #[test]
    fn hp_bar_rounds_up_partial_segments() {
        assert_eq!(format_hp_bar(80, 80), "[##########] 80/80");
        assert_eq!(format_hp_bar(1, 80), "[#---------] 1/80");
        assert_eq!(format_hp_bar(0, 80), "[----------] 0/80");
        // winnings above the starting HP fill the bar
        assert_eq!(format_hp_bar(120, 100), "[##########] 120/100");
    }

    #[test]
    fn seat_names() {
        assert_eq!(seat_name(0), "You");
        assert_eq!(seat_name(3), "AI 3");
    }

    #[test]
    fn profile_effect_lists_temperament() {
        let effect = CheatEffect::ProfileRevealed {
            target: 2,
            hp: 61,
            temperament: Temperament::default(),
        };
        assert_eq!(
            format_cheat_effect(&effect, false),
            "AI 2: 61 HP, aggression 0.50, tightness 0.50, suspicion 0.00"
        );
    }

    #[test]
    fn probabilities_are_whole_percentages() {
        assert_eq!(format_probability(0.123), "12%");
        assert_eq!(format_probability(0.95), "95%");
    }
}
