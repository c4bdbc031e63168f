//! Temperament-driven AI opponent.
//!
//! Decisions depend only on the seat's own cards, the public board and the
//! seat's temperament, so the same view always yields the same decision.
//! Cheats reach the AI indirectly: `ForceFold` and `BluffBoost` raise its
//! tightness and detected cheats raise its suspicion.

use bloodgamble_engine::cards::Card;
use bloodgamble_engine::controller::{Intent, SeatController, TurnView};
use bloodgamble_engine::errors::GameError;
use bloodgamble_engine::hand::{Category, evaluate_hand};
use bloodgamble_engine::round::Street;
use bloodgamble_engine::seat::{PlayerDecision, Temperament};
use rand::Rng;

/// Raises allowed per street before the AI only calls.
const MAX_RAISES_PER_STREET: u32 = 2;

/// AI opponent whose play follows the seat's [`Temperament`].
///
/// # Example
///
/// ```rust
/// use bloodgamble_ai::personality::PersonalityAI;
/// use bloodgamble_engine::controller::SeatController;
///
/// let ai = PersonalityAI::new("AI 1");
/// assert_eq!(ai.name(), "AI 1");
/// ```
#[derive(Debug, Clone)]
pub struct PersonalityAI {
    name: String,
}

impl PersonalityAI {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Hand strength in `[0, 1]`.
    ///
    /// Pre-flop only the hole cards count; afterwards the best hand made
    /// with the board decides.
    pub fn strength(hole: [Card; 2], board: &[Card], street: Street) -> f64 {
        if street == Street::PreFlop || board.is_empty() {
            return preflop_strength(hole);
        }
        let mut cards = hole.to_vec();
        cards.extend_from_slice(board);
        match evaluate_hand(&cards).category {
            Category::HighCard => 0.35,
            Category::OnePair => 0.55,
            Category::TwoPair => 0.7,
            Category::ThreeOfAKind => 0.8,
            Category::Straight => 0.85,
            Category::Flush => 0.9,
            Category::FullHouse => 0.95,
            Category::FourOfAKind | Category::StraightFlush => 1.0,
        }
    }

    /// The decision for `view`.
    pub fn decision(view: &TurnView) -> PlayerDecision {
        let strength = Self::strength(view.hole, &view.board, view.street);
        let t = view.temperament;
        let aggression = t.aggression * (1.0 - 0.5 * t.suspicion);
        let tightness = t.tightness * (1.0 + 0.3 * t.suspicion);
        let fold_threshold = tightness * 0.8;
        let raise_threshold = 0.7 + (1.0 - aggression) * 0.2;

        if strength < fold_threshold {
            return if view.to_call == 0 {
                PlayerDecision::Call
            } else {
                PlayerDecision::Fold
            };
        }
        if view.to_call >= view.hp {
            return if strength > 0.6 {
                PlayerDecision::AllIn
            } else {
                PlayerDecision::Fold
            };
        }
        if strength > raise_threshold
            && view.hp > view.to_call + view.min_raise
            && view.raises_this_street < MAX_RAISES_PER_STREET
        {
            return PlayerDecision::Raise(raise_size(view));
        }
        PlayerDecision::Call
    }
}

/// `max(min_raise, min(min_raise + 10 * aggression, max_bet, hp - call))`
fn raise_size(view: &TurnView) -> u32 {
    let flavored = view.min_raise + (view.temperament.aggression * 10.0) as u32;
    let available = view.hp.saturating_sub(view.to_call);
    flavored.min(view.max_bet).min(available).max(view.min_raise)
}

fn preflop_strength(hole: [Card; 2]) -> f64 {
    let [a, b] = hole;
    let pair = a.rank == b.rank;
    let high = a.rank.value() >= 10 || b.rank.value() >= 10;
    let suited = a.suit == b.suit;
    match (pair, high, suited) {
        (true, _, _) => 0.8,
        (false, true, true) => 0.7,
        (false, true, false) => 0.6,
        (false, false, true) => 0.55,
        _ => 0.5,
    }
}

impl SeatController for PersonalityAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &TurnView) -> Result<Intent, GameError> {
        Ok(Intent::Act(Self::decision(view)))
    }
}

/// Draws a temperament around the table default so AI seats play differently.
pub fn roll_temperament<R: Rng>(rng: &mut R) -> Temperament {
    Temperament {
        aggression: rng.random_range(0.3..=0.8),
        tightness: rng.random_range(0.35..=0.7),
        suspicion: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgamble_engine::cards::{Rank, Suit};
    use bloodgamble_engine::controller::SeatSummary;
    use bloodgamble_engine::seat::SeatKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn view(hole: [Card; 2], board: Vec<Card>, street: Street, to_call: u32, hp: u32) -> TurnView {
        let seats = std::array::from_fn(|id| SeatSummary {
            id,
            kind: if id == 0 { SeatKind::Human } else { SeatKind::Ai },
            hp: 80,
            street_bet: 0,
            committed: 0,
            in_hand: true,
            folded: false,
            all_in: false,
        });
        TurnView {
            seat: 1,
            hand_number: 1,
            street,
            hole,
            hp,
            temperament: Temperament::default(),
            board,
            pot: 6,
            to_call,
            min_raise: 2,
            max_bet: 20,
            street_max: to_call,
            street_bet: 0,
            raises_this_street: 0,
            seats,
            vigilance: 0.0,
            cheat_offers: Vec::new(),
        }
    }

    const SEVEN_TWO: [Card; 2] = [
        Card::new(Rank::Seven, Suit::Hearts),
        Card::new(Rank::Two, Suit::Spades),
    ];

    #[test]
    fn preflop_strength_table() {
        let pair = [card(Rank::Four, Suit::Hearts), card(Rank::Four, Suit::Clubs)];
        let high_suited = [card(Rank::King, Suit::Hearts), card(Rank::Three, Suit::Hearts)];
        let high = [card(Rank::Ten, Suit::Hearts), card(Rank::Three, Suit::Clubs)];
        let suited = [card(Rank::Nine, Suit::Clubs), card(Rank::Three, Suit::Clubs)];
        assert_eq!(preflop_strength(pair), 0.8);
        assert_eq!(preflop_strength(high_suited), 0.7);
        assert_eq!(preflop_strength(high), 0.6);
        assert_eq!(preflop_strength(suited), 0.55);
        assert_eq!(preflop_strength(SEVEN_TWO), 0.5);
    }

    #[test]
    fn default_temperament_calls_preflop() {
        let v = view(SEVEN_TWO, vec![], Street::PreFlop, 2, 80);
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Call);
    }

    #[test]
    fn weak_hand_folds_to_a_bet_but_checks_for_free() {
        let board = vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Nine, Suit::Hearts),
        ];
        let facing = view(SEVEN_TWO, board.clone(), Street::Flop, 4, 80);
        assert_eq!(PersonalityAI::decision(&facing), PlayerDecision::Fold);
        let free = view(SEVEN_TWO, board, Street::Flop, 0, 80);
        assert_eq!(PersonalityAI::decision(&free), PlayerDecision::Call);
    }

    #[test]
    fn strong_hand_raises_within_bounds() {
        let hole = [card(Rank::Ace, Suit::Hearts), card(Rank::Ace, Suit::Spades)];
        let board = vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
        ];
        let v = view(hole, board, Street::Flop, 2, 80);
        // 2 + 10 * 0.5
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Raise(7));
    }

    #[test]
    fn raise_is_capped_by_what_is_left() {
        let hole = [card(Rank::Ace, Suit::Hearts), card(Rank::Ace, Suit::Spades)];
        let board = vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
        ];
        let v = view(hole, board, Street::Flop, 2, 7);
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Raise(5));
    }

    #[test]
    fn stops_raising_after_two_raises() {
        let hole = [card(Rank::Ace, Suit::Hearts), card(Rank::Ace, Suit::Spades)];
        let board = vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
        ];
        let mut v = view(hole, board, Street::Flop, 2, 80);
        v.raises_this_street = 2;
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Call);
    }

    #[test]
    fn short_stack_shoves_only_with_strength() {
        let pair = [card(Rank::Queen, Suit::Hearts), card(Rank::Queen, Suit::Spades)];
        let v = view(pair, vec![], Street::PreFlop, 6, 5);
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::AllIn);
        let v = view(SEVEN_TWO, vec![], Street::PreFlop, 6, 5);
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Fold);
    }

    #[test]
    fn tilted_ai_folds_more() {
        let mut v = view(SEVEN_TWO, vec![], Street::PreFlop, 2, 80);
        v.temperament.tightness = 0.8;
        assert_eq!(PersonalityAI::decision(&v), PlayerDecision::Fold);
    }

    #[test]
    fn rolled_temperaments_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let t = roll_temperament(&mut rng);
            assert!((0.3..=0.8).contains(&t.aggression));
            assert!((0.35..=0.7).contains(&t.tightness));
            assert_eq!(t.suspicion, 0.0);
        }
    }
}
