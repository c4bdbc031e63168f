use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cheats::CheatKind;
use crate::hand::Category;
use crate::round::Street;
use crate::rules::ValidatedAction;

/// One validated action in the order it was applied.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street: Street,
    pub action: ValidatedAction,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub seat: usize,
    pub hole: [Card; 2],
    pub category: Category,
    /// "Full House", "Royal Flush", ...
    pub label: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CheatRecord {
    pub seat: usize,
    pub street: Street,
    pub kind: CheatKind,
    pub detected: bool,
}

/// Complete record of one hand, serialized as a JSON line by `sim --json`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// 1-based hand counter for the table
    pub hand: u32,
    /// Seed the table was created with
    pub seed: u64,
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    /// Empty when everyone but one seat folded
    #[serde(default)]
    pub showdown: Vec<ShowdownEntry>,
    pub winners: Vec<Payout>,
    #[serde(default)]
    pub cheats: Vec<CheatRecord>,
    /// Pot before it was awarded
    pub pot: u32,
    /// HP each seat put into the pot this hand
    pub committed: Vec<u32>,
    /// HP per seat after settlement
    pub hp_after: Vec<u32>,
    /// RFC3339 timestamp
    pub ts: String,
}

impl HandRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn won_by(&self, seat: usize) -> bool {
        self.winners.iter().any(|p| p.seat == seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn sample() -> HandRecord {
        HandRecord {
            hand: 3,
            seed: 42,
            dealer: 0,
            small_blind: 1,
            big_blind: 2,
            actions: vec![ActionRecord {
                seat: 3,
                street: Street::PreFlop,
                action: ValidatedAction::Fold,
            }],
            board: vec![],
            showdown: vec![],
            winners: vec![Payout { seat: 2, amount: 3 }],
            cheats: vec![CheatRecord {
                seat: 0,
                street: Street::PreFlop,
                kind: CheatKind::BluffBoost,
                detected: false,
            }],
            pot: 3,
            committed: vec![0, 1, 2, 0],
            hp_after: vec![100, 79, 81, 80],
            ts: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn json_line_reads_back() {
        let rec = sample();
        let line = rec.to_json().unwrap();
        assert!(!line.contains('\n'));
        let back: HandRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn missing_optional_sections_default_to_empty() {
        let mut v = serde_json::to_value(sample()).unwrap();
        let obj = v.as_object_mut().unwrap();
        obj.remove("showdown");
        obj.remove("cheats");
        let back: HandRecord = serde_json::from_value(v).unwrap();
        assert!(back.showdown.is_empty());
        assert!(back.cheats.is_empty());
    }

    #[test]
    fn won_by_checks_payouts() {
        let mut rec = sample();
        assert!(rec.won_by(2));
        assert!(!rec.won_by(0));
        rec.showdown.push(ShowdownEntry {
            seat: 2,
            hole: [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts)],
            category: Category::OnePair,
            label: "One Pair".to_string(),
        });
        assert_eq!(rec.showdown.len(), 1);
    }
}
