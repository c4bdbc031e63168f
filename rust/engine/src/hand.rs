use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Value of the best five-card hand found in a set of cards.
///
/// Ordering is category first, then `tiebreak` element by element, higher
/// is better. `description` is derived from the other two fields.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    /// Rank values (2..=14), most significant first
    pub tiebreak: Vec<u8>,
    pub description: String,
}

impl HandValue {
    fn new(category: Category, tiebreak: Vec<u8>) -> Self {
        let description = if category == Category::StraightFlush
            && tiebreak.first() == Some(&Rank::Ace.value())
        {
            "Royal Flush".to_string()
        } else {
            category.label().to_string()
        };
        Self {
            category,
            tiebreak,
            description,
        }
    }

    pub fn is_royal(&self) -> bool {
        self.category == Category::StraightFlush && self.tiebreak.first() == Some(&14)
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks the best five-card hand among `cards` (normally 5 to 7 distinct cards).
///
/// Pure and deterministic: the order of `cards` does not matter. Fewer than
/// five cards never panic, they simply cannot make straights or flushes.
///
/// # Examples
///
/// ```
/// use bloodgamble_engine::cards::{Card, Rank, Suit};
/// use bloodgamble_engine::hand::{evaluate_hand, Category};
///
/// let wheel = [
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Two, Suit::Diamonds),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Spades),
///     Card::new(Rank::Five, Suit::Hearts),
/// ];
/// let value = evaluate_hand(&wheel);
/// assert_eq!(value.category, Category::Straight);
/// assert_eq!(value.tiebreak, vec![5]);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandValue {
    debug_assert!(cards.len() <= 7, "at most 7 cards are evaluated");

    let mut sorted = cards.to_vec();
    sorted.sort_unstable_by(|a, b| b.rank.cmp(&a.rank));

    let mut suit_counts = [0u8; 4];
    for c in &sorted {
        suit_counts[c.suit.index()] += 1;
    }
    let flush_ranks: Option<Vec<u8>> = suit_counts.iter().position(|&n| n >= 5).map(|s| {
        sorted
            .iter()
            .filter(|c| c.suit.index() == s)
            .map(|c| c.rank.value())
            .collect()
    });

    let distinct = distinct_ranks(&sorted);
    let groups = rank_groups(&sorted);

    if let Some(ranks) = &flush_ranks {
        if let Some(high) = straight_high(&dedup_desc(ranks)) {
            return HandValue::new(Category::StraightFlush, vec![high]);
        }
    }

    if groups[0].0 == 4 {
        let quad = groups[0].1;
        let kicker = distinct.iter().copied().find(|&r| r != quad);
        let mut tb = vec![quad];
        tb.extend(kicker);
        return HandValue::new(Category::FourOfAKind, tb);
    }

    if groups[0].0 == 3 && groups.len() > 1 && groups[1].0 >= 2 {
        return HandValue::new(Category::FullHouse, vec![groups[0].1, groups[1].1]);
    }

    if let Some(ranks) = flush_ranks {
        return HandValue::new(Category::Flush, ranks.into_iter().take(5).collect());
    }

    if let Some(high) = straight_high(&distinct) {
        return HandValue::new(Category::Straight, vec![high]);
    }

    if groups[0].0 == 3 {
        let trips = groups[0].1;
        let mut tb = vec![trips];
        tb.extend(kickers(&distinct, &[trips], 2));
        return HandValue::new(Category::ThreeOfAKind, tb);
    }

    if groups[0].0 == 2 && groups.len() > 1 && groups[1].0 == 2 {
        // groups are sorted by rank within the same count, so [0] is the higher pair
        let (high, low) = (groups[0].1, groups[1].1);
        let mut tb = vec![high, low];
        tb.extend(kickers(&distinct, &[high, low], 1));
        return HandValue::new(Category::TwoPair, tb);
    }

    if groups[0].0 == 2 {
        let pair = groups[0].1;
        let mut tb = vec![pair];
        tb.extend(kickers(&distinct, &[pair], 3));
        return HandValue::new(Category::OnePair, tb);
    }

    HandValue::new(Category::HighCard, distinct.into_iter().take(5).collect())
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

fn distinct_ranks(sorted_desc: &[Card]) -> Vec<u8> {
    dedup_desc(&sorted_desc.iter().map(|c| c.rank.value()).collect::<Vec<_>>())
}

fn dedup_desc(ranks: &[u8]) -> Vec<u8> {
    let mut v = ranks.to_vec();
    v.sort_unstable_by(|a, b| b.cmp(a));
    v.dedup();
    v
}

/// (count, rank) pairs sorted by count desc, then rank desc.
/// Never empty for a non-empty hand; an empty hand yields a single (0, 0).
fn rank_groups(cards: &[Card]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    if groups.is_empty() {
        groups.push((0, 0));
    }
    groups
}

fn kickers(distinct_desc: &[u8], used: &[u8], n: usize) -> Vec<u8> {
    distinct_desc
        .iter()
        .copied()
        .filter(|r| !used.contains(r))
        .take(n)
        .collect()
}

/// High card of the best straight in a descending list of distinct ranks.
fn straight_high(distinct_desc: &[u8]) -> Option<u8> {
    if distinct_desc.len() < 5 {
        return None;
    }
    for window in distinct_desc.windows(5) {
        if window.windows(2).all(|w| w[0] == w[1] + 1) {
            return Some(window[0]);
        }
    }
    let wheel = [14u8, 5, 4, 3, 2];
    if wheel.iter().all(|r| distinct_desc.contains(r)) {
        return Some(5);
    }
    None
}
