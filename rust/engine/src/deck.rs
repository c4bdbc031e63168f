use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Seeded 52-card deck. Cards are drawn from the tail.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
    /// Order used by the next `reset` instead of a fresh shuffle
    arranged: Option<Vec<Card>>,
}

impl Deck {
    /// Builds a full deck and shuffles it with a ChaCha20 stream seeded by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
            arranged: None,
        };
        deck.reset();
        deck
    }

    /// Restores all 52 cards and shuffles them. The RNG stream continues,
    /// so consecutive hands see different orders.
    pub fn reset(&mut self) {
        match self.arranged.take() {
            Some(cards) => self.cards = cards,
            None => {
                self.cards = full_deck();
                self.shuffle();
            }
        }
    }

    /// Arranges the next `reset` so that `top` is drawn first, in order.
    /// The remaining cards follow in shuffled order; repeats in `top` are
    /// ignored.
    pub fn arrange_next(&mut self, top: &[Card]) {
        let mut head: Vec<Card> = Vec::with_capacity(top.len());
        for &card in top {
            if !head.contains(&card) {
                head.push(card);
            }
        }
        let mut cards: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !head.contains(c))
            .collect();
        cards.shuffle(&mut self.rng);
        // draws pop from the tail
        cards.extend(head.into_iter().rev());
        self.arranged = Some(cards);
    }

    /// Permutes the cards still in the deck.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn draw_pair(&mut self) -> Result<[Card; 2], GameError> {
        Ok([self.draw()?, self.draw()?])
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
