//! # bloodgamble-engine: HP Poker Round Engine
//!
//! A deterministic four-seat hold'em variant where the chips are hit points.
//! One human seat plays three AI seats; a seat with no HP left is out.
//! The human may also cheat, at the risk of being caught.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Best-five-card evaluation and comparison
//! - [`rules`] - Decision validation (calls, raises, all-ins)
//! - [`seat`] - Seat state: HP, hole cards, temperament, cooldowns
//! - [`table`] - Persistent table state and cheat resolution
//! - [`cheats`] - Cheat catalog and detection model
//! - [`betting`] - Betting state machine for one street
//! - [`round`] - Hand orchestration from the deal to settlement
//! - [`controller`] - The `SeatController` trait and what a seat may see
//! - [`events`] - Table events delivered to controllers
//! - [`record`] - Serializable hand records
//! - [`errors`] - Error types for game and cheat operations
//!
//! ## Quick Start
//!
//! ```rust
//! use bloodgamble_engine::cards::{Card, Rank, Suit};
//! use bloodgamble_engine::hand::{evaluate_hand, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let value = evaluate_hand(&cards);
//! assert_eq!(value.category, Category::StraightFlush);
//! assert_eq!(value.description, "Royal Flush");
//! ```
//!
//! ## Playing a Hand
//!
//! Every seat is driven by a [`controller::SeatController`]. The same seed
//! always deals the same cards:
//!
//! ```rust
//! use bloodgamble_engine::controller::{Controllers, Intent, SeatController, TurnView};
//! use bloodgamble_engine::errors::GameError;
//! use bloodgamble_engine::round::play_hand;
//! use bloodgamble_engine::seat::PlayerDecision;
//! use bloodgamble_engine::table::{Table, TableConfig};
//!
//! struct Caller;
//! impl SeatController for Caller {
//!     fn name(&self) -> &str {
//!         "caller"
//!     }
//!     fn decide(&mut self, _view: &TurnView) -> Result<Intent, GameError> {
//!         Ok(Intent::Act(PlayerDecision::Call))
//!     }
//! }
//!
//! let mut table = Table::new(42, TableConfig::default());
//! let mut seats: Controllers = std::array::from_fn(|_| Box::new(Caller) as Box<dyn SeatController>);
//! let record = play_hand(&mut table, &mut seats).expect("hand plays out");
//! assert_eq!(record.board.len(), 5);
//! assert_eq!(record.winners.iter().map(|p| p.amount).sum::<u32>(), record.pot);
//! ```

pub mod betting;
pub mod cards;
pub mod cheats;
pub mod controller;
pub mod deck;
pub mod errors;
pub mod events;
pub mod hand;
pub mod record;
pub mod round;
pub mod rules;
pub mod seat;
pub mod table;
