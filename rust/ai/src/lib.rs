//! # bloodgamble-ai: AI Opponents for BloodGamble
//!
//! AI seats implement the engine's [`SeatController`] trait, so the round
//! engine drives them exactly like the human seat.
//!
//! ## Core Components
//!
//! - [`personality`] - Temperament-driven opponent
//! - [`create_ai`] - Factory function for creating AI opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use bloodgamble_ai::create_ai;
//! use bloodgamble_engine::controller::Controllers;
//! use bloodgamble_engine::round::play_hand;
//! use bloodgamble_engine::table::{Table, TableConfig};
//!
//! let mut table = Table::new(42, TableConfig::default());
//! let mut seats: Controllers = std::array::from_fn(|id| {
//!     create_ai("personality", &format!("AI {id}")).expect("known AI type")
//! });
//! let record = play_hand(&mut table, &mut seats).expect("hand plays out");
//! println!("hand {} pot {}", record.hand, record.pot);
//! ```
//!
//! ## AI Types
//!
//! - `"personality"` - reads aggression, tightness and suspicion from its seat

use bloodgamble_engine::controller::SeatController;

pub mod personality;

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["personality"];

/// Factory function to create AI opponents by type string.
///
/// Returns `None` for an unknown type.
///
/// # Example
///
/// ```rust
/// use bloodgamble_ai::create_ai;
///
/// let ai = create_ai("personality", "AI 2").expect("known AI type");
/// assert_eq!(ai.name(), "AI 2");
/// assert!(create_ai("oracle", "AI 3").is_none());
/// ```
pub fn create_ai(ai_type: &str, name: &str) -> Option<Box<dyn SeatController>> {
    match ai_type {
        "personality" => Some(Box::new(personality::PersonalityAI::new(name))),
        _ => None,
    }
}
