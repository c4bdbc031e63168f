use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::round::Street;
use crate::seat::Temperament;

/// Vigilance never climbs past this.
pub const MAX_VIGILANCE: f64 = 0.6;
/// AI suspicion never climbs past this.
pub const MAX_SUSPICION: f64 = 0.5;
/// Detection probability is clamped to `[0, MAX_DETECTION]`.
pub const MAX_DETECTION: f64 = 0.95;

const REPEAT_PENALTY: f64 = 0.03;
const RECENT_WINDOW: usize = 5;
const VIGILANCE_PER_DETECT: f64 = 0.05;
const VIGILANCE_PER_HUMAN_WIN: f64 = 0.02;
const VIGILANCE_DECAY: f64 = 0.01;
pub(crate) const SUSPICION_PER_DETECT: f64 = 0.1;
pub(crate) const FORCE_FOLD_TIGHTNESS: f64 = 0.3;
pub(crate) const BLUFF_BOOST_TIGHTNESS: f64 = 0.2;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    Small,
    Major,
}

/// Static properties of one ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheatSpec {
    pub base_detect: f64,
    pub severity: Severity,
    pub hp_penalty: u32,
    /// hands before the ability can be used again
    pub cooldown: u32,
    pub needs_target: bool,
    pub description: &'static str,
}

/// The fixed catalog of cheat abilities available to the human seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CheatKind {
    SwapHands,
    PeekOpponentHole,
    MuckSwap,
    ForceFold,
    StackPeek,
    CardMarking,
    BluffBoost,
}

impl CheatKind {
    pub const ALL: [CheatKind; 7] = [
        CheatKind::SwapHands,
        CheatKind::PeekOpponentHole,
        CheatKind::MuckSwap,
        CheatKind::ForceFold,
        CheatKind::StackPeek,
        CheatKind::CardMarking,
        CheatKind::BluffBoost,
    ];

    pub fn spec(self) -> CheatSpec {
        use CheatKind::*;
        use Severity::*;
        let (base_detect, severity, hp_penalty, cooldown, needs_target, description) = match self {
            SwapHands => (
                0.10,
                Major,
                10,
                4,
                false,
                "Swap your hole cards with 2 random cards from the deck",
            ),
            PeekOpponentHole => (0.06, Small, 5, 2, true, "Peek at an opponent's hole cards"),
            MuckSwap => (
                0.18,
                Major,
                15,
                5,
                false,
                "Muck the next deck card and reshuffle what is left",
            ),
            ForceFold => (
                0.12,
                Small,
                8,
                4,
                true,
                "Make the target AI fold more often this hand",
            ),
            StackPeek => (
                0.05,
                Small,
                4,
                3,
                true,
                "Reveal an AI's HP and behavioral tendencies",
            ),
            CardMarking => (0.15, Major, 12, 6, false, "Reshuffle the deck in your favor"),
            BluffBoost => (
                0.08,
                Small,
                6,
                3,
                false,
                "Make every AI more cautious this hand",
            ),
        };
        CheatSpec {
            base_detect,
            severity,
            hp_penalty,
            cooldown,
            needs_target,
            description,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CheatKind::SwapHands => "SwapHands",
            CheatKind::PeekOpponentHole => "PeekOpponentHole",
            CheatKind::MuckSwap => "MuckSwap",
            CheatKind::ForceFold => "ForceFold",
            CheatKind::StackPeek => "StackPeek",
            CheatKind::CardMarking => "CardMarking",
            CheatKind::BluffBoost => "BluffBoost",
        }
    }

    /// Case-insensitive lookup by catalog name.
    pub fn from_name(name: &str) -> Option<CheatKind> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

/// What a successful cheat changed. Revealed information goes only to the caster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheatEffect {
    HoleRedrawn { cards: [Card; 2] },
    HoleRevealed { target: usize, cards: [Card; 2] },
    NextCardMucked,
    TemperamentShaken { target: usize, tightness: f64 },
    ProfileRevealed { target: usize, hp: u32, temperament: Temperament },
    DeckReshuffled,
    TableTightened,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheatOutcome {
    Succeeded(CheatEffect),
    Detected { hp_penalty: u32 },
}

/// Table-wide detection state: vigilance, recent cheat history and the
/// RNG used for detection rolls.
#[derive(Debug)]
pub struct CheatMonitor {
    vigilance: f64,
    recent: VecDeque<CheatKind>,
    rng: ChaCha20Rng,
}

impl CheatMonitor {
    pub fn new(seed: u64) -> Self {
        Self {
            vigilance: 0.0,
            recent: VecDeque::with_capacity(RECENT_WINDOW),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn vigilance(&self) -> f64 {
        self.vigilance
    }

    pub fn recent(&self) -> impl Iterator<Item = CheatKind> + '_ {
        self.recent.iter().copied()
    }

    /// Chance that `kind` is detected right now. `target_suspicion` is 0 for
    /// untargeted abilities.
    pub fn detection_probability(&self, kind: CheatKind, target_suspicion: f64, street: Street) -> f64 {
        let uses = self.recent.iter().filter(|&&k| k == kind).count() as f64;
        let p = kind.spec().base_detect
            * (1.0 + self.vigilance)
            * (1.0 + target_suspicion)
            * street_factor(street)
            + REPEAT_PENALTY * uses;
        p.clamp(0.0, MAX_DETECTION)
    }

    pub(crate) fn roll(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    pub(crate) fn record_use(&mut self, kind: CheatKind) {
        if self.recent.len() == RECENT_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(kind);
    }

    pub(crate) fn on_detected(&mut self) {
        self.vigilance = (self.vigilance + VIGILANCE_PER_DETECT).min(MAX_VIGILANCE);
    }

    pub(crate) fn after_hand(&mut self, human_won: bool) {
        self.vigilance = if human_won {
            (self.vigilance + VIGILANCE_PER_HUMAN_WIN).min(MAX_VIGILANCE)
        } else {
            (self.vigilance - VIGILANCE_DECAY).max(0.0)
        };
    }

    #[cfg(test)]
    pub(crate) fn set_vigilance(&mut self, v: f64) {
        self.vigilance = v;
    }
}

fn street_factor(street: Street) -> f64 {
    match street {
        Street::PreFlop => 0.9,
        Street::Flop => 1.0,
        Street::Turn => 1.1,
        Street::River => 1.2,
        Street::Showdown => 1.3,
    }
}
