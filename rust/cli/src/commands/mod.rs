//! Command handler modules for the BloodGamble CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and, for `play`, the input stream are passed in
//! - Errors are propagated as [`CliError`]

pub mod cfg;
pub mod cheats;
pub mod deal;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use cheats::handle_cheats_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::config::Config;
use crate::error::CliError;
use bloodgamble_ai::create_ai;
use bloodgamble_ai::personality::roll_temperament;
use bloodgamble_engine::controller::SeatController;
use bloodgamble_engine::seat::SEAT_COUNT;
use bloodgamble_engine::table::Table;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Mixed into the game seed for the temperament rolls.
const TEMPERAMENT_STREAM: u64 = 0x5EED_7E3E_0000_0001;

/// Seed from the flag, then the config, then fresh entropy.
pub(crate) fn resolve_seed(flag: Option<u64>, config: &Config) -> u64 {
    flag.or(config.seed).unwrap_or_else(rand::random)
}

/// A table for `seed` whose AI seats carry seeded, distinct temperaments.
///
/// With `include_human` the human seat also gets a rolled temperament, which
/// only matters when an AI plays that seat.
pub(crate) fn new_table(seed: u64, config: &Config, include_human: bool) -> Table {
    let mut table = Table::new(seed, config.table_config());
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ TEMPERAMENT_STREAM);
    for id in 0..SEAT_COUNT {
        let temperament = roll_temperament(&mut rng);
        if include_human || !table.seat(id).is_human() {
            table.seat_mut(id).set_temperament(temperament);
        }
    }
    table
}

pub(crate) fn ai_seat(id: usize) -> Result<Box<dyn SeatController>, CliError> {
    create_ai("personality", &format!("AI {}", id))
        .ok_or_else(|| CliError::InvalidInput("unknown AI type: personality".to_string()))
}

/// Starting HP per seat, for HP bars.
pub(crate) fn starting_hp(config: &Config) -> [u32; SEAT_COUNT] {
    std::array::from_fn(|id| if id == 0 { config.human_hp } else { config.ai_hp })
}
