//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of every value
//! (default, file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "human_hp": {
//!     "value": 100,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "human_hp": { "value": config.human_hp, "source": sources.human_hp },
        "ai_hp": { "value": config.ai_hp, "source": sources.ai_hp },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "max_bet": { "value": config.max_bet, "source": sources.max_bet },
        "action_cap": { "value": config.action_cap, "source": sources.action_cap },
        "seed": { "value": config.seed, "source": sources.seed },
        "color": { "value": config.color, "source": sources.color },
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
