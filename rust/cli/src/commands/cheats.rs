//! Cheats command: prints the cheat catalog.

use crate::error::CliError;
use bloodgamble_engine::cheats::{CheatKind, MAX_DETECTION, MAX_VIGILANCE, Severity};
use std::io::Write;

pub fn handle_cheats_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<17} {:>6} {:>8} {:>8} {:>9}  target  description",
        "name", "detect", "severity", "penalty", "cooldown"
    )?;
    for kind in CheatKind::ALL {
        let spec = kind.spec();
        let severity = match spec.severity {
            Severity::Small => "small",
            Severity::Major => "major",
        };
        writeln!(
            out,
            "{:<17} {:>5.0}% {:>8} {:>5} HP {:>3} hands  {:<6}  {}",
            kind.name(),
            spec.base_detect * 100.0,
            severity,
            spec.hp_penalty,
            spec.cooldown,
            if spec.needs_target { "AI" } else { "-" },
            spec.description
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Detection grows with table vigilance (up to {:.2}), the target's suspicion,",
        MAX_VIGILANCE
    )?;
    writeln!(
        out,
        "later streets and repeated cheating, and never exceeds {:.0}%.",
        MAX_DETECTION * 100.0
    )?;
    Ok(())
}
