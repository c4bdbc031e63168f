//! Command-line surface of the `bloodgamble` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bloodgamble",
    version,
    about = "BloodGamble: four-seat poker where the chips are your HP"
)]
pub struct BloodGambleCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play against three AI opponents
    Play {
        /// RNG seed (overrides BLOODGAMBLE_SEED and the config file)
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many hands (default: until the game is over)
        #[arg(long)]
        hands: Option<u32>,
        /// Print cards without ANSI colours
        #[arg(long)]
        no_color: bool,
    },
    /// Let four AI seats play each other
    Sim {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        hands: u32,
        /// Print one JSON hand record per line
        #[arg(long)]
        json: bool,
    },
    /// Deal one hand face up and show who would win
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the cheat catalog
    Cheats,
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Deal { .. } => "deal",
            Commands::Cheats => "cheats",
            Commands::Cfg => "cfg",
        }
    }
}

/// Subcommand names in help order.
pub const COMMANDS: &[&str] = &["play", "sim", "deal", "cheats", "cfg"];
