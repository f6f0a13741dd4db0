//! Command-line argument definitions for the pachisim CLI.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pachisim",
    version,
    about = "Pachislot simulator: interactive play and batch spin simulation"
)]
pub struct PachiCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play an interactive session (commands read from stdin)
    Play {
        /// Starting ball count (default: configured value)
        #[arg(long)]
        balls: Option<u32>,
        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a scripted launch-flow session and print a summary
    Sim {
        /// Number of balls to launch
        #[arg(long, default_value_t = 100)]
        spins: u64,
        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Write JSONL spin records to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Display the resolved configuration and value sources
    Cfg,
}
