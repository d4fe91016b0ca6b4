use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Command-line options.
#[derive(Parser, Debug, Clone)]
#[command(name = "shoot_em_up")]
#[command(about = "Dodge and destroy waves of enemies and bosses in the terminal")]
pub struct Args {
    /// Seed for a reproducible run; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal itself is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `shoot_em_up=debug`; `RUST_LOG` wins
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Minimum duration of one frame in milliseconds
    #[arg(long, default_value_t = 3)]
    pub frame_millis: u64,
}

impl Args {
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}
