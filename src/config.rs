use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "torus-snake")]
#[command(version, about = "Snake on a wrap-around board, in the terminal")]
pub struct Config {
    /// Seed for food placement, for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (level taken from RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Start playing without the controls screen
    #[arg(long)]
    pub skip_intro: bool,
}
