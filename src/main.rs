mod board;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod logging;
mod render;
mod snake;
mod term;

use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

pub type TermInt = u16;
pub type Coords = (u16, u16);
/// Board position as (column, row).
pub type Cell = (u16, u16);

fn main() -> Result<()> {
    let config = config::Config::parse();
    logging::init(config.log_file.as_deref())?;
    info!("Starting with {:?}", config);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = game::SnakeGame::new(rng)?;
    let reason = game.run(config.skip_intro)?;

    info!("Exited: {:?}", reason);
    println!("Best score: {}", game.best());
    Ok(())
}
