use anyhow::Result;
use clap::Parser;
use rand::RngExt;

use sapper_core::{prompt_mine_count, Board, Game, GameConfig, DEFAULT_COLS, DEFAULT_ROWS};

use crate::io::{StdinSource, StdoutSink};

mod io;

#[derive(Parser, Debug)]
#[command(version, about = "Console minesweeper on a 9x9 grid", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {seed}");

    let mut input = StdinSource;
    let mut output = StdoutSink;
    let size = (DEFAULT_ROWS, DEFAULT_COLS);
    let mines = prompt_mine_count(&mut input, &mut output, size)?;

    let board = Board::new(GameConfig::new(DEFAULT_ROWS, DEFAULT_COLS, mines), seed)?;
    Game::new(board, input, output).run()?;
    Ok(())
}
