use std::io;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{Board, CellCount, Coord};

mod command;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Play Minesweeper on the command line", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    height: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    /// The forced seed, or a fresh one from the thread-local generator.
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed();
    log::debug!("seed: {}", seed);

    let board = Board::new(args.width, args.height, args.mines, seed).with_context(|| {
        format!(
            "cannot create a {}x{} board with {} mines",
            args.width, args.height, args.mines
        )
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = session::Session::new(board);
    let end_state = session.run(stdin.lock(), stdout.lock())?;
    log::debug!(
        "session ended: {:?}, {} cells revealed",
        end_state,
        session.board().num_revealed()
    );
    Ok(())
}
