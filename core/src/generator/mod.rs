use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places mines for a board, keeping `safe` free of mines.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout;
}
