use alloc::vec::Vec;

use super::*;

/// Predetermined mine positions, for reproducible puzzles and tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout {
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        for &coords in &self.mines {
            if !config.contains(coords) {
                log::warn!("Ignoring mine outside the board at {:?}", coords);
                continue;
            }
            if coords == safe {
                log::warn!("Dropping mine at start cell {:?}", coords);
                continue;
            }
            mines[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(&mines);
        if layout.mine_count() != config.mines {
            log::warn!(
                "Fixed minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
