use super::*;

/// Purely random placement by rejection sampling. The safe cell is never mined.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout {
        use rand::prelude::*;

        let (width, height) = config.size;
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // a valid config always leaves the safe cell free, this only guards
        // against an unchecked config looping forever
        let mines_wanted = config.mines.min(config.total_cells().saturating_sub(1));
        if mines_wanted != config.mines {
            log::warn!(
                "Cannot keep start cell safe, placing {} mines instead of {}",
                mines_wanted,
                config.mines
            );
        }

        let mut mines_placed: CellCount = 0;
        let mut attempts: u64 = 0;
        while mines_placed < mines_wanted {
            attempts += 1;
            let coords: Coord2 = (rng.random_range(0..width), rng.random_range(0..height));
            if coords == safe || mines[coords.to_nd_index()] {
                continue;
            }
            mines[coords.to_nd_index()] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} attempts, safe cell {:?}",
            mines_placed,
            width,
            height,
            attempts,
            safe
        );
        MineLayout::from_mine_mask(&mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_requested_mines_away_from_safe_cell() {
        let config = GameConfig::new((9, 9), 10).unwrap();

        for seed in 0..32 {
            let layout = RandomMinefieldGenerator::new(seed).generate(config, (4, 4));
            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.iter_mines().count(), 10);
            assert!(!layout.contains_mine((4, 4)));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::new((16, 16), 40).unwrap();

        let a = RandomMinefieldGenerator::new(7).generate(config, (0, 0));
        let b = RandomMinefieldGenerator::new(7).generate(config, (0, 0));

        assert_eq!(a, b);
    }

    #[test]
    fn nearly_full_board_leaves_only_safe_cell() {
        let config = GameConfig::new((3, 3), 8).unwrap();

        let layout = RandomMinefieldGenerator::new(1).generate(config, (1, 2));

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 2)));
        assert_eq!(layout.adjacent_mine_count((1, 2)), 5);
    }
}
